use simgate_ui::gateway_client::{GatewayHttpClient, GatewayStatusSource};
use simgate_ui_core::{ConnectionState, SimStatus, UnlockRequest};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

// Integration tests for GatewayHttpClient against a scripted HTTP server

async fn start_mock_gateway(
    listener: TcpListener,
    ready_tx: oneshot::Sender<()>,
) -> std::io::Result<()> {
    // Signal that the server is ready
    let _ = ready_tx.send(());

    loop {
        let (mut stream, _) = listener.accept().await?;

        tokio::spawn(async move {
            let mut reader = BufReader::new(&mut stream);
            let mut request_line = String::new();

            if reader.read_line(&mut request_line).await.is_err() {
                return;
            }

            // Read the remaining headers, remembering the body length
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).await.is_err() {
                    return;
                }

                if line.trim().is_empty() {
                    break;
                }

                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }

            // Drain the body so the client never sees a closed pipe mid-write
            if content_length > 0 {
                let mut body = vec![0u8; content_length];
                if reader.read_exact(&mut body).await.is_err() {
                    return;
                }
            }

            let response_body = if request_line.starts_with("GET /api/v1/status") {
                r#"{"sim":1,"connection":{"online":false},"firmware_version":"2.3.0"}"#
            } else if request_line.starts_with("POST /api/v1/sim/unlock") {
                r#"{"ok":false,"error":"wrong PIN (2 attempts left)"}"#
            } else {
                r#"{"error":"not found"}"#
            };

            let status_line = if request_line.starts_with("GET /api/v1/status")
                || request_line.starts_with("POST /api/v1/sim/unlock")
            {
                "HTTP/1.1 200 OK"
            } else {
                "HTTP/1.1 404 Not Found"
            };

            let http_response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                response_body.len(),
                response_body
            );

            let _ = stream.write_all(http_response.as_bytes()).await;
        });
    }
}

async fn spawn_mock_gateway() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock gateway listener");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = start_mock_gateway(listener, ready_tx).await;
    });
    ready_rx.await.expect("mock gateway failed to start");

    base_url
}

#[tokio::test]
async fn test_snapshot_maps_wire_status() {
    let base_url = spawn_mock_gateway().await;

    let client =
        GatewayHttpClient::with_base_url(base_url, 5).expect("failed to create gateway client");

    let snapshot = client.snapshot().await.expect("status query failed");

    assert_eq!(snapshot.sim_status, SimStatus::PinRequired);
    assert_eq!(snapshot.connection_state, ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_submit_pin_passes_rejection_through() {
    let base_url = spawn_mock_gateway().await;

    let client =
        GatewayHttpClient::with_base_url(base_url, 5).expect("failed to create gateway client");

    let result = client
        .submit_pin(UnlockRequest {
            pin: "1234".to_string(),
        })
        .await
        .expect("unlock request failed");

    assert!(!result.ok);
    assert_eq!(result.error.as_deref(), Some("wrong PIN (2 attempts left)"));
}

#[tokio::test]
async fn test_firmware_info_checks_minimum_version() {
    let base_url = spawn_mock_gateway().await;

    let client =
        GatewayHttpClient::with_base_url(base_url, 5).expect("failed to create gateway client");

    let info = client.firmware_info().await.expect("status query failed");

    assert_eq!(info.current, "2.3.0");
    assert!(!info.mismatch);
}

#[tokio::test]
async fn test_unreachable_gateway_is_an_error() {
    // bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);

    let client =
        GatewayHttpClient::with_base_url(base_url, 1).expect("failed to create gateway client");

    assert!(client.snapshot().await.is_err());
}
