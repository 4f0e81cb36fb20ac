use actix_web::HttpResponse;
use anyhow::{Context, Result, ensure};
use log::error;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::gateway_client::VersionInfo;
use simgate_ui_core::{GatewaySnapshot, UnlockResult};

/// Create the HTTP client used for all gateway device API requests
///
/// The gateway lives on the local network; a request that takes longer
/// than the timeout is as good as failed and must not pile up behind the
/// poll cadence.
pub fn gateway_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to create gateway HTTP client")
}

/// Trait for converting service results into HTTP responses
pub trait ServiceResultResponse {
    fn into_response(self) -> HttpResponse;
}

impl ServiceResultResponse for () {
    fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().finish()
    }
}

impl ServiceResultResponse for String {
    fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().body(self)
    }
}

impl ServiceResultResponse for GatewaySnapshot {
    fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

impl ServiceResultResponse for UnlockResult {
    fn into_response(self) -> HttpResponse {
        // a rejected PIN is a regular outcome, not a server error
        HttpResponse::Ok().json(self)
    }
}

impl ServiceResultResponse for VersionInfo {
    fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Handle a Result by converting its data to an HTTP response
///
/// Puts the data or the error in a corresponding response and logs the
/// failure with the given operation context.
pub fn handle_service_result<T>(result: Result<T>, operation: &str) -> HttpResponse
where
    T: ServiceResultResponse,
{
    match result {
        Ok(data) => data.into_response(),
        Err(e) => {
            error!("{operation} failed: {e:#}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Handle HTTP response by checking status and extracting body
///
/// Ensures the response status is successful and extracts the body text.
pub async fn handle_http_response(res: Response, context_msg: &str) -> Result<String> {
    let status = res.status();
    let body = res.text().await.context("failed to read response body")?;

    ensure!(
        status.is_success(),
        "{context_msg} failed with status {status} and body: {body}"
    );

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simgate_ui_core::{ConnectionState, SimStatus};

    #[test]
    fn test_gateway_http_client_builds() {
        assert!(gateway_http_client(10).is_ok());
    }

    #[test]
    fn test_unit_result_maps_to_ok() {
        let response = handle_service_result(Ok(()), "noop");
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }

    #[test]
    fn test_error_result_maps_to_internal_server_error() {
        let response =
            handle_service_result::<()>(Err(anyhow::anyhow!("gateway unreachable")), "status");
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_snapshot_result_maps_to_json_ok() {
        let snapshot = GatewaySnapshot {
            sim_status: SimStatus::Ready,
            connection_state: ConnectionState::Connected,
        };
        let response = handle_service_result(Ok(snapshot), "status");
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }

    #[test]
    fn test_rejected_unlock_still_maps_to_ok() {
        let result = UnlockResult {
            ok: false,
            error: Some("wrong PIN".to_string()),
        };
        let response = handle_service_result(Ok(result), "unlock");
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }
}
