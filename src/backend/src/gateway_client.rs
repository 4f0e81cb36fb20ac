#![cfg_attr(feature = "mock", allow(dead_code, unused_imports))]

use crate::{
    config::AppConfig,
    http_client::{gateway_http_client, handle_http_response},
};
use anyhow::{anyhow, Context, Result};
use log::info;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use reqwest::Client;
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use serde_repr::Deserialize_repr;
use simgate_ui_core::{ConnectionState, GatewaySnapshot, SimStatus, UnlockRequest, UnlockResult};
use std::{fmt::Debug, sync::OnceLock};
use trait_variant::make;

/// SIM state codes as reported by the modem service
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, PartialEq)]
#[repr(u8)]
enum WireSimState {
    #[default]
    Unknown = 0,
    PinRequired = 1,
    Ready = 2,
}

impl From<WireSimState> for SimStatus {
    fn from(state: WireSimState) -> Self {
        match state {
            WireSimState::Unknown => SimStatus::Unknown,
            WireSimState::PinRequired => SimStatus::PinRequired,
            WireSimState::Ready => SimStatus::Ready,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    sim: WireSimState,
    connection: WireConnection,
    firmware_version: String,
}

#[derive(Debug, Deserialize)]
struct WireConnection {
    online: bool,
}

impl WireStatus {
    fn snapshot(&self) -> GatewaySnapshot {
        GatewaySnapshot {
            sim_status: self.sim.into(),
            connection_state: if self.connection.online {
                ConnectionState::Connected
            } else {
                ConnectionState::Disconnected
            },
        }
    }
}

/// Gateway firmware version against the minimum this UI supports
#[derive(Clone, Debug, Serialize)]
pub struct VersionInfo {
    pub required: String,
    pub current: String,
    pub mismatch: bool,
}

#[derive(Clone)]
pub struct GatewayHttpClient {
    client: Client,
    base_url: String,
}

#[make(Send)]
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait GatewayStatusSource {
    async fn snapshot(&self) -> Result<GatewaySnapshot>;
    async fn submit_pin(&self, request: UnlockRequest) -> Result<UnlockResult>;
    async fn firmware_info(&self) -> Result<VersionInfo>;
}

impl GatewayHttpClient {
    const REQUIRED_FIRMWARE_VERSION: &str = ">=2.1.0";

    // API endpoint constants
    const STATUS_ENDPOINT: &str = "/api/v1/status";
    const UNLOCK_ENDPOINT: &str = "/api/v1/sim/unlock";

    pub fn new() -> Result<Self> {
        let config = &AppConfig::get().gateway;
        Self::with_base_url(config.api_base_url.clone(), config.request_timeout_secs)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        Ok(GatewayHttpClient {
            client: gateway_http_client(timeout_secs)?,
            base_url: base_url.into(),
        })
    }

    fn required_version() -> &'static VersionReq {
        static REQUIRED_VERSION: OnceLock<VersionReq> = OnceLock::new();
        REQUIRED_VERSION.get_or_init(|| {
            VersionReq::parse(Self::REQUIRED_FIRMWARE_VERSION)
                .expect("invalid REQUIRED_FIRMWARE_VERSION constant")
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET request to the gateway device API
    async fn get(&self, path: &str) -> Result<String> {
        let url = self.build_url(path);
        info!("GET {url}");

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .context(format!("failed to send GET request to {url}"))?;

        handle_http_response(res, &format!("GET {url}")).await
    }

    /// POST request to the gateway device API with JSON body
    async fn post_json(&self, path: &str, body: impl Debug + Serialize) -> Result<String> {
        let url = self.build_url(path);
        info!("POST {url} with body: {body:?}");

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context(format!("failed to send POST request to {url}"))?;

        handle_http_response(res, &format!("POST {url}")).await
    }

    async fn wire_status(&self) -> Result<WireStatus> {
        let body = self.get(Self::STATUS_ENDPOINT).await?;
        serde_json::from_str(&body).context("failed to parse gateway status")
    }
}

impl GatewayStatusSource for GatewayHttpClient {
    async fn snapshot(&self) -> Result<GatewaySnapshot> {
        Ok(self.wire_status().await?.snapshot())
    }

    async fn submit_pin(&self, request: UnlockRequest) -> Result<UnlockResult> {
        let body = self.post_json(Self::UNLOCK_ENDPOINT, request).await?;
        serde_json::from_str(&body).context("failed to parse unlock result")
    }

    async fn firmware_info(&self) -> Result<VersionInfo> {
        let current = self.wire_status().await?.firmware_version;

        let parsed = Version::parse(&current)
            .map_err(|e| anyhow!("failed to parse gateway firmware version: {e}"))?;

        Ok(VersionInfo {
            required: Self::REQUIRED_FIRMWARE_VERSION.to_string(),
            current,
            mismatch: !Self::required_version().matches(&parsed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod build_url {
        use super::*;

        fn create_test_client(base_url: &str) -> GatewayHttpClient {
            GatewayHttpClient {
                client: reqwest::Client::new(),
                base_url: base_url.to_string(),
            }
        }

        #[test]
        fn joins_base_and_path() {
            let client = create_test_client("http://192.168.8.1");
            let url = client.build_url("/api/v1/status");
            assert_eq!(url, "http://192.168.8.1/api/v1/status");
        }

        #[test]
        fn normalizes_trailing_slash_on_base() {
            let client = create_test_client("http://192.168.8.1/");
            let url = client.build_url("/api/v1/status");
            assert_eq!(url, "http://192.168.8.1/api/v1/status");
        }

        #[test]
        fn normalizes_path_without_leading_slash() {
            let client = create_test_client("http://192.168.8.1");
            let url = client.build_url("api/v1/status");
            assert_eq!(url, "http://192.168.8.1/api/v1/status");
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn parses_locked_status() {
            let status: WireStatus = serde_json::from_str(
                r#"{"sim":1,"connection":{"online":false},"firmware_version":"2.3.0"}"#,
            )
            .unwrap();

            let snapshot = status.snapshot();
            assert_eq!(snapshot.sim_status, SimStatus::PinRequired);
            assert_eq!(snapshot.connection_state, ConnectionState::Disconnected);
        }

        #[test]
        fn parses_ready_status() {
            let status: WireStatus = serde_json::from_str(
                r#"{"sim":2,"connection":{"online":true},"firmware_version":"2.3.0"}"#,
            )
            .unwrap();

            let snapshot = status.snapshot();
            assert_eq!(snapshot.sim_status, SimStatus::Ready);
            assert_eq!(snapshot.connection_state, ConnectionState::Connected);
        }

        #[test]
        fn parses_unknown_sim_state() {
            let status: WireStatus = serde_json::from_str(
                r#"{"sim":0,"connection":{"online":false},"firmware_version":"2.3.0"}"#,
            )
            .unwrap();

            assert_eq!(status.snapshot().sim_status, SimStatus::Unknown);
        }

        #[test]
        fn rejects_undefined_sim_code() {
            let result = serde_json::from_str::<WireStatus>(
                r#"{"sim":7,"connection":{"online":false},"firmware_version":"2.3.0"}"#,
            );

            assert!(result.is_err());
        }

        #[test]
        fn parses_unlock_result_with_error() {
            let result: UnlockResult =
                serde_json::from_str(r#"{"ok":false,"error":"wrong PIN (2 attempts left)"}"#)
                    .unwrap();

            assert!(!result.ok);
            assert_eq!(result.error.as_deref(), Some("wrong PIN (2 attempts left)"));
        }
    }

    mod version_requirements {
        use super::*;

        #[test]
        fn required_version_parses_correctly() {
            let version_req = GatewayHttpClient::required_version();
            assert_eq!(version_req.to_string(), ">=2.1.0");
        }

        #[test]
        fn required_version_matches_valid_versions() {
            let version_req = GatewayHttpClient::required_version();

            assert!(version_req.matches(&Version::parse("2.1.0").unwrap()));
            assert!(version_req.matches(&Version::parse("2.3.0").unwrap()));
            assert!(version_req.matches(&Version::parse("3.0.0").unwrap()));
        }

        #[test]
        fn required_version_rejects_older_versions() {
            let version_req = GatewayHttpClient::required_version();

            assert!(!version_req.matches(&Version::parse("2.0.9").unwrap()));
            assert!(!version_req.matches(&Version::parse("1.7.0").unwrap()));
        }
    }

    mod constants {
        use super::*;

        #[test]
        fn api_endpoints_are_correctly_defined() {
            assert_eq!(GatewayHttpClient::STATUS_ENDPOINT, "/api/v1/status");
            assert_eq!(GatewayHttpClient::UNLOCK_ENDPOINT, "/api/v1/sim/unlock");
        }

        #[test]
        fn required_version_constant_is_valid_semver_requirement() {
            let version_req = VersionReq::parse(GatewayHttpClient::REQUIRED_FIRMWARE_VERSION);
            assert!(version_req.is_ok());
        }
    }
}
