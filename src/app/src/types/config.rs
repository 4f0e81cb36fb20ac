use serde::{Deserialize, Serialize};

/// Poll cadence used until the backend config has been loaded, and
/// whenever loading it fails.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 3_000;

/// Frontend configuration served by the backend at `/api/config`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Address of the gateway's own web console, where the PIN can be
    /// entered out-of-band.
    pub console_url: String,
    pub poll_interval_ms: u32,
}
