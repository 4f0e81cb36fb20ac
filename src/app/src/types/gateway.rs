use serde::{Deserialize, Serialize};

/// The SIM card's lock state as reported by the gateway
///
/// Re-evaluated from scratch on every poll: a gateway may report `Ready`
/// and later `PinRequired` again (SIM re-locked after a restart), and the
/// controller treats that like any other transition.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimStatus {
    #[default]
    Unknown,
    PinRequired,
    Ready,
}

/// Whether the gateway currently has an active network connection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

/// One observation of the gateway, produced fresh on every poll
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewaySnapshot {
    pub sim_status: SimStatus,
    pub connection_state: ConnectionState,
}

/// Poll loop lifecycle
///
/// `Running` owns the id of the recurring timer requested from the shell;
/// stopping the loop hands that id back via a cancel effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PollerState {
    #[default]
    Idle,
    Starting,
    Running {
        timer_id: u32,
    },
}
