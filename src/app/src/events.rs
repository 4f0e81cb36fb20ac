use serde::{Deserialize, Serialize};

use crate::commands::timer::TimerOutput;
use crate::types::*;

/// Events that can happen in the app, grouped by update domain
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Gateway(GatewayEvent),
    Unlock(UnlockEvent),
    Ui(UiEvent),
}

/// Status polling lifecycle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    /// Start the poll loop: load the frontend config, arm the recurring
    /// timer and issue the first status query.
    StartPolling,
    /// Tear the poll loop down. Anything still in flight is discarded on
    /// arrival.
    StopPolling,
    /// Sent by the shell on every fire of the poll timer.
    PollTick,

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    ConfigResponse(Result<FrontendConfig, String>),
    #[serde(skip)]
    StatusResponse(Result<GatewaySnapshot, String>),

    // Timer acknowledgements from the shell
    #[serde(skip)]
    TimerAck(TimerOutput),
}

/// Manual re-check and PIN submission
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UnlockEvent {
    ManualCheck,
    SubmitPin {
        pin: String,
    },

    #[serde(skip)]
    SubmitPinResponse(Result<UnlockResult, String>),
}

/// UI actions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowUnlockPrompt,
    DismissUnlockPrompt,
    ClearError,
    ClearSuccess,
    ClearManualCheck,
}
