use serde::{Deserialize, Serialize};

use crate::types::*;

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Gateway state, replaced wholesale on every poll
    pub snapshot: Option<GatewaySnapshot>,

    // Unlock prompt state
    pub unlock_prompt: UnlockPromptState,
    pub manual_check: Option<ManualCheckOutcome>,

    // Frontend configuration delivered by the backend
    pub console_url: Option<String>,
    pub poll_interval_ms: u32,

    // Poll loop state
    pub poller: PollerState,
    pub poll_in_flight: bool,
    pub manual_check_pending: bool,
    pub next_timer_id: u32,

    // UI state
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            snapshot: None,
            unlock_prompt: UnlockPromptState::default(),
            manual_check: None,
            console_url: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            poller: PollerState::default(),
            poll_in_flight: false,
            manual_check_pending: false,
            next_timer_id: 1,
            is_loading: false,
            error_message: None,
            success_message: None,
        }
    }
}

impl Model {
    /// The most recently observed SIM status, `Unknown` before the first
    /// successful poll.
    pub fn sim_status(&self) -> SimStatus {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.sim_status)
            .unwrap_or_default()
    }

    /// Whether the poll loop is armed and accepting poll results.
    pub fn is_polling(&self) -> bool {
        matches!(self.poller, PollerState::Running { .. })
    }

    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Stop loading and clear error
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    /// Set an error message and stop loading
    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }

    /// Set an error message, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    /// Clear the error message without affecting the loading state.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
