use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Visibility of the unlock prompt (modal)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnlockPromptState {
    visible: bool,
}

impl UnlockPromptState {
    pub fn visible() -> Self {
        Self { visible: true }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// PIN submission payload
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct UnlockRequest {
    #[validate(pattern = r"^[0-9]{4,8}$")]
    pub pin: String,
}

// Debug by hand so request logging never carries the PIN
impl std::fmt::Debug for UnlockRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockRequest").field("pin", &"****").finish()
    }
}

/// Unlock outcome as reported by the gateway
///
/// `ok == false` is a collaborator-reported rejection (e.g. wrong PIN),
/// not a transport failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnlockResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Binary outcome of a manual re-check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ManualCheckOutcome {
    Ready,
    StillLocked,
}
