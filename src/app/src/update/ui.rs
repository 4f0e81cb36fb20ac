use crux_core::Command;

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::types::{SimStatus, UnlockPromptState};
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (prompt visibility, clear messages)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::ShowUnlockPrompt => {
            // The prompt only makes sense while a PIN is actually required;
            // this also keeps "visible while Ready" unrepresentable via the
            // user path.
            if model.sim_status() != SimStatus::PinRequired {
                return Command::done();
            }
            update_field!(model.unlock_prompt, UnlockPromptState::visible())
        }
        UiEvent::DismissUnlockPrompt => {
            update_field!(model.unlock_prompt, UnlockPromptState::hidden())
        }
        UiEvent::ClearError => update_field!(model.error_message, None),
        UiEvent::ClearSuccess => update_field!(model.success_message, None),
        UiEvent::ClearManualCheck => update_field!(model.manual_check, None),
    }
}
