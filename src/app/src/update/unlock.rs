use crux_core::Command;
use serde_valid::Validate;

use crate::events::{Event, UnlockEvent};
use crate::http_post;
use crate::model::Model;
use crate::types::{UnlockRequest, UnlockResult};
use crate::Effect;

/// Handle manual re-check and PIN submission events
pub fn handle(event: UnlockEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UnlockEvent::ManualCheck => handle_manual_check(model),
        UnlockEvent::SubmitPin { pin } => handle_submit_pin(pin, model),
        UnlockEvent::SubmitPinResponse(result) => handle_submit_pin_response(result, model),
    }
}

fn handle_manual_check(model: &mut Model) -> Command<Effect, Event> {
    if !model.is_polling() {
        return Command::done();
    }

    model.manual_check = None;
    model.manual_check_pending = true;

    // Ride along on a query that is already out instead of issuing a
    // second one.
    if model.poll_in_flight {
        return crux_core::render::render();
    }

    model.poll_in_flight = true;
    Command::all([crux_core::render::render(), super::gateway::poll_status()])
}

fn handle_submit_pin(pin: String, model: &mut Model) -> Command<Effect, Event> {
    let request = UnlockRequest { pin };

    if request.validate().is_err() {
        return model.set_error_and_render("PIN must be 4 to 8 digits".to_string());
    }

    http_post!(Unlock, UnlockEvent, model, "/api/unlock", SubmitPinResponse, "Unlock",
        body_json: &request,
        expect_json: UnlockResult
    )
}

fn handle_submit_pin_response(
    result: Result<UnlockResult, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.stop_loading();

    match result {
        Ok(outcome) if outcome.ok => {
            model.success_message =
                Some("PIN accepted, waiting for the gateway to connect".to_string());

            // Confirm the new state right away instead of waiting for the
            // next tick.
            if model.is_polling() && !model.poll_in_flight {
                model.poll_in_flight = true;
                return Command::all([crux_core::render::render(), super::gateway::poll_status()]);
            }

            crux_core::render::render()
        }
        Ok(outcome) => {
            // The gateway rejected the credential; the observed state is
            // unchanged.
            model.set_error_and_render(
                outcome
                    .error
                    .unwrap_or_else(|| "PIN rejected by the gateway".to_string()),
            )
        }
        Err(e) => model.set_error_and_render(e),
    }
}
