use crux_core::Command;
use log::{debug, warn};

use crate::commands::timer::TimerOutput;
use crate::events::{Event, GatewayEvent};
use crate::http_get;
use crate::model::Model;
use crate::types::{
    FrontendConfig, GatewaySnapshot, ManualCheckOutcome, PollerState, SimStatus,
};
use crate::{Effect, TimerCmd};

/// Handle poll loop events (startup, ticks, status responses, teardown)
pub fn handle(event: GatewayEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        GatewayEvent::StartPolling => handle_start_polling(model),
        GatewayEvent::StopPolling => handle_stop_polling(model),
        GatewayEvent::PollTick => handle_poll_tick(model),
        GatewayEvent::ConfigResponse(result) => handle_config_response(result, model),
        GatewayEvent::StatusResponse(result) => handle_status_response(result, model),
        GatewayEvent::TimerAck(output) => handle_timer_ack(output),
    }
}

/// The status query, shared with the manual-check and unlock flows
pub(super) fn poll_status() -> Command<Effect, Event> {
    http_get!(
        Gateway,
        GatewayEvent,
        "/api/status",
        StatusResponse,
        GatewaySnapshot
    )
}

fn handle_start_polling(model: &mut Model) -> Command<Effect, Event> {
    // Idempotent: a second StartPolling while starting or running is a no-op
    if !matches!(model.poller, PollerState::Idle) {
        return Command::done();
    }

    model.poller = PollerState::Starting;
    model.is_loading = true;

    Command::all([
        crux_core::render::render(),
        http_get!(
            Gateway,
            GatewayEvent,
            "/api/config",
            ConfigResponse,
            FrontendConfig
        ),
    ])
}

fn handle_config_response(
    result: Result<FrontendConfig, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !matches!(model.poller, PollerState::Starting) {
        debug!("config response after teardown, discarding");
        return Command::done();
    }

    match result {
        Ok(config) => {
            model.console_url = Some(config.console_url);
            if config.poll_interval_ms > 0 {
                model.poll_interval_ms = config.poll_interval_ms;
            }
        }
        // The defaults are good enough to keep polling; the config request
        // is not retried.
        Err(e) => warn!("failed to load frontend config, using defaults: {e}"),
    }

    let timer_id = model.next_timer_id;
    model.next_timer_id = model.next_timer_id.wrapping_add(1);
    model.poller = PollerState::Running { timer_id };
    model.is_loading = false;
    model.poll_in_flight = true;

    Command::all([
        crux_core::render::render(),
        TimerCmd::start(timer_id, model.poll_interval_ms)
            .build()
            .then_send(|output| Event::Gateway(GatewayEvent::TimerAck(output))),
        poll_status(),
    ])
}

fn handle_poll_tick(model: &mut Model) -> Command<Effect, Event> {
    if !model.is_polling() {
        debug!("poll tick after teardown, ignoring");
        return Command::done();
    }

    // At most one in-flight status query: a tick that would overlap the
    // previous query is skipped, the next one retries naturally.
    if model.poll_in_flight {
        debug!("status query still in flight, skipping tick");
        return Command::done();
    }

    model.poll_in_flight = true;
    poll_status()
}

fn handle_status_response(
    result: Result<GatewaySnapshot, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    // Teardown boundary: a result that arrives after StopPolling must not
    // mutate anything.
    if !model.is_polling() {
        debug!("status response after teardown, discarding");
        return Command::done();
    }

    model.poll_in_flight = false;

    let changed = match result {
        Ok(snapshot) => apply_snapshot(model, snapshot),
        Err(e) => {
            // Transient failure: keep the last known snapshot, no user
            // notification, the next scheduled poll retries.
            warn!("status query failed: {e}");
            false
        }
    };

    let resolved = resolve_manual_check(model);

    if changed || resolved {
        crux_core::render::render()
    } else {
        Command::done()
    }
}

fn handle_stop_polling(model: &mut Model) -> Command<Effect, Event> {
    let previous = std::mem::take(&mut model.poller);
    model.poll_in_flight = false;
    model.manual_check_pending = false;
    model.is_loading = false;

    let PollerState::Running { timer_id } = previous else {
        // Nothing armed yet; dropping back to Idle already makes any late
        // ConfigResponse a no-op.
        return crux_core::render::render();
    };

    Command::all([
        crux_core::render::render(),
        TimerCmd::cancel(timer_id)
            .build()
            .then_send(|output| Event::Gateway(GatewayEvent::TimerAck(output))),
    ])
}

fn handle_timer_ack(output: TimerOutput) -> Command<Effect, Event> {
    match output {
        TimerOutput::Started { id } => debug!("poll timer {id} started"),
        TimerOutput::Cancelled { id } => debug!("poll timer {id} cancelled"),
    }
    Command::done()
}

/// Replace the observed snapshot and run the prompt-visibility rules.
///
/// Returns whether anything visible changed.
fn apply_snapshot(model: &mut Model, snapshot: GatewaySnapshot) -> bool {
    let previous = model.sim_status();
    let mut changed = model.snapshot.as_ref() != Some(&snapshot);

    match snapshot.sim_status {
        // The prompt opens on the transition into PinRequired; an unchanged
        // PinRequired poll must not override a user dismissal.
        SimStatus::PinRequired if previous != SimStatus::PinRequired => {
            changed |= !model.unlock_prompt.is_visible();
            model.unlock_prompt.show();
        }
        // Ready closes the prompt within the same update, unconditionally.
        SimStatus::Ready => {
            changed |= model.unlock_prompt.is_visible();
            model.unlock_prompt.hide();
        }
        _ => {}
    }

    model.snapshot = Some(snapshot);
    changed
}

/// Resolve a pending manual check against the freshest status.
///
/// On a failed poll the retained snapshot answers; the user asked for a
/// binary outcome, not an error report.
fn resolve_manual_check(model: &mut Model) -> bool {
    if !model.manual_check_pending {
        return false;
    }

    model.manual_check_pending = false;
    model.manual_check = Some(match model.sim_status() {
        SimStatus::Ready => ManualCheckOutcome::Ready,
        _ => ManualCheckOutcome::StillLocked,
    });

    true
}
