//! Headless send cycle.
//!
//! Drives the same `update()` reducer the TUI uses, but awaits the transport
//! inline instead of spawning it. Used by the `ask` subcommand and by tests.

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;

/// Submits `input` and waits for the cycle to finish.
///
/// Returns the effect of the last step: `Prompt` for empty input, `Alert` for
/// emergencies and transport failures, `None` otherwise.
pub async fn exchange(app: &mut App, input: &str) -> Effect {
    let request = match update(app, Action::Submit(input.to_string())) {
        Effect::SpawnRequest(request) => request,
        other => return other,
    };

    update(app, Action::RequestDispatched);
    let transport = app.transport.clone();
    let action = match transport.send(&request).await {
        Ok(response) => Action::ResponseReceived(response),
        Err(err) => Action::TransportFailed(err),
    };
    debug!("Exchange resolved with {:?}", action);
    update(app, action)
}
