//! Browser timers for a running shift.
//!
//! Each hook keeps at most one timer alive, keyed on what the session
//! currently wants. When the key changes, the effect cleanup drops the old
//! guard (clearing the browser timer) before a new one is scheduled.

use codered_game::constants::TICK_INTERVAL_MS;
use codered_game::{PendingTransition, QuestionToken};
use yew::prelude::*;

use crate::app::state::{ShiftAction, ShiftStore};
use crate::dom::{IntervalHandle, TimeoutHandle, console_error, js_error_message};

/// Dispatch a `Tick` every 100 ms while `armed` names a question.
#[hook]
pub fn use_countdown_ticker(
    armed: Option<QuestionToken>,
    dispatcher: UseReducerDispatcher<ShiftStore>,
) {
    use_effect_with(armed, move |armed| {
        let handle = armed.and_then(|token| {
            IntervalHandle::start(TICK_INTERVAL_MS, move || {
                dispatcher.dispatch(ShiftAction::Tick(token));
            })
            .map_err(|err| {
                console_error(&format!(
                    "countdown ticker failed to start: {}",
                    js_error_message(&err)
                ));
            })
            .ok()
        });
        move || drop(handle)
    });
}

/// Dispatch `Resolve` once the pending transition's delay has elapsed.
#[hook]
pub fn use_pending_transition(
    pending: Option<PendingTransition>,
    dispatcher: UseReducerDispatcher<ShiftStore>,
) {
    use_effect_with(pending, move |pending| {
        let handle = pending.and_then(|pending| {
            TimeoutHandle::once(pending.delay_ms, move || {
                dispatcher.dispatch(ShiftAction::Resolve(pending.token));
            })
            .map_err(|err| {
                console_error(&format!(
                    "transition timer failed to start: {}",
                    js_error_message(&err)
                ));
            })
            .ok()
        });
        move || drop(handle)
    });
}
