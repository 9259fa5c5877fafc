//! Shell power state: `Running` or waiting for a log-off/shutdown confirmation.
//!
//! While a confirmation is pending the shell is modal and window focus, minimize, maximize and
//! close requests are dropped (see [`crate::window_manager::accepts_window_commands`]).

use crate::model::{DesktopState, PowerOffKind, PowerState};

/// Enters the confirm state for `kind`. Only accepted while running.
pub fn request_power_off(state: &mut DesktopState, kind: PowerOffKind) -> bool {
    if state.power != PowerState::Running {
        return false;
    }
    state.power = match kind {
        PowerOffKind::LogOff => PowerState::ConfirmLogOff,
        PowerOffKind::Shutdown => PowerState::ConfirmShutdown,
    };
    true
}

pub fn cancel_power_off(state: &mut DesktopState) -> bool {
    let was_pending = state.power != PowerState::Running;
    state.power = PowerState::Running;
    was_pending
}

/// Kind of power-off the user accepted, if a confirmation was pending.
///
/// Accepting does not move the state machine; tearing the session down is the host's job.
pub fn confirm_power_off(state: &DesktopState) -> Option<PowerOffKind> {
    state.power.pending()
}
