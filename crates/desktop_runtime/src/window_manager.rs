//! Window lifecycle and stacking transitions used by the desktop reducer.
//!
//! Stacking uses a monotonic focus counter: raising a window hands it the next `z_index` instead
//! of renumbering the whole stack, so only relative order carries meaning.

use crate::model::{AppInstance, AppInstanceId, AppSettings, DesktopState, FocusTarget};

fn next_app_id(state: &mut DesktopState) -> AppInstanceId {
    let id = AppInstanceId(state.next_app_id);
    state.next_app_id = state.next_app_id.saturating_add(1);
    id
}

fn next_z_index(state: &mut DesktopState) -> u64 {
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z_index
}

fn find_app_mut(state: &mut DesktopState, app_id: AppInstanceId) -> Option<&mut AppInstance> {
    state.apps.iter_mut().find(|app| app.id == app_id)
}

/// Whether minimize, maximize and close requests are honored in the current state.
pub fn accepts_window_commands(state: &DesktopState) -> bool {
    state.focus == FocusTarget::Window && state.is_running()
}

/// Opens an instance for `settings`, or raises the existing one when the kind is single-instance.
///
/// Returns the id of the instance that ends up on top, or `None` while a power-off confirmation
/// holds the shell.
pub fn open_app(state: &mut DesktopState, settings: AppSettings) -> Option<AppInstanceId> {
    if !state.is_running() {
        return None;
    }
    let existing = if settings.multi_instance {
        None
    } else {
        state
            .apps
            .iter()
            .find(|app| app.kind == settings.kind)
            .map(|app| app.id)
    };

    let app_id = match existing {
        Some(app_id) => {
            raise_app(state, app_id);
            app_id
        }
        None => {
            let id = next_app_id(state);
            let z_index = next_z_index(state);
            state.apps.push(AppInstance {
                id,
                kind: settings.kind,
                title: settings.title,
                z_index,
                minimized: false,
                maximized: settings.maximized,
                multi_instance: settings.multi_instance,
                inject_props: settings.inject_props,
            });
            id
        }
    };

    state.focus = FocusTarget::Window;
    state.context_menu = None;
    Some(app_id)
}

/// Removes `app_id`. Returns `false` when the request was gated or the id is unknown.
pub fn close_app(state: &mut DesktopState, app_id: AppInstanceId) -> bool {
    if !accepts_window_commands(state) {
        return false;
    }
    let before_len = state.apps.len();
    state.apps.retain(|app| app.id != app_id);
    if state.apps.len() == before_len {
        return false;
    }

    if state.apps.is_empty() {
        state.focus = if state.icons.iter().any(|icon| icon.is_focus) {
            FocusTarget::Icon
        } else {
            FocusTarget::Desktop
        };
    }
    true
}

/// Raises `app_id` to the top of the stack, clearing its minimized flag.
///
/// Focus-target gating does not apply: clicking any window is how focus returns to windows.
pub fn focus_app(state: &mut DesktopState, app_id: AppInstanceId) -> bool {
    if !state.is_running() || !raise_app(state, app_id) {
        return false;
    }
    state.focus = FocusTarget::Window;
    true
}

pub fn minimize_app(state: &mut DesktopState, app_id: AppInstanceId) -> bool {
    if !accepts_window_commands(state) {
        return false;
    }
    match find_app_mut(state, app_id) {
        Some(app) => {
            app.minimized = true;
            true
        }
        None => false,
    }
}

pub fn toggle_maximize_app(state: &mut DesktopState, app_id: AppInstanceId) -> bool {
    if !accepts_window_commands(state) {
        return false;
    }
    match find_app_mut(state, app_id) {
        Some(app) => {
            app.maximized = !app.maximized;
            true
        }
        None => false,
    }
}

fn raise_app(state: &mut DesktopState, app_id: AppInstanceId) -> bool {
    if !state.apps.iter().any(|app| app.id == app_id) {
        return false;
    }
    let z_index = next_z_index(state);
    if let Some(app) = find_app_mut(state, app_id) {
        app.z_index = z_index;
        app.minimized = false;
    }
    true
}

/// The window that owns focus: the topmost non-minimized instance while windows hold focus.
pub fn focused_app_id(state: &DesktopState) -> Option<AppInstanceId> {
    if state.focus != FocusTarget::Window {
        return None;
    }
    state
        .apps
        .iter()
        .filter(|app| !app.minimized)
        .max_by_key(|app| app.z_index)
        .map(|app| app.id)
}
