//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use crate::{
    apps::{self, MenuCommand},
    context_menu::{self, ContextMenuItem},
    focus,
    model::{
        AppInstanceId, AppKind, AppSettings, DesktopState, DisplayProperties, IconId,
        PointerPosition, PowerOffKind,
    },
    power,
    selection::{self, IconBounds},
    window_manager,
};

#[derive(Debug, Clone, PartialEq)]
/// Commands accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open an app, or raise its existing window when it is single-instance.
    OpenApp(AppSettings),
    /// Open the app behind a desktop icon (double-click).
    OpenIcon {
        /// Icon that was activated.
        icon_id: IconId,
    },
    /// Close a window. Only honored while windows hold focus.
    CloseApp {
        /// Window to close.
        app_id: AppInstanceId,
    },
    /// Raise a window and give windows focus.
    FocusApp {
        /// Window to raise.
        app_id: AppInstanceId,
    },
    /// Minimize a window. Only honored while windows hold focus.
    MinimizeApp {
        /// Window to minimize.
        app_id: AppInstanceId,
    },
    /// Flip a window's maximized flag. Only honored while windows hold focus.
    ToggleMaximizeApp {
        /// Window to toggle.
        app_id: AppInstanceId,
    },
    /// Taskbar button press: minimize the window if it is focused, otherwise raise it.
    ToggleTaskbarApp {
        /// Window behind the taskbar button.
        app_id: AppInstanceId,
    },
    /// Focus a single desktop icon.
    FocusIcon {
        /// Icon to focus.
        icon_id: IconId,
    },
    /// Replace the focused icon set.
    SelectIcons {
        /// Icons to focus.
        icon_ids: Vec<IconId>,
    },
    /// Give focus to the bare desktop.
    FocusDesktop,
    /// Begin a rubber-band selection.
    StartSelect {
        /// Anchor corner of the band.
        origin: PointerPosition,
    },
    /// Pointer moved while a rubber-band selection is open.
    UpdateSelection {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Commit and close the rubber-band selection.
    EndSelect,
    /// Record the icon bounding boxes produced by the layout layer.
    SetIconLayout {
        /// One entry per laid-out icon.
        bounds: Vec<IconBounds>,
    },
    /// Show the desktop context menu.
    OpenContextMenu {
        /// Screen position of the menu.
        position: PointerPosition,
    },
    /// Dismiss the desktop context menu.
    CloseContextMenu,
    /// Activate a desktop context menu entry.
    SelectContextMenuItem {
        /// Entry that was chosen.
        item: ContextMenuItem,
    },
    /// Activate a start-menu entry by command name.
    ActivateMenuItem {
        /// Command name as shown in the menu.
        label: String,
    },
    /// Ask the user to confirm a log-off or shutdown.
    RequestPowerOff {
        /// Requested power-off kind.
        kind: PowerOffKind,
    },
    /// Dismiss the pending power-off confirmation.
    CancelPowerOff,
    /// Accept the pending power-off confirmation.
    ConfirmPowerOff,
    /// Replace and persist display properties.
    SetDisplayProperties {
        /// New display properties.
        properties: DisplayProperties,
    },
    /// Apply display properties loaded at boot without persisting them again.
    HydrateDisplayProperties {
        /// Loaded display properties.
        properties: DisplayProperties,
    },
    /// Toggle the screensaver preview requested from display settings.
    SetScreenSaverPreview {
        /// Whether the preview should be showing.
        enabled: bool,
    },
}

impl DesktopAction {
    /// Stable command name used for interaction logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenApp(_) => "ADD_APP",
            Self::OpenIcon { .. } => "OPEN_ICON",
            Self::CloseApp { .. } => "DEL_APP",
            Self::FocusApp { .. } => "FOCUS_APP",
            Self::MinimizeApp { .. } => "MINIMIZE_APP",
            Self::ToggleMaximizeApp { .. } => "TOGGLE_MAXIMIZE_APP",
            Self::ToggleTaskbarApp { .. } => "TOGGLE_TASKBAR_APP",
            Self::FocusIcon { .. } => "FOCUS_ICON",
            Self::SelectIcons { .. } => "SELECT_ICONS",
            Self::FocusDesktop => "FOCUS_DESKTOP",
            Self::StartSelect { .. } => "START_SELECT",
            Self::UpdateSelection { .. } => "UPDATE_SELECT",
            Self::EndSelect => "END_SELECT",
            Self::SetIconLayout { .. } => "ICON_LAYOUT",
            Self::OpenContextMenu { .. } => "CONTEXT_MENU",
            Self::CloseContextMenu => "CLOSE_CONTEXT_MENU",
            Self::SelectContextMenuItem { .. } => "CONTEXT_MENU_ITEM",
            Self::ActivateMenuItem { .. } => "MENU_ITEM",
            Self::RequestPowerOff { .. } => "POWER_OFF",
            Self::CancelPowerOff => "CANCEL_POWER_OFF",
            Self::ConfirmPowerOff => "CONFIRM_POWER_OFF",
            Self::SetDisplayProperties { .. } => "DISPLAY_PROPERTIES",
            Self::HydrateDisplayProperties { .. } => "HYDRATE_DISPLAY_PROPERTIES",
            Self::SetScreenSaverPreview { .. } => "SCREEN_SAVER_PREVIEW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Log that a command was dispatched.
    RecordInteraction(&'static str),
    /// Save the current display properties through the prefs store.
    PersistDisplayProperties,
    /// Re-read the screensaver configuration and restart the idle countdown.
    ConfigureIdleTimer,
    /// Show the screensaver immediately.
    ActivateScreenSaverPreview,
    /// The user accepted a power-off; the host should end the session.
    PowerOff(PowerOffKind),
}

/// Applies one [`DesktopAction`] to `state` and returns the side effects it calls for.
///
/// Every command is total: references to unknown windows or icons, and window commands arriving
/// while they are gated, leave the state untouched.
pub fn reduce_desktop(state: &mut DesktopState, action: DesktopAction) -> Vec<RuntimeEffect> {
    let mut effects = vec![RuntimeEffect::RecordInteraction(action.name())];
    match action {
        DesktopAction::OpenApp(settings) => {
            window_manager::open_app(state, settings);
        }
        DesktopAction::OpenIcon { icon_id } => {
            if let Some(kind) = icon_kind(state, icon_id) {
                window_manager::open_app(state, apps::app_settings(kind));
            }
        }
        DesktopAction::CloseApp { app_id } => {
            window_manager::close_app(state, app_id);
        }
        DesktopAction::FocusApp { app_id } => {
            window_manager::focus_app(state, app_id);
        }
        DesktopAction::MinimizeApp { app_id } => {
            window_manager::minimize_app(state, app_id);
        }
        DesktopAction::ToggleMaximizeApp { app_id } => {
            window_manager::toggle_maximize_app(state, app_id);
        }
        DesktopAction::ToggleTaskbarApp { app_id } => {
            if state.focused_app_id() == Some(app_id) {
                window_manager::minimize_app(state, app_id);
            } else {
                window_manager::focus_app(state, app_id);
            }
        }
        DesktopAction::FocusIcon { icon_id } => {
            focus::focus_icon(state, icon_id);
        }
        DesktopAction::SelectIcons { icon_ids } => focus::select_icons(state, &icon_ids),
        DesktopAction::FocusDesktop => focus::focus_desktop(state),
        DesktopAction::StartSelect { origin } => selection::start_select(state, origin),
        DesktopAction::UpdateSelection { pointer } => {
            selection::update_select(state, pointer);
        }
        DesktopAction::EndSelect => {
            selection::end_select(state);
        }
        DesktopAction::SetIconLayout { bounds } => {
            state.icon_layout = bounds;
        }
        DesktopAction::OpenContextMenu { position } => {
            context_menu::open_context_menu(state, position);
        }
        DesktopAction::CloseContextMenu => {
            context_menu::close_context_menu(state);
        }
        DesktopAction::SelectContextMenuItem { item } => {
            if !item.is_enabled() {
                return effects;
            }
            context_menu::close_context_menu(state);
            if item == ContextMenuItem::Properties {
                window_manager::open_app(state, apps::app_settings(AppKind::DisplayProperties));
            }
        }
        DesktopAction::ActivateMenuItem { label } => {
            context_menu::close_context_menu(state);
            match apps::resolve_menu_command(&label) {
                MenuCommand::OpenApp(settings) => {
                    window_manager::open_app(state, settings);
                }
                MenuCommand::PowerOff(kind) => {
                    power::request_power_off(state, kind);
                }
            }
        }
        DesktopAction::RequestPowerOff { kind } => {
            power::request_power_off(state, kind);
        }
        DesktopAction::CancelPowerOff => {
            power::cancel_power_off(state);
        }
        DesktopAction::ConfirmPowerOff => {
            if let Some(kind) = power::confirm_power_off(state) {
                effects.push(RuntimeEffect::PowerOff(kind));
            }
        }
        DesktopAction::SetDisplayProperties { properties } => {
            state.display = properties;
            effects.push(RuntimeEffect::PersistDisplayProperties);
            effects.push(RuntimeEffect::ConfigureIdleTimer);
        }
        DesktopAction::HydrateDisplayProperties { properties } => {
            state.display = properties;
            effects.push(RuntimeEffect::ConfigureIdleTimer);
        }
        DesktopAction::SetScreenSaverPreview { enabled } => {
            state.screen_saver_preview = enabled;
            if enabled {
                effects.push(RuntimeEffect::ActivateScreenSaverPreview);
            }
        }
    }
    effects
}

fn icon_kind(state: &DesktopState, icon_id: IconId) -> Option<AppKind> {
    state
        .icons
        .iter()
        .find(|icon| icon.id == icon_id)
        .map(|icon| icon.kind)
}
