use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{apps, selection::IconBounds, window_manager};

/// Screensaver kind token that disables the idle timer.
pub const SCREEN_SAVER_NONE: &str = "(None)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AppInstanceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconId(pub u32);

/// Component kind of a hosted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppKind {
    InternetExplorer,
    Minesweeper,
    MyComputer,
    Notepad,
    Winamp,
    Paint,
    DisplayProperties,
    Error,
}

impl AppKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::InternetExplorer => "internet-explorer",
            Self::Minesweeper => "minesweeper",
            Self::MyComputer => "my-computer",
            Self::Notepad => "notepad",
            Self::Winamp => "winamp",
            Self::Paint => "paint",
            Self::DisplayProperties => "display-properties",
            Self::Error => "error",
        }
    }
}

/// Payload of an open-app command, usually taken from the app catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub kind: AppKind,
    pub title: String,
    pub multi_instance: bool,
    pub maximized: bool,
    pub inject_props: Value,
}

impl AppSettings {
    pub fn new(kind: AppKind) -> Self {
        Self {
            kind,
            title: kind.token().to_string(),
            multi_instance: false,
            maximized: false,
            inject_props: Value::Null,
        }
    }
}

/// One open occurrence of a hosted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInstance {
    pub id: AppInstanceId,
    pub kind: AppKind,
    pub title: String,
    /// Focus timestamp. Unique among live instances; larger means more recently raised.
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub multi_instance: bool,
    pub inject_props: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconState {
    pub id: IconId,
    pub kind: AppKind,
    pub label: String,
    pub is_focus: bool,
}

/// Class of entity that currently owns keyboard and pointer focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusTarget {
    Window,
    Icon,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// In-progress rubber-band drag: the anchor corner plus the latest pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub origin: PointerPosition,
    pub current: PointerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerOffKind {
    LogOff,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    Running,
    ConfirmLogOff,
    ConfirmShutdown,
}

impl PowerState {
    /// Kind of power-off awaiting confirmation, if any.
    pub fn pending(self) -> Option<PowerOffKind> {
        match self {
            Self::Running => None,
            Self::ConfirmLogOff => Some(PowerOffKind::LogOff),
            Self::ConfirmShutdown => Some(PowerOffKind::Shutdown),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundPosition {
    Center,
    Tile,
    Stretch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopBackground {
    pub wallpaper_id: Option<String>,
    pub color: String,
    pub position: BackgroundPosition,
}

impl Default for DesktopBackground {
    fn default() -> Self {
        Self {
            wallpaper_id: Some("bliss".to_string()),
            color: "#004e98".to_string(),
            position: BackgroundPosition::Stretch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSaverConfig {
    /// Screensaver to show; [`SCREEN_SAVER_NONE`] disables idle activation.
    pub kind: String,
    pub timeout_minutes: u32,
}

impl ScreenSaverConfig {
    pub fn is_disabled(&self) -> bool {
        self.kind == SCREEN_SAVER_NONE
    }
}

impl Default for ScreenSaverConfig {
    fn default() -> Self {
        Self {
            kind: "Windows XP".to_string(),
            timeout_minutes: 5,
        }
    }
}

/// Persisted display settings blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayProperties {
    pub desktop: DesktopBackground,
    pub screen_saver: ScreenSaverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub apps: Vec<AppInstance>,
    pub next_app_id: u64,
    pub next_z_index: u64,
    pub focus: FocusTarget,
    pub icons: Vec<IconState>,
    /// Icon bounding boxes reported by the layout layer; used for rubber-band hit tests.
    pub icon_layout: Vec<IconBounds>,
    pub selecting: Option<SelectionState>,
    pub context_menu: Option<PointerPosition>,
    pub power: PowerState,
    pub display: DisplayProperties,
    pub screen_saver_preview: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            apps: Vec::new(),
            next_app_id: 0,
            next_z_index: 0,
            focus: FocusTarget::Desktop,
            icons: apps::default_icon_state(),
            icon_layout: Vec::new(),
            selecting: None,
            context_menu: None,
            power: PowerState::Running,
            display: DisplayProperties::default(),
            screen_saver_preview: false,
        }
    }
}

impl DesktopState {
    /// Initial shell state: catalog icons plus every app flagged to open on boot.
    pub fn boot() -> Self {
        let mut state = Self::default();
        for settings in apps::boot_app_settings() {
            window_manager::open_app(&mut state, settings);
        }
        state
    }

    pub fn focused_app_id(&self) -> Option<AppInstanceId> {
        window_manager::focused_app_id(self)
    }

    /// Live instances ordered bottom to top.
    pub fn apps_in_stack_order(&self) -> Vec<&AppInstance> {
        let mut apps: Vec<&AppInstance> = self.apps.iter().collect();
        apps.sort_by_key(|app| app.z_index);
        apps
    }

    pub fn app(&self, app_id: AppInstanceId) -> Option<&AppInstance> {
        self.apps.iter().find(|app| app.id == app_id)
    }

    pub fn focused_icon_ids(&self) -> Vec<IconId> {
        self.icons
            .iter()
            .filter(|icon| icon.is_focus)
            .map(|icon| icon.id)
            .collect()
    }

    pub fn is_running(&self) -> bool {
        self.power == PowerState::Running
    }
}
