//! Desktop shell state engine: window stacking, focus, icon selection, power confirmation, the
//! idle screensaver timer and the desktop context menu, driven through one reducer.

pub mod apps;
pub mod context_menu;
pub mod focus;
pub mod host;
pub mod idle;
pub mod model;
pub mod persistence;
pub mod power;
pub mod reducer;
pub mod runtime;
pub mod runtime_context;
pub mod selection;
pub mod window_manager;

pub use context_menu::ContextMenuItem;
pub use host::DesktopHostContext;
pub use idle::{IdleEvent, IdleTimer, IDLE_RESET_DEBOUNCE};
pub use model::*;
pub use persistence::{load_display_properties, persist_display_properties, PersistenceError};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime::DesktopRuntime;
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use selection::{IconBounds, Rect};
