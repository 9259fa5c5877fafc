//! Host-side execution of reducer effects that leave the engine.
//!
//! The runtime hands back [`RuntimeEffect::PersistDisplayProperties`] and
//! [`RuntimeEffect::PowerOff`]; this module runs them against injected services so the browser
//! entry layer and tests can swap adapters.

use std::{fmt, rc::Rc};

use leptos::logging;
use platform_host::{NoopPrefsStore, PrefsStore};

use crate::{
    model::{DesktopState, DisplayProperties, PowerOffKind},
    persistence,
    reducer::RuntimeEffect,
};

/// Callback invoked after the user accepts a log-off or shutdown.
pub type PowerOffHandler = Rc<dyn Fn(PowerOffKind)>;

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
    power_off: Option<PowerOffHandler>,
}

impl fmt::Debug for DesktopHostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopHostContext")
            .field("power_off", &self.power_off.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(Rc::new(NoopPrefsStore))
    }
}

impl DesktopHostContext {
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        Self {
            prefs,
            power_off: None,
        }
    }

    /// Installs the handler that ends the session when a power-off is confirmed.
    pub fn with_power_off_handler(mut self, handler: PowerOffHandler) -> Self {
        self.power_off = Some(handler);
        self
    }

    /// Returns the configured lightweight preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Loads boot display properties. Failures are logged and treated as "nothing saved".
    pub async fn load_display_properties(&self) -> Option<DisplayProperties> {
        match persistence::load_display_properties(self.prefs.as_ref()).await {
            Ok(properties) => properties,
            Err(err) => {
                logging::warn!("{err}");
                None
            }
        }
    }

    /// Executes a single host-bound [`RuntimeEffect`] against `state`.
    ///
    /// Runtime-local effects are ignored here; [`crate::runtime::DesktopRuntime`] consumes them
    /// before they reach the host.
    pub async fn run_runtime_effect(&self, state: &DesktopState, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistDisplayProperties => {
                if let Err(err) =
                    persistence::persist_display_properties(self.prefs.as_ref(), &state.display)
                        .await
                {
                    logging::warn!("{err}");
                }
            }
            RuntimeEffect::PowerOff(kind) => {
                logging::log!("power off confirmed: {kind:?}");
                match &self.power_off {
                    Some(handler) => handler(kind),
                    None => logging::warn!("no power-off handler installed; ignoring {kind:?}"),
                }
            }
            RuntimeEffect::RecordInteraction(_)
            | RuntimeEffect::ConfigureIdleTimer
            | RuntimeEffect::ActivateScreenSaverPreview => {}
        }
    }
}
