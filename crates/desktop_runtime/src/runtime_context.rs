//! Runtime provider and context wiring for the desktop shell.
//!
//! [`DesktopProvider`] owns the headless [`DesktopRuntime`] and mirrors its state into signals.
//! UI code reads those signals and sends commands through [`DesktopRuntimeContext::dispatch`].

use std::rc::Rc;

use leptos::*;
use platform_host::SystemClock;

use crate::{
    host::DesktopHostContext,
    idle::IdleEvent,
    model::DesktopState,
    reducer::{DesktopAction, RuntimeEffect},
    runtime::DesktopRuntime,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Single owner of desktop state and the idle timer.
    pub runtime: StoredValue<DesktopRuntime>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Whether the screensaver is showing.
    pub screen_saver_active: RwSignal<bool>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Reports one qualifying input sample to the idle timer.
    pub fn user_activity(&self) {
        if self.runtime.try_update_value(|runtime| runtime.user_activity()) == Some(true) {
            self.sync_signals();
        }
    }

    /// Polls the idle timer and publishes any resulting screensaver change.
    pub fn tick(&self) {
        let events = self
            .runtime
            .try_update_value(|runtime| runtime.tick())
            .unwrap_or_default();
        if events.contains(&IdleEvent::ScreenSaverActivate) {
            self.screen_saver_active.set(true);
        }
    }

    fn sync_signals(&self) {
        sync_signals(self.runtime, self.state, self.screen_saver_active);
    }
}

fn sync_signals(
    runtime: StoredValue<DesktopRuntime>,
    state: RwSignal<DesktopState>,
    screen_saver_active: RwSignal<bool>,
) {
    let Some((desktop, active)) = runtime.try_with_value(|runtime| {
        (runtime.state().clone(), runtime.screen_saver_active())
    }) else {
        return;
    };
    if state.with_untracked(|current| current != &desktop) {
        state.set(desktop);
    }
    if screen_saver_active.get_untracked() != active {
        screen_saver_active.set(active);
    }
}

fn run_host_effects(
    host: StoredValue<DesktopHostContext>,
    state: RwSignal<DesktopState>,
    effects: Vec<RuntimeEffect>,
) {
    if effects.is_empty() {
        return;
    }
    let host = host.get_value();
    let desktop = state.get_untracked();
    spawn_local(async move {
        for effect in effects {
            host.run_runtime_effect(&desktop, effect).await;
        }
    });
}

fn install_boot_hydration(runtime: DesktopRuntimeContext) {
    let host = runtime.host.get_value();
    spawn_local(async move {
        if let Some(properties) = host.load_display_properties().await {
            runtime.dispatch_action(DesktopAction::HydrateDisplayProperties { properties });
        }
    });
}

#[cfg(target_arch = "wasm32")]
const IDLE_TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(250);

#[cfg(target_arch = "wasm32")]
fn install_idle_tracking(runtime: DesktopRuntimeContext) {
    match set_interval_with_handle(move || runtime.tick(), IDLE_TICK_INTERVAL) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => logging::warn!("idle ticker install failed: {err:?}"),
    }
    let pointer = window_event_listener(ev::pointermove, move |_| runtime.user_activity());
    let keys = window_event_listener(ev::keydown, move |_| runtime.user_activity());
    on_cleanup(move || {
        pointer.remove();
        keys.remove();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn install_idle_tracking(_runtime: DesktopRuntimeContext) {}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Host services assembled by the entry layer. Defaults to a store that persists nothing.
    #[prop(optional)]
    host: Option<DesktopHostContext>,
    children: Children,
) -> impl IntoView {
    let runtime_owner = DesktopRuntime::new(Rc::new(SystemClock));
    let state = create_rw_signal(runtime_owner.state().clone());
    let screen_saver_active = create_rw_signal(runtime_owner.screen_saver_active());
    let runtime_value = store_value(runtime_owner);
    let host = store_value(host.unwrap_or_default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let Some(effects) = runtime_value.try_update_value(|runtime| runtime.dispatch(action))
        else {
            return;
        };
        sync_signals(runtime_value, state, screen_saver_active);
        run_host_effects(host, state, effects);
    });

    let runtime = DesktopRuntimeContext {
        host,
        runtime: runtime_value,
        state,
        screen_saver_active,
        dispatch,
    };

    provide_context(runtime);
    install_boot_hydration(runtime);
    install_idle_tracking(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
