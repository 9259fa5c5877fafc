//! Headless desktop runtime: the single owner of [`DesktopState`] and the idle timer.
//!
//! Commands go through a FIFO mailbox. Each one is reduced and its effects routed before the next
//! is taken, so no command observes a half-applied predecessor. Idle-timer effects and interaction
//! logging are handled here; effects that need the host come back to the caller.

use std::{collections::VecDeque, rc::Rc};

use leptos::logging;
use platform_host::Clock;

use crate::{
    idle::{IdleEvent, IdleTimer},
    model::{AppInstanceId, DesktopState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

pub struct DesktopRuntime {
    state: DesktopState,
    idle: IdleTimer,
    clock: Rc<dyn Clock>,
    mailbox: VecDeque<DesktopAction>,
}

impl DesktopRuntime {
    /// Boots a fresh shell (see [`DesktopState::boot`]) and arms the idle timer.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self::with_state(DesktopState::boot(), clock)
    }

    pub fn with_state(state: DesktopState, clock: Rc<dyn Clock>) -> Self {
        Self::with_idle_timer(state, IdleTimer::default(), clock)
    }

    /// Uses a caller-built timer, e.g. one with a shorter debounce.
    pub fn with_idle_timer(state: DesktopState, mut idle: IdleTimer, clock: Rc<dyn Clock>) -> Self {
        idle.configure(&state.display.screen_saver, clock.now_ms());
        Self {
            state,
            idle,
            clock,
            mailbox: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn focused_app_id(&self) -> Option<AppInstanceId> {
        self.state.focused_app_id()
    }

    pub fn screen_saver_active(&self) -> bool {
        self.idle.is_active()
    }

    pub fn idle_timer(&self) -> &IdleTimer {
        &self.idle
    }

    /// Applies `action` and returns the effects the host must execute.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        self.mailbox.push_back(action);
        self.drain()
    }

    /// Feeds one qualifying input sample (pointer move, key press) to the idle machinery.
    ///
    /// Ends a running preview, hides the screensaver and schedules the debounced re-arm. Returns
    /// whether the screensaver was showing.
    pub fn user_activity(&mut self) -> bool {
        if self.state.screen_saver_preview {
            let effects = self.dispatch(DesktopAction::SetScreenSaverPreview { enabled: false });
            debug_assert!(effects.is_empty());
        }
        self.idle.record_activity(self.clock.now_ms())
    }

    /// Fires idle-timer tasks that have come due.
    pub fn tick(&mut self) -> Vec<IdleEvent> {
        let events = self.idle.poll(self.clock.now_ms());
        if events.contains(&IdleEvent::ScreenSaverActivate) {
            logging::log!("screensaver activated after {:?} idle", self.idle.timeout());
        }
        events
    }

    pub fn next_idle_deadline_ms(&self) -> Option<u64> {
        self.idle.next_deadline_ms()
    }

    fn drain(&mut self) -> Vec<RuntimeEffect> {
        let mut host_effects = Vec::new();
        while let Some(action) = self.mailbox.pop_front() {
            for effect in reduce_desktop(&mut self.state, action) {
                if let Some(effect) = self.run_local_effect(effect) {
                    host_effects.push(effect);
                }
            }
        }
        host_effects
    }

    fn run_local_effect(&mut self, effect: RuntimeEffect) -> Option<RuntimeEffect> {
        match effect {
            RuntimeEffect::RecordInteraction(name) => {
                logging::log!("desktop action {name}");
                None
            }
            RuntimeEffect::ConfigureIdleTimer => {
                self.idle
                    .configure(&self.state.display.screen_saver, self.clock.now_ms());
                None
            }
            RuntimeEffect::ActivateScreenSaverPreview => {
                self.idle.activate_preview();
                None
            }
            effect @ (RuntimeEffect::PersistDisplayProperties | RuntimeEffect::PowerOff(_)) => {
                Some(effect)
            }
        }
    }
}
