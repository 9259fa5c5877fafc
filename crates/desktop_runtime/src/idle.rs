//! Idle detection that drives screensaver activation.
//!
//! The timer owns at most two [`ScheduledTask`]s: the pending activation and the pending
//! debounced re-arm. Scheduling either one replaces (and thereby cancels) its predecessor in a
//! single assignment, so a cancelled task can never fire. Time is supplied by the caller in
//! milliseconds; [`IdleTimer::poll`] fires whatever has come due.

use std::time::Duration;

use crate::model::ScreenSaverConfig;

/// Quiet period after the last user input before the idle countdown restarts.
pub const IDLE_RESET_DEBOUNCE: Duration = Duration::from_millis(500);

const MIN_TIMEOUT: Duration = Duration::from_secs(60);

/// One-shot deadline owned by the timer that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: u64,
    pub due_at_ms: u64,
}

impl ScheduledTask {
    fn is_due(self, now_ms: u64) -> bool {
        now_ms >= self.due_at_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleEvent {
    /// The debounced activity burst ended and the countdown restarted.
    Rearmed,
    /// The idle timeout elapsed; the screensaver is now showing.
    ScreenSaverActivate,
}

#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    enabled: bool,
    debounce: Duration,
    next_task_id: u64,
    activation: Option<ScheduledTask>,
    rearm: Option<ScheduledTask>,
    active: bool,
}

impl IdleTimer {
    /// Creates a disarmed timer. Call [`IdleTimer::configure`] or [`IdleTimer::arm`] to start it.
    pub fn new(debounce: Duration) -> Self {
        Self {
            timeout: ScreenSaverConfig::default().timeout(),
            enabled: true,
            debounce,
            next_task_id: 0,
            activation: None,
            rearm: None,
            active: false,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Applies a screensaver configuration and restarts the countdown from `now_ms`.
    pub fn configure(&mut self, config: &ScreenSaverConfig, now_ms: u64) {
        self.timeout = config.timeout();
        self.enabled = !config.is_disabled();
        self.rearm = None;
        self.arm(now_ms);
    }

    /// Cancels any pending activation and, when enabled, schedules a new one one timeout from
    /// `now_ms`.
    pub fn arm(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        self.activation = None;
        if !self.enabled {
            return None;
        }
        let due_at_ms = now_ms.saturating_add(duration_ms(self.timeout));
        let task = self.schedule(due_at_ms);
        self.activation = Some(task);
        Some(task)
    }

    /// Handles one user input sample.
    ///
    /// Deactivates the screensaver and cancels the pending activation immediately; the re-arm is
    /// deferred until input has been quiet for the debounce period. Returns whether the
    /// screensaver was showing.
    pub fn record_activity(&mut self, now_ms: u64) -> bool {
        let was_active = std::mem::replace(&mut self.active, false);
        self.activation = None;
        let due_at_ms = now_ms.saturating_add(duration_ms(self.debounce));
        self.rearm = Some(self.schedule(due_at_ms));
        was_active
    }

    /// Shows the screensaver right away, e.g. for a settings preview.
    pub fn activate_preview(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    /// Fires every task due at `now_ms`, in deadline order.
    pub fn poll(&mut self, now_ms: u64) -> Vec<IdleEvent> {
        let mut events = Vec::new();
        if let Some(rearm) = self.rearm.filter(|task| task.is_due(now_ms)) {
            self.rearm = None;
            self.arm(rearm.due_at_ms);
            events.push(IdleEvent::Rearmed);
        }
        if self.activation.is_some_and(|task| task.is_due(now_ms)) {
            self.activation = None;
            if !std::mem::replace(&mut self.active, true) {
                events.push(IdleEvent::ScreenSaverActivate);
            }
        }
        events
    }

    /// Earliest pending deadline, for hosts that schedule a wake-up instead of polling.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        [self.activation, self.rearm]
            .into_iter()
            .flatten()
            .map(|task| task.due_at_ms)
            .min()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending_activation(&self) -> Option<ScheduledTask> {
        self.activation
    }

    fn schedule(&mut self, due_at_ms: u64) -> ScheduledTask {
        let id = self.next_task_id;
        self.next_task_id = self.next_task_id.wrapping_add(1);
        ScheduledTask { id, due_at_ms }
    }
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(IDLE_RESET_DEBOUNCE)
    }
}

impl ScreenSaverConfig {
    /// Idle period before activation, never shorter than one minute.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_minutes) * 60).max(MIN_TIMEOUT)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
