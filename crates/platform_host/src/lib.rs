//! Typed host contracts consumed by the desktop runtime.
//!
//! The runtime never touches browser or OS storage directly. It talks to the [`PrefsStore`]
//! trait for persisted settings and to the [`Clock`] trait for time-driven behavior, and the
//! entry layer decides which adapters back them.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::local_prefs::WebPrefsStore;
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsError, PrefsStore,
    PrefsStoreFuture,
};
pub use time::{unix_time_ms_now, Clock, ManualClock, SystemClock};
