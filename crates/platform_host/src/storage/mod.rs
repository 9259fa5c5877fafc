//! Persisted preference storage.

pub mod local_prefs;
pub mod prefs;
