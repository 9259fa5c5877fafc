//! Display-properties persistence through the host [`PrefsStore`].

use platform_host::{load_pref_with, save_pref_with, PrefsError, PrefsStore};
use thiserror::Error;

use crate::model::DisplayProperties;

/// Prefs key holding the serialized [`DisplayProperties`].
pub const DISPLAY_PROPERTIES_KEY: &str = "retrodesk.display_properties.v1";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("load display properties failed: {0}")]
    Load(#[source] PrefsError),
    #[error("persist display properties failed: {0}")]
    Save(#[source] PrefsError),
}

/// Loads persisted display properties.
///
/// Returns `Ok(None)` when nothing has been saved yet.
///
/// # Errors
///
/// Returns [`PersistenceError::Load`] when the store fails or the stored blob does not decode.
pub async fn load_display_properties(
    store: &dyn PrefsStore,
) -> Result<Option<DisplayProperties>, PersistenceError> {
    load_pref_with(store, DISPLAY_PROPERTIES_KEY)
        .await
        .map_err(PersistenceError::Load)
}

/// Persists display properties, replacing any earlier value.
///
/// # Errors
///
/// Returns [`PersistenceError::Save`] when encoding or the store write fails.
pub async fn persist_display_properties(
    store: &dyn PrefsStore,
    properties: &DisplayProperties,
) -> Result<(), PersistenceError> {
    save_pref_with(store, DISPLAY_PROPERTIES_KEY, properties)
        .await
        .map_err(PersistenceError::Save)
}
