//! Preference storage contracts used for persisted shell settings.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Object-safe boxed future returned by [`PrefsStore`] methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Error)]
/// Failures surfaced by a [`PrefsStore`] or the typed helpers layered over it.
pub enum PrefsError {
    /// The backing store rejected the operation.
    #[error("prefs store failure: {0}")]
    Store(String),
    /// The stored value could not be encoded or decoded as JSON.
    #[error("prefs codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Host service holding one JSON document per preference key.
pub trait PrefsStore {
    /// Loads the raw JSON stored under `key`, if any.
    fn load_pref<'a>(&'a self, key: &'a str)
        -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>>;

    /// Replaces the raw JSON stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), PrefsError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never holds anything; saves succeed and loads are always empty.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), PrefsError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Process-local store. Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw JSON currently held for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Seeds `key` with raw text without going through the async contract.
    pub fn insert_raw(&self, key: impl Into<String>, raw_json: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), raw_json.into());
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), PrefsError>> {
        Box::pin(async move {
            self.insert_raw(key, raw_json);
            Ok(())
        })
    }
}

/// Loads and decodes a typed preference value.
///
/// # Errors
///
/// Returns [`PrefsError::Store`] when the store fails and [`PrefsError::Codec`] when the stored
/// JSON does not match `T`.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, PrefsError> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Encodes and saves a typed preference value.
///
/// # Errors
///
/// Returns [`PrefsError::Codec`] when `value` cannot be encoded and [`PrefsError::Store`] when the
/// store rejects the write.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(value)?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wallpaper {
        name: String,
        tiled: bool,
    }

    #[test]
    fn memory_store_clones_share_contents() {
        let store = MemoryPrefsStore::default();
        let other = store.clone();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("desk.key", "{\"k\":1}")).expect("save");
        assert_eq!(other.raw("desk.key").as_deref(), Some("{\"k\":1}"));
    }

    #[test]
    fn typed_helpers_encode_and_decode() {
        let store = MemoryPrefsStore::default();
        let value = Wallpaper {
            name: "Bliss".to_string(),
            tiled: false,
        };
        block_on(save_pref_with(&store, "wallpaper", &value)).expect("save typed");

        let loaded: Option<Wallpaper> =
            block_on(load_pref_with(&store, "wallpaper")).expect("load typed");
        assert_eq!(loaded, Some(value));
    }

    #[test]
    fn typed_load_reports_codec_errors() {
        let store = MemoryPrefsStore::default();
        store.insert_raw("wallpaper", "not json");

        let err = block_on(load_pref_with::<_, Wallpaper>(&store, "wallpaper"))
            .expect_err("garbage should not decode");
        assert!(matches!(err, PrefsError::Codec(_)));
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        block_on(store_obj.save_pref("k", "{}")).expect("save");
        assert_eq!(block_on(store_obj.load_pref("k")).expect("load"), None);
    }
}
