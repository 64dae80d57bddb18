//! Persisted favorites store
//!
//! One store is built at startup and handed to whoever needs it. Every
//! mutation is written through to storage and then announced to subscribers.
//! Storage problems never escape: a bad load starts empty, a failed save is
//! logged and the in-memory state stays authoritative.

use crate::storage::Storage;
use flagdex_core::country::Country;
use flagdex_core::favorites::{self, FavoriteCountry, FavoritesList};

/// Storage key holding the serialized favorites list
pub const FAVORITES_KEY: &str = "flagdex-favorites";

type Callback = Box<dyn FnMut(&[FavoriteCountry])>;

/// Handle for a registered change callback
#[must_use = "the callback stays registered until this handle is passed to `unsubscribe`"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

pub struct FavoritesStore<S: Storage> {
    storage: S,
    list: FavoritesList,
    subscribers: Vec<(u64, Callback)>,
    next_subscription: u64,
}

impl<S: Storage> FavoritesStore<S> {
    /// Build the store and load whatever is persisted
    pub fn open(storage: S) -> Self {
        let list = load(&storage);
        log::debug!("loaded {} favorites", list.len());

        Self {
            storage,
            list,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Copy of the current list, newest first
    pub fn get_favorites(&self) -> Vec<FavoriteCountry> {
        self.list.entries().to_vec()
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.list.contains(code)
    }

    pub fn add_favorite(&mut self, country: &Country) {
        if self.list.add(country, now_ms()) {
            self.commit();
        }
    }

    pub fn remove_favorite(&mut self, code: &str) {
        if self.list.remove(code) {
            self.commit();
        }
    }

    /// Flip membership and return the new state
    pub fn toggle_favorite(&mut self, country: &Country) -> bool {
        if self.is_favorite(&country.cca2) {
            self.remove_favorite(&country.cca2);
            false
        } else {
            self.add_favorite(country);
            true
        }
    }

    pub fn clear_favorites(&mut self) {
        self.list.clear();
        self.commit();
    }

    pub fn search_favorites(&self, query: &str) -> Vec<FavoriteCountry> {
        self.list.search(query)
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    pub fn recent(&self, limit: usize) -> Vec<FavoriteCountry> {
        self.list.recent(limit)
    }

    /// Register a callback invoked with the full list after every mutation
    pub fn on_favorites_change<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&[FavoriteCountry]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Dispose of a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription.0);
        self.subscribers.len() != before
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn commit(&mut self) {
        self.save();
        self.notify();
    }

    fn save(&self) {
        let result = favorites::encode(&self.list)
            .map_err(|e| crate::error::Error::Parse(e.to_string()))
            .and_then(|raw| self.storage.write(FAVORITES_KEY, &raw));

        if let Err(err) = result {
            log::warn!("Failed to save favorites: {err}");
        }
    }

    fn notify(&mut self) {
        let entries = self.list.entries();
        for (_, callback) in self.subscribers.iter_mut() {
            callback(entries);
        }
    }
}

fn load(storage: &impl Storage) -> FavoritesList {
    match storage.read(FAVORITES_KEY) {
        Ok(Some(raw)) => favorites::decode(&raw).unwrap_or_else(|err| {
            log::warn!("Ignoring corrupt favorites data: {err}");
            FavoritesList::new()
        }),
        Ok(None) => FavoritesList::new(),
        Err(err) => {
            log::warn!("Failed to load favorites: {err}");
            FavoritesList::new()
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
