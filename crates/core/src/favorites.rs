//! Favorites list
//!
//! Pure list operations; the caller supplies the timestamp and owns
//! persistence. The list holds at most one entry per country code, newest
//! first.

use crate::country::Country;
use serde::{Deserialize, Serialize};

/// Number of entries returned by [`FavoritesList::recent`] when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Projection of a [`Country`] kept in the favorites list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCountry {
    pub cca2: String,
    pub name: String,
    pub flag: String,
    /// Epoch milliseconds
    pub added_at: i64,
}

impl FavoriteCountry {
    pub fn from_country(country: &Country, added_at: i64) -> Self {
        Self {
            cca2: country.cca2.clone(),
            name: country.name.common.clone(),
            flag: country.flags.png.clone(),
            added_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesList {
    entries: Vec<FavoriteCountry>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a list from persisted entries
    ///
    /// Duplicate codes are dropped, keeping the first (most recent) occurrence.
    pub fn from_entries(entries: Vec<FavoriteCountry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            if !list.contains(&entry.cca2) {
                list.entries.push(entry);
            }
        }
        list
    }

    pub fn entries(&self) -> &[FavoriteCountry] {
        &self.entries
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|fav| fav.cca2 == code)
    }

    /// Insert at the front. Returns `false` when the code is already present.
    pub fn add(&mut self, country: &Country, now_ms: i64) -> bool {
        if self.contains(&country.cca2) {
            return false;
        }
        self.entries
            .insert(0, FavoriteCountry::from_country(country, now_ms));
        true
    }

    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        match self.entries.iter().position(|fav| fav.cca2 == code) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the new membership state.
    pub fn toggle(&mut self, country: &Country, now_ms: i64) -> bool {
        if self.remove(&country.cca2) {
            false
        } else {
            self.add(country, now_ms)
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn recent(&self, limit: usize) -> Vec<FavoriteCountry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Case-insensitive substring match on the display name
    pub fn search(&self, query: &str) -> Vec<FavoriteCountry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|fav| fav.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Serialize the list in its storage format (a bare JSON array)
pub fn encode(list: &FavoritesList) -> Result<String, serde_json::Error> {
    serde_json::to_string(list.entries())
}

/// Parse the storage format
pub fn decode(raw: &str) -> Result<FavoritesList, serde_json::Error> {
    let entries: Vec<FavoriteCountry> = serde_json::from_str(raw)?;
    Ok(FavoritesList::from_entries(entries))
}
