use crate::storage::Storage;
use flagdex_core::theme::Theme;

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "flagdex-theme";

/// Persisted light/dark preference
///
/// A missing or unreadable preference falls back to [`Theme::Light`]. Write
/// failures are logged and otherwise ignored.
pub struct ThemeStore<S: Storage> {
    storage: S,
    current: Theme,
}

impl<S: Storage> ThemeStore<S> {
    pub fn open(storage: S) -> Self {
        let current = match storage.read(THEME_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Theme>(&raw).unwrap_or_else(|err| {
                log::warn!("Ignoring invalid theme preference: {err}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                log::warn!("Failed to load theme preference: {err}");
                Theme::default()
            }
        };

        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        let result = serde_json::to_string(&theme)
            .map_err(|e| crate::error::Error::Parse(e.to_string()))
            .and_then(|raw| self.storage.write(THEME_KEY, &raw));

        if let Err(err) = result {
            log::warn!("Failed to save theme preference: {err}");
        }
    }

    /// Switch to the other theme and return it
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }

    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
