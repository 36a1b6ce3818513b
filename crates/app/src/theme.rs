//! Persisted light/dark preference.

use std::fmt;

use serde::{Deserialize, Serialize};

use storefront_state::{StateCell, Subscription};
use storefront_storage::{KeyValueStore, StorageKey};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable theme, persisted on every change.
#[derive(Debug)]
pub struct ThemeStore {
    kv: KeyValueStore,
    theme: StateCell<Theme>,
}

impl ThemeStore {
    /// Start from the saved theme, else from the platform hint. The resolved
    /// theme is written back so the next start is stable.
    pub fn new(kv: KeyValueStore, prefers_dark: bool) -> Self {
        let theme = kv.get::<Theme>(StorageKey::Theme).unwrap_or_else(|| {
            if prefers_dark { Theme::Dark } else { Theme::Light }
        });
        kv.set(StorageKey::Theme, &theme);
        tracing::debug!(%theme, "theme resolved");

        Self {
            kv,
            theme: StateCell::new(theme),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn subscribe(&self) -> Subscription<Theme> {
        self.theme.subscribe()
    }

    pub fn set_theme(&self, theme: Theme) {
        let kv = &self.kv;
        self.theme.update(|current| {
            *current = theme;
            kv.set(StorageKey::Theme, &theme);
        });
    }

    /// Flip light/dark and return the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }
}
