use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{StoreError, UnknownTheme};
use crate::store::{KeyValueStore, Persistence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label of the toggle control: it offers the mode you are *not* in.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }

    /// Class applied to the page body; dark is the unstyled default.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Light => Some("light-mode"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Two-state machine (Dark <-> Light) driven only by [`ThemeController::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeController {
    current: Theme,
}

impl ThemeController {
    /// Restore the persisted preference. Absent or unreadable values fall back to dark.
    pub fn restore<S: KeyValueStore>(persistence: &Persistence<S>) -> Self {
        let current = match persistence.load_theme() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }
        };
        Self { current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the mode, then persist the new preference.
    pub fn toggle<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
    ) -> Result<Theme, StoreError> {
        self.current = self.current.toggled();
        info!(theme = %self.current, "theme toggled");
        persistence.save_theme(self.current)?;
        Ok(self.current)
    }
}
