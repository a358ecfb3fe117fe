use crate::storage::PreferenceStore;
use anyhow::Result;
use clap::ValueEnum;
use std::fmt;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_system(system_dark: bool) -> Self {
        if system_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the theme from an explicit stored choice, falling back to the
/// system color scheme when no choice has been made.
pub struct ThemeController<S> {
    store: S,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Only "light" and "dark" count as a preference.
    pub fn stored(&self) -> Result<Option<Theme>> {
        Ok(self
            .store
            .get(THEME_KEY)?
            .as_deref()
            .and_then(Theme::from_stored))
    }

    /// `None` clears the choice and goes back to following the system.
    pub fn set_stored(&self, theme: Option<Theme>) -> Result<()> {
        match theme {
            Some(t) => self.store.set(THEME_KEY, t.as_str()),
            None => self.store.remove(THEME_KEY),
        }
    }

    pub fn effective(&self, system_dark: bool) -> Result<Theme> {
        Ok(self
            .stored()?
            .unwrap_or_else(|| Theme::from_system(system_dark)))
    }

    pub fn toggle(&self, system_dark: bool) -> Result<Theme> {
        let next = self.effective(system_dark)?.flipped();
        self.set_stored(Some(next))?;
        Ok(next)
    }

    /// Returns the theme to re-render with, or `None` when an explicit choice
    /// is stored and the system change does not apply.
    pub fn on_system_change(&self, system_dark: bool) -> Result<Option<Theme>> {
        match self.stored()? {
            Some(_) => Ok(None),
            None => Ok(Some(Theme::from_system(system_dark))),
        }
    }
}
