//! Theme state container.
//!
//! Light/dark color resolution for terminal output. Unlike the ambient
//! context it replaces, this is an explicit value: construct it once, pass
//! it by reference. Colors are resolved when the mode changes, not on every
//! lookup.

use serde::{Deserialize, Serialize};

/// Color scheme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

/// Semantic color slots used by review output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    StatusSuccess,
    StatusInfo,
    StatusWarning,
    StatusError,
    Accent,
    Muted,
}

/// Backend-agnostic named colors the CLI maps onto its table renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Green,
    DarkGreen,
    Blue,
    DarkBlue,
    Yellow,
    DarkYellow,
    Red,
    DarkRed,
    Cyan,
    Grey,
    DarkGrey,
}

/// Colors resolved for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors {
    pub status_success: NamedColor,
    pub status_info: NamedColor,
    pub status_warning: NamedColor,
    pub status_error: NamedColor,
    pub accent: NamedColor,
    pub muted: NamedColor,
}

impl ResolvedColors {
    fn for_mode(mode: ColorMode) -> Self {
        match mode {
            // Bright variants read better on dark terminals.
            ColorMode::Dark => Self {
                status_success: NamedColor::Green,
                status_info: NamedColor::Blue,
                status_warning: NamedColor::Yellow,
                status_error: NamedColor::Red,
                accent: NamedColor::Cyan,
                muted: NamedColor::DarkGrey,
            },
            ColorMode::Light => Self {
                status_success: NamedColor::DarkGreen,
                status_info: NamedColor::DarkBlue,
                status_warning: NamedColor::DarkYellow,
                status_error: NamedColor::DarkRed,
                accent: NamedColor::DarkBlue,
                muted: NamedColor::Grey,
            },
        }
    }
}

/// Theme container with resolve-once caching.
#[derive(Debug, Clone)]
pub struct ThemeState {
    mode: ColorMode,
    colors: ResolvedColors,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ColorMode::default())
    }
}

impl ThemeState {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            colors: ResolvedColors::for_mode(mode),
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ColorMode::Dark
    }

    /// Switch modes, re-resolving the palette.
    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
        self.colors = ResolvedColors::for_mode(mode);
    }

    pub fn colors(&self) -> &ResolvedColors {
        &self.colors
    }

    pub fn resolve(&self, slot: SemanticColor) -> NamedColor {
        match slot {
            SemanticColor::StatusSuccess => self.colors.status_success,
            SemanticColor::StatusInfo => self.colors.status_info,
            SemanticColor::StatusWarning => self.colors.status_warning,
            SemanticColor::StatusError => self.colors.status_error,
            SemanticColor::Accent => self.colors.accent,
            SemanticColor::Muted => self.colors.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_switch_reresolves_colors() {
        let mut theme = ThemeState::new(ColorMode::Dark);
        assert_eq!(theme.resolve(SemanticColor::StatusError), NamedColor::Red);

        theme.set_mode(ColorMode::Light);
        assert!(!theme.is_dark());
        assert_eq!(
            theme.resolve(SemanticColor::StatusError),
            NamedColor::DarkRed
        );
    }
}
