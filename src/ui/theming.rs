// SPDX-License-Identifier: MPL-2.0
//! Light/dark colour schemes for toast rendering.

use crate::ui::design_tokens::{opacity, palette};
use crate::ui::notifications::Variant;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette used by the toast widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    // Surface colors
    pub surface: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,

    // Semantic colors
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,
    pub loading: Color,
}

impl ColorScheme {
    /// Light theme (Light mode).
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface: palette::WHITE,

            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,
            loading: palette::PRIMARY_500,
        }
    }

    /// Dark theme (Dark mode).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface: Color {
                a: opacity::SURFACE,
                ..palette::GRAY_900
            },

            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,
            loading: palette::PRIMARY_400,
        }
    }

    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        if mode.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Accent colour for a toast variant.
    #[must_use]
    pub fn accent(&self, variant: Variant) -> Color {
        match variant {
            Variant::Success => self.success,
            Variant::Error => self.error,
            Variant::Warning => self.warning,
            Variant::Info => self.info,
            Variant::Loading => self.loading,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => {
                // Detect system theme; default to dark on detection error
                !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
            }
        }
    }

    /// Built-in Iced theme matching this mode.
    #[must_use]
    pub fn theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_has_light_surface() {
        let scheme = ColorScheme::light();
        assert!(scheme.surface.r > 0.9); // Close to white
    }

    #[test]
    fn dark_theme_has_dark_surface() {
        let scheme = ColorScheme::dark();
        assert!(scheme.surface.r < 0.2); // Close to black
    }

    #[test]
    fn accent_follows_variant() {
        let scheme = ColorScheme::light();
        assert_eq!(scheme.accent(Variant::Error), palette::ERROR_500);
        assert_eq!(scheme.accent(Variant::Success), palette::SUCCESS_500);
    }

    #[test]
    fn theme_mode_is_dark_returns_correct_values() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        // System mode depends on actual system theme, so we just verify it doesn't panic
        let _ = ThemeMode::System.is_dark();
    }

    #[test]
    fn explicit_modes_map_to_builtin_themes() {
        assert_eq!(ThemeMode::Light.theme(), Theme::Light);
        assert_eq!(ThemeMode::Dark.theme(), Theme::Dark);
    }
}
