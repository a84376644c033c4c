//! Theme configuration.
//!
//! A [`ThemeConfig`] carries the default metrics and colors used when views
//! are created and drawn. It is passed explicitly to [`crate::Context`] and
//! inside every [`crate::RenderContext`]; nothing reads a global theme.
//!
//! Themes are plain TOML. Every field is optional and falls back to
//! [`ThemeConfig::default`]:
//!
//! ```toml
//! space = 6
//! border_width = 5
//! round_radius = 4.0
//!
//! [margin]
//! left = 8
//! right = 8
//!
//! [palette.frame]
//! r = 40
//! g = 40
//! b = 40
//! a = 255
//! ```

use std::path::Path;

use blendint_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{BlendIntError, ViewResult};
use crate::geometry::{Margin, Size};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Colors used by the built-in views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub frame: Color,
    pub dialog: Color,
    pub panel: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_pressed: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            frame: Color::rgb(0x47, 0x47, 0x47),
            dialog: Color::rgb(0x3a, 0x3a, 0x3a),
            panel: Color::rgb(0x52, 0x52, 0x52),
            button: Color::rgb(0x99, 0x99, 0x99),
            button_hover: Color::rgb(0xa6, 0xa6, 0xa6),
            button_pressed: Color::rgb(0x64, 0x64, 0x64),
            text: Color::rgb(0xe6, 0xe6, 0xe6),
        }
    }
}

/// Default metrics and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Gap between neighbouring children of a layout.
    pub space: i32,
    /// Margin applied by new layouts and panels.
    pub margin: Margin,
    /// Width of the resize handle zone along a frame's edges.
    pub border_width: i32,
    /// Smallest size a frame can be drag-resized to.
    pub min_frame_size: Size,
    /// Corner radius given to new rounded views.
    pub round_radius: f32,
    pub palette: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            space: 4,
            margin: Margin::uniform(2),
            border_width: 4,
            min_frame_size: Size::new(40, 40),
            round_radius: 5.0,
            palette: Palette::default(),
        }
    }
}

impl ThemeConfig {
    /// Parse a theme from TOML text.
    pub fn from_toml_str(text: &str) -> ViewResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a theme from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ViewResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| BlendIntError::io(path, e))?;
        let theme = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::THEME, path = %path.display(), "loaded theme");
        Ok(theme)
    }

    /// Serialize the theme to TOML text.
    pub fn to_toml_string(&self) -> ViewResult<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_theme_is_default() {
        let theme = ThemeConfig::from_toml_str("").unwrap();
        assert_eq!(theme, ThemeConfig::default());
    }

    #[test]
    fn test_partial_theme_overrides() {
        let theme = ThemeConfig::from_toml_str(
            r#"
            space = 10
            round_radius = 2.5

            [margin]
            left = 7

            [palette.text]
            r = 1
            g = 2
            b = 3
            "#,
        )
        .unwrap();

        assert_eq!(theme.space, 10);
        assert_eq!(theme.round_radius, 2.5);
        assert_eq!(theme.margin, Margin::new(7, 0, 0, 0));
        assert_eq!(theme.palette.text, Color::rgb(1, 2, 3));
        assert_eq!(theme.border_width, ThemeConfig::default().border_width);
    }

    #[test]
    fn test_invalid_theme() {
        let err = ThemeConfig::from_toml_str("space = \"wide\"").unwrap_err();
        assert!(matches!(err, BlendIntError::ThemeParse(_)));
    }

    #[test]
    fn test_theme_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");

        let mut theme = ThemeConfig::default();
        theme.border_width = 9;
        std::fs::write(&path, theme.to_toml_string().unwrap()).unwrap();

        assert_eq!(ThemeConfig::load(&path).unwrap(), theme);
    }

    #[test]
    fn test_missing_theme_file() {
        let err = ThemeConfig::load("/nonexistent/theme.toml").unwrap_err();
        assert!(matches!(err, BlendIntError::Io { .. }));
    }
}
