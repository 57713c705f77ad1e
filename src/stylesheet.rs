//! Stylesheet system for graph color palettes
//!
//! A stylesheet maps palette tokens (`connection-line`, `node-fill`, ...) to
//! hex colors. Stylesheets are loaded from TOML and fall back to a built-in
//! palette for any token they leave out.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::style::Color;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid color '{value}' for token '{token}'")]
    InvalidColor { token: String, value: String },
}

/// A stylesheet mapping palette tokens to colors
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> color
    pub colors: HashMap<String, Color>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: light gray edges, dark blue highlight
const DEFAULT_PALETTE: &str = r##"
[colors]
connection-line = "#c0c0c0"
connection-highlight = "#01467a"

node-fill = "#f0f0f0"
node-stroke = "#333333"
node-highlight = "#ffffcc"

text = "#333333"
background = "#ffffff"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        let mut colors = HashMap::with_capacity(parsed.colors.len());
        for (token, value) in parsed.colors {
            let color = Color::from_hex(&value).ok_or_else(|| StylesheetError::InvalidColor {
                token: token.clone(),
                value: value.clone(),
            })?;
            colors.insert(token, color);
        }

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors,
        })
    }

    /// Resolve a palette token
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<Color> {
        self.colors.get(token).copied()
    }

    /// Resolve a palette token with fallback to the default palette
    ///
    /// Fallback order:
    /// 1. This stylesheet
    /// 2. The default palette
    /// 3. Category default (`connection-*` → light gray, `node-*` → near-white, others → dark gray)
    pub fn color_or_default(&self, token: &str) -> Color {
        if let Some(color) = self.resolve(token) {
            return color;
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color;
        }

        if token.starts_with("connection") {
            return Color::LIGHT_GRAY;
        }
        if token.starts_with("node") {
            return Color::rgb(0xf0, 0xf0, 0xf0);
        }
        Color::rgb(0x33, 0x33, 0x33)
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("connection-line"));
        assert!(stylesheet.colors.contains_key("connection-highlight"));
        assert!(stylesheet.colors.contains_key("node-fill"));
        assert!(stylesheet.colors.contains_key("text"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("connection-line"), Some(Color::LIGHT_GRAY));
        assert_eq!(
            stylesheet.resolve("connection-highlight"),
            Some(Color::DARK_BLUE)
        );
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_color_or_default_fallback() {
        let empty = Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        };
        assert_eq!(empty.color_or_default("connection-highlight"), Color::DARK_BLUE);
        assert_eq!(empty.color_or_default("connection-custom"), Color::LIGHT_GRAY);
        assert_eq!(empty.color_or_default("whatever"), Color::rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Test Theme"
description = "A test theme"

[colors]
connection-line = "#000000"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Test Theme".to_string()));
        assert_eq!(stylesheet.description, Some("A test theme".to_string()));
        assert_eq!(stylesheet.resolve("connection-line"), Some(Color::BLACK));
    }

    #[test]
    fn test_invalid_color_error() {
        let toml_str = r##"
[colors]
connection-line = "grey"
"##;
        let err = Stylesheet::from_str(toml_str).unwrap_err();
        assert!(matches!(err, StylesheetError::InvalidColor { .. }));
        assert!(err.to_string().contains("connection-line"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Stylesheet::from_str(invalid);
        assert!(result.is_err());
    }
}
