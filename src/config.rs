//! Configuration file support
//!
//! Loads settings from ~/.restyle.toml (or %USERPROFILE%\.restyle.toml on Windows)
//!
//! Example:
//! ```toml
//! line-numbers = true
//! max-width = 100
//! color = true
//!
//! [styles.keyword]
//! fg = "bright-blue"
//! bold = true
//!
//! [styles.block-comment]
//! fg = "bright-black"
//! italic = true
//! ```
//!
//! Unknown keys and values of the wrong type are ignored with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::Result;
use crate::syntax::{Color, Style, StyleTable, StyleTag};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Display width limit per line (None = unlimited)
    pub max_width: Option<usize>,
    /// Whether to emit colors and attributes
    pub color: bool,
    /// Appearance of each style tag
    pub styles: StyleTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            max_width: None,
            color: true,
            styles: StyleTable::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".restyle.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".restyle.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults; a broken one is reported.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table);
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) {
        for (key, value) in table {
            match key.as_str() {
                "line-numbers" => match value.as_bool() {
                    Some(b) => self.show_line_numbers = b,
                    None => ignored(key, value),
                },
                "color" => match value.as_bool() {
                    Some(b) => self.color = b,
                    None => ignored(key, value),
                },
                "max-width" => match value.as_integer() {
                    Some(0) => self.max_width = None,
                    Some(n) if n > 0 => self.max_width = Some(n as usize),
                    _ => ignored(key, value),
                },
                "styles" => match value.as_table() {
                    Some(styles) => self.apply_styles(styles),
                    None => ignored(key, value),
                },
                _ => tracing::warn!(key = %key, "unknown config key"),
            }
        }
    }

    fn apply_styles(&mut self, styles: &Table) {
        for (name, value) in styles {
            let (Some(tag), Some(attrs)) = (StyleTag::from_name(name), value.as_table()) else {
                ignored(&format!("styles.{name}"), value);
                continue;
            };
            let style = apply_style(self.styles.get(tag), name, attrs);
            self.styles.set(tag, style);
        }
    }
}

/// Overlay the attributes in `attrs` onto `style`
fn apply_style(mut style: Style, name: &str, attrs: &Table) -> Style {
    for (attr, value) in attrs {
        let key = format!("styles.{name}.{attr}");
        match attr.as_str() {
            "fg" | "bg" => match value.as_str().and_then(Color::from_name) {
                Some(color) if attr == "fg" => style.fg = color,
                Some(color) => style.bg = color,
                None => ignored(&key, value),
            },
            "bold" | "italic" | "underline" | "reverse" => {
                let Some(on) = value.as_bool() else {
                    ignored(&key, value);
                    continue;
                };
                match attr.as_str() {
                    "bold" => style.bold = on,
                    "italic" => style.italic = on,
                    "underline" => style.underline = on,
                    _ => style.reverse = on,
                }
            }
            _ => tracing::warn!(key = %key, "unknown style attribute"),
        }
    }
    style
}

fn ignored(key: &str, value: &Value) {
    tracing::warn!(key = %key, value = %value, "ignoring invalid config value");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
line-numbers = true
max-width = 80
color = false
        "#;

        let config = Config::parse(contents).unwrap();
        assert!(config.show_line_numbers);
        assert_eq!(config.max_width, Some(80));
        assert!(!config.color);
        assert_eq!(config.styles, StyleTable::default());
    }

    #[test]
    fn test_zero_width_means_unlimited() {
        let config = Config::parse("max-width = 0").unwrap();
        assert_eq!(config.max_width, None);
    }

    #[test]
    fn test_style_overrides() {
        let contents = r#"
[styles.keyword]
fg = "bright-magenta"
underline = true

[styles.plain]
bg = "black"
        "#;

        let config = Config::parse(contents).unwrap();
        let keyword = config.styles.get(StyleTag::Keyword);
        assert_eq!(keyword.fg, Color::BrightMagenta);
        assert!(keyword.underline);
        // untouched attributes keep their defaults
        assert!(keyword.bold);
        assert_eq!(config.styles.get(StyleTag::Plain).bg, Color::Black);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let contents = r#"
line-numbers = "yes"
max-width = -4
unknown = 1

[styles.keyword]
fg = "mauve"
bold = 3

[styles.nonsense]
fg = "red"
        "#;

        let config = Config::parse(contents).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_syntax_error_reported() {
        assert!(Config::parse("line-numbers = ").is_err());
    }
}
