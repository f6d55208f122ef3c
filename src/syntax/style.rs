//! Colors and attributes for painting tags
//!
//! A `StyleTable` maps each `StyleTag` to the `Style` a renderer paints
//! it with. The engine itself never looks at styles.

use super::tag::StyleTag;

/// One of the 16 ANSI colors, or the terminal default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color name such as `red`, `bright-blue` or `bright_blue`
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        let color = match name.as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// How one style tag is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Swap foreground and background
    pub reverse: bool,
}

impl Style {
    /// Style that only sets the foreground
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Same style, bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Same style, italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Whether painting with this style changes nothing
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Appearance of every style tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: [Style; StyleTag::ALL.len()],
}

impl StyleTable {
    /// Style used for a tag
    pub fn get(&self, tag: StyleTag) -> Style {
        self.styles[tag.index()]
    }

    /// Override the style used for a tag
    pub fn set(&mut self, tag: StyleTag, style: Style) {
        self.styles[tag.index()] = style;
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            styles: StyleTag::ALL.map(StyleTag::default_style),
        }
    }
}
