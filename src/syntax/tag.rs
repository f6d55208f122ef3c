//! Style tags and lexer states
//!
//! Every byte of a document carries one `StyleTag`. The lexer carries a
//! `LexState` between spans; the two share a representation so the state
//! at a line start can be read back from the tag of the preceding newline.

use super::style::{Color, Style};

/// Syntax category assigned to a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleTag {
    /// Ordinary text
    #[default]
    Plain,
    /// `// ...` through the end of the line
    LineComment,
    /// `/* ... */`, possibly spanning lines
    BlockComment,
    /// `"..."` string literals
    String,
    /// `#...` directives starting at column 0
    Directive,
    /// Identifiers found in the type table
    Type,
    /// Identifiers found in the keyword table
    Keyword,
}

impl StyleTag {
    /// All tags in declaration order
    pub const ALL: [StyleTag; 7] = [
        StyleTag::Plain,
        StyleTag::LineComment,
        StyleTag::BlockComment,
        StyleTag::String,
        StyleTag::Directive,
        StyleTag::Type,
        StyleTag::Keyword,
    ];

    /// Position of this tag in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the default style for this tag
    pub fn default_style(self) -> Style {
        match self {
            StyleTag::Plain => Style::default(),
            StyleTag::LineComment => Style::fg(Color::Green).with_italic(),
            StyleTag::BlockComment => Style::fg(Color::Green).with_italic(),
            StyleTag::String => Style::fg(Color::Blue),
            StyleTag::Directive => Style::fg(Color::Red),
            StyleTag::Type => Style::fg(Color::Red).with_bold(),
            StyleTag::Keyword => Style::fg(Color::Blue).with_bold(),
        }
    }

    /// Configuration name of this tag
    pub fn name(self) -> &'static str {
        match self {
            StyleTag::Plain => "plain",
            StyleTag::LineComment => "line-comment",
            StyleTag::BlockComment => "block-comment",
            StyleTag::String => "string",
            StyleTag::Directive => "directive",
            StyleTag::Type => "type",
            StyleTag::Keyword => "keyword",
        }
    }

    /// Parse a tag from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Single-letter code used in style dumps (`A` for plain through `G`)
    pub fn code(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Parse a tag from its dump code
    pub fn from_code(code: char) -> Option<Self> {
        let idx = (code as u32).checked_sub('A' as u32)? as usize;
        Self::ALL.get(idx).copied()
    }

    /// Lexer state in effect after a newline carrying this tag
    ///
    /// Block comments and strings stay open across lines; line comments
    /// and directives end at the newline.
    pub fn carried_state(self) -> LexState {
        match self {
            StyleTag::BlockComment => LexState::BlockComment,
            StyleTag::String => LexState::String,
            _ => LexState::Plain,
        }
    }
}

/// Open construct carried between classifier invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexState {
    #[default]
    Plain,
    LineComment,
    BlockComment,
    String,
    Directive,
}

impl LexState {
    /// The tag written for bytes scanned in this state
    pub fn tag(self) -> StyleTag {
        match self {
            LexState::Plain => StyleTag::Plain,
            LexState::LineComment => StyleTag::LineComment,
            LexState::BlockComment => StyleTag::BlockComment,
            LexState::String => StyleTag::String,
            LexState::Directive => StyleTag::Directive,
        }
    }

    /// Whether this construct ends at the next newline
    pub fn ends_at_newline(self) -> bool {
        matches!(self, LexState::LineComment | LexState::Directive)
    }
}

impl From<LexState> for StyleTag {
    fn from(state: LexState) -> Self {
        state.tag()
    }
}

/// Render tags as their dump codes
pub fn tags_to_codes(tags: &[StyleTag]) -> String {
    tags.iter().map(|tag| tag.code()).collect()
}

/// Parse a string of dump codes, returning `None` on an unknown code
pub fn codes_to_tags(codes: &str) -> Option<Vec<StyleTag>> {
    codes.chars().map(StyleTag::from_code).collect()
}
