//! Byte-scanning classifier
//!
//! Maps a span of source bytes plus an entry state to one tag per byte and
//! the state in effect after the span. The scan never fails: any byte
//! sequence produces some tag sequence.
//!
//! Callers start spans at line starts. Column 0 of the span is treated as
//! column 0 of a line for directive detection.

use super::lexicon;
use super::tag::{LexState, StyleTag};
use crate::error::{RestyleError, Result};

/// Output of a classification pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// One tag per input byte
    pub tags: Vec<StyleTag>,
    /// State in effect after the last byte
    pub exit: LexState,
}

/// Classify `text` starting in `entry`
pub fn classify(text: &[u8], entry: LexState) -> Classified {
    let mut tags = vec![StyleTag::Plain; text.len()];
    let exit = scan(text, &mut tags, entry);
    Classified { tags, exit }
}

/// Classify `text` into an existing tag buffer of the same length
///
/// The previous contents of `tags` are overwritten.
pub fn classify_into(text: &[u8], tags: &mut [StyleTag], entry: LexState) -> Result<LexState> {
    if text.len() != tags.len() {
        return Err(RestyleError::MalformedSpan {
            text_len: text.len(),
            tags_len: tags.len(),
        });
    }
    Ok(scan(text, tags, entry))
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Lexer cursor over one span
struct Scanner<'a> {
    text: &'a [u8],
    tags: &'a mut [StyleTag],
    pos: usize,
    col: usize,
    state: LexState,
    /// Whether the previous byte was an identifier byte
    after_ident: bool,
}

impl<'a> Scanner<'a> {
    fn peek(&self, offset: usize) -> Option<u8> {
        self.text.get(self.pos + offset).copied()
    }

    /// Whether the two bytes at the cursor are `pair`
    fn at_pair(&self, pair: &[u8; 2]) -> bool {
        self.text[self.pos..].starts_with(pair)
    }

    /// Tag `len` bytes at the cursor with `tag` and advance past them
    fn emit(&mut self, len: usize, tag: StyleTag) {
        for slot in &mut self.tags[self.pos..self.pos + len] {
            *slot = tag;
        }
        self.pos += len;
        self.col += len;
    }

    /// Tag the byte at the cursor with the current state and advance,
    /// handling end-of-line resets
    fn emit_byte(&mut self) {
        let b = self.text[self.pos];
        self.emit(1, self.state.tag());
        self.after_ident = is_ident_byte(b);
        if b == b'\n' {
            self.col = 0;
            if self.state.ends_at_newline() {
                self.state = LexState::Plain;
            }
        }
    }

    /// Emit a two-byte construct with `tag`, then switch to `next`
    fn emit_pair(&mut self, tag: StyleTag, next: LexState) {
        self.emit(2, tag);
        self.state = next;
        self.after_ident = false;
    }

    fn step_plain(&mut self) {
        let b = self.text[self.pos];

        if self.col == 0 && b == b'#' {
            self.state = LexState::Directive;
        } else if self.at_pair(b"//") {
            return self.emit_pair(StyleTag::LineComment, LexState::LineComment);
        } else if self.at_pair(b"/*") {
            return self.emit_pair(StyleTag::BlockComment, LexState::BlockComment);
        } else if self.at_pair(b"\\\"") {
            return self.emit_pair(StyleTag::Plain, LexState::Plain);
        } else if b == b'"' {
            self.state = LexState::String;
        } else if !self.after_ident && b.is_ascii_alphabetic() {
            let len = self.text[self.pos..]
                .iter()
                .take_while(|&&c| is_ident_byte(c))
                .count();
            if let Some(tag) = lexicon::lookup(&self.text[self.pos..self.pos + len]) {
                self.emit(len, tag);
                self.after_ident = true;
                return;
            }
        }

        self.emit_byte();
    }

    fn step_block_comment(&mut self) {
        if self.at_pair(b"*/") {
            self.emit_pair(StyleTag::BlockComment, LexState::Plain);
        } else {
            self.emit_byte();
        }
    }

    fn step_string(&mut self) {
        if self.at_pair(b"\\\"") {
            self.emit_pair(StyleTag::String, LexState::String);
        } else if self.peek(0) == Some(b'"') {
            self.emit(1, StyleTag::String);
            self.state = LexState::Plain;
            self.after_ident = false;
        } else {
            self.emit_byte();
        }
    }
}

fn scan(text: &[u8], tags: &mut [StyleTag], entry: LexState) -> LexState {
    let mut scanner = Scanner {
        text,
        tags,
        pos: 0,
        col: 0,
        state: entry,
        after_ident: false,
    };

    while scanner.pos < text.len() {
        match scanner.state {
            LexState::Plain => scanner.step_plain(),
            LexState::BlockComment => scanner.step_block_comment(),
            LexState::String => scanner.step_string(),
            LexState::LineComment | LexState::Directive => scanner.emit_byte(),
        }
    }

    scanner.state
}
