//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use proptest::prelude::*;
use proptest::sample::Index;
use restyle::syntax::{classify, tags_to_codes, LexState};
use restyle::{Edit, Restyled, Session, StyleTag};

/// Fragments that exercise every lexical state and its boundaries
pub const FRAGMENTS: &[&str] = &[
    "/*", "*/", "//", "\"", "\\", "\\\"", "\n", "#", "int ", "if", "return", " ", "x", ";",
    "Fl_Box", "/", "*", "abc\n", "# define X\n",
];

/// Tags a from-scratch classification of the session's text would give
pub fn full_tags(session: &Session) -> Vec<StyleTag> {
    classify(session.text(), LexState::Plain).tags
}

/// Assert the incrementally maintained tags match a full classification
pub fn assert_consistent(session: &Session) {
    assert_eq!(session.tags().len(), session.text().len());
    let expected = full_tags(session);
    if session.tags() != expected.as_slice() {
        panic!(
            "tags diverged for {:?}\n incremental: {}\n full:        {}",
            String::from_utf8_lossy(session.text()),
            tags_to_codes(session.tags()),
            tags_to_codes(&expected),
        );
    }
}

// ============================================================================
// Edit script strategies
// ============================================================================

/// Kind of a scripted edit; counts are bytes removed after the position
#[derive(Debug, Clone, Copy)]
pub enum EditOp {
    Insert,
    Delete(usize),
    Replace(usize),
}

/// One scripted edit; the position is picked relative to the current length
pub type ScriptedEdit = (EditOp, Index, Vec<u8>);

/// Text to insert: mostly lexically interesting fragments, sometimes raw bytes
pub fn fragment() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => prop::sample::select(FRAGMENTS).prop_map(|s| s.as_bytes().to_vec()),
        1 => prop::collection::vec(any::<u8>(), 1..4),
    ]
}

pub fn edit_op() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        Just(EditOp::Insert),
        (1usize..6).prop_map(EditOp::Delete),
        (0usize..4).prop_map(EditOp::Replace),
    ]
}

pub fn edit_script(max_edits: usize) -> impl Strategy<Value = Vec<ScriptedEdit>> {
    prop::collection::vec((edit_op(), any::<Index>(), fragment()), 1..max_edits)
}

/// Starting documents for edit scripts
pub const SEEDS: &[&str] = &[
    "",
    "int main() {\n  return 0; /* done */\n}\n",
    "// a\n/* b */ \"c\"\n#d\n",
    "/* open\nx\ny\n",
    "\"str\ning\n",
];

pub fn seed_text() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SEEDS)
}

/// Apply one scripted edit, returning its shape and the highlighter's answer
pub fn apply_edit(session: &mut Session, (op, at, text): &ScriptedEdit) -> (Edit, Option<Restyled>) {
    let len = session.text().len();
    let pos = at.index(len + 1);
    let (edit, restyled) = match *op {
        EditOp::Insert => (Edit::insert(pos, text.len()), session.insert(pos, text)),
        EditOp::Delete(n) => {
            let end = (pos + n).min(len);
            (Edit::delete(pos, end - pos), session.delete(pos..end))
        }
        EditOp::Replace(n) => {
            let end = (pos + n).min(len);
            (Edit::replace(pos, end - pos, text.len()), session.replace(pos..end, text))
        }
    };
    match restyled {
        Ok(restyled) => (edit, restyled),
        Err(e) => panic!("edit {edit:?} on length {len} failed: {e}"),
    }
}
