//! Syntax highlighting engine
//!
//! This module provides:
//! - Byte classification into style tags for a fixed C-like lexicon
//! - The per-byte style store kept in lockstep with a document
//! - Incremental re-highlighting driven by edit notifications

mod classifier;
mod highlighter;
mod lexicon;
mod store;
mod style;
mod tag;

pub use classifier::{classify, classify_into, Classified};
pub use highlighter::{Edit, Highlighter, ObserverId, Redraw, Restyled};
pub use lexicon::{lookup, KEYWORDS, TYPES};
pub use store::StyleStore;
pub use style::{Color, Style, StyleTable};
pub use tag::{codes_to_tags, tags_to_codes, LexState, StyleTag};
