//! restyle - incremental syntax highlighting for C-like source text
//!
//! Every byte of a document carries a style tag. After an edit only the
//! smallest span that can have changed is reclassified, and the result is
//! always identical to highlighting the whole document from scratch.

pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod logging;
pub mod render;
pub mod session;
pub mod syntax;

pub use config::Config;
pub use document::{Document, TextBuffer};
pub use error::{RestyleError, Result};
pub use history::{EditHistory, EditRecord};
pub use render::{dump, render, RenderOptions};
pub use session::Session;
pub use syntax::{Edit, Highlighter, Restyled, StyleTag};
