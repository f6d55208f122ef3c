//! Editing session: one document, its styles and its file
//!
//! All text mutations go through the session so the document is always
//! changed before the highlighter hears about it. Undo and redo replay
//! recorded edits through the same path.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::document::{Document, TextBuffer};
use crate::error::{RestyleError, Result};
use crate::history::{EditHistory, EditRecord};
use crate::syntax::{Edit, Highlighter, ObserverId, Redraw, Restyled, StyleTag};

/// A document together with its highlighter and file state
#[derive(Debug, Default)]
pub struct Session {
    buffer: TextBuffer,
    highlighter: Highlighter,
    history: EditHistory,
    filename: Option<PathBuf>,
    modified: bool,
}

impl Session {
    /// Create an empty, unnamed session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unnamed session holding `text`
    pub fn with_text(text: impl AsRef<[u8]>) -> Result<Self> {
        let mut session = Self::new();
        session.set_text(text)?;
        Ok(session)
    }

    /// Create a session from a file on disk
    pub fn open(path: &Path) -> Result<Self> {
        let mut session = Self::new();
        session.load_file(path)?;
        Ok(session)
    }

    /// The document
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Document bytes
    pub fn text(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// The highlighter
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// One tag per document byte
    pub fn tags(&self) -> &[StyleTag] {
        self.highlighter.tags()
    }

    /// Tag of the byte at `index`
    pub fn tag_at(&self, index: usize) -> Result<StyleTag> {
        self.highlighter.tag_at(index)
    }

    /// Associated file, if any
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Whether there are unsaved changes
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Window title: the file's base name or `Untitled`, marked when modified
    pub fn title(&self) -> String {
        let mut title = self
            .filename
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        if self.modified {
            title.push_str(" *");
        }
        title
    }

    /// Register a redraw observer
    pub fn add_observer(&mut self, observer: Box<dyn Redraw>) -> ObserverId {
        self.highlighter.add_observer(observer)
    }

    /// Detach a redraw observer
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.highlighter.remove_observer(id)
    }

    /// Insert `text` at `pos`
    pub fn insert(&mut self, pos: usize, text: impl AsRef<[u8]>) -> Result<Option<Restyled>> {
        let text = text.as_ref();
        self.buffer.insert(pos, text)?;
        self.commit(EditRecord::new(pos, Vec::new(), text.to_vec()))
    }

    /// Delete `range`
    pub fn delete(&mut self, range: Range<usize>) -> Result<Option<Restyled>> {
        let removed = self.buffer.delete(range.clone())?;
        self.commit(EditRecord::new(range.start, removed, Vec::new()))
    }

    /// Replace `range` with `text`
    pub fn replace(&mut self, range: Range<usize>, text: impl AsRef<[u8]>) -> Result<Option<Restyled>> {
        let text = text.as_ref();
        let removed = self.buffer.replace(range.clone(), text)?;
        self.commit(EditRecord::new(range.start, removed, text.to_vec()))
    }

    /// Revert the most recent edit
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<Restyled>> {
        match self.history.pop_undo() {
            Some(record) => self.apply(&record.inverse()),
            None => Ok(None),
        }
    }

    /// Re-apply the most recently undone edit
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<Option<Restyled>> {
        match self.history.pop_redo() {
            Some(record) => self.apply(&record),
            None => Ok(None),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Record an edit already applied to the buffer and restyle for it
    fn commit(&mut self, record: EditRecord) -> Result<Option<Restyled>> {
        let edit = record.edit();
        if !edit.is_noop() {
            self.history.push(record);
        }
        self.edited(edit)
    }

    /// Apply a recorded edit to the buffer without recording it again
    fn apply(&mut self, record: &EditRecord) -> Result<Option<Restyled>> {
        let range = record.position..record.position + record.deleted.len();
        self.buffer.replace(range, &record.inserted)?;
        self.edited(record.edit())
    }

    fn edited(&mut self, edit: Edit) -> Result<Option<Restyled>> {
        let restyled = self.highlighter.on_edit(&self.buffer, edit)?;
        if !edit.is_noop() {
            self.modified = true;
        }
        Ok(restyled)
    }

    /// Replace the whole document and rebuild all styles
    ///
    /// The session is left unmodified, as after loading a file.
    pub fn set_text(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        self.buffer.set_bytes(text.as_ref().to_vec());
        self.highlighter.on_bulk_load(&self.buffer)?;
        self.history.clear();
        self.modified = false;
        Ok(())
    }

    /// Load `path`, replacing the document, and take its name
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let buffer = TextBuffer::from_file(path)?;
        tracing::info!(path = %path.display(), len = buffer.len(), "loaded file");
        self.buffer = buffer;
        self.highlighter.on_bulk_load(&self.buffer)?;
        self.history.clear();
        self.filename = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Insert the contents of `path` at `pos` and rebuild all styles
    pub fn insert_file(&mut self, path: &Path, pos: usize) -> Result<()> {
        let contents = std::fs::read(path)?;
        self.buffer.insert(pos, &contents)?;
        tracing::info!(path = %path.display(), pos, len = contents.len(), "inserted file");
        self.highlighter.on_bulk_load(&self.buffer)?;
        self.history.clear();
        self.modified = true;
        Ok(())
    }

    /// Start over with an empty, unnamed document
    pub fn clear(&mut self) -> Result<()> {
        self.buffer.clear();
        self.highlighter.on_bulk_load(&self.buffer)?;
        self.history.clear();
        self.filename = None;
        self.modified = false;
        Ok(())
    }

    /// Save to the associated file
    pub fn save(&mut self) -> Result<()> {
        let path = self.filename.clone().ok_or(RestyleError::NoFilename)?;
        self.save_as(&path)
    }

    /// Save to `path` and make it the associated file
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.buffer.write_to(path)?;
        tracing::info!(path = %path.display(), len = self.buffer.len(), "saved file");
        self.filename = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Find `needle` at or after `from`
    pub fn find(&self, from: usize, needle: impl AsRef<[u8]>) -> Option<usize> {
        self.buffer.find(from, needle.as_ref())
    }

    /// Replace the next occurrence of `find` at or after `from`
    ///
    /// Returns the offset just past the replacement, or `None` when there
    /// is no further occurrence.
    pub fn replace_next(
        &mut self,
        from: usize,
        find: impl AsRef<[u8]>,
        with: impl AsRef<[u8]>,
    ) -> Result<Option<usize>> {
        let (find, with) = (find.as_ref(), with.as_ref());
        let Some(at) = self.buffer.find(from, find) else {
            return Ok(None);
        };
        self.replace(at..at + find.len(), with)?;
        Ok(Some(at + with.len()))
    }

    /// Replace every occurrence of `find`, returning how many were replaced
    pub fn replace_all(&mut self, find: impl AsRef<[u8]>, with: impl AsRef<[u8]>) -> Result<usize> {
        let (find, with) = (find.as_ref(), with.as_ref());
        let mut count = 0;
        let mut pos = 0;
        while let Some(next) = self.replace_next(pos, find, with)? {
            pos = next;
            count += 1;
        }
        tracing::debug!(count, "replace all");
        Ok(count)
    }
}
