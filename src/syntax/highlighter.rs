//! Incremental re-highlighting
//!
//! The `Highlighter` owns the `StyleStore` for one document. After every
//! document mutation it patches the store's shape, re-classifies the
//! smallest span of whole lines that can have changed, and carries the
//! change through the rest of the document when the state leaving that
//! span differs from before. Registered observers are told which byte
//! range to redraw.

use std::ops::Range;

use super::classifier::{classify, classify_into};
use super::store::StyleStore;
use super::tag::{LexState, StyleTag};
use crate::document::Document;
use crate::error::Result;

/// A completed document mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Offset where the change happened
    pub position: usize,
    /// Bytes inserted at `position`
    pub inserted: usize,
    /// Bytes deleted at `position`
    pub deleted: usize,
}

impl Edit {
    /// An insertion of `len` bytes
    pub fn insert(position: usize, len: usize) -> Self {
        Self {
            position,
            inserted: len,
            deleted: 0,
        }
    }

    /// A deletion of `len` bytes
    pub fn delete(position: usize, len: usize) -> Self {
        Self {
            position,
            inserted: 0,
            deleted: len,
        }
    }

    /// Replacement of `deleted` bytes with `inserted` bytes
    pub fn replace(position: usize, deleted: usize, inserted: usize) -> Self {
        Self {
            position,
            inserted,
            deleted,
        }
    }

    /// Whether the edit changes nothing (a selection-only notification)
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Outcome of re-highlighting after an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restyled {
    /// Byte range whose tags were recomputed
    pub range: Range<usize>,
    /// Whether the change spilled past the edited lines into the rest of
    /// the document
    pub propagated: bool,
}

/// Receiver of redraw requests
pub trait Redraw {
    /// Repaint `range` of the document
    fn redraw(&mut self, range: Range<usize>);
}

impl<F: FnMut(Range<usize>)> Redraw for F {
    fn redraw(&mut self, range: Range<usize>) {
        self(range)
    }
}

/// Handle returned when registering an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Keeps a `StyleStore` consistent with a document across edits
#[derive(Default)]
pub struct Highlighter {
    store: StyleStore,
    observers: Vec<(ObserverId, Box<dyn Redraw>)>,
    next_observer: u64,
}

impl Highlighter {
    /// Create a highlighter for an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a redraw observer
    pub fn add_observer(&mut self, observer: Box<dyn Redraw>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detach an observer; returns false if it was not registered
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The style store
    pub fn store(&self) -> &StyleStore {
        &self.store
    }

    /// All tags
    pub fn tags(&self) -> &[StyleTag] {
        self.store.as_slice()
    }

    /// Tag at `index`
    pub fn tag_at(&self, index: usize) -> Result<StyleTag> {
        self.store.tag_at(index)
    }

    /// Copy of the tags in `range`
    pub fn slice(&self, range: Range<usize>) -> Result<Vec<StyleTag>> {
        self.store.slice(range)
    }

    /// Rebuild every tag from scratch after the whole document changed
    pub fn on_bulk_load(&mut self, doc: &impl Document) -> Result<Range<usize>> {
        let len = doc.len();
        self.store.reset(len);
        let text = doc.text_range(0..len);
        let classified = classify(&text, LexState::Plain);
        self.store.replace(0..len, &classified.tags)?;

        tracing::debug!(len, exit = ?classified.exit, "full restyle");
        self.notify(0..len);
        Ok(0..len)
    }

    /// Bring the store up to date after `edit` was applied to `doc`
    ///
    /// Returns `None` for edits that change nothing.
    pub fn on_edit(&mut self, doc: &impl Document, edit: Edit) -> Result<Option<Restyled>> {
        if edit.is_noop() {
            return Ok(None);
        }
        tracing::trace!(
            position = edit.position,
            inserted = edit.inserted,
            deleted = edit.deleted,
            "restyle edit"
        );

        self.patch_shape(edit)?;

        let len = doc.len();
        let end = (doc.line_end(edit.position + edit.inserted) + 1).min(len);
        let (start, entry) = self.recover_entry(doc, doc.line_start(edit.position))?;

        if start == end {
            self.notify(start..end);
            return Ok(Some(Restyled {
                range: start..end,
                propagated: false,
            }));
        }

        let before = self.store.tag_at(end - 1)?;
        let exit = self.classify_span(doc, start..end, entry)?;
        let after = self.store.tag_at(end - 1)?;

        let mut restyled = Restyled {
            range: start..end,
            propagated: false,
        };
        if (after != before || after == StyleTag::BlockComment) && end < len {
            tracing::debug!(?before, ?after, from = end, "restyle propagates to end of document");
            self.classify_span(doc, end..len, exit)?;
            restyled.range.end = len;
            restyled.propagated = true;
        }

        self.notify(restyled.range.clone());
        Ok(Some(restyled))
    }

    /// Resize the store so it matches the edited document, with plain
    /// placeholders for inserted bytes
    fn patch_shape(&mut self, edit: Edit) -> Result<()> {
        let removed = edit.position..edit.position + edit.deleted;
        if edit.inserted > 0 {
            self.store.replace(removed, &vec![StyleTag::Plain; edit.inserted])
        } else {
            self.store.remove(removed)
        }
    }

    /// Find where re-classification must start and the state to start in
    ///
    /// `start` is a line start. When the preceding newline sits inside a
    /// block comment, the start moves back to the line holding the nearest
    /// `/*` (or to offset 0) so the whole comment is re-scanned. The entry
    /// state is always read from the tag before the final start.
    fn recover_entry(&self, doc: &impl Document, start: usize) -> Result<(usize, LexState)> {
        if start == 0 {
            return Ok((0, LexState::Plain));
        }
        let preceding = self.store.tag_at(start - 1)?;
        if preceding != StyleTag::BlockComment {
            return Ok((start, preceding.carried_state()));
        }

        let mut scan = start;
        let widened = loop {
            if scan < 2 {
                break 0;
            }
            match (doc.byte_at(scan - 2), doc.byte_at(scan - 1)) {
                (Some(b'*'), Some(b'/')) => break start,
                (Some(b'/'), Some(b'*')) => break doc.line_start(scan - 2),
                _ => scan -= 1,
            }
        };
        if widened != start {
            tracing::debug!(from = start, to = widened, "restyle widened to comment start");
        }

        let entry = match widened {
            0 => LexState::Plain,
            at => self.store.tag_at(at - 1)?.carried_state(),
        };
        Ok((widened, entry))
    }

    /// Re-classify `range` of the store in place, returning the exit state
    fn classify_span(
        &mut self,
        doc: &impl Document,
        range: Range<usize>,
        entry: LexState,
    ) -> Result<LexState> {
        let text = doc.text_range(range.clone());
        let mut tags = self.store.slice(range.clone())?;
        let exit = classify_into(&text, &mut tags, entry)?;
        self.store.replace(range, &tags)?;
        Ok(exit)
    }

    fn notify(&mut self, range: Range<usize>) {
        for (_, observer) in &mut self.observers {
            observer.redraw(range.clone());
        }
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("len", &self.store.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
