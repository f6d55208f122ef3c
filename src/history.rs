//! Edit history (undo/redo) for a session

use crate::syntax::Edit;

const DEFAULT_MAX_SIZE: usize = 1000;

/// One applied document change, with enough bytes to reverse it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    /// Byte offset where the change happened
    pub position: usize,
    /// Bytes that were removed (empty for pure inserts)
    pub deleted: Vec<u8>,
    /// Bytes that were added (empty for pure deletes)
    pub inserted: Vec<u8>,
}

impl EditRecord {
    pub fn new(position: usize, deleted: Vec<u8>, inserted: Vec<u8>) -> Self {
        Self {
            position,
            deleted,
            inserted,
        }
    }

    /// The change that undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            position: self.position,
            deleted: self.inserted.clone(),
            inserted: self.deleted.clone(),
        }
    }

    /// Shape of this change as seen by the highlighter
    pub fn edit(&self) -> Edit {
        Edit::replace(self.position, self.deleted.len(), self.inserted.len())
    }
}

/// Undo and redo stacks
///
/// Both stacks hold records in the direction they were originally applied.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditRecord>,
    redo_stack: Vec<EditRecord>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_size` undoable records
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record a fresh change (clears the redo stack)
    pub fn push(&mut self, record: EditRecord) {
        self.redo_stack.clear();
        self.undo_stack.push(record);
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Take the most recent change to undo; it becomes redoable
    pub fn pop_undo(&mut self) -> Option<EditRecord> {
        let record = self.undo_stack.pop()?;
        self.redo_stack.push(record.clone());
        Some(record)
    }

    /// Take the most recently undone change to re-apply; it becomes undoable
    pub fn pop_redo(&mut self) -> Option<EditRecord> {
        let record = self.redo_stack.pop()?;
        self.undo_stack.push(record.clone());
        Some(record)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forget everything, e.g. after the whole document was replaced
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
