//! Document access for the highlighter
//!
//! The highlighter only reads documents through the `Document` trait.
//! `TextBuffer` is the byte-oriented implementation used by `Session`.

use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use crate::error::{check_range, Result};

/// Read access the highlighter needs from a document
///
/// Offsets are byte offsets. Implementations must keep `text_range`,
/// `byte_at` and the line queries consistent with `len`.
pub trait Document {
    /// Length in bytes
    fn len(&self) -> usize;

    /// Whether the document is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes in `range`, clamped to the document
    fn text_range(&self, range: Range<usize>) -> Cow<'_, [u8]>;

    /// Byte at `index`, if any
    fn byte_at(&self, index: usize) -> Option<u8>;

    /// Offset of the first byte of the line containing `pos`
    fn line_start(&self, pos: usize) -> usize;

    /// Offset of the newline ending the line containing `pos`, or `len()`
    /// on the last line
    fn line_end(&self, pos: usize) -> usize;
}

/// A flat, growable byte buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Read a whole file into a new buffer
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            bytes: std::fs::read(path)?,
        })
    }

    /// All bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Contents as text, replacing invalid UTF-8
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Replace the whole contents
    pub fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
    }

    /// Insert `text` at `pos`
    pub fn insert(&mut self, pos: usize, text: &[u8]) -> Result<()> {
        self.replace(pos..pos, text).map(|_| ())
    }

    /// Delete `range`, returning the removed bytes
    pub fn delete(&mut self, range: Range<usize>) -> Result<Vec<u8>> {
        check_range(range.start, range.end, self.bytes.len())?;
        Ok(self.bytes.drain(range).collect())
    }

    /// Replace `range` with `text`, returning the replaced bytes
    pub fn replace(&mut self, range: Range<usize>, text: &[u8]) -> Result<Vec<u8>> {
        check_range(range.start, range.end, self.bytes.len())?;
        Ok(self.bytes.splice(range, text.iter().copied()).collect())
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Find `needle` at or after `from`
    pub fn find(&self, from: usize, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || from >= self.bytes.len() {
            return None;
        }
        self.bytes[from..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|idx| from + idx)
    }

    /// Write the buffer to `path`
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}

impl Document for TextBuffer {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn text_range(&self, range: Range<usize>) -> Cow<'_, [u8]> {
        let end = range.end.min(self.bytes.len());
        let start = range.start.min(end);
        Cow::Borrowed(&self.bytes[start..end])
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.bytes.len());
        self.bytes[..pos]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |idx| idx + 1)
    }

    fn line_end(&self, pos: usize) -> usize {
        let pos = pos.min(self.bytes.len());
        self.bytes[pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |idx| pos + idx)
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

impl From<Vec<u8>> for TextBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_queries() {
        let buf = TextBuffer::from("ab\ncd\n\nef");
        assert_eq!(buf.line_start(0), 0);
        assert_eq!(buf.line_start(2), 0); // the newline belongs to its line
        assert_eq!(buf.line_start(3), 3);
        assert_eq!(buf.line_start(6), 6);
        assert_eq!(buf.line_start(9), 7);

        assert_eq!(buf.line_end(0), 2);
        assert_eq!(buf.line_end(2), 2);
        assert_eq!(buf.line_end(3), 5);
        assert_eq!(buf.line_end(6), 6);
        assert_eq!(buf.line_end(7), 9);
        assert_eq!(buf.line_end(100), 9);
    }

    #[test]
    fn test_line_queries_empty() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_start(0), 0);
        assert_eq!(buf.line_end(0), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_edit_operations() {
        let mut buf = TextBuffer::from("Hello World");
        buf.insert(5, b",").unwrap();
        assert_eq!(buf.as_bytes(), b"Hello, World");

        let removed = buf.delete(0..7).unwrap();
        assert_eq!(removed, b"Hello, ");
        assert_eq!(buf.as_bytes(), b"World");

        assert_eq!(buf.replace(0..1, b"w").unwrap(), b"W");
        assert_eq!(buf.to_string_lossy(), "world");

        assert!(buf.insert(6, b"x").is_err());
        assert!(buf.delete(3..9).is_err());
    }

    #[test]
    fn test_text_range_and_byte_at() {
        let buf = TextBuffer::from("abcdef");
        assert_eq!(&*buf.text_range(1..4), b"bcd");
        assert_eq!(&*buf.text_range(4..100), b"ef");
        assert_eq!(buf.byte_at(5), Some(b'f'));
        assert_eq!(buf.byte_at(6), None);
    }

    #[test]
    fn test_find() {
        let buf = TextBuffer::from("one two one");
        assert_eq!(buf.find(0, b"one"), Some(0));
        assert_eq!(buf.find(1, b"one"), Some(8));
        assert_eq!(buf.find(9, b"one"), None);
        assert_eq!(buf.find(0, b""), None);
    }
}
