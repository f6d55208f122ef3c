//! Per-byte style storage
//!
//! One tag per document byte, patched in lockstep with the document.

use std::ops::Range;

use super::tag::StyleTag;
use crate::error::{check_range, RestyleError, Result};

/// Ordered sequence of style tags, one per document byte
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleStore {
    tags: Vec<StyleTag>,
}

impl StyleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the store holds no tags
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// All tags
    pub fn as_slice(&self) -> &[StyleTag] {
        &self.tags
    }

    /// Overwrite `range` with `tags`, growing or shrinking the store when
    /// the lengths differ
    pub fn replace(&mut self, range: Range<usize>, tags: &[StyleTag]) -> Result<()> {
        check_range(range.start, range.end, self.tags.len())?;
        if range.len() == tags.len() {
            self.tags[range].copy_from_slice(tags);
        } else {
            self.tags.splice(range, tags.iter().copied());
        }
        Ok(())
    }

    /// Delete `range`
    pub fn remove(&mut self, range: Range<usize>) -> Result<()> {
        check_range(range.start, range.end, self.tags.len())?;
        self.tags.drain(range);
        Ok(())
    }

    /// Tag at `index`
    pub fn tag_at(&self, index: usize) -> Result<StyleTag> {
        self.tags
            .get(index)
            .copied()
            .ok_or_else(|| RestyleError::out_of_range(index, index + 1, self.tags.len()))
    }

    /// Owned copy of `range`
    pub fn slice(&self, range: Range<usize>) -> Result<Vec<StyleTag>> {
        check_range(range.start, range.end, self.tags.len())?;
        Ok(self.tags[range].to_vec())
    }

    /// Discard all tags and refill with `len` plain tags
    pub fn reset(&mut self, len: usize) {
        self.tags.clear();
        self.tags.resize(len, StyleTag::Plain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tag::{codes_to_tags, tags_to_codes};

    fn store(codes: &str) -> StyleStore {
        let mut store = StyleStore::new();
        store.replace(0..0, &codes_to_tags(codes).unwrap()).unwrap();
        store
    }

    fn codes(store: &StyleStore) -> String {
        tags_to_codes(store.as_slice())
    }

    #[test]
    fn test_replace_same_length() {
        let mut s = store("AAAA");
        s.replace(1..3, &[StyleTag::Keyword, StyleTag::Keyword]).unwrap();
        assert_eq!(codes(&s), "AGGA");
    }

    #[test]
    fn test_replace_grows_and_shrinks() {
        let mut s = store("ABCD");
        s.replace(1..2, &[StyleTag::Keyword; 3]).unwrap();
        assert_eq!(codes(&s), "AGGGCD");

        s.replace(0..4, &[StyleTag::String]).unwrap();
        assert_eq!(codes(&s), "DCD");

        s.replace(3..3, &[StyleTag::Type]).unwrap();
        assert_eq!(codes(&s), "DCDF");
    }

    #[test]
    fn test_remove() {
        let mut s = store("ABCDE");
        s.remove(1..3).unwrap();
        assert_eq!(codes(&s), "ADE");
        s.remove(3..3).unwrap();
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_tag_at_and_slice() {
        let s = store("ABG");
        assert_eq!(s.tag_at(2).unwrap(), StyleTag::Keyword);
        assert!(matches!(
            s.tag_at(3),
            Err(RestyleError::OutOfRange { start: 3, end: 4, len: 3 })
        ));
        assert_eq!(s.slice(1..3).unwrap(), vec![StyleTag::LineComment, StyleTag::Keyword]);
        assert!(s.slice(1..4).is_err());
    }

    #[test]
    fn test_out_of_range_edits_leave_store_untouched() {
        let mut s = store("AB");
        assert!(s.replace(1..5, &[]).is_err());
        assert!(s.remove(2..3).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let backwards = 2..1;
        assert!(s.remove(backwards).is_err());
        assert_eq!(codes(&s), "AB");
    }

    #[test]
    fn test_reset() {
        let mut s = store("GGG");
        s.reset(5);
        assert_eq!(codes(&s), "AAAAA");
        s.reset(0);
        assert!(s.is_empty());
    }
}
