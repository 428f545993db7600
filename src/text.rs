//! The sentinel-terminated text that every edge label points into.

use std::ops::Index;

use crate::error::{Error, Result};

pub type IndexType = usize;

/// A half-open range `[start, end)` into the indexed text. Edges store one of
/// these instead of a copy of their label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeRange {
    pub start: IndexType,
    pub end: IndexType,
}

impl EdgeRange {
    pub const fn new(start: IndexType, end: IndexType) -> Self {
        Self { start, end }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> IndexType {
        self.end - self.start
    }
}

/// The source string with one sentinel byte appended. The sentinel occurs
/// nowhere else, so every suffix ends at its own leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedText {
    data: Vec<u8>,
    sentinel: u8,
}

impl IndexedText {
    /// Copies `source` and appends `sentinel`. Fails if `source` already
    /// contains the sentinel.
    pub fn new(source: &[u8], sentinel: u8) -> Result<Self> {
        if let Some(position) = source.iter().position(|&ch| ch == sentinel) {
            return Err(Error::SentinelInText {
                sentinel: sentinel as char,
                position,
            });
        }
        let mut data = Vec::with_capacity(source.len() + 1);
        data.extend_from_slice(source);
        data.push(sentinel);
        Ok(Self { data, sentinel })
    }

    /// The full text, sentinel included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The text as the caller supplied it.
    pub fn source(&self) -> &[u8] {
        &self.data[..self.data.len() - 1]
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// Length including the sentinel, `n + 1`.
    pub fn len(&self) -> IndexType {
        self.data.len()
    }

    /// True when the source is empty and the text is the sentinel alone.
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    }

    pub fn slice(&self, range: EdgeRange) -> &[u8] {
        &self.data[range.start..range.end]
    }
}

impl Index<IndexType> for IndexedText {
    type Output = u8;

    fn index(&self, index: IndexType) -> &u8 {
        &self.data[index]
    }
}
