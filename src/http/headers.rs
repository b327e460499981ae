//! Ordered header storage.
//!
//! Keys may repeat. Lookups are exact-match and return the first entry in
//! insertion order.

use std::fmt;

use thiserror::Error;

/// Capacity a fresh table starts with.
pub const INITIAL_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("out of memory while growing the header table")]
    OutOfMemory,
}

/// A single `key: value` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTable {
    entries: Vec<Header>,
}

impl Default for HeaderTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends a header. Duplicates are kept.
    ///
    /// When the table is full its capacity is doubled. A failed allocation
    /// is reported as [`HeaderError::OutOfMemory`] and leaves the table
    /// untouched.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), HeaderError> {
        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity().max(INITIAL_CAPACITY);
            self.entries
                .try_reserve_exact(additional)
                .map_err(|_| HeaderError::OutOfMemory)?;
        }

        self.entries.push(Header {
            key: key.into(),
            value: value.into(),
        });
        Ok(())
    }

    /// Returns the value of the first header whose key matches exactly.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Drops every entry and returns the table to its initial capacity.
    pub fn reset(&mut self) {
        self.entries = Vec::with_capacity(INITIAL_CAPACITY);
    }
}

impl<'a> IntoIterator for &'a HeaderTable {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for HeaderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, h) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", h.key, h.value)?;
        }
        write!(f, "]")
    }
}
