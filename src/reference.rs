//! Reference string loading and traversal.
//!
//! A [`ReferenceString`] is read once and never modified. The driver consumes
//! it front to back through [`ReferenceString::next_reference`]; eviction
//! policies look around the current position through a [`Lookahead`], which
//! walks the same references in both directions without moving the driver's
//! position.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SimError};
use crate::frame::PageId;

/// The full reference string plus the driver's forward position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceString {
    references: Vec<PageId>,
    position: usize,
}

impl ReferenceString {
    pub fn new(references: Vec<PageId>) -> Self {
        Self {
            references,
            position: 0,
        }
    }

    /// Parses whitespace separated page numbers.
    pub fn parse(content: &str) -> Result<Self> {
        let mut references = Vec::new();
        for (index, token) in content.split_whitespace().enumerate() {
            let page: PageId = token.parse().map_err(|_| SimError::MalformedInput {
                token: token.to_string(),
                index,
            })?;
            references.push(page);
        }
        Ok(Self::new(references))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| SimError::unavailable(path, e))?;
        Self::parse(&content)
    }

    /// Reads and parses a reference string from any reader, e.g. stdin.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| SimError::unavailable("<reader>", e))?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn as_slice(&self) -> &[PageId] {
        &self.references
    }

    /// Number of references consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn has_next(&self) -> bool {
        self.position < self.references.len()
    }

    pub fn peek(&self) -> Option<PageId> {
        self.references.get(self.position).copied()
    }

    pub fn next_reference(&mut self) -> Result<PageId> {
        let page = *self
            .references
            .get(self.position)
            .ok_or(SimError::Exhausted {
                consumed: self.position,
            })?;
        self.position += 1;
        Ok(page)
    }

    /// Returns a view positioned just after the most recently consumed
    /// reference.
    ///
    /// Going forward yields the references still to come, in order. Going
    /// backward yields the consumed ones, newest first.
    pub fn lookahead(&self) -> Lookahead<'_> {
        Lookahead {
            references: &self.references,
            cursor: self.position,
        }
    }

    /// The view `lookahead` will return once the pending reference has been
    /// consumed. Lets the driver consult a policy before committing a step.
    pub(crate) fn lookahead_past_next(&self) -> Lookahead<'_> {
        Lookahead {
            references: &self.references,
            cursor: (self.position + 1).min(self.references.len()),
        }
    }
}

impl FromStr for ReferenceString {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<PageId>> for ReferenceString {
    fn from(references: Vec<PageId>) -> Self {
        Self::new(references)
    }
}

/// Bidirectional cursor over a reference string.
///
/// The cursor sits between two references, like a list iterator. It borrows
/// the reference string, so it cannot outlive the driver step it was made in.
#[derive(Debug, Clone)]
pub struct Lookahead<'a> {
    references: &'a [PageId],
    cursor: usize,
}

impl<'a> Lookahead<'a> {
    pub fn has_next(&self) -> bool {
        self.cursor < self.references.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Index of the reference `next` would return.
    pub fn next_index(&self) -> usize {
        self.cursor
    }

    /// Index of the reference `previous` would return, if any.
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// Steps backward and returns the reference passed over.
    pub fn previous(&mut self) -> Option<PageId> {
        let idx = self.previous_index()?;
        self.cursor = idx;
        Some(self.references[idx])
    }

    /// References after the cursor, without moving it.
    pub fn remaining(&self) -> &'a [PageId] {
        &self.references[self.cursor..]
    }
}

impl Iterator for Lookahead<'_> {
    type Item = PageId;

    fn next(&mut self) -> Option<PageId> {
        let page = *self.references.get(self.cursor)?;
        self.cursor += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.references.len() - self.cursor;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Lookahead<'_> {}
