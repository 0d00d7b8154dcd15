// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::actor::Actor;
use time::OffsetDateTime;

/// A single immutable record in a [`History`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry<T> {
    /// The value that took effect.
    pub value: T,
    /// When the value took effect.
    pub changed_at: OffsetDateTime,
    /// Who caused the change, if anyone in particular did.
    pub changed_by: Option<Actor>,
    /// Free-text explanation of the change.
    pub reason: String,
}

impl<T> HistoryEntry<T> {
    /// Creates a new history entry.
    #[must_use]
    pub const fn new(
        value: T,
        changed_at: OffsetDateTime,
        changed_by: Option<Actor>,
        reason: String,
    ) -> Self {
        Self {
            value,
            changed_at,
            changed_by,
            reason,
        }
    }
}

/// An append-only, ordered sequence of history entries.
///
/// Length never decreases and existing entries are never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    entries: Vec<HistoryEntry<T>>,
}

impl<T> History<T> {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuilds a history from stored entries, oldest first.
    #[must_use]
    pub const fn from_entries(entries: Vec<HistoryEntry<T>>) -> Self {
        Self { entries }
    }

    /// Appends an entry at the end of the history.
    pub fn append(&mut self, entry: HistoryEntry<T>) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry<T>] {
        &self.entries
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry<T>> {
        self.entries.last()
    }

    /// The value recorded by the most recent entry.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.last().map(|entry| &entry.value)
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry<T>> {
        self.entries.iter()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a HistoryEntry<T>;
    type IntoIter = std::slice::Iter<'a, HistoryEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
