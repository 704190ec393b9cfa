//! Session history and duplicate-input suppression.
//!
//! An append-only log of exchanges, scoped to one interactive session.
//! Entries are never edited or individually removed; `clear` is the only
//! way to shrink the log and also resets the duplicate marker.

/// One exchange in the session log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Wall-clock time formatted when the entry was created.
    pub timestamp: String,
    pub user_input: String,
    pub bot_response: String,
}

/// Ordered log of exchanges plus the last processed input.
///
/// Insertion order is chronological order. Growth is unbounded; that is an
/// accepted limitation of the session-scoped design.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    last_input: String,
}

impl SessionHistory {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the input equals the most recently processed input.
    ///
    /// The marker starts empty, so an empty submission is always treated as
    /// a duplicate and skipped by the shell.
    #[must_use]
    pub fn is_duplicate(&self, input: &str) -> bool {
        self.last_input == input
    }

    /// Append one exchange and mark the input as processed.
    pub fn record(
        &mut self,
        timestamp: impl Into<String>,
        input: &str,
        response: impl Into<String>,
    ) {
        self.entries.push(HistoryEntry {
            timestamp: timestamp.into(),
            user_input: input.to_string(),
            bot_response: response.into(),
        });
        self.last_input = input.to_string();
    }

    /// Entries most-recent-first.
    ///
    /// Does not mutate the log and may be called repeatedly; each call
    /// reflects the current state.
    pub fn iter_reversed(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Drop all entries and reset the duplicate marker in one step.
    ///
    /// A previously seen input may be submitted again after a clear.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_input.clear();
    }

    /// Number of recorded exchanges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no exchange has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently processed input (empty before the first exchange).
    #[must_use]
    pub fn last_input(&self) -> &str {
        &self.last_input
    }
}
