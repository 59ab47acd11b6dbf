//! Bounded command history and the per-session browsing cursor.
//!
//! [`History`] keeps previously accepted lines, oldest first, evicting FIFO
//! at capacity and suppressing adjacent duplicates. [`HistoryCursor`] is the
//! Up/Down browsing state for one read session: a position over the entries
//! plus a snapshot of the live line, taken when browsing starts and restored
//! when browsing returns to the live position.

use std::collections::VecDeque;

use log::debug;

use crate::{Error, Result};

/// Command history with bounded, order-preserving storage.
///
/// Entries are kept oldest first. When appending would exceed the capacity,
/// the oldest entry is dropped. Appending an empty line or a line equal to
/// the most recent entry is a no-op.
///
/// # Examples
///
/// ```
/// use zline::History;
///
/// let mut hist = History::new(50);
/// hist.append("first command");
/// hist.append("second command");
///
/// assert_eq!(hist.len(), 2);
/// assert_eq!(hist.entry(0).unwrap(), "first command");
/// ```
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    /// Creates a history bounded at `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an accepted line.
    ///
    /// Empty lines and lines equal to the current last entry are skipped.
    /// At capacity, the oldest entry is evicted first.
    pub fn append(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if self.entries.back().is_some_and(|last| last == line) {
            return;
        }
        if self.entries.len() == self.capacity {
            let evicted = self.entries.pop_front();
            debug!("history full, evicting {:?}", evicted);
        }
        self.entries.push_back(line.to_string());
        debug!("history now holds {} entries", self.entries.len());
    }

    /// Returns the entry at `index`, oldest first.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index` is past the last entry.
    pub fn entry(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(String::as_str)
            .ok_or(Error::OutOfRange {
                index,
                limit: self.entries.len(),
            })
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no lines have been retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently appended entry, if any.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

/// Up/Down browsing state for one read session.
///
/// `position` ranges over `[0, history.len()]`, where `history.len()` is the
/// live, uncommitted line. Moving away from the live position snapshots the
/// live buffer; arriving back at it yields the snapshot for restoration.
pub struct HistoryCursor {
    position: usize,
    saved_line: Option<String>,
}

impl HistoryCursor {
    /// Creates a cursor parked on the live line of a history with
    /// `history_len` entries.
    pub fn new(history_len: usize) -> Self {
        Self {
            position: history_len,
            saved_line: None,
        }
    }

    /// Moves one entry up (older).
    ///
    /// On the first move away from the live line, `live` is snapshotted so a
    /// matching number of Down moves can restore it. Returns the entry to
    /// load, or `None` at the oldest entry (no-op).
    pub fn up(&mut self, history: &History, live: &str) -> Option<String> {
        if self.position == 0 {
            return None;
        }
        if self.position == history.len() {
            self.saved_line = Some(live.to_string());
        }
        self.position -= 1;
        // position < len here, so the entry exists
        history.entry(self.position).ok().map(str::to_string)
    }

    /// Moves one entry down (newer).
    ///
    /// Returns the entry to load, or the saved live line (empty if nothing
    /// was ever saved) when arriving back at the live position. `None` means
    /// the cursor was already on the live line (no-op).
    pub fn down(&mut self, history: &History) -> Option<String> {
        if self.position == history.len() {
            return None;
        }
        self.position += 1;
        if self.position == history.len() {
            Some(self.saved_line.take().unwrap_or_default())
        } else {
            history.entry(self.position).ok().map(str::to_string)
        }
    }

    /// Returns `true` while the cursor is away from the live line.
    pub fn is_browsing(&self, history: &History) -> bool {
        self.position < history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_entry() {
        let mut hist = History::new(10);
        hist.append("first");
        hist.append("second");
        assert_eq!(hist.entry(0).unwrap(), "first");
        assert_eq!(hist.entry(1).unwrap(), "second");
        assert_eq!(hist.last(), Some("second"));
    }

    #[test]
    fn test_append_skips_empty() {
        let mut hist = History::new(10);
        hist.append("");
        assert!(hist.is_empty());
        hist.append("cmd");
        hist.append("");
        assert_eq!(hist.len(), 1);
    }

    #[test]
    fn test_append_suppresses_adjacent_duplicates() {
        let mut hist = History::new(10);
        hist.append("test");
        hist.append("test");
        assert_eq!(hist.len(), 1);

        // Non-adjacent repeats are kept
        hist.append("other");
        hist.append("test");
        assert_eq!(hist.len(), 3);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut hist = History::new(3);
        hist.append("one");
        hist.append("two");
        hist.append("three");
        hist.append("four");

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.entry(0).unwrap(), "two");
        assert_eq!(hist.entry(1).unwrap(), "three");
        assert_eq!(hist.entry(2).unwrap(), "four");
    }

    #[test]
    fn test_entry_out_of_range() {
        let mut hist = History::new(4);
        hist.append("only");
        assert!(matches!(hist.entry(1), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_browse_walk() {
        // history ["ls -la", "cd /tmp", "echo test"], live buffer empty
        let mut hist = History::new(10);
        hist.append("ls -la");
        hist.append("cd /tmp");
        hist.append("echo test");

        let mut cursor = HistoryCursor::new(hist.len());
        assert_eq!(cursor.up(&hist, "").as_deref(), Some("echo test"));
        assert_eq!(cursor.up(&hist, "").as_deref(), Some("cd /tmp"));
        assert_eq!(cursor.down(&hist).as_deref(), Some("echo test"));
        assert_eq!(cursor.down(&hist).as_deref(), Some(""));
        assert!(!cursor.is_browsing(&hist));
    }

    #[test]
    fn test_browse_restores_partial_line() {
        let mut hist = History::new(10);
        hist.append("first");
        hist.append("second");

        let mut cursor = HistoryCursor::new(hist.len());
        assert_eq!(cursor.up(&hist, "half-typ").as_deref(), Some("second"));
        assert_eq!(cursor.up(&hist, "ignored").as_deref(), Some("first"));
        assert_eq!(cursor.down(&hist).as_deref(), Some("second"));
        assert_eq!(cursor.down(&hist).as_deref(), Some("half-typ"));
    }

    #[test]
    fn test_browse_stops_at_oldest() {
        let mut hist = History::new(10);
        hist.append("only");

        let mut cursor = HistoryCursor::new(hist.len());
        assert_eq!(cursor.up(&hist, "").as_deref(), Some("only"));
        assert_eq!(cursor.up(&hist, ""), None);
        // Still browsing the oldest entry after the no-op
        assert!(cursor.is_browsing(&hist));
    }

    #[test]
    fn test_browse_empty_history_is_noop() {
        let hist = History::new(10);
        let mut cursor = HistoryCursor::new(hist.len());
        assert_eq!(cursor.up(&hist, "live"), None);
        assert_eq!(cursor.down(&hist), None);
    }

    #[test]
    fn test_down_without_up_is_noop() {
        let mut hist = History::new(10);
        hist.append("cmd");
        let mut cursor = HistoryCursor::new(hist.len());
        assert_eq!(cursor.down(&hist), None);
    }

    #[test]
    fn test_resnapshot_after_returning_to_live() {
        let mut hist = History::new(10);
        hist.append("cmd");

        let mut cursor = HistoryCursor::new(hist.len());
        assert_eq!(cursor.up(&hist, "alpha").as_deref(), Some("cmd"));
        assert_eq!(cursor.down(&hist).as_deref(), Some("alpha"));

        // A fresh excursion snapshots the new live content
        assert_eq!(cursor.up(&hist, "beta").as_deref(), Some("cmd"));
        assert_eq!(cursor.down(&hist).as_deref(), Some("beta"));
    }
}
