//! Reverse incremental search over the command history.
//!
//! [`HistorySearch`] is the Ctrl+R sub-mode: a query built up keystroke by
//! keystroke, scanned backward through the history for the most recent entry
//! containing it as a substring. The live buffer is never touched while the
//! search runs; the session loads the match only on accept, which is what
//! makes cancel trivially safe.

use crate::History;

/// State of one reverse-search activation.
///
/// Created on entering the sub-mode, dropped on accept or cancel.
pub struct HistorySearch {
    query: String,
    scan_from: usize,
    match_index: Option<usize>,
}

impl HistorySearch {
    /// Starts a search positioned after the newest entry, with an empty
    /// query and no match.
    pub fn new(history: &History) -> Self {
        Self {
            query: String::new(),
            scan_from: history.len(),
            match_index: None,
        }
    }

    /// Appends a character to the query and re-scans.
    ///
    /// The scan resumes from the current scan origin, so a narrowed query
    /// keeps digging below an earlier Ctrl+R repeat.
    pub fn push(&mut self, c: char, history: &History) {
        self.query.push(c);
        self.rescan(history);
    }

    /// Removes the last query character and re-scans from the newest entry.
    ///
    /// A shortened query may match entries newer than the current one, so
    /// the scan origin is reset. No-op when the query is already empty.
    pub fn erase(&mut self, history: &History) {
        if self.query.is_empty() {
            return;
        }
        self.query.pop();
        self.scan_from = history.len();
        self.rescan(history);
    }

    /// Repeats the search: continues with the same query, strictly below the
    /// current match. No-op when there is no match to continue from.
    pub fn next_match(&mut self, history: &History) {
        if let Some(index) = self.match_index {
            self.scan_from = index;
            self.rescan(history);
        }
    }

    /// The query typed so far.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The currently matching entry, if any.
    pub fn matched<'h>(&self, history: &'h History) -> Option<&'h str> {
        self.match_index.and_then(|i| history.entry(i).ok())
    }

    // Backward scan: most recent entry below scan_from containing the query.
    fn rescan(&mut self, history: &History) {
        self.match_index = (0..self.scan_from)
            .rev()
            .find(|&i| history.entry(i).is_ok_and(|e| e.contains(&self.query)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_history() -> History {
        let mut hist = History::new(10);
        hist.append("make build");
        hist.append("make test");
        hist.append("git status");
        hist
    }

    #[test]
    fn test_most_recent_match_wins() {
        let hist = make_history();
        let mut search = HistorySearch::new(&hist);
        for c in "mak".chars() {
            search.push(c, &hist);
        }
        assert_eq!(search.matched(&hist), Some("make test"));
    }

    #[test]
    fn test_repeat_finds_older_match() {
        let hist = make_history();
        let mut search = HistorySearch::new(&hist);
        for c in "mak".chars() {
            search.push(c, &hist);
        }
        search.next_match(&hist);
        assert_eq!(search.matched(&hist), Some("make build"));
    }

    #[test]
    fn test_repeat_past_oldest_clears_match() {
        let hist = make_history();
        let mut search = HistorySearch::new(&hist);
        search.push('m', &hist);
        search.next_match(&hist);
        assert_eq!(search.matched(&hist), Some("make build"));
        search.next_match(&hist);
        assert_eq!(search.matched(&hist), None);
    }

    #[test]
    fn test_repeat_without_match_is_noop() {
        let hist = make_history();
        let mut search = HistorySearch::new(&hist);
        search.push('z', &hist);
        assert_eq!(search.matched(&hist), None);
        search.next_match(&hist);
        assert_eq!(search.matched(&hist), None);
    }

    #[test]
    fn test_no_match_until_first_keystroke() {
        let hist = make_history();
        let search = HistorySearch::new(&hist);
        assert_eq!(search.query(), "");
        assert_eq!(search.matched(&hist), None);
    }

    #[test]
    fn test_erase_restarts_from_newest() {
        let hist = make_history();
        let mut search = HistorySearch::new(&hist);

        // "mak" then repeat digs down to the oldest match
        for c in "mak".chars() {
            search.push(c, &hist);
        }
        search.next_match(&hist);
        assert_eq!(search.matched(&hist), Some("make build"));

        // Erasing restarts the scan at the newest entry
        search.erase(&hist);
        assert_eq!(search.query(), "ma");
        assert_eq!(search.matched(&hist), Some("make test"));
    }

    #[test]
    fn test_erase_on_empty_query_is_noop() {
        let hist = make_history();
        let mut search = HistorySearch::new(&hist);
        search.erase(&hist);
        assert_eq!(search.query(), "");
        assert_eq!(search.matched(&hist), None);
    }

    #[test]
    fn test_narrowing_below_a_repeat() {
        let mut hist = History::new(10);
        hist.append("git push");
        hist.append("git pull");
        hist.append("git push origin");

        let mut search = HistorySearch::new(&hist);
        for c in "git".chars() {
            search.push(c, &hist);
        }
        assert_eq!(search.matched(&hist), Some("git push origin"));
        search.next_match(&hist);
        assert_eq!(search.matched(&hist), Some("git pull"));

        // Further keystrokes keep scanning from the repeat origin
        search.push(' ', &hist);
        search.push('p', &hist);
        search.push('u', &hist);
        search.push('s', &hist);
        assert_eq!(search.matched(&hist), Some("git push"));
    }

    #[test]
    fn test_empty_history() {
        let hist = History::new(10);
        let mut search = HistorySearch::new(&hist);
        search.push('a', &hist);
        assert_eq!(search.matched(&hist), None);
    }
}
