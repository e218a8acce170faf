//! Calculation history
//!
//! Visual feedback: completed calculations stay visible and can be recalled
//! into the display with a click.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique, monotonically increasing key within one history log
    pub id: u64,
    /// The evaluated expression, e.g. `"5 × 4"`
    pub expression: String,
    /// The formatted result, e.g. `"20"`
    pub result: String,
}

impl HistoryEntry {
    /// Creates an entry
    #[must_use]
    pub fn new(id: u64, expression: String, result: String) -> Self {
        Self {
            id,
            expression,
            result,
        }
    }
}

/// Bounded log of completed calculations, newest first
///
/// Entries are never mutated once recorded. When the log is full the
/// oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct History {
    /// Entries, newest at the front
    entries: VecDeque<HistoryEntry>,
    /// Maximum number of entries to keep
    max_entries: usize,
    /// Id handed to the next recorded entry
    next_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 20;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
            next_id: 1,
        }
    }

    /// Records a completed calculation and returns the new entry's id
    pub fn record(&mut self, expression: String, result: String) -> u64 {
        let id = self.next_id;
        self.push(HistoryEntry::new(id, expression, result));
        id
    }

    /// Adds a prebuilt entry as the newest one
    pub fn push(&mut self, entry: HistoryEntry) {
        self.next_id = self.next_id.max(entry.id + 1);
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
        tracing::trace!(len = self.entries.len(), "history updated");
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the entries as a newest-first vector
    #[must_use]
    pub fn entries(&self) -> Vec<&HistoryEntry> {
        self.entries.iter().collect()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the oldest retained entry
    #[must_use]
    pub fn oldest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the entry at `index` (0 = newest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Serializes the history (newest first) to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> History {
        let mut history = History::new();
        for i in 0..n {
            history.record(format!("{i} + 0"), i.to_string());
        }
        history
    }

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new() {
        let entry = HistoryEntry::new(1, "2 + 2".into(), "4".into());
        assert_eq!(entry.expression, "2 + 2");
        assert_eq!(entry.result, "4");
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn test_history_entry_serialize() {
        let entry = HistoryEntry::new(7, "9 ÷ 3".into(), "3".into());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"expression\":\"9 ÷ 3\""));
        assert!(json.contains("\"result\":\"3\""));
        assert!(json.contains("\"id\":7"));
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), 20);
    }

    #[test]
    fn test_record_is_newest_first() {
        let history = filled(3);
        let results: Vec<&str> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["2", "1", "0"]);
        assert_eq!(history.latest().unwrap().result, "2");
        assert_eq!(history.oldest().unwrap().result, "0");
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let history = filled(5);
        let ids: Vec<u64> = history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_twenty_first_entry_evicts_oldest() {
        let history = filled(21);
        assert_eq!(history.len(), 20);
        assert_eq!(history.latest().unwrap().result, "20");
        assert_eq!(history.oldest().unwrap().result, "1");
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut history = History::with_capacity(3);
        for i in 0..50 {
            history.record(i.to_string(), i.to_string());
            assert!(history.len() <= 3);
        }
    }

    #[test]
    fn test_no_deduplication() {
        let mut history = History::new();
        history.record("1 + 1".into(), "2".into());
        history.record("1 + 1".into(), "2".into());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_push_keeps_ids_monotonic() {
        let mut history = History::new();
        history.push(HistoryEntry::new(10, "a".into(), "1".into()));
        let next = history.record("b".into(), "2".into());
        assert_eq!(next, 11);
    }

    #[test]
    fn test_get_by_position() {
        let history = filled(3);
        assert_eq!(history.get(0).unwrap().result, "2");
        assert_eq!(history.get(2).unwrap().result, "0");
        assert!(history.get(3).is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = filled(4);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_to_json_newest_first() {
        let mut history = History::new();
        history.push(HistoryEntry::new(1, "1 + 1".into(), "2".into()));
        history.push(HistoryEntry::new(2, "2 + 2".into(), "4".into()));
        let json = history.to_json().unwrap();
        let first = json.find("2 + 2").unwrap();
        let second = json.find("1 + 1").unwrap();
        assert!(first < second);
    }
}
