//! Bounded recall lists for submitted search patterns and jump addresses.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallDirection {
    Older,
    Newer,
}

/// Most-recent-last list of past entries with an arrow-key recall cursor.
///
/// The cursor sits "past the end" after every push; recalling older entries
/// walks towards the front of the list.
#[derive(Debug, Clone)]
pub struct HistoryStore<T> {
    entries: VecDeque<T>,
    capacity: usize,
    /// Index of the recalled entry, `entries.len()` when nothing is recalled
    cursor: usize,
}

impl<T: Clone + PartialEq> HistoryStore<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `entry`, evicting the oldest one when full. Repeating the latest
    /// entry does not add a duplicate. Resets the recall cursor.
    pub fn push(&mut self, entry: T) {
        if self.entries.back() != Some(&entry) {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(entry);
        }
        self.reset_cursor();
    }

    /// Step the recall cursor and return the entry it lands on.
    ///
    /// Returns `None` and leaves the cursor where it is when there is nothing
    /// further in that direction.
    pub fn recall(&mut self, direction: RecallDirection) -> Option<&T> {
        let next = match direction {
            RecallDirection::Older => self.cursor.checked_sub(1)?,
            RecallDirection::Newer => {
                let next = self.cursor + 1;
                if next >= self.entries.len() {
                    return None;
                }
                next
            }
        };
        self.cursor = next;
        self.entries.get(next)
    }

    /// Move the recall cursor past the newest entry
    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every entry, oldest first, walked through the recall cursor
    fn recall_all<T: Clone + PartialEq>(history: &mut HistoryStore<T>) -> Vec<T> {
        let mut entries = Vec::new();
        while let Some(entry) = history.recall(RecallDirection::Older) {
            entries.push(entry.clone());
        }
        history.reset_cursor();
        entries.reverse();
        entries
    }

    #[test]
    fn test_push_then_recall_round_trip() {
        // Arrange
        let mut history = HistoryStore::new(8);
        history.push("e".to_string());

        // Act & Assert
        assert_eq!(history.recall(RecallDirection::Older).map(String::as_str), Some("e"));
        assert_eq!(history.recall(RecallDirection::Newer), None);
        assert_eq!(history.recall(RecallDirection::Newer), None);
    }

    #[test]
    fn test_recall_walks_and_stops_at_ends() {
        // Arrange
        let mut history = HistoryStore::new(8);
        for e in [1, 2, 3] {
            history.push(e);
        }

        // Act & Assert
        assert_eq!(history.recall(RecallDirection::Newer), None);
        assert_eq!(history.recall(RecallDirection::Older), Some(&3));
        assert_eq!(history.recall(RecallDirection::Older), Some(&2));
        assert_eq!(history.recall(RecallDirection::Older), Some(&1));
        assert_eq!(history.recall(RecallDirection::Older), None);
        // Cursor stayed on the oldest entry
        assert_eq!(history.recall(RecallDirection::Newer), Some(&2));
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut history = HistoryStore::new(8);
        history.push(1);
        history.push(2);
        history.recall(RecallDirection::Older);
        history.recall(RecallDirection::Older);

        history.push(3);

        assert_eq!(history.recall(RecallDirection::Older), Some(&3));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        // Arrange
        let mut history = HistoryStore::new(3);

        // Act
        for e in 0..5 {
            history.push(e);
        }

        // Assert
        assert_eq!(history.len(), 3);
        assert_eq!(recall_all(&mut history), vec![2, 3, 4]);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut history = HistoryStore::new(8);
        history.push("a");
        history.push("a");
        history.push("b");
        history.push("a");

        assert_eq!(recall_all(&mut history), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_empty_history() {
        let mut history: HistoryStore<u64> = HistoryStore::new(4);
        assert!(history.is_empty());
        assert_eq!(history.recall(RecallDirection::Older), None);
        assert_eq!(history.recall(RecallDirection::Newer), None);
    }
}
