use std::collections::VecDeque;

use alloy::primitives::Bytes;

/// Bounded, in-memory history of encoded snapshots, newest first.
///
/// Entries are opaque: the history never looks inside them. The detector
/// decodes what it needs.
#[derive(Debug)]
pub struct SnapshotHistory {
    entries: VecDeque<Bytes>,
    capacity: usize,
}

impl SnapshotHistory {
    /// `capacity` is raised to 2 if smaller; one snapshot cannot be compared.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, encoded: Bytes) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(encoded);
    }

    /// Contiguous view, newest first.
    pub fn newest_first(&mut self) -> &[Bytes] {
        self.entries.make_contiguous()
    }

    pub fn latest(&self) -> Option<&Bytes> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(v: u8) -> Bytes {
        Bytes::from(vec![v])
    }

    #[test]
    fn keeps_newest_first_and_evicts_oldest() {
        let mut h = SnapshotHistory::new(3);
        for v in 1..=4 {
            h.push(b(v));
        }

        assert_eq!(h.len(), 3);
        assert_eq!(h.newest_first(), &[b(4), b(3), b(2)]);
        assert_eq!(h.latest(), Some(&b(4)));
    }

    #[test]
    fn capacity_never_drops_below_two() {
        let mut h = SnapshotHistory::new(0);
        assert_eq!(h.capacity(), 2);

        h.push(b(1));
        h.push(b(2));
        h.push(b(3));
        assert_eq!(h.newest_first(), &[b(3), b(2)]);
    }

    #[test]
    fn clear_empties_history() {
        let mut h = SnapshotHistory::new(2);
        h.push(b(1));
        assert!(!h.is_empty());

        h.clear();
        assert!(h.is_empty());
        assert!(h.latest().is_none());
    }
}
