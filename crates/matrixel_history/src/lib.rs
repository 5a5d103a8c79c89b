//! Linear undo/redo over whole-state snapshots.
//!
//! The log always holds at least one entry, the active one sits at the
//! cursor. Recording after an undo discards everything past the cursor.

/// A bounded, linear undo/redo log.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog<T> {
    entries: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> HistoryLog<T> {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, Self::DEFAULT_CAPACITY)
    }

    /// A log that keeps at most `capacity` entries. A capacity of zero is
    /// treated as one.
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Makes `state` the active entry, dropping any redo entries and the
    /// oldest entry once the log is over capacity.
    pub fn record(&mut self, state: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor -= 1;
            log::trace!("History over capacity {}, dropped oldest entry", self.capacity);
        }
    }

    /// Steps back one entry. At the oldest entry this does nothing.
    pub fn undo(&mut self) -> &T {
        if self.can_undo() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Steps forward one entry. At the newest entry this does nothing.
    pub fn redo(&mut self) -> &T {
        if self.can_redo() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Resets to a single entry.
    pub fn clear(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the log starts with an initial entry and neither
    /// [`Self::record`] nor [`Self::clear`] can drop below one.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone + Default> Default for HistoryLog<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
