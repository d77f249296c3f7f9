use alloc::vec::Vec;

use crate::table::INITIAL_ARRAY_CAPACITY;
use crate::table::Key;
use crate::table::Table;
use crate::table::grown_array_capacity;

/// Unsorted flat array of entries searched linearly.
///
/// Insertion appends and erasure swaps the last entry into the hole, so both
/// cost a linear lookup and nothing more. Entry order is not preserved.
///
/// ## Example
///
/// ```rust
/// use keyed_tables::Table;
/// use keyed_tables::UnorderedTable;
///
/// let mut table = UnorderedTable::new();
/// assert!(table.insert(3, 'c'));
/// assert!(table.insert(1, 'a'));
/// assert!(!table.insert(3, 'x'));
/// assert_eq!(table.find(3), Some(&(3, 'c')));
/// ```
#[derive(Debug, Clone)]
pub struct UnorderedTable<V> {
    entries: Vec<(Key, V)>,
    capacity: usize,
    initial_capacity: usize,
}

impl<V> Default for UnorderedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> UnorderedTable<V> {
    /// Creates an empty table with room for ten entries.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_ARRAY_CAPACITY)
    }

    /// Creates an empty table with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            initial_capacity: capacity,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries the table holds before it next grows.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The entries in storage order.
    pub fn as_slice(&self) -> &[(Key, V)] {
        &self.entries
    }

    fn position(&self, key: Key) -> Option<usize> {
        self.entries.iter().position(|(candidate, _)| *candidate == key)
    }

    fn reserve_one(&mut self) {
        if self.entries.len() < self.capacity {
            return;
        }
        let capacity = grown_array_capacity(self.capacity);
        log::debug!(
            "growing unordered table from {} to {} entries",
            self.capacity,
            capacity
        );
        self.entries.reserve_exact(capacity - self.entries.len());
        self.capacity = capacity;
    }
}

impl<V> Table<V> for UnorderedTable<V> {
    fn insert(&mut self, key: Key, value: V) -> bool {
        if self.position(key).is_some() {
            return false;
        }
        self.reserve_one();
        self.entries.push((key, value));
        true
    }

    fn erase(&mut self, key: Key) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    fn find(&self, key: Key) -> Option<&(Key, V)> {
        self.entries.iter().find(|(candidate, _)| *candidate == key)
    }

    fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value)
    }

    fn clear(&mut self) {
        self.entries = Vec::with_capacity(self.initial_capacity);
        self.capacity = self.initial_capacity;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
