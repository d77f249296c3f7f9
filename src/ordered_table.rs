use alloc::vec::Vec;

use crate::table::INITIAL_ARRAY_CAPACITY;
use crate::table::Key;
use crate::table::Table;
use crate::table::grown_array_capacity;

/// Flat array of entries kept sorted by key and searched by bisection.
///
/// Lookups are logarithmic. Insertion and erasure shift the tail of the array
/// to keep it sorted.
///
/// ## Example
///
/// ```rust
/// use keyed_tables::OrderedTable;
/// use keyed_tables::Table;
///
/// let mut table = OrderedTable::new();
/// for key in [30, 10, 20] {
///     table.insert(key, ());
/// }
/// let keys: Vec<u32> = table.iter().map(|(key, _)| *key).collect();
/// assert_eq!(keys, [10, 20, 30]);
/// ```
#[derive(Debug, Clone)]
pub struct OrderedTable<V> {
    entries: Vec<(Key, V)>,
    capacity: usize,
    initial_capacity: usize,
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedTable<V> {
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

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> core::slice::Iter<'_, (Key, V)> {
        self.entries.iter()
    }

    /// `Ok` with the entry's index, or `Err` with the index that keeps the
    /// array sorted.
    #[inline]
    fn search(&self, key: Key) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |(candidate, _)| *candidate)
    }

    fn reserve_one(&mut self) {
        if self.entries.len() < self.capacity {
            return;
        }
        let capacity = grown_array_capacity(self.capacity);
        log::debug!(
            "growing ordered table from {} to {} entries",
            self.capacity,
            capacity
        );
        self.entries.reserve_exact(capacity - self.entries.len());
        self.capacity = capacity;
    }
}

impl<V> Table<V> for OrderedTable<V> {
    fn insert(&mut self, key: Key, value: V) -> bool {
        match self.search(key) {
            Ok(_) => false,
            Err(index) => {
                self.reserve_one();
                self.entries.insert(index, (key, value));
                true
            }
        }
    }

    fn erase(&mut self, key: Key) -> bool {
        match self.search(key) {
            Ok(index) => {
                self.entries.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    fn find(&self, key: Key) -> Option<&(Key, V)> {
        self.search(key).ok().map(|index| &self.entries[index])
    }

    fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        let index = self.search(key).ok()?;
        Some(&mut self.entries[index].1)
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
