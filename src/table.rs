use alloc::boxed::Box;

use crate::OpenAddressingTable;
use crate::OrderedTable;
use crate::SeparateChainingTable;
use crate::UnorderedTable;

/// Key type shared by every table. Zero is an ordinary key.
pub type Key = u32;

/// Starting capacity exponent of the hash tables (`2^4 = 16` slots).
pub const INITIAL_CAPACITY_EXPONENT: u32 = 4;

/// Starting capacity of the flat-array tables.
pub const INITIAL_ARRAY_CAPACITY: usize = 10;

/// Live-entry count at which a hash table of `capacity` slots grows.
///
/// Integer form of `floor(0.7 * capacity)`.
#[inline(always)]
pub(crate) fn target_load_factor(capacity: usize) -> usize {
    ((capacity as u128 * 7) / 10) as usize
}

/// Next capacity of a full flat-array table: `floor(1.3 * capacity)`, but
/// always at least one slot larger.
#[inline(always)]
pub(crate) fn grown_array_capacity(capacity: usize) -> usize {
    (((capacity as u128 * 13) / 10) as usize).max(capacity + 1)
}

/// The contract shared by every table in this crate.
///
/// All operations are synchronous. Absent and duplicate keys are ordinary
/// outcomes reported through the return value, never through a panic.
///
/// # Examples
///
/// ```rust
/// use keyed_tables::Table;
/// use keyed_tables::TableKind;
///
/// for kind in TableKind::ALL {
///     let mut table = kind.build::<&str>();
///     assert!(table.insert(0, "zero"));
///     assert!(!table.insert(0, "again"));
///     assert_eq!(table.find(0), Some(&(0, "zero")));
///     assert!(table.erase(0));
///     assert!(table.is_empty());
/// }
/// ```
pub trait Table<V> {
    /// Inserts `value` under `key`. Returns `false` and leaves the table
    /// untouched if the key is already present.
    fn insert(&mut self, key: Key, value: V) -> bool;

    /// Removes `key`. Returns `false` if it was absent.
    fn erase(&mut self, key: Key) -> bool;

    /// Looks up the entry stored under `key`.
    fn find(&self, key: Key) -> Option<&(Key, V)>;

    /// Looks up the value stored under `key` for modification.
    fn find_mut(&mut self, key: Key) -> Option<&mut V>;

    /// Removes every entry and returns to the initial capacity.
    fn clear(&mut self);

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Number of slots (hash tables) or reserved entries (array tables).
    fn capacity(&self) -> usize;

    /// Returns `true` if the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: Key) -> bool {
        self.find(key).is_some()
    }
}

/// Selects one of the table implementations at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// [`OpenAddressingTable`]: quadratic probing with tombstones.
    OpenAddressing,
    /// [`SeparateChainingTable`]: one linked list per bucket.
    SeparateChaining,
    /// [`UnorderedTable`]: unsorted array with linear search.
    Unordered,
    /// [`OrderedTable`]: sorted array with binary search.
    Ordered,
}

impl TableKind {
    /// Every variant, hash tables first.
    pub const ALL: [TableKind; 4] = [
        TableKind::OpenAddressing,
        TableKind::SeparateChaining,
        TableKind::Unordered,
        TableKind::Ordered,
    ];

    /// Builds an empty table of this kind with default parameters.
    pub fn build<V: 'static>(self) -> Box<dyn Table<V>> {
        match self {
            TableKind::OpenAddressing => Box::new(OpenAddressingTable::<V>::new()),
            TableKind::SeparateChaining => Box::new(SeparateChainingTable::<V>::new()),
            TableKind::Unordered => Box::new(UnorderedTable::<V>::new()),
            TableKind::Ordered => Box::new(OrderedTable::<V>::new()),
        }
    }

    /// Returns `true` for the two hash-table variants.
    pub fn is_hashed(self) -> bool {
        matches!(self, TableKind::OpenAddressing | TableKind::SeparateChaining)
    }
}
