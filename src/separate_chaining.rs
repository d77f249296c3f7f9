//! Separate chaining: one owned linked list per bucket.
//!
//! Colliding entries share a bucket and are told apart by a linear scan of its
//! chain. Erasing unlinks the node outright, so no tombstones are needed.

use alloc::boxed::Box;
use core::fmt::Debug;

use crate::error::Error;
use crate::error::Result;
use crate::hash::Capacity;
use crate::hash::UniversalHash;
use crate::list::List;
use crate::table::Key;
use crate::table::Table;

type Bucket<V> = List<(Key, V)>;

/// Snapshot of the bucket usage of a [`SeparateChainingTable`].
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Live entries
    pub populated: usize,
    /// Total number of buckets
    pub buckets: usize,
    /// Buckets with at least one entry
    pub used_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Live entries tolerated before the next resize
    pub max_load: usize,
    /// `populated / buckets`
    pub load_factor: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Separate Chaining Table Statistics ===");
        println!(
            "Population: {} in {} buckets ({:.2}% load factor, grows at {})",
            self.populated,
            self.buckets,
            self.load_factor * 100.0,
            self.max_load
        );
        println!(
            "Bucket Usage: {}/{}, longest chain {}",
            self.used_buckets, self.buckets, self.longest_chain
        );
    }
}

/// A `u32`-keyed hash table resolving collisions with per-bucket linked
/// lists.
///
/// The bucket array has a power-of-two length and is indexed with a
/// [`UniversalHash`]. New entries are pushed at the head of their chain. Once
/// the live count reaches 70% of the bucket count the array doubles and every
/// node is re-linked into its new bucket without being reallocated.
///
/// ## Example
///
/// ```rust
/// use keyed_tables::SeparateChainingTable;
/// use keyed_tables::Table;
///
/// let mut table = SeparateChainingTable::new();
/// for key in 0..100 {
///     assert!(table.insert(key, key * 2));
/// }
/// assert_eq!(table.find(21), Some(&(21, 42)));
/// assert!(table.capacity() > 100);
/// ```
#[derive(Clone)]
pub struct SeparateChainingTable<V> {
    buckets: Box<[Bucket<V>]>,
    populated: usize,
    capacity: Capacity,
    initial_capacity: Capacity,
    hasher: UniversalHash,
}

impl<V: Debug> Debug for SeparateChainingTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeparateChainingTable")
            .field("buckets", &self.buckets)
            .field("populated", &self.populated)
            .field("capacity", &self.capacity.slot_count())
            .field("multiplier", &self.hasher.multiplier())
            .finish()
    }
}

impl<V> Default for SeparateChainingTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SeparateChainingTable<V> {
    /// Creates an empty table with 16 buckets and a random hash multiplier.
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(Capacity::default(), UniversalHash::random())
    }

    /// Creates an empty table with `2^exponent` buckets. Exponents above
    /// [`Capacity::MAX_EXPONENT`] are clamped.
    pub fn with_capacity_exponent(exponent: u32) -> Self {
        Self::with_capacity_and_hasher(Capacity::saturating(exponent), UniversalHash::random())
    }

    /// Creates an empty table with `2^exponent` buckets, rejecting exponents
    /// the hash cannot address.
    pub fn try_with_capacity_exponent(exponent: u32) -> Result<Self> {
        Ok(Self::with_capacity_and_hasher(
            Capacity::new(exponent)?,
            UniversalHash::random(),
        ))
    }

    /// Creates an empty table with 16 buckets using the given hash parameter.
    pub fn with_hasher(hasher: UniversalHash) -> Self {
        Self::with_capacity_and_hasher(Capacity::default(), hasher)
    }

    /// Creates an empty table with `2^exponent` buckets (clamped) using the
    /// given hash parameter.
    pub fn with_capacity_exponent_and_hasher(exponent: u32, hasher: UniversalHash) -> Self {
        Self::with_capacity_and_hasher(Capacity::saturating(exponent), hasher)
    }

    /// Creates an empty table of exactly `capacity` buckets using the given
    /// hash parameter.
    pub fn with_capacity_and_hasher(capacity: Capacity, hasher: UniversalHash) -> Self {
        Self {
            buckets: empty_buckets(capacity),
            populated: 0,
            capacity,
            initial_capacity: capacity,
            hasher,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Number of buckets, always a power of two.
    pub fn capacity(&self) -> usize {
        self.capacity.slot_count()
    }

    /// The hash parameter chosen at construction.
    pub fn hasher(&self) -> UniversalHash {
        self.hasher
    }

    /// Iterates over the entries, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &(Key, V)> + '_ {
        self.buckets.iter().flat_map(List::iter)
    }

    /// Looks up the entry stored under `key`.
    pub fn find(&self, key: Key) -> Option<&(Key, V)> {
        self.buckets[self.bucket_index(key)].find(|(candidate, _)| *candidate == key)
    }

    /// Looks up the value stored under `key` for modification.
    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .find_mut(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value)
    }

    /// Inserts `value` at the head of the chain for `key`, growing the bucket
    /// array first if 70% of the buckets' worth of entries are live.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `key` is present; the table is untouched.
    pub fn try_insert(&mut self, key: Key, value: V) -> Result<()> {
        if self.find(key).is_some() {
            return Err(Error::DuplicateKey(key));
        }

        if self.populated >= self.capacity.max_load() {
            self.grow();
        }

        let index = self.bucket_index(key);
        self.buckets[index].push_front((key, value));
        self.populated += 1;
        Ok(())
    }

    /// Unlinks `key` from its chain and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn try_erase(&mut self, key: Key) -> Result<V> {
        let index = self.bucket_index(key);
        let (_, value) = self.buckets[index]
            .remove_first(|(candidate, _)| *candidate == key)
            .ok_or(Error::KeyNotFound(key))?;
        self.populated -= 1;
        Ok(value)
    }

    /// Drops every node and returns to the bucket count the table was built
    /// with. The hash parameter is kept.
    pub fn clear(&mut self) {
        log::trace!(
            "clearing separate-chaining table ({} live, {} buckets)",
            self.populated,
            self.capacity()
        );
        self.buckets = empty_buckets(self.initial_capacity);
        self.capacity = self.initial_capacity;
        self.populated = 0;
    }

    #[inline(always)]
    fn bucket_index(&self, key: Key) -> usize {
        self.hasher.index(key, self.capacity)
    }

    fn grow(&mut self) {
        match self.capacity.doubled() {
            Some(capacity) => self.resize_rehash(capacity),
            None => log::warn!(
                "separate-chaining table cannot grow past {} buckets",
                self.capacity()
            ),
        }
    }

    /// Moves every node into a fresh bucket array of `capacity` buckets.
    #[cold]
    fn resize_rehash(&mut self, capacity: Capacity) {
        log::debug!(
            "resizing separate-chaining table from {} to {} buckets ({} live)",
            self.capacity(),
            capacity.slot_count(),
            self.populated
        );

        let mut old_buckets = core::mem::replace(&mut self.buckets, empty_buckets(capacity));
        self.capacity = capacity;

        for bucket in old_buckets.iter_mut() {
            while let Some(node) = bucket.unlink_front() {
                let index = self.bucket_index(node.data.0);
                self.buckets[index].link_front(node);
            }
        }
    }

    /// Returns detailed bucket usage statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            populated: self.populated,
            buckets: self.capacity(),
            used_buckets: self.buckets.iter().filter(|bucket| !bucket.is_empty()).count(),
            longest_chain: self.buckets.iter().map(List::len).max().unwrap_or(0),
            max_load: self.capacity.max_load(),
            load_factor: self.populated as f64 / self.capacity() as f64,
        }
    }

    /// Computes a histogram of chain lengths: `hist[n]` is the number of
    /// buckets holding exactly `n` entries.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> alloc::vec::Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for bucket in self.buckets.iter() {
            if hist.len() <= bucket.len() {
                hist.resize(bucket.len() + 1, 0);
            }
            hist[bucket.len()] += 1;
        }

        hist
    }
}

fn empty_buckets<V>(capacity: Capacity) -> Box<[Bucket<V>]> {
    (0..capacity.slot_count()).map(|_| List::new()).collect()
}

impl<V> Table<V> for SeparateChainingTable<V> {
    fn insert(&mut self, key: Key, value: V) -> bool {
        self.try_insert(key, value).is_ok()
    }

    fn erase(&mut self, key: Key) -> bool {
        self.try_erase(key).is_ok()
    }

    fn find(&self, key: Key) -> Option<&(Key, V)> {
        SeparateChainingTable::find(self, key)
    }

    fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        SeparateChainingTable::find_mut(self, key)
    }

    fn clear(&mut self) {
        SeparateChainingTable::clear(self)
    }

    fn len(&self) -> usize {
        self.populated
    }

    fn capacity(&self) -> usize {
        SeparateChainingTable::capacity(self)
    }
}
