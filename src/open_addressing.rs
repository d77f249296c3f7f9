//! Open addressing with quadratic probing and tombstone deletion.
//!
//! A key whose home slot is `h` is searched for along `h + i²` (masked to the
//! slot count) for `i = 0, 1, 2, …`. Erasing leaves a tombstone behind so that
//! searches for keys further along the same sequence keep probing past the
//! freed slot; insertion is free to reuse it.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Error;
use crate::error::Result;
use crate::hash::Capacity;
use crate::hash::UniversalHash;
use crate::table::Key;
use crate::table::Table;

#[derive(Clone)]
enum Slot<V> {
    /// Never held an entry. Terminates searches.
    Empty,
    Occupied((Key, V)),
    /// Held an entry that was erased. Searches continue past it.
    Tombstone,
}

impl<V> Slot<V> {
    #[inline(always)]
    fn entry(&self) -> Option<&(Key, V)> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    #[inline(always)]
    fn into_entry(self) -> Option<(Key, V)> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

impl<V> Debug for Slot<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Slot::Empty => f.write_str(".."),
            Slot::Tombstone => f.write_str("xx"),
            Slot::Occupied((key, _)) => write!(f, "{key}"),
        }
    }
}

/// Snapshot of the slot usage of an [`OpenAddressingTable`].
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Live entries
    pub populated: usize,
    /// Slots holding a tombstone
    pub tombstones: usize,
    /// Slots that never held an entry since the last resize or clear
    pub empty_slots: usize,
    /// Total number of slots
    pub total_slots: usize,
    /// Live entries tolerated before the next resize
    pub max_load: usize,
    /// `populated / total_slots`
    pub load_factor: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Open Addressing Table Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% load factor, grows at {})",
            self.populated,
            self.total_slots,
            self.load_factor * 100.0,
            self.max_load
        );
        println!(
            "Tombstones: {}, never used: {}",
            self.tombstones, self.empty_slots
        );
    }
}

/// A `u32`-keyed hash table using open addressing with quadratic probing.
///
/// Slots are kept in a power-of-two array and located with a
/// [`UniversalHash`] whose multiplier is fixed for the lifetime of the table.
/// The table doubles once 70% of its slots are live. Resizing rebuilds the
/// slot array from the live entries only, discarding tombstones.
///
/// ## Example
///
/// ```rust
/// use keyed_tables::OpenAddressingTable;
/// use keyed_tables::Table;
///
/// let mut table = OpenAddressingTable::new();
/// assert!(table.insert(7, "seven"));
/// assert!(!table.insert(7, "again"));
/// assert_eq!(table.find(7), Some(&(7, "seven")));
///
/// assert!(table.erase(7));
/// assert_eq!(table.find(7), None);
/// ```
#[derive(Clone)]
pub struct OpenAddressingTable<V> {
    slots: Box<[Slot<V>]>,
    populated: usize,
    capacity: Capacity,
    initial_capacity: Capacity,
    hasher: UniversalHash,
}

impl<V> Debug for OpenAddressingTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenAddressingTable")
            .field("slots", &self.slots)
            .field("populated", &self.populated)
            .field("capacity", &self.capacity.slot_count())
            .field("multiplier", &self.hasher.multiplier())
            .finish()
    }
}

impl<V> Default for OpenAddressingTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OpenAddressingTable<V> {
    /// Creates an empty table with 16 slots and a random hash multiplier.
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(Capacity::default(), UniversalHash::random())
    }

    /// Creates an empty table with `2^exponent` slots. Exponents above
    /// [`Capacity::MAX_EXPONENT`] are clamped.
    pub fn with_capacity_exponent(exponent: u32) -> Self {
        Self::with_capacity_and_hasher(Capacity::saturating(exponent), UniversalHash::random())
    }

    /// Creates an empty table with `2^exponent` slots, rejecting exponents
    /// the hash cannot address.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyed_tables::Error;
    /// use keyed_tables::OpenAddressingTable;
    ///
    /// let table = OpenAddressingTable::<u8>::try_with_capacity_exponent(6).unwrap();
    /// assert_eq!(table.capacity(), 64);
    ///
    /// let too_big = OpenAddressingTable::<u8>::try_with_capacity_exponent(99);
    /// assert!(matches!(too_big, Err(Error::CapacityExponentOutOfRange { .. })));
    /// ```
    pub fn try_with_capacity_exponent(exponent: u32) -> Result<Self> {
        Ok(Self::with_capacity_and_hasher(
            Capacity::new(exponent)?,
            UniversalHash::random(),
        ))
    }

    /// Creates an empty table with 16 slots using the given hash parameter.
    pub fn with_hasher(hasher: UniversalHash) -> Self {
        Self::with_capacity_and_hasher(Capacity::default(), hasher)
    }

    /// Creates an empty table with `2^exponent` slots (clamped) using the
    /// given hash parameter.
    pub fn with_capacity_exponent_and_hasher(exponent: u32, hasher: UniversalHash) -> Self {
        Self::with_capacity_and_hasher(Capacity::saturating(exponent), hasher)
    }

    /// Creates an empty table of exactly `capacity` slots using the given
    /// hash parameter.
    pub fn with_capacity_and_hasher(capacity: Capacity, hasher: UniversalHash) -> Self {
        Self {
            slots: empty_slots(capacity),
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

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Number of slots, always a power of two.
    pub fn capacity(&self) -> usize {
        self.capacity.slot_count()
    }

    /// The hash parameter chosen at construction.
    pub fn hasher(&self) -> UniversalHash {
        self.hasher
    }

    /// Iterates over the live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &(Key, V)> + '_ {
        self.slots.iter().filter_map(Slot::entry)
    }

    /// Looks up the entry stored under `key`.
    pub fn find(&self, key: Key) -> Option<&(Key, V)> {
        let index = self.find_index(key)?;
        self.slots[index].entry()
    }

    /// Looks up the value stored under `key` for modification.
    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match &mut self.slots[index] {
            Slot::Occupied((_, value)) => Some(value),
            _ => None,
        }
    }

    /// Inserts `value` under `key`.
    ///
    /// Grows the table first if 70% of the slots are live. If the probe
    /// sequence of `key` offers no empty or tombstoned slot, the table is
    /// grown once more and placement retried a single time.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `key` is present; the table is untouched.
    /// [`Error::ProbeSequenceExhausted`] if the retry also fails; the table
    /// keeps its entries but may have grown.
    pub fn try_insert(&mut self, key: Key, value: V) -> Result<()> {
        if self.find_index(key).is_some() {
            return Err(Error::DuplicateKey(key));
        }

        if self.populated >= self.capacity.max_load() {
            self.grow();
        }

        let index = match self.vacant_index(key) {
            Some(index) => index,
            None => {
                log::trace!(
                    "probe sequence for key {key} full at {} slots, forcing a resize",
                    self.capacity()
                );
                self.grow();
                self.vacant_index(key)
                    .ok_or(Error::ProbeSequenceExhausted {
                        key,
                        capacity: self.capacity(),
                    })?
            }
        };

        self.slots[index] = Slot::Occupied((key, value));
        self.populated += 1;
        Ok(())
    }

    /// Removes `key`, leaving a tombstone in its slot, and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn try_erase(&mut self, key: Key) -> Result<V> {
        let index = self.find_index(key).ok_or(Error::KeyNotFound(key))?;
        let (_, value) = core::mem::replace(&mut self.slots[index], Slot::Tombstone)
            .into_entry()
            .ok_or(Error::KeyNotFound(key))?;
        self.populated -= 1;
        Ok(value)
    }

    /// Removes every entry and returns to the capacity the table was built
    /// with. The hash parameter is kept.
    pub fn clear(&mut self) {
        log::trace!(
            "clearing open-addressing table ({} live, {} slots)",
            self.populated,
            self.capacity()
        );
        self.slots = empty_slots(self.initial_capacity);
        self.capacity = self.initial_capacity;
        self.populated = 0;
    }

    #[inline(always)]
    fn probe_sequence(&self, key: Key) -> impl Iterator<Item = usize> + use<V> {
        let home = self.hasher.index(key, self.capacity);
        let mask = self.capacity.mask();
        (0..self.capacity.slot_count()).map(move |i| home.wrapping_add(i.wrapping_mul(i)) & mask)
    }

    /// Slot holding `key`, if live.
    fn find_index(&self, key: Key) -> Option<usize> {
        for index in self.probe_sequence(key) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied((candidate, _)) if *candidate == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }

        None
    }

    /// First empty or tombstoned slot along the probe sequence of `key`.
    fn vacant_index(&self, key: Key) -> Option<usize> {
        self.probe_sequence(key)
            .find(|&index| !matches!(self.slots[index], Slot::Occupied(_)))
    }

    fn grow(&mut self) {
        match self.capacity.doubled() {
            Some(capacity) => self.resize_rehash(capacity),
            None => log::warn!(
                "open-addressing table cannot grow past {} slots",
                self.capacity()
            ),
        }
    }

    /// Rebuilds the slot array at `capacity` from the live entries.
    ///
    /// A degenerate hash parameter can leave an entry without a reachable
    /// slot even in the larger array; in that case the rebuild restarts one
    /// size up.
    #[cold]
    fn resize_rehash(&mut self, mut capacity: Capacity) {
        log::debug!(
            "resizing open-addressing table from {} to {} slots ({} live)",
            self.capacity(),
            capacity.slot_count(),
            self.populated
        );

        let old_slots = core::mem::take(&mut self.slots);
        let mut pending: Vec<(Key, V)> = Vec::with_capacity(self.populated);
        pending.extend(old_slots.into_vec().into_iter().filter_map(Slot::into_entry));
        debug_assert_eq!(pending.len(), self.populated);

        'rebuild: loop {
            self.slots = empty_slots(capacity);
            self.capacity = capacity;

            while let Some(entry) = pending.pop() {
                match self.vacant_index(entry.0) {
                    Some(index) => self.slots[index] = Slot::Occupied(entry),
                    None => {
                        let Some(larger) = capacity.doubled() else {
                            panic!(
                                "{}",
                                Error::ProbeSequenceExhausted {
                                    key: entry.0,
                                    capacity: capacity.slot_count(),
                                }
                            );
                        };
                        log::debug!(
                            "key {} unplaceable at {} slots, rebuilding at {}",
                            entry.0,
                            capacity.slot_count(),
                            larger.slot_count()
                        );
                        pending.push(entry);
                        let placed = core::mem::take(&mut self.slots);
                        pending.extend(placed.into_vec().into_iter().filter_map(Slot::into_entry));
                        capacity = larger;
                        continue 'rebuild;
                    }
                }
            }

            break;
        }
    }

    /// Returns detailed slot usage statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let mut tombstones = 0;
        let mut empty_slots = 0;
        for slot in self.slots.iter() {
            match slot {
                Slot::Empty => empty_slots += 1,
                Slot::Tombstone => tombstones += 1,
                Slot::Occupied(_) => {}
            }
        }

        DebugStats {
            populated: self.populated,
            tombstones,
            empty_slots,
            total_slots: self.capacity(),
            max_load: self.capacity.max_load(),
            load_factor: self.populated as f64 / self.capacity() as f64,
        }
    }

    /// Computes a histogram of probe lengths for the live entries.
    ///
    /// `hist[i]` counts the entries found at step `i` of their probe
    /// sequence, so `hist[0]` is the number of entries sitting in their home
    /// slot. The vector is as long as the longest probe plus one.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some((key, _)) = slot.entry() else {
                continue;
            };
            if let Some(step) = self.probe_sequence(*key).position(|probe| probe == index) {
                if hist.len() <= step {
                    hist.resize(step + 1, 0);
                }
                hist[step] += 1;
            }
        }

        hist
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.populated);

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            const PARTIAL: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
            if units % 8 > 0 {
                bar.push(PARTIAL[units % 8]);
            }
            bar
        };

        for (step, &count) in hist.iter().enumerate() {
            println!("{:>3} | {} ({})", step, make_bar(count), count);
        }
    }
}

fn empty_slots<V>(capacity: Capacity) -> Box<[Slot<V>]> {
    (0..capacity.slot_count()).map(|_| Slot::Empty).collect()
}

impl<V> Table<V> for OpenAddressingTable<V> {
    fn insert(&mut self, key: Key, value: V) -> bool {
        match self.try_insert(key, value) {
            Ok(()) => true,
            Err(Error::DuplicateKey(_)) => false,
            Err(err) => panic!("{err}"),
        }
    }

    fn erase(&mut self, key: Key) -> bool {
        self.try_erase(key).is_ok()
    }

    fn find(&self, key: Key) -> Option<&(Key, V)> {
        OpenAddressingTable::find(self, key)
    }

    fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        OpenAddressingTable::find_mut(self, key)
    }

    fn clear(&mut self) {
        OpenAddressingTable::clear(self)
    }

    fn len(&self) -> usize {
        self.populated
    }

    fn capacity(&self) -> usize {
        OpenAddressingTable::capacity(self)
    }
}
