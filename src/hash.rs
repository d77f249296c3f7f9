//! Universal multiplicative hashing over power-of-two slot arrays.
//!
//! A key is mapped to a slot by multiplying it with a per-table random
//! multiplier modulo `2^32` and keeping the top `M` bits of the product, where
//! the table has `2^M` slots. Growing the table only changes `M`; the
//! multiplier chosen at construction is kept for the lifetime of the table.

use rand::RngCore;

use crate::error::Error;
use crate::error::Result;
use crate::table::INITIAL_CAPACITY_EXPONENT;
use crate::table::Key;
use crate::table::target_load_factor;

/// Width in bits of the multiplication used by the hash.
const WORD_BITS: u32 = Key::BITS;

/// `2^32 / golden_ratio`, used when no entropy source is compiled in.
const GOLDEN_RATIO_32: u32 = 2_654_435_769;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        fn entropy() -> u32 {
            use core::hash::BuildHasher;

            let hash = foldhash::fast::RandomState::default().hash_one(GOLDEN_RATIO_32);
            (hash >> 32) as u32 ^ hash as u32
        }
    } else if #[cfg(feature = "std")] {
        fn entropy() -> u32 {
            use rand::TryRngCore;

            rand::rngs::OsRng.try_next_u32().unwrap_or(GOLDEN_RATIO_32)
        }
    } else {
        fn entropy() -> u32 {
            GOLDEN_RATIO_32
        }
    }
}

/// Number of slots in a hash table, always a power of two.
///
/// Holding the exponent rather than the slot count makes a zero-sized or
/// non-power-of-two slot array unrepresentable, so probe arithmetic can mask
/// instead of taking a remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity {
    exponent: u32,
}

impl Capacity {
    /// Largest supported exponent. The hash yields at most `WORD_BITS` bits and
    /// the slot count must fit in a `usize`.
    pub const MAX_EXPONENT: u32 = if usize::BITS > WORD_BITS {
        WORD_BITS
    } else {
        usize::BITS - 1
    };

    /// Capacity of `2^exponent` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyed_tables::Capacity;
    ///
    /// assert_eq!(Capacity::new(3).unwrap().slot_count(), 8);
    /// assert!(Capacity::new(Capacity::MAX_EXPONENT + 1).is_err());
    /// ```
    pub fn new(exponent: u32) -> Result<Self> {
        if exponent > Self::MAX_EXPONENT {
            return Err(Error::CapacityExponentOutOfRange {
                exponent,
                max: Self::MAX_EXPONENT,
            });
        }
        Ok(Self { exponent })
    }

    /// Like [`Capacity::new`], but saturates at [`Capacity::MAX_EXPONENT`].
    pub fn saturating(exponent: u32) -> Self {
        Self {
            exponent: exponent.min(Self::MAX_EXPONENT),
        }
    }

    /// The exponent `M` of the `2^M` slots.
    #[inline(always)]
    pub fn exponent(self) -> u32 {
        self.exponent
    }

    /// Number of slots.
    #[inline(always)]
    pub fn slot_count(self) -> usize {
        1 << self.exponent
    }

    #[inline(always)]
    pub(crate) fn mask(self) -> usize {
        self.slot_count() - 1
    }

    /// Live entries tolerated before the table must grow.
    #[inline(always)]
    pub(crate) fn max_load(self) -> usize {
        target_load_factor(self.slot_count())
    }

    /// Twice the slot count, or `None` at [`Capacity::MAX_EXPONENT`].
    #[inline]
    pub(crate) fn doubled(self) -> Option<Self> {
        Self::new(self.exponent + 1).ok()
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            exponent: INITIAL_CAPACITY_EXPONENT,
        }
    }
}

/// The randomized parameter of the universal hash function.
///
/// Each table owns one instance, drawn once when the table is built and kept
/// across resizes.
///
/// # Examples
///
/// ```rust
/// use keyed_tables::Capacity;
/// use keyed_tables::UniversalHash;
///
/// // A multiplier of one sends every small key to slot zero.
/// let degenerate = UniversalHash::with_multiplier(1);
/// let capacity = Capacity::new(3).unwrap();
/// assert!((0..6).all(|key| degenerate.index(key, capacity) == 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniversalHash {
    multiplier: u32,
}

impl UniversalHash {
    /// Uses `multiplier` as is. Intended for reproducible layouts; an even or
    /// tiny multiplier degrades the distribution.
    pub const fn with_multiplier(multiplier: u32) -> Self {
        Self { multiplier }
    }

    /// Draws an odd multiplier from `rng`.
    pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self {
            multiplier: rng.next_u32() | 1,
        }
    }

    /// Draws an odd multiplier from the compiled-in entropy source.
    pub fn random() -> Self {
        Self {
            multiplier: entropy() | 1,
        }
    }

    /// The multiplier `a` in `(a * key) mod 2^32`.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Slot index of `key` in a table of `capacity` slots, in
    /// `0..capacity.slot_count()`.
    #[inline(always)]
    pub fn index(&self, key: Key, capacity: Capacity) -> usize {
        let product = self.multiplier.wrapping_mul(key);
        // A zero exponent keeps no bits at all.
        product
            .checked_shr(WORD_BITS - capacity.exponent())
            .unwrap_or(0) as usize
    }
}

impl Default for UniversalHash {
    fn default() -> Self {
        Self::random()
    }
}
