#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;

/// Universal multiplicative hashing and power-of-two capacities.
pub mod hash;

/// An owned singly linked list with a mutable cursor.
///
/// Used as the bucket type of [`SeparateChainingTable`].
pub mod list;

/// A hash table using open addressing with quadratic probing.
///
/// Erased slots become tombstones that lookups skip and insertions reuse.
pub mod open_addressing;

pub mod separate_chaining;

/// Baseline table keeping entries sorted by key.
pub mod ordered_table;

/// Baseline table keeping entries in insertion order, modulo erasures.
pub mod unordered_table;

mod table;

pub use error::Error;
pub use error::Result;
pub use hash::Capacity;
pub use hash::UniversalHash;
pub use list::CursorMut;
pub use list::List;
pub use open_addressing::OpenAddressingTable;
pub use ordered_table::OrderedTable;
pub use separate_chaining::SeparateChainingTable;
pub use table::INITIAL_ARRAY_CAPACITY;
pub use table::INITIAL_CAPACITY_EXPONENT;
pub use table::Key;
pub use table::Table;
pub use table::TableKind;
pub use unordered_table::UnorderedTable;
