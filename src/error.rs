use thiserror::Error;

use crate::table::Key;

/// Failure reasons reported by the fallible table operations.
///
/// The [`Table`](crate::Table) trait folds [`Error::DuplicateKey`] and
/// [`Error::KeyNotFound`] into `bool`/`Option` returns. The other variants
/// describe broken invariants or rejected construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is already present in the table.
    #[error("key {0} is already present")]
    DuplicateKey(Key),

    /// The key is not present in the table.
    #[error("key {0} not found")]
    KeyNotFound(Key),

    /// Every slot of the probe sequence was occupied, even after a forced
    /// resize. The load-factor guard should make this unreachable.
    #[error("probe sequence for key {key} exhausted at capacity {capacity}")]
    ProbeSequenceExhausted {
        /// Key that could not be placed.
        key: Key,
        /// Slot count at the time of the failure.
        capacity: usize,
    },

    /// Requested capacity exponent is larger than the hash can address.
    #[error("capacity exponent {exponent} exceeds the maximum of {max}")]
    CapacityExponentOutOfRange {
        /// Requested exponent.
        exponent: u32,
        /// Largest supported exponent.
        max: u32,
    },
}

/// Convenience alias used by the fallible table operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_key() {
        assert_eq!(Error::DuplicateKey(7).to_string(), "key 7 is already present");
        assert_eq!(Error::KeyNotFound(0).to_string(), "key 0 not found");
        assert_eq!(
            Error::ProbeSequenceExhausted {
                key: 3,
                capacity: 8
            }
            .to_string(),
            "probe sequence for key 3 exhausted at capacity 8"
        );
    }
}
