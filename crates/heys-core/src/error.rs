//! Error type for cipher construction and block operations.

use core::fmt;

/// Validation error raised by block, table, or cipher construction.
///
/// Every variant is a fail-fast local error: operations on already-validated
/// values never fail, so callers only see these at construction or parse
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// Value does not fit in the 16-bit block (or 4-bit nibble) domain.
    ValueOutOfRange {
        /// The offending value.
        value: u32,
    },
    /// Bit position outside `1..=16`.
    BitOutOfRange {
        /// The offending 1-based position.
        position: u8,
    },
    /// Wrong number of round keys (exactly 5 are required).
    KeyCount {
        /// Number of keys supplied.
        count: usize,
    },
    /// Partial-decryption depth outside `1..=4`.
    DepthOutOfRange {
        /// Requested number of substitution layers to undo.
        depth: usize,
    },
    /// A substitution or permutation table maps two inputs to the same output.
    NotBijective {
        /// The duplicated output value.
        duplicate: u8,
    },
    /// Binary-string input is not exactly 16 characters.
    BinaryLength {
        /// Length of the rejected input.
        length: usize,
    },
    /// Binary-string input contains a character other than `0` or `1`.
    BinaryDigit {
        /// The rejected character.
        character: char,
        /// Zero-based column of the rejected character.
        column: usize,
    },
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange { value } => {
                write!(f, "value {value:#x} does not fit in 16 bits")
            }
            Self::BitOutOfRange { position } => {
                write!(f, "bit position {position} is outside 1..=16")
            }
            Self::KeyCount { count } => {
                write!(f, "expected exactly 5 round keys, got {count}")
            }
            Self::DepthOutOfRange { depth } => {
                write!(f, "partial-decryption depth {depth} is outside 1..=4")
            }
            Self::NotBijective { duplicate } => {
                write!(
                    f,
                    "table is not a bijection: output {duplicate:#x} appears twice"
                )
            }
            Self::BinaryLength { length } => {
                write!(f, "binary string must be 16 characters, got {length}")
            }
            Self::BinaryDigit { character, column } => {
                write!(f, "invalid binary digit {character:?} at column {column}")
            }
        }
    }
}

impl std::error::Error for CipherError {}
