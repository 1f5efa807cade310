//! Error type for relation construction and bias estimation.

use core::fmt;

/// Validation error raised by the attack harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackError {
    /// A relation term names a bit position outside `1..=16`.
    BitOutOfRange {
        /// The offending 1-based position.
        position: u8,
    },
    /// A relation declares an inversion depth outside `1..=4`.
    DepthOutOfRange {
        /// The declared depth.
        depth: usize,
    },
    /// A relation has no terms; its parity is constant and carries no signal.
    EmptyRelation,
    /// Bias estimation was given an empty corpus.
    EmptyCorpus,
    /// The plaintext and ciphertext sequences differ in length.
    LengthMismatch {
        /// Number of plaintexts supplied.
        plaintexts: usize,
        /// Number of ciphertexts supplied.
        ciphertexts: usize,
    },
}

impl fmt::Display for AttackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BitOutOfRange { position } => {
                write!(f, "relation bit position {position} is outside 1..=16")
            }
            Self::DepthOutOfRange { depth } => {
                write!(f, "relation inversion depth {depth} is outside 1..=4")
            }
            Self::EmptyRelation => write!(f, "relation must have at least one term"),
            Self::EmptyCorpus => write!(f, "bias estimation requires a non-empty corpus"),
            Self::LengthMismatch {
                plaintexts,
                ciphertexts,
            } => {
                write!(
                    f,
                    "corpus length mismatch: {plaintexts} plaintexts vs {ciphertexts} ciphertexts"
                )
            }
        }
    }
}

impl std::error::Error for AttackError {}
