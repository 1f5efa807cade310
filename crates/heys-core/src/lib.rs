//! Heys' toy substitution-permutation network cipher.
//!
//! This crate implements the 16-bit, 4-round SPN from Heys' tutorial on
//! linear and differential cryptanalysis and provides:
//! - Immutable 16-bit [`Block`] values with nibble substitution, bit
//!   permutation, and their exact inverses.
//! - Validated substitution/permutation tables with precomputed inverses.
//! - Single-block encryption, decryption, and the partial decryption the
//!   linear-cryptanalysis harness builds on.
//!
//! The cipher is deliberately toy-scale and offers no security; it exists to
//! be attacked.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod tables;

pub use crate::block::{Block, BLOCK_BITS};
pub use crate::cipher::{HeysCipher, RoundKeys, ROUNDS, ROUND_KEY_COUNT};
pub use crate::error::CipherError;
pub use crate::tables::{Permutation, SBox, HEYS_PERMUTATION, HEYS_SBOX};
