//! Linear cryptanalysis harness for the Heys SPN cipher.
//!
//! This crate estimates the statistical bias of conjectured linear
//! relationships between plaintext bits and cipher-internal bits, the
//! distinguisher that separates correct last-round-key guesses from
//! incorrect ones:
//! - [`LinearRelation`] describes a relation declaratively as (source,
//!   bit-position) terms plus an explicit partial-decryption depth.
//! - [`check_relation`] partially decrypts a ciphertext under a key guess
//!   and evaluates the relation against one known pair.
//! - [`estimate_bias`] aggregates relation checks over a corpus, and
//!   [`rank_last_round_keys`] scores every masked key candidate in
//!   parallel.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bias;
mod checker;
mod error;
mod relation;

pub use crate::bias::{estimate_bias, rank_last_round_keys, KeyCandidate};
pub use crate::checker::check_relation;
pub use crate::error::AttackError;
pub use crate::relation::{BitSource, LinearRelation, Term};
