//! Empirical bias estimation and last-round-key ranking.

use heys_core::{Block, HeysCipher, RoundKeys};
use rayon::prelude::*;

use crate::checker::check_relation;
use crate::error::AttackError;
use crate::relation::LinearRelation;

/// Estimates the empirical bias of `relation` over a known-pair corpus under
/// the guessed cipher.
///
/// Counts the fraction of pairs for which the relation holds and returns its
/// absolute deviation from 1/2. A guess carrying the correct last-round key
/// bits reproduces the relation's true bias; an incorrect guess averages
/// toward zero.
pub fn estimate_bias(
    plaintexts: &[Block],
    ciphertexts: &[Block],
    guess: &HeysCipher,
    relation: &LinearRelation,
) -> Result<f64, AttackError> {
    validate_corpus(plaintexts, ciphertexts)?;
    let matches = plaintexts
        .iter()
        .zip(ciphertexts.iter())
        .filter(|(plaintext, ciphertext)| {
            check_relation(guess, relation, **plaintext, **ciphertext)
        })
        .count();
    Ok((matches as f64 / plaintexts.len() as f64 - 0.5).abs())
}

/// A candidate last-round key together with its observed bias.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyCandidate {
    /// The guessed last-round key.
    pub key: u16,
    /// The empirical bias observed under this guess.
    pub bias: f64,
}

/// Ranks every last-round-key candidate within `key_mask` by observed bias,
/// highest first.
///
/// Only key bits under the mask are enumerated (`0xFFFF` for the full
/// space); bits outside the mask stay zero, which is sound whenever the
/// relation's intermediate bits only touch S-boxes covered by the mask.
/// Candidates are scored independently, so the guess space is partitioned
/// across threads with a final sort as the only reduction.
pub fn rank_last_round_keys(
    plaintexts: &[Block],
    ciphertexts: &[Block],
    relation: &LinearRelation,
    key_mask: u16,
) -> Result<Vec<KeyCandidate>, AttackError> {
    validate_corpus(plaintexts, ciphertexts)?;
    let mut ranked: Vec<KeyCandidate> = submasks(key_mask)
        .into_par_iter()
        .map(|key| {
            let guess = HeysCipher::new(RoundKeys::new([0, 0, 0, 0, key]));
            let bias = estimate_bias(plaintexts, ciphertexts, &guess, relation)
                .expect("corpus validated before ranking");
            KeyCandidate { key, bias }
        })
        .collect();
    ranked.sort_by(|a, b| b.bias.partial_cmp(&a.bias).expect("bias is never NaN"));
    Ok(ranked)
}

fn validate_corpus(plaintexts: &[Block], ciphertexts: &[Block]) -> Result<(), AttackError> {
    if plaintexts.is_empty() && ciphertexts.is_empty() {
        return Err(AttackError::EmptyCorpus);
    }
    if plaintexts.len() != ciphertexts.len() {
        return Err(AttackError::LengthMismatch {
            plaintexts: plaintexts.len(),
            ciphertexts: ciphertexts.len(),
        });
    }
    Ok(())
}

/// Enumerates every value whose set bits lie within `mask`, including zero.
fn submasks(mask: u16) -> Vec<u16> {
    let mut out = Vec::with_capacity(1usize << mask.count_ones());
    let mut sub = mask;
    loop {
        out.push(sub);
        if sub == 0 {
            break;
        }
        sub = (sub - 1) & mask;
    }
    out
}
