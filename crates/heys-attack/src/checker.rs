//! Evaluation of a linear relation against known plaintext/ciphertext pairs.

use heys_core::{Block, HeysCipher};

use crate::relation::LinearRelation;

/// Returns true iff `relation` holds for the pair under the guessed cipher.
///
/// The ciphertext is partially decrypted to the relation's declared depth
/// (for the published relations, undoing the final key XOR and one inverse
/// substitution to recover the state after the last round's permutation),
/// and the relation's parity is evaluated over the plaintext and that
/// intermediate state.
pub fn check_relation(
    guess: &HeysCipher,
    relation: &LinearRelation,
    plaintext: Block,
    ciphertext: Block,
) -> bool {
    let intermediate = guess
        .partial_decrypt(ciphertext, relation.depth())
        .expect("relation depth validated at construction");
    relation.holds(plaintext, intermediate)
}
