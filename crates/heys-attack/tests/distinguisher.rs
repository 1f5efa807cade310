//! End-to-end distinguisher checks over the full 16-bit codebook.

use heys_attack::{estimate_bias, rank_last_round_keys, LinearRelation};
use heys_core::{Block, HeysCipher, RoundKeys};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Key bits the tutorial relation constrains: the second and fourth S-boxes
/// of the last round (positions 5..=8 and 13..=16).
const TUTORIAL_KEY_MASK: u16 = 0x0F0F;

fn full_codebook(cipher: &HeysCipher) -> (Vec<Block>, Vec<Block>) {
    let plaintexts: Vec<Block> = (u16::MIN..=u16::MAX).map(Block::new).collect();
    let ciphertexts: Vec<Block> = plaintexts.iter().map(|pt| cipher.encrypt(*pt)).collect();
    (plaintexts, ciphertexts)
}

#[test]
fn tutorial_bias_approaches_one_thirty_second_under_true_key() {
    let cipher = HeysCipher::new(RoundKeys::new([1, 2, 3, 4, 5]));
    let relation = LinearRelation::heys_tutorial();
    let (plaintexts, ciphertexts) = full_codebook(&cipher);

    let bias = estimate_bias(&plaintexts, &ciphertexts, &cipher, &relation).unwrap();
    assert!(
        (bias - 1.0 / 32.0).abs() < 0.015,
        "full-codebook bias {bias} strays too far from 1/32"
    );
}

#[test]
fn true_key_outscores_wrong_guess() {
    let cipher = HeysCipher::new(RoundKeys::new([1, 2, 3, 4, 5]));
    let relation = LinearRelation::heys_tutorial();
    let (plaintexts, ciphertexts) = full_codebook(&cipher);

    let true_bias = estimate_bias(&plaintexts, &ciphertexts, &cipher, &relation).unwrap();

    // Flip one key bit inside each S-box the relation constrains.
    let wrong_key = cipher.round_keys().get(4) ^ 0x0808;
    let wrong_guess = HeysCipher::new(RoundKeys::new([0, 0, 0, 0, wrong_key]));
    let wrong_bias =
        estimate_bias(&plaintexts, &ciphertexts, &wrong_guess, &relation).unwrap();

    assert!(
        true_bias > wrong_bias,
        "true-key bias {true_bias} should exceed wrong-key bias {wrong_bias}"
    );
}

#[test]
fn four_sbox_relation_separates_true_from_wrong() {
    let cipher = HeysCipher::new(RoundKeys::new([1, 2, 3, 4, 5]));
    let relation = LinearRelation::four_sbox();
    let (plaintexts, ciphertexts) = full_codebook(&cipher);

    let true_bias = estimate_bias(&plaintexts, &ciphertexts, &cipher, &relation).unwrap();
    let wrong_key = cipher.round_keys().get(4) ^ 0x4242;
    let wrong_guess = HeysCipher::new(RoundKeys::new([0, 0, 0, 0, wrong_key]));
    let wrong_bias =
        estimate_bias(&plaintexts, &ciphertexts, &wrong_guess, &relation).unwrap();

    assert!(
        true_bias > wrong_bias,
        "true-key bias {true_bias} should exceed wrong-key bias {wrong_bias}"
    );
}

#[test]
fn masked_ranking_recovers_true_key_bits() {
    let cipher = HeysCipher::new(RoundKeys::new([1, 2, 3, 4, 5]));
    let relation = LinearRelation::heys_tutorial();
    let (plaintexts, ciphertexts) = full_codebook(&cipher);

    let ranked =
        rank_last_round_keys(&plaintexts, &ciphertexts, &relation, TUTORIAL_KEY_MASK).unwrap();
    assert_eq!(ranked.len(), 256);

    let expected = cipher.round_keys().get(4) & TUTORIAL_KEY_MASK;
    assert_eq!(
        ranked[0].key, expected,
        "top candidate {:#06x} should carry the true masked key bits {expected:#06x}",
        ranked[0].key
    );
}

#[test]
fn ranking_is_stable_for_random_key_vectors() {
    let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
    let keys = RoundKeys::new([rng.gen(), rng.gen(), rng.gen(), rng.gen(), rng.gen()]);
    let cipher = HeysCipher::new(keys);
    let relation = LinearRelation::heys_tutorial();
    let (plaintexts, ciphertexts) = full_codebook(&cipher);

    let true_masked = keys.get(4) & TUTORIAL_KEY_MASK;
    let true_guess = HeysCipher::new(RoundKeys::new([0, 0, 0, 0, true_masked]));
    let true_bias =
        estimate_bias(&plaintexts, &ciphertexts, &true_guess, &relation).unwrap();

    let wrong_guess =
        HeysCipher::new(RoundKeys::new([0, 0, 0, 0, true_masked ^ 0x0404]));
    let wrong_bias =
        estimate_bias(&plaintexts, &ciphertexts, &wrong_guess, &relation).unwrap();

    assert!(
        true_bias > wrong_bias,
        "true-key bias {true_bias} should exceed wrong-key bias {wrong_bias}"
    );
}
