//! The Heys cipher: a 4-round, 16-bit substitution-permutation network.

use crate::block::Block;
use crate::error::CipherError;
use crate::tables::{Permutation, SBox, HEYS_PERMUTATION, HEYS_SBOX};

/// Number of substitution rounds.
pub const ROUNDS: usize = 4;

/// Number of round keys: one per round plus the final whitening key.
pub const ROUND_KEY_COUNT: usize = 5;

/// The five 16-bit round keys, ordered and immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys([u16; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Wraps exactly five round keys.
    pub const fn new(keys: [u16; ROUND_KEY_COUNT]) -> Self {
        Self(keys)
    }

    /// Builds round keys from a slice, failing unless it holds exactly five.
    pub fn from_slice(keys: &[u16]) -> Result<Self, CipherError> {
        match <[u16; ROUND_KEY_COUNT]>::try_from(keys) {
            Ok(array) => Ok(Self(array)),
            Err(_) => Err(CipherError::KeyCount { count: keys.len() }),
        }
    }

    /// Returns the round key at the requested index (0..=4).
    #[inline]
    pub fn get(&self, index: usize) -> u16 {
        self.0[index]
    }
}

impl From<[u16; ROUND_KEY_COUNT]> for RoundKeys {
    fn from(keys: [u16; ROUND_KEY_COUNT]) -> Self {
        Self(keys)
    }
}

/// Heys' toy block cipher over 16-bit blocks.
///
/// Each of the four rounds XORs a round key into the state and substitutes
/// every nibble; rounds 1 through 3 additionally permute the bits. The
/// ciphertext is the final substituted state XORed with the fifth key. The
/// cipher is a bijection on the block space for every key vector.
pub struct HeysCipher {
    round_keys: RoundKeys,
    sbox: SBox,
    permutation: Permutation,
}

impl HeysCipher {
    /// Builds a cipher over the published Heys tables.
    pub fn new(round_keys: RoundKeys) -> Self {
        Self::with_tables(round_keys, *HEYS_SBOX, *HEYS_PERMUTATION)
    }

    /// Builds a cipher over caller-supplied (already validated) tables.
    pub fn with_tables(round_keys: RoundKeys, sbox: SBox, permutation: Permutation) -> Self {
        Self {
            round_keys,
            sbox,
            permutation,
        }
    }

    /// Returns the round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Returns the substitution box in use.
    pub fn sbox(&self) -> &SBox {
        &self.sbox
    }

    /// Encrypts a single block.
    pub fn encrypt(&self, plaintext: Block) -> Block {
        let mut state = plaintext;
        for round in 0..ROUNDS {
            state = (state ^ self.round_keys.get(round)).substitute(&self.sbox);
            if round + 1 < ROUNDS {
                state = state.permute(&self.permutation);
            }
        }
        state ^ self.round_keys.get(ROUNDS)
    }

    /// Decrypts a single block; the exact mirror of [`HeysCipher::encrypt`].
    pub fn decrypt(&self, ciphertext: Block) -> Block {
        let mut state = (ciphertext ^ self.round_keys.get(ROUNDS)).invert_substitute(&self.sbox);
        for round in (1..ROUNDS).rev() {
            state = (state ^ self.round_keys.get(round))
                .invert_permute(&self.permutation)
                .invert_substitute(&self.sbox);
        }
        state ^ self.round_keys.get(0)
    }

    /// Peels `layers` substitution layers off the ciphertext side.
    ///
    /// One layer undoes the final key XOR and one inverse substitution,
    /// recovering the state just after the last round's permutation (the
    /// depth the published linear relations are defined over). Each further
    /// layer XORs the next round key down, inverse-permutes, and
    /// inverse-substitutes. `layers` must be in `1..=4`; depth 4 followed by
    /// an XOR with the first round key is full decryption.
    pub fn partial_decrypt(&self, ciphertext: Block, layers: usize) -> Result<Block, CipherError> {
        if layers < 1 || layers > ROUNDS {
            return Err(CipherError::DepthOutOfRange { depth: layers });
        }
        let mut state = (ciphertext ^ self.round_keys.get(ROUNDS)).invert_substitute(&self.sbox);
        for peeled in 1..layers {
            state = (state ^ self.round_keys.get(ROUNDS - peeled))
                .invert_permute(&self.permutation)
                .invert_substitute(&self.sbox);
        }
        Ok(state)
    }
}
