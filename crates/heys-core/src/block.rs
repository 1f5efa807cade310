//! 16-bit block representation and bit-level operations.

use core::ops::BitXor;

use crate::error::CipherError;
use crate::tables::{Permutation, SBox};

/// Number of bits in a block.
pub const BLOCK_BITS: u8 = 16;

/// An immutable 16-bit block: plaintext, ciphertext, or intermediate state.
///
/// Bit positions are addressed big-endian and 1-based, so position 1 is the
/// most significant bit. Every transformation returns a new block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block(u16);

impl Block {
    /// Wraps a 16-bit value. The type carries the range invariant.
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw 16-bit value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Parses a block from exactly 16 characters of `0`/`1`, big-endian
    /// (leftmost character is bit 1).
    pub fn from_binary_str(text: &str) -> Result<Self, CipherError> {
        if text.len() != BLOCK_BITS as usize {
            return Err(CipherError::BinaryLength { length: text.len() });
        }
        let mut value = 0u16;
        for (column, character) in text.chars().enumerate() {
            value <<= 1;
            match character {
                '0' => {}
                '1' => value |= 1,
                _ => return Err(CipherError::BinaryDigit { character, column }),
            }
        }
        Ok(Self(value))
    }

    /// Substitutes each of the four nibbles through `sbox`, most significant
    /// nibble first, positions preserved.
    pub fn substitute(self, sbox: &SBox) -> Self {
        let mut out = 0u16;
        for shift in [12, 8, 4, 0] {
            let nibble = ((self.0 >> shift) & 0xF) as u8;
            out |= u16::from(sbox.apply(nibble)) << shift;
        }
        Self(out)
    }

    /// Undoes [`Block::substitute`] via the precomputed inverse of `sbox`.
    pub fn invert_substitute(self, sbox: &SBox) -> Self {
        let mut out = 0u16;
        for shift in [12, 8, 4, 0] {
            let nibble = ((self.0 >> shift) & 0xF) as u8;
            out |= u16::from(sbox.invert(nibble)) << shift;
        }
        Self(out)
    }

    /// Relocates each bit according to `permutation`.
    #[inline]
    pub fn permute(self, permutation: &Permutation) -> Self {
        Self(permutation.apply(self.0))
    }

    /// Undoes [`Block::permute`] via the precomputed inverse of `permutation`.
    #[inline]
    pub fn invert_permute(self, permutation: &Permutation) -> Self {
        Self(permutation.invert(self.0))
    }

    /// Reads the bit at the given 1-based big-endian position as 0 or 1.
    pub fn bit(self, position: u8) -> Result<u8, CipherError> {
        if position < 1 || position > BLOCK_BITS {
            return Err(CipherError::BitOutOfRange { position });
        }
        Ok(((self.0 >> (BLOCK_BITS - position)) & 1) as u8)
    }
}

impl From<u16> for Block {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl TryFrom<u32> for Block {
    type Error = CipherError;

    /// Checked construction from a wider integer, for parse paths that
    /// cannot rely on the `u16` type to enforce the block range.
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match u16::try_from(value) {
            Ok(narrow) => Ok(Self(narrow)),
            Err(_) => Err(CipherError::ValueOutOfRange { value }),
        }
    }
}

impl BitXor for Block {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXor<u16> for Block {
    type Output = Self;

    /// XOR with a raw 16-bit word, typically a round key.
    #[inline]
    fn bitxor(self, rhs: u16) -> Self {
        Self(self.0 ^ rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{HEYS_PERMUTATION, HEYS_SBOX};

    #[test]
    fn xor_combines_disjoint_halves() {
        let block = Block::new(0b1111_0000_0000_0000);
        assert_eq!(block ^ 0b0000_1111_1111_1111, Block::new(0xFFFF));
    }

    #[test]
    fn substitute_matches_published_vector() {
        let block = Block::new(0xABCD);
        assert_eq!(block.substitute(&HEYS_SBOX), Block::new(0x6C59));
    }

    #[test]
    fn permute_matches_published_vectors() {
        assert_eq!(
            Block::new(0b1111_0000_0000_0000).permute(&HEYS_PERMUTATION),
            Block::new(0b1000_1000_1000_1000)
        );
        assert_eq!(
            Block::new(0b0000_1111_0000_0000).permute(&HEYS_PERMUTATION),
            Block::new(0b0100_0100_0100_0100)
        );
    }

    #[test]
    fn substitute_round_trip_exhaustive() {
        for value in 0u16..=u16::MAX {
            let block = Block::new(value);
            assert_eq!(
                block.substitute(&HEYS_SBOX).invert_substitute(&HEYS_SBOX),
                block
            );
        }
    }

    #[test]
    fn permute_round_trip_exhaustive() {
        for value in 0u16..=u16::MAX {
            let block = Block::new(value);
            assert_eq!(
                block
                    .permute(&HEYS_PERMUTATION)
                    .invert_permute(&HEYS_PERMUTATION),
                block
            );
        }
    }

    #[test]
    fn bit_reads_alternating_pattern() {
        let block = Block::new(0b1010_1010_1010_1010);
        for position in 1..=16u8 {
            assert_eq!(block.bit(position).unwrap(), position % 2);
        }
    }

    #[test]
    fn bit_rejects_out_of_range_positions() {
        let block = Block::new(0);
        assert_eq!(block.bit(0), Err(CipherError::BitOutOfRange { position: 0 }));
        assert_eq!(
            block.bit(17),
            Err(CipherError::BitOutOfRange { position: 17 })
        );
    }

    #[test]
    fn try_from_rejects_wide_values() {
        assert_eq!(Block::try_from(0xFFFFu32), Ok(Block::new(0xFFFF)));
        assert_eq!(
            Block::try_from(0x1_0000u32),
            Err(CipherError::ValueOutOfRange { value: 0x1_0000 })
        );
    }

    #[test]
    fn binary_str_parses_big_endian() {
        let block = Block::from_binary_str("1010101010101010").unwrap();
        assert_eq!(block, Block::new(0b1010_1010_1010_1010));
        assert_eq!(
            Block::from_binary_str("0000000000000001").unwrap(),
            Block::new(1)
        );
    }

    #[test]
    fn binary_str_rejects_wrong_length() {
        assert_eq!(
            Block::from_binary_str("10101"),
            Err(CipherError::BinaryLength { length: 5 })
        );
        assert_eq!(
            Block::from_binary_str("10101010101010100"),
            Err(CipherError::BinaryLength { length: 17 })
        );
    }

    #[test]
    fn binary_str_rejects_non_binary_characters() {
        assert_eq!(
            Block::from_binary_str("1010101010101012"),
            Err(CipherError::BinaryDigit {
                character: '2',
                column: 15
            })
        );
    }
}
