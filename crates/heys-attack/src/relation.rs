//! Declarative linear approximations over plaintext and intermediate bits.

use heys_core::{Block, BLOCK_BITS, ROUNDS};

use crate::error::AttackError;

/// Where a relation term reads its bit from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitSource {
    /// The known plaintext block.
    Plaintext,
    /// The intermediate state recovered by partial decryption under a key
    /// guess.
    Intermediate,
}

/// One (source, bit-position) pair of a linear relation. Positions are
/// 1-based and big-endian, as in [`Block::bit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
    /// Which block the bit is drawn from.
    pub source: BitSource,
    /// 1-based big-endian bit position.
    pub position: u8,
}

impl Term {
    /// A term over a plaintext bit.
    pub const fn plaintext(position: u8) -> Self {
        Self {
            source: BitSource::Plaintext,
            position,
        }
    }

    /// A term over an intermediate-state bit.
    pub const fn intermediate(position: u8) -> Self {
        Self {
            source: BitSource::Intermediate,
            position,
        }
    }
}

/// A conjectured linear relationship: the XOR-sum of the selected bits is
/// expected to be zero with probability different from 1/2.
///
/// The relation also declares the partial-decryption depth its intermediate
/// bits are defined over, so the checker always evaluates it at the right
/// pipeline stage. All fields are validated at construction; evaluation
/// never fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearRelation {
    terms: Vec<Term>,
    depth: usize,
}

impl LinearRelation {
    /// Builds a relation from its terms and intended inversion depth.
    pub fn new(terms: Vec<Term>, depth: usize) -> Result<Self, AttackError> {
        if terms.is_empty() {
            return Err(AttackError::EmptyRelation);
        }
        for term in &terms {
            if term.position < 1 || term.position > BLOCK_BITS {
                return Err(AttackError::BitOutOfRange {
                    position: term.position,
                });
            }
        }
        if depth < 1 || depth > ROUNDS {
            return Err(AttackError::DepthOutOfRange { depth });
        }
        Ok(Self { terms, depth })
    }

    /// The relation from section 3.4 of Heys' tutorial:
    ///
    /// `P[5] + P[7] + P[8] + U4[6] + U4[8] + U4[14] + U4[16] = 0 (mod 2)`
    ///
    /// with a theoretical bias of 1/32 by the piling-up lemma.
    pub fn heys_tutorial() -> Self {
        Self {
            terms: vec![
                Term::plaintext(5),
                Term::plaintext(7),
                Term::plaintext(8),
                Term::intermediate(6),
                Term::intermediate(8),
                Term::intermediate(14),
                Term::intermediate(16),
            ],
            depth: 1,
        }
    }

    /// A relation touching one bit in each last-round S-box:
    ///
    /// `P[1] + P[4] + P[9] + P[12] + U4[2] + U4[6] + U4[10] + U4[14] = 0 (mod 2)`
    pub fn four_sbox() -> Self {
        Self {
            terms: vec![
                Term::plaintext(1),
                Term::plaintext(4),
                Term::plaintext(9),
                Term::plaintext(12),
                Term::intermediate(2),
                Term::intermediate(6),
                Term::intermediate(10),
                Term::intermediate(14),
            ],
            depth: 1,
        }
    }

    /// The relation's terms, in declaration order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of substitution layers to peel before reading intermediate bits.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true iff the XOR-sum of the selected bits is zero.
    pub fn holds(&self, plaintext: Block, intermediate: Block) -> bool {
        let mut sum = 0u32;
        for term in &self.terms {
            let block = match term.source {
                BitSource::Plaintext => plaintext,
                BitSource::Intermediate => intermediate,
            };
            let bit = block
                .bit(term.position)
                .expect("term positions validated at construction");
            sum += u32::from(bit);
        }
        sum % 2 == 0
    }
}
