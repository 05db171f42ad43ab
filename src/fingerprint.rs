//! Folded fingerprint representation and similarity.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

/// A fixed-length bit vector fingerprint.
///
/// Identity is the bit content plus the bit length — two fingerprints
/// compare equal iff they have the same length and the same set bits,
/// regardless of how they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    bits: Vec<u64>,
    nbits: usize,
}

impl Fingerprint {
    /// All-zero fingerprint of the given length.
    pub fn new(nbits: usize) -> Self {
        let nwords = nbits.div_ceil(64);
        Fingerprint {
            bits: vec![0u64; nwords],
            nbits,
        }
    }

    /// Fold an unfolded index set into a bit vector: bit `i mod nbits` is
    /// set for every index `i`. Deterministic and idempotent — the same set
    /// and length always produce the same bits.
    pub fn from_indices(indices: &BTreeSet<u32>, nbits: usize) -> Self {
        let mut fp = Fingerprint::new(nbits);
        for &i in indices {
            fp.set_bit(i as usize % nbits);
        }
        fp
    }

    pub fn set_bit(&mut self, pos: usize) {
        let pos = pos % self.nbits;
        self.bits[pos / 64] |= 1u64 << (pos % 64);
    }

    pub fn get_bit(&self, pos: usize) -> bool {
        let pos = pos % self.nbits;
        (self.bits[pos / 64] >> (pos % 64)) & 1 == 1
    }

    pub fn count_ones(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Fraction of bits set.
    pub fn density(&self) -> f64 {
        if self.nbits == 0 {
            return 0.0;
        }
        self.count_ones() as f64 / self.nbits as f64
    }

    /// Indices of all set bits, ascending.
    pub fn set_bits(&self) -> Vec<usize> {
        (0..self.nbits).filter(|&i| self.get_bit(i)).collect()
    }

    /// Bit-wise OR with another fingerprint of the same length.
    pub fn union_with(&mut self, other: &Fingerprint) -> Result<(), FingerprintError> {
        if self.nbits != other.nbits {
            return Err(FingerprintError::LengthMismatch {
                left: self.nbits,
                right: other.nbits,
            });
        }
        for (w, o) in self.bits.iter_mut().zip(&other.bits) {
            *w |= o;
        }
        Ok(())
    }

    /// Re-fold an already-folded fingerprint down to `nbits`, which must
    /// evenly divide the current length: segments of the bit vector are
    /// OR-ed together. Folding from the original unfolded index set and
    /// re-folding a folded vector agree whenever both lengths divide 2^32.
    pub fn fold(&self, nbits: usize) -> Result<Fingerprint, FingerprintError> {
        if nbits == 0 || self.nbits % nbits != 0 {
            return Err(FingerprintError::RefoldLength {
                from: self.nbits,
                to: nbits,
            });
        }
        let mut folded = Fingerprint::new(nbits);
        for i in 0..self.nbits {
            if self.get_bit(i) {
                folded.set_bit(i % nbits);
            }
        }
        Ok(folded)
    }
}

/// Tanimoto (Jaccard) similarity: shared set bits over total set bits.
///
/// In [0, 1]; 1.0 for identical fingerprints, including two empty ones.
/// Comparing fingerprints of different lengths is an error.
pub fn tanimoto(a: &Fingerprint, b: &Fingerprint) -> Result<f64, FingerprintError> {
    if a.nbits != b.nbits {
        return Err(FingerprintError::LengthMismatch {
            left: a.nbits,
            right: b.nbits,
        });
    }
    let mut and_count = 0u32;
    let mut or_count = 0u32;
    for (x, y) in a.bits.iter().zip(&b.bits) {
        and_count += (x & y).count_ones();
        or_count += (x | y).count_ones();
    }
    if or_count == 0 {
        return Ok(1.0);
    }
    Ok(and_count as f64 / or_count as f64)
}

/// How a molecule fingerprint was produced. Informational only — identity
/// and similarity are defined over the bit content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub molecule: String,
    pub fold_length: usize,
    pub shell_radii: Vec<usize>,
    pub quantization: u32,
    pub num_conformers: usize,
    pub policy: String,
}

/// The aggregate fingerprint of one molecule, with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoleculeFingerprint {
    pub fingerprint: Fingerprint,
    pub provenance: Provenance,
}

impl PartialEq for MoleculeFingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for MoleculeFingerprint {}

impl Hash for MoleculeFingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}
