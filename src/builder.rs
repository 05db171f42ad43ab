//! Per-conformer fingerprint construction.

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use crate::encode::encode_shell;
use crate::error::FingerprintError;
use crate::fingerprint::Fingerprint;
use crate::mol::{Conformer, Molecule};
use crate::shell::extract_shell;
use crate::traits::AtomIdentity;

/// One (atom, radius) shell hash as it entered the index set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellTrace {
    pub atom: NodeIndex,
    pub radius: usize,
    pub hash: u64,
    pub index: u32,
}

/// The unfolded result of fingerprinting one conformer: the deduplicated
/// index set plus the full per-(atom, radius) trace that produced it.
///
/// The index set lives in a 2^32 universe; folding to any bit length is
/// derived purely from it, so the same build can be re-folded without
/// recomputing shells.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformerIndexSet {
    pub conformer: u32,
    pub indices: BTreeSet<u32>,
    pub trace: Vec<ShellTrace>,
}

impl ConformerIndexSet {
    pub fn fold(&self, nbits: usize) -> Fingerprint {
        Fingerprint::from_indices(&self.indices, nbits)
    }
}

// Shell hashes live in u64; the unfolded universe is 2^32 slots.
fn reduce(hash: u64) -> u32 {
    hash as u32
}

/// Extract and encode every (atom, radius) shell of one conformer.
///
/// Radii are processed independently — no cumulative hashing across radii —
/// so each radius contributes its own standalone hash.
pub fn build_conformer<A: AtomIdentity, B>(
    mol: &Molecule<A, B>,
    conformer: &Conformer,
    radii: &[usize],
    quantization: u32,
) -> Result<ConformerIndexSet, FingerprintError> {
    let mut indices = BTreeSet::new();
    let mut trace = Vec::with_capacity(mol.atom_count() * radii.len());
    for atom in mol.atoms() {
        for &radius in radii {
            let shell = extract_shell(mol, conformer, atom, radius)?;
            let hash = encode_shell(&shell, quantization);
            let index = reduce(hash);
            indices.insert(index);
            trace.push(ShellTrace {
                atom,
                radius,
                hash,
                index,
            });
        }
    }
    Ok(ConformerIndexSet {
        conformer: conformer.id(),
        indices,
        trace,
    })
}
