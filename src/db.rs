//! In-memory collection of same-length fingerprints for screening.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;
use crate::fingerprint::{tanimoto, Fingerprint, MoleculeFingerprint};

/// A database of molecule fingerprints, all of one bit length, keyed by
/// molecule name. Names need not be unique — one molecule may contribute
/// several fingerprints (e.g. built with different radii).
///
/// Storage of the database itself is the persistence collaborator's job;
/// everything here is serde-serializable and format-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintDatabase {
    bits: usize,
    entries: Vec<MoleculeFingerprint>,
    name_to_indices: HashMap<String, Vec<usize>>,
}

impl FingerprintDatabase {
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            entries: Vec::new(),
            name_to_indices: HashMap::new(),
        }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a fingerprint. Its length must match the database's.
    pub fn add(&mut self, fp: MoleculeFingerprint) -> Result<(), FingerprintError> {
        if fp.fingerprint.nbits() != self.bits {
            return Err(FingerprintError::LengthMismatch {
                left: self.bits,
                right: fp.fingerprint.nbits(),
            });
        }
        self.name_to_indices
            .entry(fp.provenance.molecule.clone())
            .or_default()
            .push(self.entries.len());
        self.entries.push(fp);
        Ok(())
    }

    /// All fingerprints recorded under a molecule name, in insertion order.
    pub fn get(&self, name: &str) -> Vec<&MoleculeFingerprint> {
        match self.name_to_indices.get(name) {
            Some(indices) => indices.iter().map(|&i| &self.entries[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoleculeFingerprint> + '_ {
        self.entries.iter()
    }

    /// Tanimoto score of the query against every entry, in storage order.
    pub fn tanimoto_all(&self, query: &Fingerprint) -> Result<Vec<f64>, FingerprintError> {
        self.entries
            .iter()
            .map(|e| tanimoto(query, &e.fingerprint))
            .collect()
    }

    /// The `k` entries most similar to the query, best first. Score ties
    /// keep storage order.
    pub fn nearest(
        &self,
        query: &Fingerprint,
        k: usize,
    ) -> Result<Vec<(&MoleculeFingerprint, f64)>, FingerprintError> {
        let scores = self.tanimoto_all(query)?;
        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(i, score)| (&self.entries[i], score))
            .collect())
    }

    /// Re-fold every entry to a smaller length (which must divide the
    /// current one), returning a new database. Provenance fold lengths are
    /// updated to match.
    pub fn fold(&self, bits: usize) -> Result<FingerprintDatabase, FingerprintError> {
        let mut folded = FingerprintDatabase::new(bits);
        for entry in &self.entries {
            let mut fp = entry.clone();
            fp.fingerprint = entry.fingerprint.fold(bits)?;
            fp.provenance.fold_length = bits;
            folded.add(fp)?;
        }
        Ok(folded)
    }

    /// Mean bit density across all entries.
    pub fn mean_density(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.entries.iter().map(|e| e.fingerprint.density()).sum();
        sum / self.entries.len() as f64
    }
}
