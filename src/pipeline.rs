//! Whole-molecule pipeline and parallel batch fan-out.

use rayon::prelude::*;

use crate::aggregate::aggregate;
use crate::builder::build_conformer;
use crate::config::FingerprintConfig;
use crate::error::FingerprintError;
use crate::fingerprint::{MoleculeFingerprint, Provenance};
use crate::mol::Molecule;
use crate::traits::AtomIdentity;

/// Run the full pipeline for one molecule: every conformer is built and
/// folded, then the per-conformer fingerprints are aggregated under the
/// configured policy (conformers in ascending id order).
pub fn fingerprint_molecule<A: AtomIdentity, B>(
    mol: &Molecule<A, B>,
    config: &FingerprintConfig,
) -> Result<MoleculeFingerprint, FingerprintError> {
    config.validate()?;
    if mol.conformer_count() == 0 {
        return Err(FingerprintError::NoConformers);
    }

    let mut per_conformer = Vec::with_capacity(mol.conformer_count());
    for conformer in mol.conformers() {
        let built = build_conformer(mol, conformer, &config.shell_radii, config.quantization)?;
        per_conformer.push(built.fold(config.fold_length));
    }
    let fingerprint = aggregate(&per_conformer, config.aggregation)?;

    Ok(MoleculeFingerprint {
        fingerprint,
        provenance: Provenance {
            molecule: mol.name().to_string(),
            fold_length: config.fold_length,
            shell_radii: config.shell_radii.clone(),
            quantization: config.quantization,
            num_conformers: mol.conformer_count(),
            policy: config.aggregation.name().to_string(),
        },
    })
}

/// Fingerprint a batch of independent molecules in parallel.
///
/// Work fans out over rayon's pool; each worker runs one molecule's full
/// pipeline to completion. Results come back tagged with the input index and
/// in input order. One molecule's failure never aborts the rest.
pub fn fingerprint_batch<A, B>(
    molecules: &[Molecule<A, B>],
    config: &FingerprintConfig,
) -> Vec<(usize, Result<MoleculeFingerprint, FingerprintError>)>
where
    A: AtomIdentity + Sync,
    B: Sync,
{
    molecules
        .par_iter()
        .enumerate()
        .map(|(i, mol)| (i, fingerprint_molecule(mol, config)))
        .collect()
}
