use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;
use crate::fingerprint::Fingerprint;

/// How per-conformer fingerprints combine into one molecule fingerprint.
///
/// A closed set — the domain fixes these three policies, so this is a plain
/// enum rather than any open-ended dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "policy")]
pub enum AggregationPolicy {
    /// Only the first conformer (lowest id). Fastest, least robust.
    First,
    /// Bit-wise OR across all conformers. Most permissive.
    Union,
    /// Set bits whose per-conformer frequency reaches `threshold`.
    /// Frequencies exactly at the threshold count as set.
    MeanThreshold { threshold: f64 },
}

impl AggregationPolicy {
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    pub fn mean_threshold() -> Self {
        AggregationPolicy::MeanThreshold {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Policy name recorded in fingerprint provenance.
    pub fn name(&self) -> &'static str {
        match self {
            AggregationPolicy::First => "first",
            AggregationPolicy::Union => "union",
            AggregationPolicy::MeanThreshold { .. } => "mean-then-threshold",
        }
    }
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        AggregationPolicy::Union
    }
}

/// Combine per-conformer fingerprints, which the caller supplies in
/// ascending conformer-id order. Deterministic for all policies given that
/// order. Zero conformers is an error.
pub fn aggregate(
    fingerprints: &[Fingerprint],
    policy: AggregationPolicy,
) -> Result<Fingerprint, FingerprintError> {
    let first = match fingerprints.first() {
        Some(fp) => fp,
        None => return Err(FingerprintError::NoConformers),
    };
    for fp in &fingerprints[1..] {
        if fp.nbits() != first.nbits() {
            return Err(FingerprintError::LengthMismatch {
                left: first.nbits(),
                right: fp.nbits(),
            });
        }
    }

    match policy {
        AggregationPolicy::First => Ok(first.clone()),
        AggregationPolicy::Union => {
            let mut out = first.clone();
            for fp in &fingerprints[1..] {
                out.union_with(fp)?;
            }
            Ok(out)
        }
        AggregationPolicy::MeanThreshold { threshold } => {
            let nbits = first.nbits();
            let total = fingerprints.len() as f64;
            let mut out = Fingerprint::new(nbits);
            for bit in 0..nbits {
                let count = fingerprints.iter().filter(|fp| fp.get_bit(bit)).count();
                if count as f64 / total >= threshold {
                    out.set_bit(bit);
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn fp(indices: &[u32], nbits: usize) -> Fingerprint {
        let set: BTreeSet<u32> = indices.iter().copied().collect();
        Fingerprint::from_indices(&set, nbits)
    }

    #[test]
    fn first_takes_only_the_first() {
        let fps = vec![fp(&[1], 64), fp(&[2], 64), fp(&[3], 64)];
        let out = aggregate(&fps, AggregationPolicy::First).unwrap();
        assert_eq!(out, fps[0]);
    }

    #[test]
    fn union_sets_every_bit_seen() {
        let fps = vec![fp(&[1], 64), fp(&[2], 64), fp(&[1, 3], 64)];
        let out = aggregate(&fps, AggregationPolicy::Union).unwrap();
        assert_eq!(out.set_bits(), vec![1, 2, 3]);
    }

    #[test]
    fn mean_threshold_majority() {
        // bit 1 in 3/4, bit 2 in 2/4, bit 3 in 1/4
        let fps = vec![
            fp(&[1, 2], 64),
            fp(&[1, 2], 64),
            fp(&[1, 3], 64),
            fp(&[], 64),
        ];
        let out = aggregate(&fps, AggregationPolicy::mean_threshold()).unwrap();
        // 2/4 == 0.5 ties at the threshold and resolves to set.
        assert_eq!(out.set_bits(), vec![1, 2]);
    }

    #[test]
    fn mean_threshold_strict() {
        let fps = vec![fp(&[1, 2], 64), fp(&[1], 64)];
        let out = aggregate(
            &fps,
            AggregationPolicy::MeanThreshold { threshold: 0.75 },
        )
        .unwrap();
        assert_eq!(out.set_bits(), vec![1]);
    }

    #[test]
    fn zero_conformers_is_an_error() {
        let err = aggregate(&[], AggregationPolicy::Union).unwrap_err();
        assert_eq!(err, FingerprintError::NoConformers);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let fps = vec![fp(&[1], 64), fp(&[1], 128)];
        assert!(matches!(
            aggregate(&fps, AggregationPolicy::Union),
            Err(FingerprintError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn single_conformer_all_policies_agree() {
        let fps = vec![fp(&[4, 9], 64)];
        for policy in [
            AggregationPolicy::First,
            AggregationPolicy::Union,
            AggregationPolicy::mean_threshold(),
        ] {
            assert_eq!(aggregate(&fps, policy).unwrap(), fps[0]);
        }
    }

    #[test]
    fn policy_serde_names() {
        let json = serde_json::to_string(&AggregationPolicy::mean_threshold()).unwrap();
        assert!(json.contains("mean-threshold") || json.contains("threshold"));
        let back: AggregationPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AggregationPolicy::mean_threshold());
    }
}
