use serde::{Deserialize, Serialize};

use crate::aggregate::AggregationPolicy;
use crate::error::FingerprintError;

/// Configuration surface of the fingerprinting pipeline. Immutable once the
/// pipeline runs; shared by reference across workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    /// Topological shell radii, strictly ascending. Each radius yields its
    /// own standalone shell per atom.
    pub shell_radii: Vec<usize>,
    /// Folded bit-vector length. Power of two recommended so database-level
    /// re-folding stays available.
    pub fold_length: usize,
    /// Decimal places kept when quantizing distances. Part of a
    /// fingerprint's provenance: fingerprints are only comparable when built
    /// with matching precision and radii.
    pub quantization: u32,
    pub aggregation: AggregationPolicy,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            shell_radii: vec![0, 1, 2, 3],
            fold_length: 1024,
            quantization: 3,
            aggregation: AggregationPolicy::default(),
        }
    }
}

impl FingerprintConfig {
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.fold_length == 0 {
            return Err(invalid("fold_length must be at least 1"));
        }
        if self.shell_radii.is_empty() {
            return Err(invalid("shell_radii must not be empty"));
        }
        if self.shell_radii.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("shell_radii must be strictly ascending"));
        }
        if self.quantization == 0 {
            return Err(invalid("quantization must be at least one decimal place"));
        }
        // Beyond ~12 places the i64 quantization grid overflows for
        // angstrom-scale coordinates.
        if self.quantization > 12 {
            return Err(invalid("quantization above 12 decimal places is not supported"));
        }
        if let AggregationPolicy::MeanThreshold { threshold } = self.aggregation {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(invalid("mean-then-threshold threshold must be within [0, 1]"));
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> FingerprintError {
    FingerprintError::InvalidConfig {
        reason: reason.to_string(),
    }
}
