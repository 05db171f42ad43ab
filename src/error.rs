use std::fmt;

/// Errors produced while fingerprinting a molecule or comparing fingerprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    /// The requested center atom index is not an atom of the molecule.
    AtomOutOfRange { atom: usize, atom_count: usize },
    /// A conformer carries a coordinate count that differs from the
    /// molecule's atom count.
    ConformerMismatch {
        conformer: u32,
        expected: usize,
        got: usize,
    },
    /// A molecule was fingerprinted with zero conformers.
    NoConformers,
    /// Two bit vectors of differing lengths were combined or compared.
    LengthMismatch { left: usize, right: usize },
    /// The fingerprint configuration failed validation.
    InvalidConfig { reason: String },
    /// A folded fingerprint was re-folded to a length that does not divide
    /// its current length.
    RefoldLength { from: usize, to: usize },
}

impl fmt::Display for FingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtomOutOfRange { atom, atom_count } => {
                write!(f, "atom index {} out of range (molecule has {} atoms)", atom, atom_count)
            }
            Self::ConformerMismatch {
                conformer,
                expected,
                got,
            } => write!(
                f,
                "conformer {} has {} coordinates but molecule has {} atoms",
                conformer, got, expected
            ),
            Self::NoConformers => write!(f, "molecule has no conformers"),
            Self::LengthMismatch { left, right } => {
                write!(f, "fingerprint lengths differ: {} vs {}", left, right)
            }
            Self::InvalidConfig { reason } => write!(f, "invalid configuration: {}", reason),
            Self::RefoldLength { from, to } => {
                write!(f, "cannot re-fold {} bits into {} bits", from, to)
            }
        }
    }
}

impl std::error::Error for FingerprintError {}
