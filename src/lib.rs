pub mod aggregate;
pub mod atom;
pub mod bond;
pub mod builder;
pub mod config;
pub mod db;
pub mod element;
pub mod encode;
pub mod error;
pub mod fingerprint;
pub mod mol;
pub mod pipeline;
pub mod shell;
pub mod traits;

pub use aggregate::{aggregate, AggregationPolicy};
pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use builder::{build_conformer, ConformerIndexSet, ShellTrace};
pub use config::FingerprintConfig;
pub use db::FingerprintDatabase;
pub use element::Element;
pub use encode::{encode_shell, identity_code};
pub use error::FingerprintError;
pub use fingerprint::{tanimoto, Fingerprint, MoleculeFingerprint, Provenance};
pub use mol::{Conformer, Molecule};
pub use pipeline::{fingerprint_batch, fingerprint_molecule};
pub use shell::{extract_shell, Shell, ShellMember};
pub use traits::{
    AtomIdentity, HasAromaticity, HasAtomicNum, HasFormalCharge, HasHydrogenCount, HasIsotope,
};
