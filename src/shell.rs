use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::encode::identity_code;
use crate::error::FingerprintError;
use crate::mol::{Conformer, Molecule};
use crate::traits::AtomIdentity;

/// One atom of a shell, annotated with the bond distance at which it was
/// first reached and its position relative to the shell's center.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellMember {
    pub atom: NodeIndex,
    pub bond_distance: usize,
    pub offset: [f64; 3],
    pub identity: u64,
}

/// The atom environment of one (conformer, center, radius) triple: all atoms
/// within `radius` bonds of the center, with center-relative geometry.
///
/// Ephemeral — extracted, encoded, and discarded per shell. The center atom
/// itself is carried separately from the members, so a radius-0 shell has an
/// empty member list.
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
    pub center: NodeIndex,
    pub radius: usize,
    pub center_identity: u64,
    pub members: Vec<ShellMember>,
}

/// Collect the shell around `center` at the given topological radius.
///
/// Members are found by breadth-first traversal of the bond graph, so each
/// one records its shortest bond distance from the center. Positions are
/// expressed relative to the center atom, making shell geometry
/// translation-invariant by construction. Members are listed in ascending
/// atom-index order; the encoder does not depend on this order.
pub fn extract_shell<A: AtomIdentity, B>(
    mol: &Molecule<A, B>,
    conformer: &Conformer,
    center: NodeIndex,
    radius: usize,
) -> Result<Shell, FingerprintError> {
    let n = mol.atom_count();
    if center.index() >= n {
        return Err(FingerprintError::AtomOutOfRange {
            atom: center.index(),
            atom_count: n,
        });
    }
    if conformer.len() != n {
        return Err(FingerprintError::ConformerMismatch {
            conformer: conformer.id(),
            expected: n,
            got: conformer.len(),
        });
    }

    let center_pos = conformer.position(center);

    // BFS, depth-bounded. First reach is the shortest bond distance.
    let mut dist = vec![usize::MAX; n];
    dist[center.index()] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(center);
    while let Some(current) = queue.pop_front() {
        let d = dist[current.index()];
        if d == radius {
            continue;
        }
        for neighbor in mol.neighbors(current) {
            if dist[neighbor.index()] == usize::MAX {
                dist[neighbor.index()] = d + 1;
                queue.push_back(neighbor);
            }
        }
    }

    let mut members = Vec::new();
    for atom in mol.atoms() {
        let d = dist[atom.index()];
        if atom == center || d == usize::MAX {
            continue;
        }
        let pos = conformer.position(atom);
        members.push(ShellMember {
            atom,
            bond_distance: d,
            offset: [
                pos[0] - center_pos[0],
                pos[1] - center_pos[1],
                pos[2] - center_pos[2],
            ],
            identity: identity_code(mol.atom(atom)),
        });
    }

    Ok(Shell {
        center,
        radius,
        center_identity: identity_code(mol.atom(center)),
        members,
    })
}
