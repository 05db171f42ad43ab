use std::hash::{Hash, Hasher};

use crate::shell::{Shell, ShellMember};
use crate::traits::AtomIdentity;

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x100000001b3);
        }
    }
}

/// Invariant identity code of an atom payload: a hash of its intrinsic
/// properties, independent of the atom's position in the graph or in space.
pub fn identity_code<A: AtomIdentity>(atom: &A) -> u64 {
    let mut h = Fnv1aHasher::new();
    atom.atomic_num().hash(&mut h);
    atom.formal_charge().hash(&mut h);
    atom.isotope().hash(&mut h);
    atom.hydrogen_count().hash(&mut h);
    atom.is_aromatic().hash(&mut h);
    h.finish()
}

/// Snap a length to the configured decimal precision. Distances closer than
/// half a quantum collapse to the same value, which is what absorbs
/// floating-point jitter.
fn quantize(x: f64, quantization: u32) -> i64 {
    (x * 10f64.powi(quantization as i32)).round() as i64
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn member_distance(a: &ShellMember, b: &ShellMember) -> f64 {
    norm([
        a.offset[0] - b.offset[0],
        a.offset[1] - b.offset[1],
        a.offset[2] - b.offset[2],
    ])
}

// Sentinel hashed in place of a reference distance when the shell is too
// small (or too degenerate) to supply that reference.
const NO_REF: i64 = i64::MIN;

/// Pick the two symmetry-breaking reference members: the two farthest from
/// the center. Ties resolve by identity code, then by distance to the first
/// reference, then by atom index, so the choice is deterministic for a given
/// molecule regardless of member list order.
fn reference_members<'a>(
    members: &'a [ShellMember],
    center_dists: &[i64],
    quantization: u32,
) -> (Option<&'a ShellMember>, Option<&'a ShellMember>) {
    let eligible: Vec<usize> = (0..members.len())
        .filter(|&i| center_dists[i] > 0)
        .collect();
    let first = eligible
        .iter()
        .copied()
        .max_by_key(|&i| (center_dists[i], members[i].identity, members[i].atom.index()));
    let first = match first {
        Some(i) => i,
        None => return (None, None),
    };
    let second = eligible
        .iter()
        .copied()
        .filter(|&i| i != first)
        .max_by_key(|&i| {
            (
                center_dists[i],
                members[i].identity,
                quantize(member_distance(&members[i], &members[first]), quantization),
                members[i].atom.index(),
            )
        });
    (Some(&members[first]), second.map(|i| &members[i]))
}

fn mix(h: u64, v: u64) -> u64 {
    (h ^ v).rotate_left(23).wrapping_mul(0x9e3779b97f4a7c15)
}

/// Encode one shell into its hash.
///
/// The hash is invariant to the order members are listed, to rigid rotation
/// or reflection of the conformer, and to coordinate jitter below the
/// quantization step. Per-member sub-hashes combine the member's identity
/// code, its bond distance, and a quantized geometric signature (distance to
/// the center plus distances to the two reference members); sub-hashes are
/// sorted before the order-sensitive final mix, which is what yields
/// input-order invariance.
///
/// Members coincident with the center quantize to a zero signature and are
/// hashed from identity and bond distance alone; this is the degenerate
/// fallback, logged at warn level, never an error.
pub fn encode_shell(shell: &Shell, quantization: u32) -> u64 {
    let center_dists: Vec<i64> = shell
        .members
        .iter()
        .map(|m| quantize(norm(m.offset), quantization))
        .collect();
    let (ref1, ref2) = reference_members(&shell.members, &center_dists, quantization);

    let mut sub_hashes: Vec<u64> = Vec::with_capacity(shell.members.len());
    for (member, &center_dist) in shell.members.iter().zip(&center_dists) {
        let mut h = Fnv1aHasher::new();
        member.identity.hash(&mut h);
        (member.bond_distance as u64).hash(&mut h);
        if center_dist > 0 {
            center_dist.hash(&mut h);
            ref_dist(member, ref1, quantization).hash(&mut h);
            ref_dist(member, ref2, quantization).hash(&mut h);
        } else {
            log::warn!(
                "atom {} coincides with shell center {}; hashing identity only",
                member.atom.index(),
                shell.center.index()
            );
            NO_REF.hash(&mut h);
        }
        sub_hashes.push(h.finish());
    }
    sub_hashes.sort_unstable();

    let mut seed = Fnv1aHasher::new();
    shell.center_identity.hash(&mut seed);
    (shell.radius as u64).hash(&mut seed);
    sub_hashes.iter().fold(seed.finish(), |h, &s| mix(h, s))
}

fn ref_dist(member: &ShellMember, reference: Option<&ShellMember>, quantization: u32) -> i64 {
    match reference {
        Some(r) if r.atom != member.atom => quantize(member_distance(member, r), quantization),
        // Distance to itself carries no signal; a fixed marker keeps the
        // reference member's own sub-hash stable.
        Some(_) => 0,
        None => NO_REF,
    }
}
