use std::collections::BTreeSet;

use foldprint::{
    aggregate, build_conformer, extract_shell, fingerprint_molecule, tanimoto, AggregationPolicy,
    Atom, Bond, Element, FingerprintConfig, Molecule,
};
use petgraph::graph::NodeIndex;

fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

fn diatomic(second: Element) -> Molecule<Atom, Bond> {
    let mut mol = Molecule::new("ab");
    let a = mol.add_atom(Atom::from_element(Element::C));
    let b = mol.add_atom(Atom::from_element(second));
    mol.add_bond(a, b, Bond::default());
    mol.add_conformer(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
    mol
}

#[test]
fn diatomic_radius_zero_depends_only_on_center_identity() {
    let config = FingerprintConfig {
        shell_radii: vec![0, 1],
        ..Default::default()
    };
    let co = diatomic(Element::O);
    let cn = diatomic(Element::N);
    let trace_co = build_conformer(&co, &co.conformers()[0], &config.shell_radii, config.quantization)
        .unwrap()
        .trace;
    let trace_cn = build_conformer(&cn, &cn.conformers()[0], &config.shell_radii, config.quantization)
        .unwrap()
        .trace;

    let r0_hash = |trace: &[foldprint::ShellTrace]| {
        trace
            .iter()
            .find(|t| t.atom == n(0) && t.radius == 0)
            .unwrap()
            .hash
    };
    // Swapping B's element leaves A's radius-0 hash untouched...
    assert_eq!(r0_hash(&trace_co), r0_hash(&trace_cn));

    // ...but changes A's radius-1 hash, which covers B.
    let r1_hash = |trace: &[foldprint::ShellTrace]| {
        trace
            .iter()
            .find(|t| t.atom == n(0) && t.radius == 1)
            .unwrap()
            .hash
    };
    assert_ne!(r1_hash(&trace_co), r1_hash(&trace_cn));
}

#[test]
fn diatomic_radius_one_covers_the_neighbor() {
    let mol = diatomic(Element::O);
    let shell = extract_shell(&mol, &mol.conformers()[0], n(0), 1).unwrap();
    assert_eq!(shell.members.len(), 1);
    assert_eq!(shell.members[0].atom, n(1));
    assert_eq!(shell.members[0].offset, [1.0, 0.0, 0.0]);
}

#[test]
fn diatomic_survives_rotation_about_its_axis() {
    let config = FingerprintConfig {
        shell_radii: vec![0, 1],
        ..Default::default()
    };
    let mol = diatomic(Element::O);
    let reference = fingerprint_molecule(&mol, &config).unwrap();

    // 180° about the A–B (x) axis.
    let mut rotated = Molecule::new("ab");
    let a = rotated.add_atom(Atom::from_element(Element::C));
    let b = rotated.add_atom(Atom::from_element(Element::O));
    rotated.add_bond(a, b, Bond::default());
    rotated
        .add_conformer(vec![[0.0, 0.0, 0.0], [1.0, -0.0, -0.0]])
        .unwrap();
    assert_eq!(fingerprint_molecule(&rotated, &config).unwrap(), reference);
}

#[test]
fn diatomic_sets_exactly_the_traced_bits() {
    let config = FingerprintConfig {
        shell_radii: vec![0, 1],
        fold_length: 1024,
        ..Default::default()
    };
    let mol = diatomic(Element::O);
    let built = build_conformer(&mol, &mol.conformers()[0], &config.shell_radii, config.quantization)
        .unwrap();

    // Two atoms at two radii each, up to fold collisions.
    assert_eq!(built.trace.len(), 4);
    let expected: BTreeSet<usize> = built
        .trace
        .iter()
        .map(|t| t.index as usize % 1024)
        .collect();

    let fp = fingerprint_molecule(&mol, &config).unwrap();
    let set: BTreeSet<usize> = fp.fingerprint.set_bits().into_iter().collect();
    assert_eq!(set, expected);
}

#[test]
fn union_over_three_conformers_is_exactly_the_bit_union() {
    let mut mol = Molecule::new("flexible");
    let c0 = mol.add_atom(Atom::from_element(Element::C));
    let c1 = mol.add_atom(Atom::from_element(Element::C));
    let o2 = mol.add_atom(Atom::from_element(Element::O));
    mol.add_bond(c0, c1, Bond::default());
    mol.add_bond(c1, o2, Bond::default());
    mol.add_conformer(vec![[0.0; 3], [1.5, 0.0, 0.0], [2.1, 1.3, 0.0]]).unwrap();
    mol.add_conformer(vec![[0.0; 3], [1.5, 0.0, 0.0], [2.9, 0.4, 0.3]]).unwrap();
    mol.add_conformer(vec![[0.0; 3], [1.5, 0.0, 0.0], [1.8, -1.2, 0.7]]).unwrap();

    let config = FingerprintConfig {
        aggregation: AggregationPolicy::Union,
        ..Default::default()
    };
    let combined = fingerprint_molecule(&mol, &config).unwrap();

    let mut expected: BTreeSet<usize> = BTreeSet::new();
    for conformer in mol.conformers() {
        let built =
            build_conformer(&mol, conformer, &config.shell_radii, config.quantization).unwrap();
        expected.extend(built.fold(config.fold_length).set_bits());
    }
    let got: BTreeSet<usize> = combined.fingerprint.set_bits().into_iter().collect();
    assert_eq!(got, expected);
}

#[test]
fn aggregation_is_deterministic_for_every_policy() {
    let mut mol = Molecule::new("flexible");
    let c0 = mol.add_atom(Atom::from_element(Element::C));
    let o1 = mol.add_atom(Atom::from_element(Element::O));
    mol.add_bond(c0, o1, Bond::default());
    mol.add_conformer(vec![[0.0; 3], [1.2, 0.0, 0.0]]).unwrap();
    mol.add_conformer(vec![[0.0; 3], [1.4, 0.1, 0.0]]).unwrap();
    mol.add_conformer(vec![[0.0; 3], [1.3, -0.2, 0.2]]).unwrap();

    for policy in [
        AggregationPolicy::First,
        AggregationPolicy::Union,
        AggregationPolicy::mean_threshold(),
    ] {
        let config = FingerprintConfig {
            aggregation: policy,
            ..Default::default()
        };
        let a = fingerprint_molecule(&mol, &config).unwrap();
        let b = fingerprint_molecule(&mol, &config).unwrap();
        assert_eq!(a, b, "policy {}", policy.name());
    }
}

#[test]
fn first_policy_equals_first_conformer() {
    let mut mol = Molecule::new("flexible");
    let c0 = mol.add_atom(Atom::from_element(Element::C));
    let o1 = mol.add_atom(Atom::from_element(Element::O));
    mol.add_bond(c0, o1, Bond::default());
    mol.add_conformer(vec![[0.0; 3], [1.2, 0.0, 0.0]]).unwrap();
    mol.add_conformer(vec![[0.0; 3], [2.4, 0.3, 0.0]]).unwrap();

    let config = FingerprintConfig {
        aggregation: AggregationPolicy::First,
        ..Default::default()
    };
    let fp = fingerprint_molecule(&mol, &config).unwrap();
    let first = build_conformer(&mol, &mol.conformers()[0], &config.shell_radii, config.quantization)
        .unwrap()
        .fold(config.fold_length);
    assert_eq!(fp.fingerprint, first);

    // The aggregate entry point agrees.
    let second = build_conformer(&mol, &mol.conformers()[1], &config.shell_radii, config.quantization)
        .unwrap()
        .fold(config.fold_length);
    let agg = aggregate(&[first.clone(), second], AggregationPolicy::First).unwrap();
    assert_eq!(agg, first);
}

#[test]
fn comparing_different_fold_lengths_fails() {
    let mol = diatomic(Element::O);
    let narrow = fingerprint_molecule(
        &mol,
        &FingerprintConfig {
            fold_length: 1024,
            ..Default::default()
        },
    )
    .unwrap();
    let wide = fingerprint_molecule(
        &mol,
        &FingerprintConfig {
            fold_length: 2048,
            ..Default::default()
        },
    )
    .unwrap();

    let err = tanimoto(&narrow.fingerprint, &wide.fingerprint).unwrap_err();
    assert_eq!(
        err,
        foldprint::FingerprintError::LengthMismatch {
            left: 1024,
            right: 2048,
        }
    );
}

#[test]
fn similarity_stays_within_bounds() {
    let config = FingerprintConfig::default();
    let co = fingerprint_molecule(&diatomic(Element::O), &config).unwrap();
    let cn = fingerprint_molecule(&diatomic(Element::N), &config).unwrap();

    let self_sim = tanimoto(&co.fingerprint, &co.fingerprint).unwrap();
    assert_eq!(self_sim, 1.0);

    let cross = tanimoto(&co.fingerprint, &cn.fingerprint).unwrap();
    assert!((0.0..=1.0).contains(&cross));
    // C's radius-0 shell is shared; B's shells differ.
    assert!(cross > 0.0);
    assert!(cross < 1.0);
}
