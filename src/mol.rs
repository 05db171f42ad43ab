use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::FingerprintError;

/// One 3D spatial arrangement of a molecule's atoms.
///
/// Owned exclusively by its [`Molecule`]; the id is unique within that
/// molecule. `coords[i]` is `[x, y, z]` for the atom at graph index `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    id: u32,
    coords: Vec<[f64; 3]>,
}

impl Conformer {
    pub(crate) fn new(id: u32, coords: Vec<[f64; 3]>) -> Self {
        Self { id, coords }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn position(&self, idx: NodeIndex) -> [f64; 3] {
        self.coords[idx.index()]
    }

    /// Euclidean distance between two atoms.
    pub fn distance(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        let p = self.coords[a.index()];
        let q = self.coords[b.index()];
        let dx = p[0] - q[0];
        let dy = p[1] - q[1];
        let dz = p[2] - q[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Geometric centroid of all atoms.
    pub fn centroid(&self) -> [f64; 3] {
        if self.coords.is_empty() {
            return [0.0; 3];
        }
        let n = self.coords.len() as f64;
        let mut c = [0.0; 3];
        for p in &self.coords {
            c[0] += p[0];
            c[1] += p[1];
            c[2] += p[2];
        }
        [c[0] / n, c[1] / n, c[2] / n]
    }
}

/// A molecule: a named bond graph plus zero or more conformers.
///
/// The bond graph is shared by all conformers; only coordinates vary between
/// them. Atom and bond payload types are generic — the fingerprinting
/// pipeline reads atom properties through the `Has*` traits so wrapper
/// payloads compose.
pub struct Molecule<A, B> {
    name: String,
    graph: UnGraph<A, B>,
    conformers: Vec<Conformer>,
    next_conformer_id: u32,
}

impl<A, B> Molecule<A, B> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: UnGraph::default(),
            conformers: Vec::new(),
            next_conformer_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Attach a conformer with one coordinate per atom. Returns the assigned
    /// conformer id (sequential, ascending in insertion order).
    pub fn add_conformer(&mut self, coords: Vec<[f64; 3]>) -> Result<u32, FingerprintError> {
        if coords.len() != self.atom_count() {
            return Err(FingerprintError::ConformerMismatch {
                conformer: self.next_conformer_id,
                expected: self.atom_count(),
                got: coords.len(),
            });
        }
        let id = self.next_conformer_id;
        self.next_conformer_id += 1;
        self.conformers.push(Conformer::new(id, coords));
        Ok(id)
    }

    /// Conformers in ascending id order.
    pub fn conformers(&self) -> &[Conformer] {
        &self.conformers
    }

    pub fn conformer(&self, id: u32) -> Option<&Conformer> {
        self.conformers.iter().find(|c| c.id() == id)
    }

    pub fn conformer_count(&self) -> usize {
        self.conformers.len()
    }
}

impl<A: Clone, B: Clone> Clone for Molecule<A, B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            graph: self.graph.clone(),
            conformers: self.conformers.clone(),
            next_conformer_id: self.next_conformer_id,
        }
    }
}

impl<A, B> Default for Molecule<A, B> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Molecule<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Molecule")
            .field("name", &self.name)
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("conformer_count", &self.conformer_count())
            .finish()
    }
}
