use crate::element::Element;

/// Default atom type for a molecular graph node.
///
/// `Atom` stores the intrinsic properties that make up an atom's identity
/// code — the things the shell encoder hashes. Computed per-conformer
/// properties (3D coordinates) live on [`Conformer`](crate::Conformer), not
/// here, so one atom set can be shared by many conformers.
///
/// # Examples
///
/// ```
/// use foldprint::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     formal_charge: 0,
///     isotope: 0,
///     hydrogen_count: 3,
///     is_aromatic: false,
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). Identifies the element.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units (e.g. −1 for a carboxylate oxygen).
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance (the common case).
    pub isotope: u16,
    /// Number of suppressed hydrogens on this atom.
    ///
    /// Heavy-atom-only bond graphs fold their hydrogens into this count so
    /// they still contribute to the atom's identity code.
    pub hydrogen_count: u8,
    /// Whether this atom is part of an aromatic ring.
    pub is_aromatic: bool,
}

impl Atom {
    /// Neutral, non-aromatic atom of the given element with no hydrogens.
    pub fn from_element(element: Element) -> Self {
        Atom {
            atomic_num: element.atomic_num(),
            ..Atom::default()
        }
    }
}

impl From<Element> for Atom {
    fn from(element: Element) -> Self {
        Atom::from_element(element)
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}
