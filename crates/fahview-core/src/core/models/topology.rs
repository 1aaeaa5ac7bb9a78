use super::atom::Atom;
use super::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom_a: usize, // Index of the first atom in the topology
    pub atom_b: usize, // Index of the second atom in the topology
}

impl Bond {
    pub fn new(atom_a: usize, atom_b: usize) -> Self {
        Self { atom_a, atom_b }
    }
}

/// The fixed structure of a simulated molecule: its atoms and the bonds between them.
///
/// Atom order is significant. An atom's index in [`Topology::atoms`] is its
/// identity, and every snapshot of the owning trajectory lists positions in
/// the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Topology {
    /// Builds a topology, checking that every bond refers to an existing atom.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BondOutOfRange`] for the first bond with an index
    /// not smaller than the atom count.
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self, ModelError> {
        let atom_count = atoms.len();
        if let Some(bond) = bonds
            .iter()
            .find(|b| b.atom_a >= atom_count || b.atom_b >= atom_count)
        {
            return Err(ModelError::BondOutOfRange {
                atom_a: bond.atom_a,
                atom_b: bond.atom_b,
                atom_count,
            });
        }
        Ok(Self { atoms, bonds })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom(&self, index: usize) -> Result<&Atom, ModelError> {
        self.atoms.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.atoms.len(),
        })
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}
