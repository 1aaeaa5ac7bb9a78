use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Atom index {index} is out of range (atom count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Snapshot index {index} is out of range (snapshot count: {len})")]
    SnapshotOutOfRange { index: usize, len: usize },

    #[error("Snapshot holds {found} positions but the topology has {expected} atoms")]
    SnapshotLengthMismatch { expected: usize, found: usize },

    #[error("Bond ({atom_a}, {atom_b}) references an atom outside the topology (atom count: {atom_count})")]
    BondOutOfRange {
        atom_a: usize,
        atom_b: usize,
        atom_count: usize,
    },
}
