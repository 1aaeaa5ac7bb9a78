use super::error::ModelError;
use nalgebra::{Point3, Vector3};

/// One time-sample of every atom position of a trajectory.
///
/// Positions are index-aligned with the atoms of the owning topology; the
/// trajectory enforces that both have the same length when the snapshot is
/// appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    positions: Vec<Point3<f64>>,
}

impl Snapshot {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    /// Returns the position of the atom at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] if `index` is not smaller than
    /// the number of positions.
    pub fn position(&self, index: usize) -> Result<&Point3<f64>, ModelError> {
        self.positions.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.positions.len(),
        })
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn push(&mut self, position: Point3<f64>) {
        self.positions.push(position);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns a copy of this snapshot with the atoms at `indices` shifted by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] if any index is out of range.
    pub fn translated(&self, indices: &[usize], offset: &Vector3<f64>) -> Result<Self, ModelError> {
        let mut positions = self.positions.clone();
        let len = positions.len();
        for &index in indices {
            let position = positions
                .get_mut(index)
                .ok_or(ModelError::IndexOutOfRange { index, len })?;
            *position += *offset;
        }
        Ok(Self { positions })
    }
}

impl FromIterator<Point3<f64>> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
