use super::bounds::BoundingBox;
use super::error::ModelError;
use super::snapshot::Snapshot;
use super::topology::Topology;

/// A topology together with its time-ordered snapshots.
///
/// The trajectory exclusively owns its topology. Snapshots can only be
/// appended, and each one must list exactly one position per atom. Snapshot 0
/// is the reference frame used by the clustering analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    topology: Topology,
    snapshots: Vec<Snapshot>,
}

impl Trajectory {
    /// Creates a trajectory with no snapshots.
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            snapshots: Vec::new(),
        }
    }

    /// Appends a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SnapshotLengthMismatch`] if the snapshot does not
    /// hold exactly one position per topology atom.
    pub fn add_snapshot(&mut self, snapshot: Snapshot) -> Result<(), ModelError> {
        let expected = self.topology.atom_count();
        if snapshot.len() != expected {
            return Err(ModelError::SnapshotLengthMismatch {
                expected,
                found: snapshot.len(),
            });
        }
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Returns the snapshot at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SnapshotOutOfRange`] if there is no such snapshot.
    pub fn snapshot(&self, index: usize) -> Result<&Snapshot, ModelError> {
        self.snapshots.get(index).ok_or(ModelError::SnapshotOutOfRange {
            index,
            len: self.snapshots.len(),
        })
    }

    /// Returns snapshot 0, if any snapshot was recorded.
    pub fn reference_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    #[inline]
    pub fn count_snapshots(&self) -> usize {
        self.snapshots.len()
    }

    /// Computes the box spanning every position of every snapshot.
    ///
    /// # Return
    ///
    /// Returns `None` if the trajectory has no positions at all.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.snapshots.iter().flat_map(|s| s.positions()))
    }
}
