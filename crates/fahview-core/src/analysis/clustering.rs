use super::error::AnalysisError;
use crate::config::ClusteringConfig;
use crate::core::models::trajectory::Trajectory;
use itertools::iproduct;
use nalgebra::Point3;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

type CellKey = [i64; 3];

/// Largest cell coordinate along any axis. Leaves room for the neighbour step.
const MAX_CELL_COORDINATE: f64 = (1u64 << 62) as f64;

/// One populated cell of the sparse grid.
#[derive(Debug, Default)]
struct Bucket {
    atoms: Vec<usize>,
    group: Option<usize>,
}

/// The partition of a trajectory's atoms into spatially contiguous groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clustering {
    groups: Vec<Vec<usize>>,
    labels: Vec<usize>,
    cell_count: usize,
}

impl Clustering {
    /// Atom indices of every group, indexed by group id; each list is ascending.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn group(&self, group_id: usize) -> Option<&[usize]> {
        self.groups.get(group_id).map(Vec::as_slice)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Sizes of the groups in group-id order.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    /// Returns the id of the group containing `atom_index`.
    pub fn group_of(&self, atom_index: usize) -> Option<usize> {
        self.labels.get(atom_index).copied()
    }

    /// The group with the most atoms. Ties go to the lowest group id.
    pub fn primary_group(&self) -> Option<usize> {
        self.groups
            .iter()
            .enumerate()
            .min_by_key(|(_, atoms)| Reverse(atoms.len()))
            .map(|(id, _)| id)
    }

    /// Number of populated grid cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn is_fragmented(&self) -> bool {
        self.groups.len() > 1
    }
}

/// Connected-component labeling of atoms over a sparse uniform grid.
///
/// Atoms of the reference snapshot are bucketed into cubic cells whose edge is
/// the bond length. Two populated cells belong to the same group when they are
/// 26-connected (they touch by a face, an edge or a corner), directly or
/// through a chain of populated cells. Bonds play no part; only geometry does.
///
/// Cells are visited in ascending x, then y, then z order, and group ids are
/// handed out in that order starting at 0, so the labeling is a pure function
/// of the positions and the cell size.
#[derive(Debug, Clone)]
pub struct SpatialClusterer {
    cell_size: f64,
}

impl SpatialClusterer {
    pub fn new(config: &ClusteringConfig) -> Self {
        Self {
            cell_size: config.bond_length,
        }
    }

    /// Labels the atoms of the trajectory's reference snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyTrajectory`] if the trajectory has atoms
    /// but no snapshot, [`AnalysisError::NonFinitePosition`] for a NaN or
    /// infinite coordinate, [`AnalysisError::CellOutOfRange`] for an atom so far
    /// from the others that its cell index does not fit the grid, and
    /// [`AnalysisError::InvalidCellSize`] if the configured bond length is not
    /// a positive finite number.
    #[instrument(skip_all, name = "spatial_clustering", fields(cell_size = self.cell_size))]
    pub fn cluster(&self, trajectory: &Trajectory) -> Result<Clustering, AnalysisError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(AnalysisError::InvalidCellSize {
                value: self.cell_size,
            });
        }
        if trajectory.topology().is_empty() {
            return Ok(Clustering::default());
        }

        let positions = trajectory
            .reference_snapshot()
            .ok_or(AnalysisError::EmptyTrajectory)?
            .positions();
        if let Some(atom) = positions
            .iter()
            .position(|p| p.coords.iter().any(|c| !c.is_finite()))
        {
            return Err(AnalysisError::NonFinitePosition { atom });
        }

        let mut grid = self.bucket(positions)?;
        let group_count = label(&mut grid);

        let mut groups = vec![Vec::new(); group_count];
        let mut labels = vec![0; positions.len()];
        for bucket in grid.values() {
            if let Some(group) = bucket.group {
                groups[group].extend_from_slice(&bucket.atoms);
                for &atom in &bucket.atoms {
                    labels[atom] = group;
                }
            }
        }
        for group in &mut groups {
            group.sort_unstable();
        }

        debug!(cells = grid.len(), "Bucketed atoms into grid cells.");
        info!(groups = group_count, "Spatial clustering complete.");

        Ok(Clustering {
            groups,
            labels,
            cell_count: grid.len(),
        })
    }

    fn bucket(
        &self,
        positions: &[Point3<f64>],
    ) -> Result<BTreeMap<CellKey, Bucket>, AnalysisError> {
        let minimum = positions
            .iter()
            .skip(1)
            .fold(positions[0], |min, p| min.inf(p));

        let mut grid: BTreeMap<CellKey, Bucket> = BTreeMap::new();
        for (atom, position) in positions.iter().enumerate() {
            let cell = ((position - minimum) / self.cell_size).map(f64::floor);
            // Offsets from the minimum are never negative.
            if cell.iter().any(|&c| c >= MAX_CELL_COORDINATE) {
                return Err(AnalysisError::CellOutOfRange { atom });
            }
            grid.entry([cell.x as i64, cell.y as i64, cell.z as i64])
                .or_default()
                .atoms
                .push(atom);
        }
        Ok(grid)
    }
}

/// Flood-fills every populated cell and returns the number of groups found.
fn label(grid: &mut BTreeMap<CellKey, Bucket>) -> usize {
    let keys: Vec<CellKey> = grid.keys().copied().collect();
    let mut next_group = 0;
    let mut stack = Vec::new();

    for seed in keys {
        if grid.get(&seed).is_some_and(|b| b.group.is_some()) {
            continue;
        }
        if let Some(bucket) = grid.get_mut(&seed) {
            bucket.group = Some(next_group);
        }
        stack.push(seed);

        while let Some([x, y, z]) = stack.pop() {
            for (dx, dy, dz) in iproduct!(-1..=1, -1..=1, -1..=1) {
                if (dx, dy, dz) == (0, 0, 0) {
                    continue;
                }
                let (Some(nx), Some(ny), Some(nz)) =
                    (x.checked_add(dx), y.checked_add(dy), z.checked_add(dz))
                else {
                    continue;
                };
                let neighbour = [nx, ny, nz];
                if let Some(bucket) = grid.get_mut(&neighbour) {
                    if bucket.group.is_none() {
                        bucket.group = Some(next_group);
                        stack.push(neighbour);
                    }
                }
            }
        }
        next_group += 1;
    }
    next_group
}
