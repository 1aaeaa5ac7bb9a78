use super::clustering::Clustering;
use super::error::AnalysisError;
use crate::core::models::snapshot::Snapshot;
use crate::core::models::trajectory::Trajectory;
use itertools::iproduct;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, instrument};

/// Box lengths to shift by along each axis, zero first.
const BOX_SHIFTS: [f64; 3] = [0.0, -1.0, 1.0];

/// The translation applied to one group to bring it next to the primary group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOffset {
    pub group: usize,
    pub offset: Vector3<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reassembly {
    pub trajectory: Trajectory,
    /// One entry per moved group, in group-id order.
    pub offsets: Vec<GroupOffset>,
}

/// Undoes periodic-boundary wrapping of a fragmented molecule.
///
/// The primary group stays fixed. Every other group is tried at each of the
/// 27 translations `{-1, 0, +1}` box lengths per axis, where the box is the
/// trajectory's bounding box, and keeps the one that brings it closest to the
/// primary group in the reference snapshot. The zero translation is tried
/// first and ties keep the earlier candidate, so a group that is already as
/// close as it can get stays where it is.
///
/// The chosen translation is applied to the group in every snapshot. The input
/// trajectory is left untouched.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyTrajectory`] if a fragmented clustering is
/// paired with a trajectory that has no snapshot, and [`AnalysisError::Model`]
/// if the clustering refers to atoms the trajectory does not have.
#[instrument(skip_all, name = "reassembly", fields(groups = clustering.group_count()))]
pub fn reassemble(
    trajectory: &Trajectory,
    clustering: &Clustering,
) -> Result<Reassembly, AnalysisError> {
    let Some(primary) = clustering.primary_group().filter(|_| clustering.is_fragmented()) else {
        return Ok(Reassembly {
            trajectory: trajectory.clone(),
            offsets: Vec::new(),
        });
    };

    let reference = trajectory
        .reference_snapshot()
        .ok_or(AnalysisError::EmptyTrajectory)?;
    let box_size = trajectory
        .bounding_box()
        .ok_or(AnalysisError::EmptyTrajectory)?
        .size();

    let anchor_points = group_points(reference, &clustering.groups()[primary])?;
    let anchor: KdTree<f64, 3> = (&anchor_points).into();

    let candidates: Vec<Vector3<f64>> = iproduct!(BOX_SHIFTS, BOX_SHIFTS, BOX_SHIFTS)
        .map(|(i, j, k)| Vector3::new(i * box_size.x, j * box_size.y, k * box_size.z))
        .collect();

    let mut offsets = Vec::new();
    for (group, atoms) in clustering.groups().iter().enumerate() {
        if group == primary {
            continue;
        }
        let points = group_points(reference, atoms)?;
        let mut best = (f64::INFINITY, Vector3::zeros());
        for candidate in &candidates {
            let distance = closest_approach(&anchor, &points, candidate);
            if distance < best.0 {
                best = (distance, *candidate);
            }
        }
        debug!(group, distance = best.0.sqrt(), "Best translation found.");
        if best.1 != Vector3::zeros() {
            offsets.push(GroupOffset {
                group,
                offset: best.1,
            });
        }
    }

    let mut reassembled = Trajectory::new(trajectory.topology().clone());
    for snapshot in trajectory.snapshots() {
        let mut moved = snapshot.clone();
        for GroupOffset { group, offset } in &offsets {
            moved = moved.translated(&clustering.groups()[*group], offset)?;
        }
        reassembled.add_snapshot(moved)?;
    }

    info!(moved = offsets.len(), "Reassembled fragmented molecule.");
    Ok(Reassembly {
        trajectory: reassembled,
        offsets,
    })
}

fn group_points(snapshot: &Snapshot, atoms: &[usize]) -> Result<Vec<[f64; 3]>, AnalysisError> {
    atoms
        .iter()
        .map(|&atom| {
            let p = snapshot.position(atom)?;
            Ok([p.x, p.y, p.z])
        })
        .collect()
}

/// Squared distance between the closest pair of translated group atom and anchor atom.
fn closest_approach(anchor: &KdTree<f64, 3>, points: &[[f64; 3]], offset: &Vector3<f64>) -> f64 {
    points
        .iter()
        .map(|p| {
            let moved = Point3::from(*p) + offset;
            anchor
                .nearest_one::<SquaredEuclidean>(&[moved.x, moved.y, moved.z])
                .distance
        })
        .fold(f64::INFINITY, f64::min)
}
