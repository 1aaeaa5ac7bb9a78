use super::error::WorkflowError;
use super::progress::{Phase, Progress, ProgressReporter, SlotOutcome};
use crate::analysis::clustering::{Clustering, SpatialClusterer};
use crate::analysis::error::AnalysisError;
use crate::analysis::reassembly::{self, GroupOffset};
use crate::client::session::{ProtocolSession, SlotTrajectory};
use crate::client::transport::Transport;
use crate::config::{ClusteringConfig, InspectConfig};
use crate::core::models::trajectory::Trajectory;
use tracing::{info, instrument, warn};

/// What the inspection found for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotReport {
    pub slot_id: u32,
    pub atom_count: usize,
    pub bond_count: usize,
    pub snapshot_count: usize,
    /// Atom count of each spatial group, in group-id order.
    pub group_sizes: Vec<usize>,
    /// Translations applied during reassembly; empty if nothing was moved.
    pub offsets: Vec<GroupOffset>,
    /// The trajectory after reassembly, or as received if it was not reassembled.
    pub trajectory: Trajectory,
}

impl SlotReport {
    pub fn is_fragmented(&self) -> bool {
        self.group_sizes.len() > 1
    }

    pub fn was_reassembled(&self) -> bool {
        !self.offsets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub clustering: Clustering,
    pub offsets: Vec<GroupOffset>,
    pub trajectory: Trajectory,
}

/// Connects to the daemon and inspects the molecule of every slot.
///
/// # Errors
///
/// Returns [`WorkflowError::Client`] for any connection, protocol or decoding
/// failure and [`WorkflowError::Analysis`] if a slot's trajectory cannot be
/// analyzed. The first failure aborts the whole run.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn run(
    config: &InspectConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SlotReport>, WorkflowError> {
    let session = reporter.phase(Phase::Connecting, || {
        ProtocolSession::connect(&config.client)
    })?;

    inspect_session(session, &config.clustering, reporter)
}

/// Runs the fetch and analysis phases over an established session.
pub fn inspect_session<T: Transport>(
    mut session: ProtocolSession<T>,
    config: &ClusteringConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SlotReport>, WorkflowError> {
    let slots = reporter.phase(Phase::Fetching, || {
        fetch_trajectories(&mut session, reporter)
    })?;
    let reports = reporter.phase(Phase::Analyzing, || {
        analyze_slots(slots, config, reporter)
    })?;

    info!(slots = reports.len(), "Inspection complete.");
    Ok(reports)
}

fn fetch_trajectories<T: Transport>(
    session: &mut ProtocolSession<T>,
    reporter: &ProgressReporter,
) -> Result<Vec<SlotTrajectory>, WorkflowError> {
    let slot_ids = session.slot_ids()?;
    reporter.report(Progress::SlotCount(slot_ids.len()));

    let mut slots = Vec::new();
    for slot_id in slot_ids {
        let outcome = match session.trajectory(slot_id)? {
            Some(trajectory) => {
                let outcome = SlotOutcome::Fetched {
                    atoms: trajectory.topology().atom_count(),
                    snapshots: trajectory.count_snapshots(),
                };
                slots.push(SlotTrajectory {
                    slot_id,
                    trajectory,
                });
                outcome
            }
            None => SlotOutcome::NoMolecule,
        };
        reporter.report(Progress::SlotDone { slot_id, outcome });
    }
    Ok(slots)
}

fn analyze_slots(
    slots: Vec<SlotTrajectory>,
    config: &ClusteringConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SlotReport>, WorkflowError> {
    reporter.report(Progress::SlotCount(slots.len()));

    let mut reports = Vec::with_capacity(slots.len());
    for SlotTrajectory {
        slot_id,
        trajectory,
    } in slots
    {
        let atom_count = trajectory.topology().atom_count();
        let bond_count = trajectory.topology().bond_count();
        let snapshot_count = trajectory.count_snapshots();

        let outcome = analyze(trajectory, config)
            .map_err(|source| WorkflowError::Analysis { slot_id, source })?;
        if outcome.clustering.is_fragmented() && outcome.offsets.is_empty() {
            warn!(
                slot_id,
                groups = outcome.clustering.group_count(),
                "Molecule is fragmented and was left as received."
            );
        }
        reporter.report(Progress::SlotDone {
            slot_id,
            outcome: SlotOutcome::Analyzed {
                groups: outcome.clustering.group_count(),
                moved: outcome.offsets.len(),
            },
        });

        reports.push(SlotReport {
            slot_id,
            atom_count,
            bond_count,
            snapshot_count,
            group_sizes: outcome.clustering.group_sizes(),
            offsets: outcome.offsets,
            trajectory: outcome.trajectory,
        });
    }
    Ok(reports)
}

/// Clusters a trajectory and, if it is fragmented and reassembly is enabled,
/// reassembles it.
///
/// # Errors
///
/// Propagates any [`AnalysisError`] from clustering or reassembly.
pub fn analyze(
    trajectory: Trajectory,
    config: &ClusteringConfig,
) -> Result<AnalysisOutcome, AnalysisError> {
    let clustering = SpatialClusterer::new(config).cluster(&trajectory)?;

    if !(config.reassemble && clustering.is_fragmented()) {
        return Ok(AnalysisOutcome {
            clustering,
            offsets: Vec::new(),
            trajectory,
        });
    }

    let reassembled = reassembly::reassemble(&trajectory, &clustering)?;
    Ok(AnalysisOutcome {
        clustering,
        offsets: reassembled.offsets,
        trajectory: reassembled.trajectory,
    })
}
