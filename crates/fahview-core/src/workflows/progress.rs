/// The stages of an inspection, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connecting,
    Fetching,
    Analyzing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Connecting => "Connecting",
            Phase::Fetching => "Fetching trajectories",
            Phase::Analyzing => "Analyzing",
        }
    }
}

/// What became of one slot in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The slot is compute-only and was skipped.
    NoMolecule,
    Fetched { atoms: usize, snapshots: usize },
    /// `moved` counts the groups translated by reassembly.
    Analyzed { groups: usize, moved: usize },
}

/// Events emitted while an inspection runs.
///
/// Every phase opens with [`Progress::PhaseStart`]. The fetch and analysis
/// phases then announce how many slots they will visit and report each slot
/// as it is done. [`Progress::PhaseFinish`] is only sent when the phase
/// succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart(Phase),
    SlotCount(usize),
    SlotDone { slot_id: u32, outcome: SlotOutcome },
    PhaseFinish(Phase),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// Library callers that do not care about progress can pass
/// `ProgressReporter::new()`, which discards every event.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` between the start and finish events of `phase`.
    ///
    /// A failing phase is left open: its error is returned without a finish event.
    pub fn phase<T, E>(&self, phase: Phase, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.report(Progress::PhaseStart(phase));
        let value = work()?;
        self.report(Progress::PhaseFinish(phase));
        Ok(value)
    }
}
