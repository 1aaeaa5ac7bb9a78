use fahview::workflows::progress::{Phase, Progress, ProgressCallback, SlotOutcome};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Default)]
struct PhaseBar {
    bar: Option<ProgressBar>,
    empty_slots: Vec<u32>,
}

/// Draws one bar per inspection phase, labelled with the slot last handled.
///
/// A phase starts as a spinner and turns into a bar once the number of slots
/// is known. Finished bars stay on screen with a one-line summary.
pub struct CliProgressHandler {
    state: Arc<Mutex<PhaseBar>>,
    hidden: bool,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
            hidden: false,
        }
    }

    /// A handler that tracks state without drawing anything.
    #[cfg(test)]
    fn hidden() -> Self {
        Self {
            state: Arc::default(),
            hidden: true,
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();
        let hidden = self.hidden;

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress state mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart(phase) => {
                    let target = if hidden {
                        ProgressDrawTarget::hidden()
                    } else {
                        ProgressDrawTarget::stderr()
                    };
                    let bar = ProgressBar::with_draw_target(None, target)
                        .with_style(spinner_style())
                        .with_message(phase.label());
                    bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    state.bar = Some(bar);
                    state.empty_slots.clear();
                }
                Progress::SlotCount(total) => {
                    if let Some(bar) = &state.bar {
                        bar.disable_steady_tick();
                        bar.set_style(bar_style());
                        bar.set_length(total as u64);
                    }
                }
                Progress::SlotDone { slot_id, outcome } => {
                    if outcome == SlotOutcome::NoMolecule {
                        state.empty_slots.push(slot_id);
                    }
                    if let Some(bar) = &state.bar {
                        bar.inc(1);
                        bar.set_message(slot_message(slot_id, outcome));
                    }
                }
                Progress::PhaseFinish(phase) => {
                    if let Some(bar) = &state.bar {
                        bar.disable_steady_tick();
                        bar.finish_with_message(finish_message(phase, &state.empty_slots));
                    }
                }
            }
        })
    }
}

fn slot_message(slot_id: u32, outcome: SlotOutcome) -> String {
    let detail = match outcome {
        SlotOutcome::NoMolecule => "no molecule".to_string(),
        SlotOutcome::Fetched { atoms, snapshots } => {
            format!("{} atoms, {} snapshot(s)", atoms, snapshots)
        }
        SlotOutcome::Analyzed { groups: 1, .. } => "in one piece".to_string(),
        SlotOutcome::Analyzed { groups, moved: 0 } => format!("{} groups", groups),
        SlotOutcome::Analyzed { groups, moved } => {
            format!("{} groups, {} moved", groups, moved)
        }
    };
    format!("slot {:02}: {}", slot_id, detail)
}

fn finish_message(phase: Phase, empty_slots: &[u32]) -> String {
    if empty_slots.is_empty() {
        return format!("✓ {}", phase.label());
    }
    let ids: Vec<String> = empty_slots.iter().map(|id| format!("{:02}", id)).collect();
    format!("✓ {} (no molecule in slot {})", phase.label(), ids.join(", "))
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn bar(handler: &CliProgressHandler) -> ProgressBar {
        handler
            .state
            .lock()
            .unwrap()
            .bar
            .clone()
            .expect("a phase has started")
    }

    #[test]
    fn nothing_is_drawn_before_the_first_phase() {
        let handler = CliProgressHandler::hidden();
        assert!(handler.state.lock().unwrap().bar.is_none());
    }

    #[test]
    fn fetch_phase_labels_the_bar_with_each_slot() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart(Phase::Fetching));
        assert_eq!(bar(&handler).message(), "Fetching trajectories");

        callback(Progress::SlotCount(2));
        assert_eq!(bar(&handler).length(), Some(2));

        callback(Progress::SlotDone {
            slot_id: 0,
            outcome: SlotOutcome::NoMolecule,
        });
        assert_eq!(bar(&handler).message(), "slot 00: no molecule");

        callback(Progress::SlotDone {
            slot_id: 1,
            outcome: SlotOutcome::Fetched {
                atoms: 4,
                snapshots: 2,
            },
        });
        let pb = bar(&handler);
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.message(), "slot 01: 4 atoms, 2 snapshot(s)");

        callback(Progress::PhaseFinish(Phase::Fetching));
        let pb = bar(&handler);
        assert!(pb.is_finished());
        assert_eq!(
            pb.message(),
            "✓ Fetching trajectories (no molecule in slot 00)"
        );
    }

    #[test]
    fn each_phase_gets_a_fresh_bar() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart(Phase::Fetching));
        callback(Progress::SlotCount(1));
        callback(Progress::SlotDone {
            slot_id: 3,
            outcome: SlotOutcome::NoMolecule,
        });
        callback(Progress::PhaseFinish(Phase::Fetching));
        let fetched = bar(&handler);

        callback(Progress::PhaseStart(Phase::Analyzing));
        let analyzing = bar(&handler);
        assert!(fetched.is_finished());
        assert!(!analyzing.is_finished());
        assert_eq!(analyzing.position(), 0);

        callback(Progress::PhaseFinish(Phase::Analyzing));
        assert_eq!(bar(&handler).message(), "✓ Analyzing");
    }

    #[test]
    fn analyzed_slot_message_reports_groups_and_moves() {
        let analyzed = |groups, moved| slot_message(7, SlotOutcome::Analyzed { groups, moved });
        assert_eq!(analyzed(1, 0), "slot 07: in one piece");
        assert_eq!(analyzed(3, 0), "slot 07: 3 groups");
        assert_eq!(analyzed(3, 2), "slot 07: 3 groups, 2 moved");
    }

    #[test]
    fn finish_message_lists_every_empty_slot() {
        assert_eq!(
            finish_message(Phase::Fetching, &[0, 12]),
            "✓ Fetching trajectories (no molecule in slot 00, 12)"
        );
        assert_eq!(finish_message(Phase::Connecting, &[]), "✓ Connecting");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart(Phase::Connecting));
            callback(Progress::PhaseFinish(Phase::Connecting));
        })
        .join()
        .unwrap();

        let pb = bar(&handler);
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Connecting");
    }
}
