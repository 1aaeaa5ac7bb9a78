use crate::cli::InspectArgs;
use crate::config::PartialInspectConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use fahview::workflows::{self, inspect::SlotReport, progress::ProgressReporter};
use tracing::{info, warn};

pub fn run(args: InspectArgs) -> Result<()> {
    let partial_config = PartialInspectConfig::load(&args)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Inspecting daemon at {}:{}...",
        config.client.host, config.client.port
    );
    let reports = workflows::inspect::run(&config, &reporter)?;
    info!("Workflow finished, received {} report(s).", reports.len());

    if reports.is_empty() {
        warn!("No slot is simulating a molecule.");
        println!("No slot is simulating a molecule.");
        return Ok(());
    }

    for report in &reports {
        println!("{}", format_report(report));
    }
    Ok(())
}

fn format_report(report: &SlotReport) -> String {
    let mut text = format!(
        "Slot {:02}: {} atoms, {} bonds, {} snapshot(s)",
        report.slot_id, report.atom_count, report.bond_count, report.snapshot_count
    );

    if !report.is_fragmented() {
        text.push_str("\n  ✓ Molecule is in one piece");
        return text;
    }

    text.push_str(&format!(
        "\n  Fragmented into {} groups (sizes: {})",
        report.group_sizes.len(),
        report
            .group_sizes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    if report.was_reassembled() {
        for moved in &report.offsets {
            text.push_str(&format!(
                "\n  ✓ Group {} moved by ({:.3}, {:.3}, {:.3})",
                moved.group, moved.offset.x, moved.offset.y, moved.offset.z
            ));
        }
    } else {
        text.push_str("\n  Left as received");
    }
    text
}
