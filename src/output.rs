//! This module is in charge of outputting the final selection results to the
//! standard output and to disk

use crate::{
    config::Configuration,
    rejection::RejectionReason,
    stats::{ObjectStats, SelectionStats},
    Result,
};

use eyre::WrapErr;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::info;

use std::{
    fs::File,
    io::{self, Write},
    path::Path,
    time::Duration,
};

/// Name of the file which receives the selection report
pub const REPORT_FILE: &str = "selection.report";

/// Output the selection results to the console and to disk
pub fn dump_results(
    cfg: &Configuration,
    stats: &SelectionStats,
    elapsed_time: Duration,
    output_dir: &Path,
) -> Result<()> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .wrap_err("Failed to format the report timestamp")?;

    // Print out a short summary on stdout
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), cfg, stats, elapsed_time, &timestamp)?;

    // Keep the full report on disk
    let path = output_dir.join(REPORT_FILE);
    let mut file =
        File::create(&path).wrap_err_with(|| format!("Could not create {}", path.display()))?;
    write_report(&mut file, cfg, stats, elapsed_time, &timestamp)?;
    info!(path = %path.display(), "Selection report written");
    Ok(())
}

/// Write the selection report into some output stream
pub fn write_report(
    out: &mut impl Write,
    cfg: &Configuration,
    stats: &SelectionStats,
    elapsed_time: Duration,
    timestamp: &str,
) -> io::Result<()> {
    writeln!(out, " {timestamp}")?;
    writeln!(out, " ---------------------------------------------")?;
    write_entry(out, "Number of events", stats.events())?;
    write_entry(out, "... after event cut", stats.events_passed)?;
    write_entry(out, "Particle collection", cfg.particles.array_name())?;
    write_entry(out, "Cluster collection", cfg.clusters.array_name())?;
    let elapsed_secs = elapsed_time.as_secs_f64();
    write_entry(out, "Elapsed time (s)", elapsed_secs)?;
    write_entry(
        out,
        "Elapsed time per event (s)",
        elapsed_secs / (stats.events().max(1) as f64),
    )?;
    write_objects(out, "Particles", &stats.particles)?;
    write_objects(out, "Clusters", &stats.clusters)?;
    writeln!(out, " ---------------------------------------------")?;
    writeln!(out, " Event cut")?;
    let mut event_cut = cfg.event_cut.clone();
    event_cut.reset_counters();
    event_cut.add_counts(stats.events_passed, stats.events_failed);
    for line in event_cut.report().lines() {
        writeln!(out, "   {line}")?;
    }
    Ok(())
}

/// Write the selection outcome of one kind of objects
fn write_objects(out: &mut impl Write, title: &str, stats: &ObjectStats) -> io::Result<()> {
    writeln!(out, " ---------------------------------------------")?;
    writeln!(out, " {title}")?;
    write_entry(out, "Tested", stats.seen)?;
    write_entry(out, "Accepted", stats.accepted)?;
    write_entry(out, "Efficiency", format!("{:.4}", stats.efficiency()))?;
    write_entry(out, "Accepted pt sum (GeV/c)", stats.accepted_pt)?;
    for (reason, name) in RejectionReason::ALL {
        write_entry(
            out,
            &format!("Rejected by {name} cut"),
            stats.rejections_for(reason),
        )?;
    }
    Ok(())
}

/// Key-value output that uses fixed-size columns for better readability
fn write_entry(out: &mut impl Write, key: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, " {key:<31}: {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_aligned() {
        let mut buffer = Vec::new();
        write_entry(&mut buffer, "Accepted", 12).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            format!(" {:<31}: 12\n", "Accepted")
        );
    }
}
