//! Toy selection run: generates events, applies the event cut and the
//! particle and cluster selections, and reports the outcome.

use emcal_containers::{
    config::Configuration,
    evgen::EventGenerator,
    output,
    random::RandomGenerator,
    scheduling,
    stats::SelectionStats,
    Result,
};

use eyre::WrapErr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::{path::Path, time::Instant};

/// Configuration file used when none is given on the command line
const DEFAULT_CONFIG: &str = "selection.cfg";

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // Log to stderr, INFO and above unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // ### CONFIGURATION READOUT ###

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_owned());
    let cfg = Configuration::load(&config_path).wrap_err("Failed to load the configuration")?;

    // Start the clock after configuration I/O
    let saved_time = Instant::now();

    // ### EVENT PROCESSING ###

    let evgen = EventGenerator::new(
        cfg.max_multiplicity,
        cfg.particles.array_name(),
        cfg.clusters.array_name(),
    );

    // This kernel processes a number of events, given an initial random
    // number generator state, and returns the accumulated statistics
    let process_events = |num_events: usize, rng: &mut RandomGenerator| -> SelectionStats {
        let mut stats = SelectionStats::default();
        let mut event_cut = cfg.event_cut.clone();
        event_cut.reset_counters();

        for _ in 0..num_events {
            let event = evgen.generate(rng);
            if !event_cut.pass(&event) {
                continue;
            }

            // Containers only borrow the event for the duration of this scope
            let mut particles = cfg.particles.bind(&event);
            stats.particles.integrate(&mut particles);
            let mut clusters = cfg.clusters.bind(&event);
            stats.clusters.integrate(&mut clusters);
        }

        stats.events_passed = event_cut.events_passed();
        stats.events_failed = event_cut.events_failed();
        stats
    };

    let stats = scheduling::run_selection(cfg.num_events, cfg.seed, process_events);
    let elapsed_time = saved_time.elapsed();
    info!(
        events = stats.events(),
        passed = stats.events_passed,
        "Selection finished"
    );

    // ### RESULTS DISPLAY AND STORAGE ###

    output::dump_results(&cfg, &stats, elapsed_time, Path::new("."))
        .wrap_err("Failed to output the results")?;

    Ok(())
}
