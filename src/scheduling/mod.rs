//! This module takes care of scheduling the event processing work,
//! encapsulating use of multiple threads

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{random::RandomGenerator, stats::SelectionStats};

/// Size of the processed event batches
///
/// Events are grouped in batches, each of which draws from its own random
/// number stream. Batch results are always merged in batch order, so the
/// outcome of a run does not depend on whether it was multi-threaded.
///
pub const EVENT_BATCH_SIZE: usize = 1_000;

/// Number of batches needed to process some number of events
pub fn num_batches(num_events: usize) -> usize {
    (num_events + EVENT_BATCH_SIZE - 1) / EVENT_BATCH_SIZE
}

/// Size of the n-th batch of a run
pub fn batch_size(num_events: usize, batch_id: usize) -> usize {
    num_events
        .saturating_sub(batch_id * EVENT_BATCH_SIZE)
        .min(EVENT_BATCH_SIZE)
}

/// Run the selection in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be processed, the seed
/// of the random number generator, and a kernel that processes a certain
/// number of events given a random number generator.
///
/// Returns the merged selection statistics
///
pub fn run_selection(
    num_events: usize,
    seed: u64,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> SelectionStats,
) -> SelectionStats {
    // Should have already been checked at configuration time
    assert!(num_events > 0, "Must process at least one event");

    #[cfg(not(feature = "multi-threading"))]
    {
        sequential::run_selection_impl(num_events, seed, process_events)
    }

    #[cfg(feature = "multi-threading")]
    {
        multi_threading::run_selection_impl(num_events, seed, process_events)
    }
}
