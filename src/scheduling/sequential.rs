//! Sequential back-end of the event processing

use crate::{
    random::RandomGenerator,
    scheduling::{batch_size, num_batches},
    stats::SelectionStats,
};

/// Process events in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs.
///
pub fn run_selection_impl(
    num_events: usize,
    seed: u64,
    process_events: impl Fn(usize, &mut RandomGenerator) -> SelectionStats,
) -> SelectionStats {
    (0..num_batches(num_events)).fold(SelectionStats::default(), |mut stats, batch_id| {
        let mut rng = RandomGenerator::for_batch(seed, batch_id);
        stats.merge(process_events(batch_size(num_events, batch_id), &mut rng));
        stats
    })
}
