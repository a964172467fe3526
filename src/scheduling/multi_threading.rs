//! Multi-threaded back-end of the event processing

use crate::{
    random::RandomGenerator,
    scheduling::{batch_size, num_batches},
    stats::SelectionStats,
};

use std::sync::Mutex;

/// Process events in multi-threaded mode
///
/// Every batch is processed by its own rayon task. Results are stored per
/// batch and merged in batch order once all tasks are done, so that the
/// floating-point sums come out exactly as in sequential mode.
///
pub fn run_selection_impl(
    num_events: usize,
    seed: u64,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> SelectionStats,
) -> SelectionStats {
    let num_batches = num_batches(num_events);
    let results = BatchResults::new(num_batches);

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        for batch_id in 0..num_batches {
            let results_ref = &results;
            let process_events_ref = &process_events;
            scope.spawn(move |_| {
                let mut rng = RandomGenerator::for_batch(seed, batch_id);
                let stats = process_events_ref(batch_size(num_events, batch_id), &mut rng);
                results_ref.set_batch_result(batch_id, stats);
            });
        }
    });

    results.merge_in_order()
}

/// Per-batch storage of the task results
struct BatchResults {
    slots: Box<[Mutex<Option<SelectionStats>>]>,
}
//
impl BatchResults {
    /// Set up results storage for N batches
    fn new(num_batches: usize) -> Self {
        Self {
            slots: (0..num_batches)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Record the results of the n-th batch
    fn set_batch_result(&self, batch_id: usize, stats: SelectionStats) {
        let mut lock = self.slots[batch_id]
            .lock()
            .expect("Mutex data should be valid");
        assert!(lock.is_none(), "Batches should not report results twice");
        *lock = Some(stats);
    }

    /// Aggregate the results in batch order
    fn merge_in_order(self) -> SelectionStats {
        self.slots
            .into_vec()
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .expect("Mutex data should be valid")
                    .expect("Result should be ready")
            })
            .fold(SelectionStats::default(), |mut stats, batch| {
                stats.merge(batch);
                stats
            })
    }
}
