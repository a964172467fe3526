//! Mechanism to apply a cut to whole events before looking at their objects

use crate::{
    event::Event,
    momentum::Z,
    numeric::Float,
};

use tracing::trace;

/// Cuts on input events
#[derive(Clone, Debug, PartialEq)]
pub struct EventCut {
    /// Accepted multiplicity range (inclusive)
    pub multiplicity: [usize; 2],

    /// Accepted primary vertex z range (cm, exclusive)
    pub vertex_z: [Float; 2],

    /// Accepted event plane angle range (rad, inclusive)
    pub event_plane: [Float; 2],

    /// Whether events without a reconstructed vertex are accepted
    pub accept_bad_vertex: bool,

    /// Trigger classes of which one must have fired (0 accepts any)
    pub trigger_selection: u32,

    /// Number of events which passed the cut
    events_passed: u64,

    /// Number of events which failed the cut
    events_failed: u64,
}
//
impl Default for EventCut {
    fn default() -> Self {
        Self {
            multiplicity: [0, usize::MAX],
            vertex_z: [-1000., 1000.],
            event_plane: [-1000., 1000.],
            accept_bad_vertex: false,
            trigger_selection: 0,
            events_passed: 0,
            events_failed: 0,
        }
    }
}
//
impl EventCut {
    /// Setup the cuts on multiplicity and vertex position
    pub fn new(multiplicity: [usize; 2], vertex_z: [Float; 2], accept_bad_vertex: bool) -> Self {
        Self {
            multiplicity,
            vertex_z,
            accept_bad_vertex,
            ..Self::default()
        }
    }

    /// Decide whether an event passes the cut or should be rejected
    pub fn keep(&self, event: &Event) -> bool {
        let mult = event.multiplicity();
        if mult < self.multiplicity[0] || mult > self.multiplicity[1] {
            return false;
        }

        let z = event.vertex()[Z];
        if !(z > self.vertex_z[0] && z < self.vertex_z[1]) {
            return false;
        }

        if !self.accept_bad_vertex && !event.has_good_vertex() {
            return false;
        }

        let psi = event.event_plane_angle();
        if !(self.event_plane[0]..=self.event_plane[1]).contains(&psi) {
            return false;
        }

        self.trigger_selection == 0 || event.trigger_mask() & self.trigger_selection != 0
    }

    /// Apply the cut to an event, keeping track of the outcome
    pub fn pass(&mut self, event: &Event) -> bool {
        let good_event = self.keep(event);
        if good_event {
            self.events_passed += 1;
        } else {
            self.events_failed += 1;
        }
        trace!(good_event, multiplicity = event.multiplicity(), "Event cut applied");
        good_event
    }

    /// Number of events which passed the cut
    pub fn events_passed(&self) -> u64 {
        self.events_passed
    }

    /// Number of events which failed the cut
    pub fn events_failed(&self) -> u64 {
        self.events_failed
    }

    /// Account for events which were cut by another copy of this cut
    pub fn add_counts(&mut self, passed: u64, failed: u64) {
        self.events_passed += passed;
        self.events_failed += failed;
    }

    /// Forget about previously seen events
    pub fn reset_counters(&mut self) {
        self.events_passed = 0;
        self.events_failed = 0;
    }

    /// Human-readable summary of the settings and outcome of the cut
    pub fn report(&self) -> String {
        [
            format!(
                "Multiplicity:\t{}-{}",
                self.multiplicity[0], self.multiplicity[1]
            ),
            format!(
                "Vertex Z-position:\t{}-{}",
                self.vertex_z[0], self.vertex_z[1]
            ),
            format!(
                "Event plane angle:\t{}-{}",
                self.event_plane[0], self.event_plane[1]
            ),
            format!("Accept bad vertex:\t{}", self.accept_bad_vertex),
            format!(
                "Number of events which passed:\t{}  Number which failed:\t{}",
                self.events_passed, self.events_failed
            ),
        ]
        .join("\n")
    }
}
