//! This module allows integrating selection outcomes across processed events

use crate::{
    container::BoundContainer,
    kinematics::Kinematics,
    momentum,
    numeric::Float,
    rejection::RejectionReason,
};

/// Number of distinct rejection bits which can be counted
const NUM_REASON_BITS: usize = u32::BITS as usize;

/// Selection outcome for the objects of one container
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectStats {
    /// Number of objects which were tested
    pub seen: u64,

    /// Number of objects which passed all cuts
    pub accepted: u64,

    /// Number of rejections in which each reason bit was involved
    pub rejections: [u64; NUM_REASON_BITS],

    /// Summed transverse momentum of accepted objects (GeV/c)
    pub accepted_pt: Float,
}
//
impl Default for ObjectStats {
    fn default() -> Self {
        Self {
            seen: 0,
            accepted: 0,
            rejections: [0; NUM_REASON_BITS],
            accepted_pt: 0.,
        }
    }
}
//
impl ObjectStats {
    /// Run every object of a bound container through its selection
    pub fn integrate<T: Kinematics>(&mut self, bound: &mut BoundContainer<'_, T>) {
        for index in 0..bound.entry_count() {
            self.seen += 1;
            if let Some(momentum) = bound.accepted_momentum_at(index) {
                self.accepted += 1;
                self.accepted_pt += momentum::pt(&momentum);
            } else {
                self.record_rejection(bound.rejection_reason());
            }
        }
    }

    /// Count a rejection
    pub fn record_rejection(&mut self, reason: RejectionReason) {
        for flag in reason.iter() {
            if let Some(bit) = flag.bit_position() {
                self.rejections[usize::from(bit)] += 1;
            }
        }
    }

    /// Number of rejections involving some reason
    pub fn rejections_for(&self, reason: RejectionReason) -> u64 {
        reason
            .bit_position()
            .map_or(0, |bit| self.rejections[usize::from(bit)])
    }

    /// Fraction of tested objects which were accepted
    pub fn efficiency(&self) -> Float {
        if self.seen == 0 {
            0.
        } else {
            self.accepted as Float / self.seen as Float
        }
    }

    /// Integrate the outcome of another set of objects
    pub fn merge(&mut self, other: &Self) {
        self.seen += other.seen;
        self.accepted += other.accepted;
        for (mine, theirs) in self.rejections.iter_mut().zip(other.rejections.iter()) {
            *mine += theirs;
        }
        self.accepted_pt += other.accepted_pt;
    }
}

/// Selection outcome of a full run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionStats {
    /// Number of events which passed the event cut
    pub events_passed: u64,

    /// Number of events which failed the event cut
    pub events_failed: u64,

    /// Outcome of the particle selection in accepted events
    pub particles: ObjectStats,

    /// Outcome of the cluster selection in accepted events
    pub clusters: ObjectStats,
}
//
impl SelectionStats {
    /// Total number of processed events
    pub fn events(&self) -> u64 {
        self.events_passed + self.events_failed
    }

    /// Integrate the results of another batch of events
    pub fn merge(&mut self, other: Self) {
        self.events_passed += other.events_passed;
        self.events_failed += other.events_failed;
        self.particles.merge(&other.particles);
        self.clusters.merge(&other.clusters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        container::ParticleContainer, event::Event, numeric::functions::approx_eq,
        objects::Particle,
    };

    #[test]
    fn integration_counts_every_rejection_bit() {
        let mut event = Event::default();
        event.insert(
            "tracks",
            vec![
                Particle::new(0.5, 0., 0., 1, 1),
                Particle::new(2., 0., 0., 1, 2),
                Particle::new(0.5, 2., 0., 1, 3),
            ],
        );
        let mut container = ParticleContainer::new("tracks", "tracks");
        container.set_pt_limits(1., 10.);
        container.set_e_limits(0., 1000.);
        let mut bound = container.bind(&event);

        let mut stats = ObjectStats::default();
        stats.integrate(&mut bound);
        assert_eq!(stats.seen, 3);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejections_for(RejectionReason::PT_CUT), 2);
        assert_eq!(stats.rejections_for(RejectionReason::ACCEPTANCE_CUT), 1);
        assert_eq!(stats.rejections_for(RejectionReason::NULL_OBJECT), 0);
        assert!(approx_eq(stats.accepted_pt, 2.));
        assert!(approx_eq(stats.efficiency(), 1. / 3.));
    }

    #[test]
    fn merging_adds_up() {
        let mut a = SelectionStats {
            events_passed: 2,
            events_failed: 1,
            ..SelectionStats::default()
        };
        a.particles.record_rejection(RejectionReason::PT_CUT);
        let mut b = a.clone();
        b.clusters.accepted = 4;
        a.merge(b);
        assert_eq!(a.events(), 6);
        assert_eq!(a.particles.rejections_for(RejectionReason::PT_CUT), 2);
        assert_eq!(a.clusters.accepted, 4);
    }
}
