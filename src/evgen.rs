//! This module provides toy event generation facilities
//!
//! Events are not meant to be physically accurate. They only need to exercise
//! the selection layer with realistic-looking features: steeply falling pt
//! spectra, objects outside of the detector acceptance, fake (negative) MC
//! labels, quality flags and the occasional event without a vertex.

use crate::{
    event::Event,
    momentum::Vertex,
    numeric::{reals::consts::TAU, Float},
    objects::{Cluster, Particle, PION_MASS},
    random::RandomGenerator,
};

use prefix_num_ops::real::ln;

/// Mean transverse momentum of generated particles (GeV/c)
const MEAN_PT: Float = 0.6;

/// Generated pseudorapidity range, wider than the default acceptance
const MAX_ABS_ETA: Float = 1.5;

/// Fraction of particles which get a fake MC label
const FAKE_FRACTION: Float = 0.1;

/// Fraction of particles which are identified
const PID_FRACTION: Float = 0.3;

/// Proton mass (GeV/c²), given to identified particles
const PROTON_MASS: Float = 0.938272;

/// Fraction of particles which produce a calorimeter cluster
const CLUSTER_FRACTION: Float = 0.25;

/// Fraction of events without a reconstructed vertex
const BAD_VERTEX_FRACTION: Float = 0.05;

/// Half-width of the generated vertex z distribution (cm)
const MAX_ABS_VERTEX_Z: Float = 15.;

/// Generator of toy events
pub struct EventGenerator {
    /// Largest number of particles in an event
    max_multiplicity: usize,

    /// Name of the generated particle collection
    particle_array: String,

    /// Name of the generated cluster collection
    cluster_array: String,
}
//
impl EventGenerator {
    /// Set up event generation
    pub fn new(
        max_multiplicity: usize,
        particle_array: impl Into<String>,
        cluster_array: impl Into<String>,
    ) -> Self {
        Self {
            max_multiplicity,
            particle_array: particle_array.into(),
            cluster_array: cluster_array.into(),
        }
    }

    /// Generate an event
    pub fn generate(&self, rng: &mut RandomGenerator) -> Event {
        let vertex = Vertex::new(0., 0., rng.uniform(-MAX_ABS_VERTEX_Z, MAX_ABS_VERTEX_Z));
        let multiplicity = rng.integer(0, self.max_multiplicity);
        let contributors = if rng.chance(BAD_VERTEX_FRACTION) {
            0
        } else {
            multiplicity as u32
        };
        let mut event = Event::new(vertex, contributors)
            .with_event_plane(rng.uniform(0., TAU / 2.))
            .with_trigger_mask(1 << rng.integer(0, 3));

        let mut particles = Vec::with_capacity(multiplicity);
        let mut clusters = Vec::new();
        for index in 0..multiplicity {
            let particle = Self::generate_particle(rng, index);
            if rng.chance(CLUSTER_FRACTION) {
                let energy = particle.pt * rng.uniform(0.5, 1.);
                clusters.push(Cluster::new(
                    energy,
                    particle.eta,
                    particle.phi,
                    particle.label,
                ));
            }
            particles.push(particle);
        }

        event.insert(self.particle_array.clone(), particles);
        event.insert(self.cluster_array.clone(), clusters);
        event
    }

    /// Generate a single particle, labelled after its generation index
    fn generate_particle(rng: &mut RandomGenerator, index: usize) -> Particle {
        // Exponential pt spectrum, sampled by inversion
        let pt = -MEAN_PT * ln(1. - rng.random());
        let eta = rng.uniform(-MAX_ABS_ETA, MAX_ABS_ETA);
        let phi = rng.uniform(0., TAU);
        let charge = if rng.chance(0.5) { 1 } else { -1 };
        let label = if rng.chance(FAKE_FRACTION) {
            -(index as i32 + 1)
        } else {
            index as i32 + 1
        };
        let mut particle = Particle::new(pt, eta, phi, charge, label).with_flags(rng.flags());
        if rng.chance(PID_FRACTION) {
            particle = particle.with_pid_mass(if rng.chance(0.5) { PION_MASS } else { PROTON_MASS });
        }
        particle
    }
}
