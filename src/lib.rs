//! EMCal containers: kinematic selection over the object collections of
//! particle-physics events
//!
//!
//! # Introduction (for the physicist)
//!
//! Analyses rarely look at every track, calorimeter cluster or jet of an event.
//! They select objects inside a fiducial acceptance, above some transverse
//! momentum or energy threshold, with sensible Monte Carlo labels and the
//! right quality flags. Containers bundle such a selection together with the
//! name of the event collection that it applies to.
//!
//!
//! # Introduction (for the computer guy)
//!
//! A [`Container`] is configured once, then bound to each event in turn. The
//! resulting [`BoundContainer`] borrows the event's collection, so the borrow
//! checker guarantees that no container outlives the data it selects from.
//! Acceptance tests never fail: they answer yes or no, and record every
//! violated criterion as a bit of a [`RejectionReason`].
//!
//! The cut evaluation is written once against the [`Kinematics`] trait, which
//! is implemented by the particle, cluster and jet types of this crate and can
//! be implemented by any other object type.

#![warn(missing_docs)]

pub mod config;
pub mod container;
pub mod cuts;
pub mod evcut;
pub mod event;
pub mod evgen;
pub mod kinematics;
pub mod momentum;
pub mod numeric;
pub mod objects;
pub mod output;
pub mod random;
pub mod rejection;
pub mod scheduling;
pub mod stats;

pub use crate::{
    container::{
        BindingState, BoundContainer, ClusterContainer, Container, JetContainer, ParticleContainer,
    },
    cuts::{CutKind, CutRange, KinematicCuts},
    event::{Collection, CollectionError, Event, EventSource},
    kinematics::Kinematics,
    momentum::Momentum,
    objects::{Cluster, Jet, Particle},
    rejection::RejectionReason,
};

/// We'll use eyre's type-erased result type throughout the application layer
pub type Result<T> = eyre::Result<T>;
