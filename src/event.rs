//! This module defines the properties and storage of input events
//!
//! Events own the collections of physics objects; containers only ever borrow
//! them for the duration of the event's processing.

use crate::{
    kinematics::Kinematics,
    momentum::Vertex,
    numeric::Float,
    objects::{Cluster, Jet, Particle},
};

use std::collections::HashMap;
use thiserror::Error;

/// Reasons why a named collection cannot be handed out by an event
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// There is no collection of that name in the event
    #[error("collection '{name}' not found in the event")]
    NotFound {
        /// Requested collection name
        name: String,
    },

    /// The collection exists, but holds objects of another class
    #[error("objects in collection '{name}' are of class {found}, not {expected}")]
    ClassMismatch {
        /// Requested collection name
        name: String,
        /// Class requested by the caller
        expected: &'static str,
        /// Class of the objects actually stored
        found: &'static str,
    },
}

/// Anything that can hand out named collections of objects of type `T`
pub trait EventSource<T> {
    /// Retrieve the named collection, checking its declared element type
    fn collection(&self, name: &str) -> Result<&[T], CollectionError>;

    /// Primary vertex of the event
    fn vertex(&self) -> Vertex;
}

/// Densely indexed array of physics objects of a single kind
#[derive(Clone, Debug, PartialEq)]
pub enum Collection {
    /// Tracks or generator-level particles
    Particles(Vec<Particle>),

    /// Calorimeter clusters
    Clusters(Vec<Cluster>),

    /// Jets
    Jets(Vec<Jet>),
}
//
impl Collection {
    /// Name of the declared element type
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Particles(_) => Particle::CLASS_NAME,
            Self::Clusters(_) => Cluster::CLASS_NAME,
            Self::Jets(_) => Jet::CLASS_NAME,
        }
    }

    /// Number of objects in the collection
    pub fn len(&self) -> usize {
        match self {
            Self::Particles(v) => v.len(),
            Self::Clusters(v) => v.len(),
            Self::Jets(v) => v.len(),
        }
    }

    /// Truth that the collection holds no object
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Particle>> for Collection {
    fn from(v: Vec<Particle>) -> Self {
        Self::Particles(v)
    }
}

impl From<Vec<Cluster>> for Collection {
    fn from(v: Vec<Cluster>) -> Self {
        Self::Clusters(v)
    }
}

impl From<Vec<Jet>> for Collection {
    fn from(v: Vec<Jet>) -> Self {
        Self::Jets(v)
    }
}

/// Object kinds which can be viewed out of a [`Collection`]
pub trait FromCollection: Kinematics + Sized {
    /// Borrow the collection's objects, if they are of this kind
    fn view(collection: &Collection) -> Option<&[Self]>;
}

impl FromCollection for Particle {
    fn view(collection: &Collection) -> Option<&[Self]> {
        match collection {
            Collection::Particles(v) => Some(v),
            _ => None,
        }
    }
}

impl FromCollection for Cluster {
    fn view(collection: &Collection) -> Option<&[Self]> {
        match collection {
            Collection::Clusters(v) => Some(v),
            _ => None,
        }
    }
}

impl FromCollection for Jet {
    fn view(collection: &Collection) -> Option<&[Self]> {
        match collection {
            Collection::Jets(v) => Some(v),
            _ => None,
        }
    }
}

/// Storage for one input event
#[derive(Clone, Debug)]
pub struct Event {
    /// Named object collections
    collections: HashMap<String, Collection>,

    /// Primary vertex position
    vertex: Vertex,

    /// Number of tracks contributing to the primary vertex
    vertex_contributors: u32,

    /// Reaction plane angle estimate (rad)
    event_plane_angle: Float,

    /// Fired trigger classes
    trigger_mask: u32,
}
//
impl Event {
    /// Build an empty event around a primary vertex
    pub fn new(vertex: Vertex, vertex_contributors: u32) -> Self {
        Self {
            collections: HashMap::new(),
            vertex,
            vertex_contributors,
            event_plane_angle: 0.,
            trigger_mask: 0,
        }
    }

    /// Set the event plane angle
    pub fn with_event_plane(mut self, angle: Float) -> Self {
        self.event_plane_angle = angle;
        self
    }

    /// Set the fired trigger classes
    pub fn with_trigger_mask(mut self, mask: u32) -> Self {
        self.trigger_mask = mask;
        self
    }

    /// Store a named collection, replacing any previous one with that name
    pub fn insert(&mut self, name: impl Into<String>, collection: impl Into<Collection>) {
        self.collections.insert(name.into(), collection.into());
    }

    /// Access a collection by name, whatever its kind
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Primary vertex position
    pub fn vertex(&self) -> Vertex {
        self.vertex
    }

    /// Truth that the primary vertex was reconstructed from actual tracks
    pub fn has_good_vertex(&self) -> bool {
        self.vertex_contributors > 0
    }

    /// Event plane angle
    pub fn event_plane_angle(&self) -> Float {
        self.event_plane_angle
    }

    /// Fired trigger classes
    pub fn trigger_mask(&self) -> u32 {
        self.trigger_mask
    }

    /// Number of particles, summed over all particle collections
    pub fn multiplicity(&self) -> usize {
        self.collections
            .values()
            .filter_map(Particle::view)
            .map(<[Particle]>::len)
            .sum()
    }
}

impl Default for Event {
    /// Empty event without a reconstructed vertex
    fn default() -> Self {
        Self::new(Vertex::zeros(), 0)
    }
}

impl<T: FromCollection> EventSource<T> for Event {
    fn collection(&self, name: &str) -> Result<&[T], CollectionError> {
        let collection = self.get(name).ok_or_else(|| CollectionError::NotFound {
            name: name.to_owned(),
        })?;
        T::view(collection).ok_or_else(|| CollectionError::ClassMismatch {
            name: name.to_owned(),
            expected: T::CLASS_NAME,
            found: collection.class_name(),
        })
    }

    fn vertex(&self) -> Vertex {
        self.vertex
    }
}
