//! Selection containers around the object collections of an event
//!
//! A [`Container`] holds the long-lived part of a selection: its name, the
//! name of the collection it reads from and the cuts to apply. Binding it to
//! an event yields a [`BoundContainer`], which borrows the event's collection
//! and carries everything that only makes sense for that one event: the
//! iteration cursor, the label to index map and the rejection reason of the
//! last acceptance test. Since the bound view borrows the event, it can never
//! outlive the storage it points into.
//!
//! None of the per-object operations can fail. Missing collections, indices
//! past the end of the collection and unknown labels are everyday outcomes of
//! a selection loop, and are reported as `false` or `None` together with the
//! appropriate rejection bits.

use crate::{
    cuts::{CutKind, CutRange, KinematicCuts},
    event::EventSource,
    kinematics::Kinematics,
    momentum::{Momentum, Vertex},
    numeric::Float,
    objects::{Cluster, Jet, Particle},
    rejection::RejectionReason,
};

use std::{collections::HashMap, marker::PhantomData, mem};
use tracing::{debug, warn};

/// Container of tracks or generator-level particles
pub type ParticleContainer = Container<Particle>;

/// Container of calorimeter clusters
pub type ClusterContainer = Container<Cluster>;

/// Container of jets
pub type JetContainer = Container<Jet>;

/// Configuration of a selection over one named collection
#[derive(Clone, Debug)]
pub struct Container<T> {
    /// Name of the container
    name: String,

    /// Name of the collection in the input event
    array_name: String,

    /// Whether the collection holds generator-level objects
    is_particle_level: bool,

    /// Selection criteria
    cuts: KinematicCuts,

    /// Containers only ever refer to objects of type T
    kind: PhantomData<fn() -> T>,
}
//
impl<T: Kinematics> Container<T> {
    /// Set up a container with default cuts
    pub fn new(name: impl Into<String>, array_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            array_name: array_name.into(),
            is_particle_level: false,
            cuts: KinematicCuts::default(),
            kind: PhantomData,
        }
    }

    // ### IDENTITY ###

    /// Name of the container
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the container
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name of the collection which the container reads
    pub fn array_name(&self) -> &str {
        &self.array_name
    }

    /// Read another collection
    pub fn set_array_name(&mut self, array_name: impl Into<String>) {
        self.array_name = array_name.into();
    }

    /// Declared element type of the collection
    pub fn class_name(&self) -> &'static str {
        T::CLASS_NAME
    }

    /// Whether the collection holds generator-level objects
    pub fn is_particle_level(&self) -> bool {
        self.is_particle_level
    }

    /// Flag the collection as holding generator-level objects
    pub fn set_is_particle_level(&mut self, is_particle_level: bool) {
        self.is_particle_level = is_particle_level;
    }

    // ### CUT CONFIGURATION ###

    /// Current selection criteria
    pub fn cuts(&self) -> &KinematicCuts {
        &self.cuts
    }

    /// Replace all selection criteria at once
    pub fn set_cuts(&mut self, cuts: KinematicCuts) {
        self.cuts = cuts;
    }

    /// Configure the accepted range of some kinematic quantity
    ///
    /// Bounds are stored as given. Making sure that `min <= max` is left to
    /// the caller, and for eta and phi an empty range disables the cut.
    ///
    pub fn set_cut_range(&mut self, kind: CutKind, min: Float, max: Float) {
        self.cuts.set_range(kind, min, max);
    }

    /// Accepted range of some kinematic quantity
    pub fn cut_range(&self, kind: CutKind) -> CutRange {
        self.cuts.range(kind)
    }

    /// Set the accepted energy range
    pub fn set_e_limits(&mut self, min: Float, max: Float) {
        self.set_cut_range(CutKind::Energy, min, max);
    }

    /// Set the minimal accepted energy
    pub fn set_min_e(&mut self, min: Float) {
        self.cuts.energy.min = min;
    }

    /// Set the maximal accepted energy
    pub fn set_max_e(&mut self, max: Float) {
        self.cuts.energy.max = max;
    }

    /// Set the accepted transverse momentum range
    pub fn set_pt_limits(&mut self, min: Float, max: Float) {
        self.set_cut_range(CutKind::Pt, min, max);
    }

    /// Set the minimal accepted transverse momentum
    pub fn set_min_pt(&mut self, min: Float) {
        self.cuts.pt.min = min;
    }

    /// Set the maximal accepted transverse momentum
    pub fn set_max_pt(&mut self, max: Float) {
        self.cuts.pt.max = max;
    }

    /// Set the pseudorapidity acceptance
    pub fn set_eta_limits(&mut self, min: Float, max: Float) {
        self.set_cut_range(CutKind::Eta, min, max);
    }

    /// Set the azimuthal acceptance, in [0, 2π) convention
    pub fn set_phi_limits(&mut self, min: Float, max: Float) {
        self.set_cut_range(CutKind::Phi, min, max);
    }

    /// Set the minimal absolute MC label (negative to disable)
    pub fn set_min_mc_label(&mut self, min: i32) {
        self.cuts.min_mc_label = min;
    }

    /// Set the maximal absolute MC label (negative to disable)
    pub fn set_max_mc_label(&mut self, max: i32) {
        self.cuts.max_mc_label = max;
    }

    /// Set the accepted absolute MC label range
    pub fn set_mc_label_range(&mut self, min: i32, max: i32) {
        self.set_min_mc_label(min);
        self.set_max_mc_label(max);
    }

    /// Set the mass used to build 4-momenta (negative to use object masses)
    pub fn set_mass_hypothesis(&mut self, mass: Float) {
        self.cuts.mass_hypothesis = mass;
    }

    /// Set the auxiliary flags of which accepted objects must carry one
    pub fn set_bit_map(&mut self, bit_map: u32) {
        self.cuts.bit_map = bit_map;
    }

    // ### EVALUATION ###

    /// Evaluate all cuts on an object
    pub fn apply_cuts(&self, obj: &T) -> RejectionReason {
        self.cuts.apply(obj)
    }

    /// Build the 4-momentum of an object under the configured mass hypothesis
    pub fn momentum_of(&self, obj: &T) -> Momentum {
        obj.four_momentum(self.cuts.mass_hypothesis)
    }

    // ### BINDING ###

    /// A view of the container which is not bound to any event
    pub fn unbound(&self) -> BoundContainer<'_, T> {
        BoundContainer {
            container: self,
            binding: Binding::Unbound,
            cursor: None,
            vertex: Vertex::zeros(),
            rejection_reason: RejectionReason::NONE,
        }
    }

    /// Bind the container to the matching collection of an event
    ///
    /// If the event has no suitable collection, a warning is logged and the
    /// returned view behaves as an empty, unbound container.
    ///
    pub fn bind<'a, S>(&'a self, event: &'a S) -> BoundContainer<'a, T>
    where
        S: EventSource<T> + ?Sized,
    {
        let mut bound = self.unbound();
        bound.rebind(event);
        bound
    }
}

/// Public summary of the binding state of a [`BoundContainer`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingState {
    /// No collection is available
    Unbound,

    /// Bound to a collection, label lookups have not been needed yet
    Bound,

    /// Bound to a collection, and the label to index map has been built
    Indexed,
}

/// Borrowed collection, possibly reordered
struct View<'a, T> {
    /// Objects, in their storage order
    array: &'a [T],

    /// Sorted iteration order, as indices into `array`
    order: Option<Vec<usize>>,
}
//
impl<'a, T> View<'a, T> {
    fn new(array: &'a [T]) -> Self {
        Self { array, order: None }
    }

    fn len(&self) -> usize {
        self.array.len()
    }

    fn get(&self, index: usize) -> Option<&'a T> {
        let array = self.array;
        match &self.order {
            Some(order) => order.get(index).and_then(|&storage| array.get(storage)),
            None => array.get(index),
        }
    }
}

/// Binding of a container to the collection of the current event
enum Binding<'a, T> {
    Unbound,
    Bound(View<'a, T>),
    Indexed(View<'a, T>, HashMap<i32, usize>),
}
//
impl<'a, T> Binding<'a, T> {
    fn view(&self) -> Option<&View<'a, T>> {
        match self {
            Self::Unbound => None,
            Self::Bound(view) | Self::Indexed(view, _) => Some(view),
        }
    }
}

/// A container bound to the collection of the event being processed
pub struct BoundContainer<'a, T> {
    /// Configuration of the selection
    container: &'a Container<T>,

    /// Collection of the current event
    binding: Binding<'a, T>,

    /// Index of the last object visited by the automatic loops
    cursor: Option<usize>,

    /// Primary vertex of the current event
    vertex: Vertex,

    /// Why the last object submitted to an acceptance test was rejected
    rejection_reason: RejectionReason,
}
//
impl<'a, T: Kinematics> BoundContainer<'a, T> {
    // ### BINDING ###

    /// Switch to the collection of another event
    ///
    /// The iteration cursor and the rejection reason are reset, and the label
    /// map of the previous event is discarded.
    ///
    pub fn rebind<S>(&mut self, event: &'a S)
    where
        S: EventSource<T> + ?Sized,
    {
        self.cursor = None;
        self.rejection_reason = RejectionReason::NONE;
        self.vertex = event.vertex();
        self.binding = match event.collection(&self.container.array_name) {
            Ok(array) => Binding::Bound(View::new(array)),
            Err(err) => {
                warn!(container = %self.container.name, %err, "Could not bind container");
                Binding::Unbound
            }
        };
    }

    /// Release the collection of the current event
    pub fn unbind(&mut self) {
        self.binding = Binding::Unbound;
        self.cursor = None;
    }

    /// Current binding state
    pub fn state(&self) -> BindingState {
        match self.binding {
            Binding::Unbound => BindingState::Unbound,
            Binding::Bound(_) => BindingState::Bound,
            Binding::Indexed(..) => BindingState::Indexed,
        }
    }

    /// Configuration of the selection
    pub fn container(&self) -> &'a Container<T> {
        self.container
    }

    /// Primary vertex of the current event
    pub fn vertex(&self) -> Vertex {
        self.vertex
    }

    /// Number of objects in the bound collection (0 if unbound)
    pub fn entry_count(&self) -> usize {
        self.binding.view().map_or(0, View::len)
    }

    /// Object at some index, if any
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.binding.view().and_then(|view| view.get(index))
    }

    // ### ACCEPTANCE ###

    /// Check whether the object at some index passes all cuts
    ///
    /// Absent objects are rejected with [`RejectionReason::NULL_OBJECT`] only.
    ///
    pub fn accept_index(&mut self, index: usize) -> bool {
        match self.get(index) {
            Some(obj) => self.accept_object(obj),
            None => {
                self.rejection_reason = RejectionReason::NULL_OBJECT;
                false
            }
        }
    }

    /// Check whether an arbitrary object passes all cuts
    pub fn accept_object(&mut self, obj: &T) -> bool {
        self.rejection_reason = self.container.apply_cuts(obj);
        self.rejection_reason.is_empty()
    }

    /// Every reason why the last tested object was rejected
    pub fn rejection_reason(&self) -> RejectionReason {
        self.rejection_reason
    }

    /// Reasons of the last rejection which are also in `mask`
    pub fn test_rejection_reason(&self, mask: RejectionReason) -> RejectionReason {
        self.rejection_reason.test(mask)
    }

    // ### MOMENTA ###

    /// 4-momentum of the object at some index
    pub fn momentum_at(&self, index: usize) -> Option<Momentum> {
        self.get(index).map(|obj| self.container.momentum_of(obj))
    }

    /// 4-momentum of the object at some index, if it passes all cuts
    pub fn accepted_momentum_at(&mut self, index: usize) -> Option<Momentum> {
        if self.accept_index(index) {
            self.momentum_at(index)
        } else {
            None
        }
    }

    // ### AUTOMATIC LOOPS ###

    /// Index of the last object visited by the automatic loops
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Rearm the automatic loops
    ///
    /// With `None`, the next loop step visits index 0. With `Some(i)`, it
    /// visits index `i + 1`.
    ///
    pub fn reset_cursor(&mut self, start: Option<usize>) {
        self.cursor = start;
    }

    /// Move the cursor to the next index, if there is one
    fn advance(&mut self) -> Option<usize> {
        let next = self.cursor.map_or(0, |current| current.saturating_add(1));
        if next < self.entry_count() {
            self.cursor = Some(next);
            Some(next)
        } else {
            None
        }
    }

    /// 4-momentum of the next object, or None once the collection is exhausted
    pub fn next_momentum(&mut self) -> Option<Momentum> {
        let index = self.advance()?;
        self.momentum_at(index)
    }

    /// 4-momentum of the next accepted object, or None once exhausted
    pub fn next_accepted_momentum(&mut self) -> Option<Momentum> {
        loop {
            let index = self.advance()?;
            if let Some(momentum) = self.accepted_momentum_at(index) {
                return Some(momentum);
            }
        }
    }

    /// Indices of all accepted objects, in collection order
    pub fn accepted_indices(&mut self) -> Vec<usize> {
        (0..self.entry_count())
            .filter(|&index| self.accept_index(index))
            .collect()
    }

    // ### LABEL LOOKUP ###

    /// Index of the first object carrying some MC label
    ///
    /// The label map is built on first use after each binding or sort, and
    /// reused by later lookups.
    ///
    pub fn index_from_label(&mut self, label: i32) -> Option<usize> {
        self.binding = match mem::replace(&mut self.binding, Binding::Unbound) {
            Binding::Bound(view) => {
                let labels = Self::build_label_map(&view);
                debug!(
                    container = %self.container.name,
                    entries = labels.len(),
                    "Built label map"
                );
                Binding::Indexed(view, labels)
            }
            other => other,
        };
        match &self.binding {
            Binding::Indexed(_, labels) => labels.get(&label).copied(),
            _ => None,
        }
    }

    /// Map labels to the index of the first object which carries them
    fn build_label_map(view: &View<'a, T>) -> HashMap<i32, usize> {
        let mut labels = HashMap::with_capacity(view.len());
        for index in 0..view.len() {
            if let Some(obj) = view.get(index) {
                labels.entry(obj.label()).or_insert(index);
            }
        }
        labels
    }

    // ### ORDERING ###

    /// Reorder the collection using the objects' native ordering
    ///
    /// Indices obtained before the sort, including those of the label map,
    /// are invalidated. The event's own storage is left untouched.
    ///
    pub fn sort(&mut self) {
        self.binding = match mem::replace(&mut self.binding, Binding::Unbound) {
            Binding::Bound(view) | Binding::Indexed(view, _) => {
                let array = view.array;
                let mut order = (0..array.len()).collect::<Vec<_>>();
                order.sort_by(|&a, &b| array[a].compare(&array[b]));
                debug!(container = %self.container.name, "Sorted collection");
                Binding::Bound(View {
                    array,
                    order: Some(order),
                })
            }
            Binding::Unbound => Binding::Unbound,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::Event, numeric::functions::approx_eq};

    #[test]
    fn identity_is_configurable() {
        let mut container = ParticleContainer::new("tracks", "PicoTracks");
        assert_eq!(container.class_name(), "Particle");
        assert!(!container.is_particle_level());

        container.set_name("mc");
        container.set_array_name("MCParticles");
        container.set_is_particle_level(true);
        assert_eq!(container.name(), "mc");
        assert_eq!(container.array_name(), "MCParticles");
        assert!(container.is_particle_level());

        let event = Event::default();
        let bound = container.bind(&event);
        assert_eq!(bound.container().name(), "mc");
        assert_eq!(bound.state(), BindingState::Unbound);
    }

    #[test]
    fn whole_cut_sets_can_be_swapped() {
        let mut cuts = KinematicCuts::default();
        cuts.pt = CutRange::new(5., 6.);
        let mut container = ClusterContainer::new("clusters", "clusters");
        container.set_cuts(cuts.clone());
        assert_eq!(container.cuts(), &cuts);

        let cluster = Cluster::new(1., 0., 1., 1);
        assert_eq!(container.apply_cuts(&cluster), RejectionReason::PT_CUT);
        let momentum = container.momentum_of(&cluster);
        assert!(approx_eq(momentum[crate::momentum::E], 1.));
    }
}
