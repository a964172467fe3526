use emcal_containers::{
    numeric::Float, BindingState, Event, Kinematics, Particle, ParticleContainer,
};

fn event_with_labels(labels: &[i32]) -> Event {
    let mut event = Event::default();
    let particles = labels
        .iter()
        .enumerate()
        .map(|(i, &label)| Particle::new(1. + i as Float, 0., 1., 1, label))
        .collect::<Vec<_>>();
    event.insert("tracks", particles);
    event
}

#[test]
fn lookup_builds_the_map_once() {
    let event = event_with_labels(&[10, 20, 30]);
    let container = ParticleContainer::new("tracks", "tracks");
    let mut bound = container.bind(&event);

    assert_eq!(bound.state(), BindingState::Bound);
    assert_eq!(bound.index_from_label(20), Some(1));
    assert_eq!(bound.state(), BindingState::Indexed);
    assert_eq!(bound.index_from_label(20), Some(1));
    assert_eq!(bound.index_from_label(30), Some(2));
    assert_eq!(bound.index_from_label(40), None);
    assert_eq!(bound.state(), BindingState::Indexed);
}

#[test]
fn lookup_without_objects_finds_nothing() {
    let empty = event_with_labels(&[]);
    let container = ParticleContainer::new("tracks", "tracks");
    let mut bound = container.bind(&empty);
    assert_eq!(bound.index_from_label(1), None);

    let mut unbound = container.unbound();
    assert_eq!(unbound.index_from_label(1), None);
    assert_eq!(unbound.state(), BindingState::Unbound);
}

#[test]
fn first_object_with_a_label_wins() {
    let event = event_with_labels(&[7, 3, 7, -3]);
    let container = ParticleContainer::new("tracks", "tracks");
    let mut bound = container.bind(&event);
    assert_eq!(bound.index_from_label(7), Some(0));

    // Fake tracks keep their sign in the map
    assert_eq!(bound.index_from_label(3), Some(1));
    assert_eq!(bound.index_from_label(-3), Some(3));
}

#[test]
fn rebinding_discards_the_previous_map() {
    let first = event_with_labels(&[1, 2, 3]);
    let second = event_with_labels(&[3, 1]);
    let container = ParticleContainer::new("tracks", "tracks");
    let mut bound = container.bind(&first);

    assert_eq!(bound.index_from_label(3), Some(2));
    bound.rebind(&second);
    assert_eq!(bound.state(), BindingState::Bound);
    assert_eq!(bound.index_from_label(3), Some(0));
    assert_eq!(bound.index_from_label(2), None);
}

#[test]
fn sorting_invalidates_the_map() {
    // pt grows with the index, so sorting reverses the collection
    let event = event_with_labels(&[5, 6, 7]);
    let container = ParticleContainer::new("tracks", "tracks");
    let mut bound = container.bind(&event);

    assert_eq!(bound.index_from_label(5), Some(0));
    bound.sort();
    assert_eq!(bound.state(), BindingState::Bound);
    let index = bound.index_from_label(5);
    assert_eq!(index, Some(2));
    assert_eq!(index.and_then(|i| bound.get(i)).map(Kinematics::label), Some(5));
}
