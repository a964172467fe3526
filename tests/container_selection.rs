use emcal_containers::{
    momentum,
    numeric::{functions::approx_eq, Float},
    BindingState, Cluster, ClusterContainer, CutKind, Event, Jet, JetContainer, Kinematics,
    Particle, ParticleContainer, RejectionReason,
};

fn particle_with_pt(pt: Float, label: i32) -> Particle {
    Particle::new(pt, 0., 1., 1, label)
}

fn event_with_pts(pts: &[Float]) -> Event {
    let mut event = Event::default();
    let particles = pts
        .iter()
        .enumerate()
        .map(|(i, &pt)| particle_with_pt(pt, i as i32 + 1))
        .collect::<Vec<_>>();
    event.insert("tracks", particles);
    event
}

fn pt_container(min: Float, max: Float) -> ParticleContainer {
    let mut container = ParticleContainer::new("tracks", "tracks");
    container.set_pt_limits(min, max);
    container
}

#[test]
fn pt_window_accepts_both_endpoints() {
    let event = event_with_pts(&[0.5, 1.0, 5.0, 10.0, 15.0]);
    let container = pt_container(1.0, 10.0);
    let mut bound = container.bind(&event);
    assert_eq!(bound.entry_count(), 5);

    let expected = [false, true, true, true, false];
    for (index, &accepted) in expected.iter().enumerate() {
        assert_eq!(bound.accept_index(index), accepted, "index {index}");
        if accepted {
            assert_eq!(bound.rejection_reason(), RejectionReason::NONE);
        } else {
            assert_eq!(bound.rejection_reason(), RejectionReason::PT_CUT);
        }
    }
}

#[test]
fn rejection_mask_reports_every_failed_cut() {
    let mut event = Event::default();
    event.insert("tracks", vec![Particle::new(0.5, 2.0, 1., 1, 1)]);
    let container = pt_container(1.0, 10.0);
    let mut bound = container.bind(&event);

    assert!(!bound.accept_index(0));
    assert_eq!(
        bound.rejection_reason(),
        RejectionReason::PT_CUT | RejectionReason::ACCEPTANCE_CUT
    );
    assert_eq!(
        bound.test_rejection_reason(RejectionReason::ACCEPTANCE_CUT | RejectionReason::ENERGY_CUT),
        RejectionReason::ACCEPTANCE_CUT
    );
    assert_eq!(bound.rejection_reason().bit_position(), Some(1));
}

#[test]
fn rejection_mask_is_overwritten_by_each_call() {
    let event = event_with_pts(&[0.5, 5.0]);
    let container = pt_container(1.0, 10.0);
    let mut bound = container.bind(&event);

    assert!(!bound.accept_index(0));
    assert_eq!(bound.rejection_reason(), RejectionReason::PT_CUT);
    assert!(bound.accept_index(1));
    assert!(bound.rejection_reason().is_empty());
    assert!(!bound.accept_index(7));
    assert_eq!(bound.rejection_reason(), RejectionReason::NULL_OBJECT);
}

#[test]
fn out_of_range_and_unbound_indices_are_null_objects() {
    let event = event_with_pts(&[5.0]);
    let container = pt_container(1.0, 10.0);

    let mut bound = container.bind(&event);
    assert!(!bound.accept_index(1));
    assert_eq!(bound.rejection_reason(), RejectionReason::NULL_OBJECT);

    let mut unbound = container.unbound();
    assert_eq!(unbound.state(), BindingState::Unbound);
    assert_eq!(unbound.entry_count(), 0);
    assert!(!unbound.accept_index(0));
    assert_eq!(unbound.rejection_reason(), RejectionReason::NULL_OBJECT);
    assert_eq!(unbound.momentum_at(0), None);
}

#[test]
fn missing_collection_leaves_container_unbound() {
    let event = event_with_pts(&[5.0]);
    let mut container = pt_container(1.0, 10.0);
    container.set_array_name("no_such_tracks");
    let mut bound = container.bind(&event);
    assert_eq!(bound.state(), BindingState::Unbound);
    assert_eq!(bound.entry_count(), 0);
    assert!(!bound.accept_index(0));
    assert_eq!(bound.rejection_reason(), RejectionReason::NULL_OBJECT);
    assert_eq!(bound.next_momentum(), None);
}

#[test]
fn collection_of_another_class_is_not_bound() {
    let mut event = Event::default();
    event.insert("clusters", vec![Cluster::new(2., 0., 1., 1)]);
    let container = ParticleContainer::new("tracks", "clusters");
    let bound = container.bind(&event);
    assert_eq!(bound.state(), BindingState::Unbound);

    let clusters = ClusterContainer::new("clusters", "clusters");
    let bound = clusters.bind(&event);
    assert_eq!(bound.state(), BindingState::Bound);
    assert_eq!(bound.entry_count(), 1);
    assert_eq!(clusters.class_name(), "Cluster");
}

#[test]
fn external_objects_use_the_same_selection() {
    let event = Event::default();
    let container = pt_container(1.0, 10.0);
    let mut bound = container.bind(&event);

    assert!(bound.accept_object(&particle_with_pt(3., 1)));
    assert!(!bound.accept_object(&particle_with_pt(30., 1)));
    assert_eq!(bound.rejection_reason(), RejectionReason::PT_CUT);
}

#[test]
fn energy_cut_has_its_own_bit() {
    let mut event = Event::default();
    event.insert(
        "clusters",
        vec![Cluster::new(0.2, 0., 1., 1), Cluster::new(3., 0., 1., 2)],
    );
    let mut container = ClusterContainer::new("clusters", "clusters");
    container.set_e_limits(0.3, 100.);
    let mut bound = container.bind(&event);
    assert!(!bound.accept_index(0));
    assert_eq!(bound.rejection_reason(), RejectionReason::ENERGY_CUT);
    assert!(bound.accept_index(1));
}

#[test]
fn label_and_bit_map_cuts() {
    let mut event = Event::default();
    event.insert(
        "tracks",
        vec![
            Particle::new(2., 0., 1., 1, -3).with_flags(0b01),
            Particle::new(2., 0., 1., 1, 50).with_flags(0b10),
        ],
    );
    let mut container = ParticleContainer::new("tracks", "tracks");
    container.set_mc_label_range(0, 10);
    container.set_bit_map(0b10);
    let mut bound = container.bind(&event);

    assert!(!bound.accept_index(0));
    assert_eq!(bound.rejection_reason(), RejectionReason::BIT_MAP_CUT);
    assert!(!bound.accept_index(1));
    assert_eq!(bound.rejection_reason(), RejectionReason::MC_LABEL_CUT);
}

#[test]
fn setters_store_bounds_without_validation() {
    let mut container = ParticleContainer::new("tracks", "tracks");
    container.set_cut_range(CutKind::Pt, 5., 1.);
    let range = container.cut_range(CutKind::Pt);
    assert_eq!((range.min, range.max), (5., 1.));

    container.set_min_e(2.);
    container.set_max_e(3.);
    let energy = container.cut_range(CutKind::Energy);
    assert_eq!((energy.min, energy.max), (2., 3.));

    let event = event_with_pts(&[3.]);
    let mut bound = container.bind(&event);
    assert!(!bound.accept_index(0));
    assert!(bound.rejection_reason().contains(RejectionReason::PT_CUT));
}

#[test]
fn momenta_follow_the_mass_hypothesis() {
    let mut event = Event::default();
    event.insert(
        "tracks",
        vec![
            Particle::new(2., 0.3, 1., 1, 1).with_pid_mass(0.938),
            Particle::new(2., 0.3, 1., 1, 2),
        ],
    );
    let mut container = ParticleContainer::new("tracks", "tracks");
    {
        let bound = container.bind(&event);
        let with_pid = bound.momentum_at(0).unwrap();
        let without_pid = bound.momentum_at(1).unwrap();
        assert!(approx_eq(momentum::mass(&with_pid), 0.938));
        assert!(approx_eq(without_pid[momentum::E], bound.get(1).unwrap().e()));
        assert!(approx_eq(momentum::pt(&with_pid), 2.));
    }

    container.set_mass_hypothesis(0.13957);
    let bound = container.bind(&event);
    let forced = bound.momentum_at(0).unwrap();
    assert!(approx_eq(momentum::mass(&forced), 0.13957));
}

#[test]
fn energy_window_sees_the_mass_hypothesis() {
    let mut event = Event::default();
    event.insert("tracks", vec![Particle::new(1., 0., 0., 1, 1)]);
    let mut container = ParticleContainer::new("tracks", "tracks");
    container.set_e_limits(1.2, 100.);
    {
        // Massless, so E = 1 falls below the window
        let mut bound = container.bind(&event);
        assert_eq!(bound.accepted_momentum_at(0), None);
        assert_eq!(bound.rejection_reason(), RejectionReason::ENERGY_CUT);
    }

    container.set_mass_hypothesis(0.938);
    let mut bound = container.bind(&event);
    let p = bound.accepted_momentum_at(0).unwrap();
    assert!(bound.rejection_reason().is_empty());
    let expected_e: Float = 1. + 0.938 * 0.938;
    assert!(approx_eq(p[momentum::E], expected_e.sqrt()));
    assert!(container.cut_range(CutKind::Energy).contains(p[momentum::E]));
}

#[test]
fn accepted_momentum_requires_acceptance() {
    let event = event_with_pts(&[0.5, 5.0]);
    let container = pt_container(1.0, 10.0);
    let mut bound = container.bind(&event);
    assert_eq!(bound.accepted_momentum_at(0), None);
    assert_eq!(bound.rejection_reason(), RejectionReason::PT_CUT);
    let p = bound.accepted_momentum_at(1).unwrap();
    assert!(approx_eq(momentum::pt(&p), 5.));
}

#[test]
fn vertex_follows_the_bound_event() {
    let event = Event::new(momentum::Vertex::new(0.1, -0.2, 4.), 10);
    let container = ParticleContainer::new("tracks", "tracks");
    let bound = container.bind(&event);
    assert_eq!(bound.vertex()[2], 4.);
}

#[test]
fn jets_are_selected_like_any_other_object() {
    let mut event = Event::default();
    let jet = |pt: Float, eta: Float| Jet {
        pt,
        eta,
        phi: 2.,
        mass: 5.,
        area: 0.5,
        label: 1,
    };
    event.insert("jets", vec![jet(25., 0.1), jet(8., 0.1), jet(40., 0.8)]);
    let mut container = JetContainer::new("jets", "jets");
    container.set_pt_limits(10., 500.);
    container.set_eta_limits(-0.5, 0.5);
    let mut bound = container.bind(&event);

    assert_eq!(bound.accepted_indices(), vec![0]);
    let p = bound.momentum_at(0).unwrap();
    assert!(approx_eq(momentum::mass(&p), 5.));
    assert!(approx_eq(p[momentum::E], bound.get(0).unwrap().e()));
}
