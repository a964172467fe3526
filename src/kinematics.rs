//! Capability interface shared by every kind of physics object that can be
//! stored in a container

use crate::{
    momentum::{self, Momentum},
    numeric::Float,
};

use std::cmp::Ordering;

/// Default distance below which two objects are considered identical
pub const SAME_OBJECT_DISTANCE: Float = 1e-4;

/// Kinematic and identity properties of a physics object
///
/// The cut evaluation of containers is written once against this interface,
/// so particles, calorimeter clusters and jets only need to describe how
/// their kinematics are computed.
///
pub trait Kinematics {
    /// Name of the declared element type of collections holding this object
    const CLASS_NAME: &'static str;

    /// Energy (GeV)
    fn e(&self) -> Float;

    /// Transverse momentum (GeV/c)
    fn pt(&self) -> Float;

    /// Pseudorapidity
    fn eta(&self) -> Float;

    /// Azimuthal angle (rad), in any 2π-periodic convention
    fn phi(&self) -> Float;

    /// MC generation label (negative for fake or unmatched objects)
    fn label(&self) -> i32;

    /// Native mass hypothesis (e.g. from PID), if available
    fn mass_hint(&self) -> Option<Float> {
        None
    }

    /// Auxiliary flag word, tested by the container's bit map cut
    fn flags(&self) -> u32 {
        0
    }

    /// 4-momentum of the object
    ///
    /// A non-negative `mass_hypothesis` overrides the object's own mass,
    /// otherwise the native mass is used when available and the object is
    /// treated as massless when it is not.
    ///
    fn four_momentum(&self, mass_hypothesis: Float) -> Momentum {
        let mass = if mass_hypothesis >= 0. {
            mass_hypothesis
        } else {
            self.mass_hint().unwrap_or(0.)
        };
        momentum::from_pt_eta_phi_m(self.pt(), self.eta(), self.phi(), mass)
    }

    /// Native ordering of objects within a collection (decreasing pt)
    fn compare(&self, other: &Self) -> Ordering {
        other.pt().total_cmp(&self.pt())
    }
}

/// Truth that two objects have the same kinematics within `dist`
///
/// Pt, eta and phi must each differ by no more than `dist`. Phi differences
/// are taken across the 2π boundary.
///
pub fn same_kinematics<A, B>(a: &A, b: &B, dist: Float) -> bool
where
    A: Kinematics + ?Sized,
    B: Kinematics + ?Sized,
{
    use crate::numeric::{functions::phi_0_2pi, reals::consts::TAU};
    let d_phi = {
        let d = (phi_0_2pi(a.phi()) - phi_0_2pi(b.phi())).abs();
        d.min(TAU - d)
    };
    let d_eta = (a.eta() - b.eta()).abs();
    let d_pt = (a.pt() - b.pt()).abs();
    d_phi <= dist && d_eta <= dist && d_pt <= dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        momentum,
        numeric::{functions::approx_eq, reals::consts::TAU},
        objects::{Cluster, Particle},
    };

    #[test]
    fn same_kinematics_wraps_around_phi() {
        let a = Particle::new(2., 0.5, 0.00001, 1, 1);
        let b = Particle::new(2., 0.5, TAU - 0.00001, 1, 2);
        assert!(same_kinematics(&a, &b, SAME_OBJECT_DISTANCE));

        let c = Particle::new(2.001, 0.5, 0.00001, 1, 1);
        assert!(!same_kinematics(&a, &c, SAME_OBJECT_DISTANCE));

        // Kinds can be mixed
        let cluster = Cluster::new(a.e(), 0.5, 0.00001, 1);
        assert!(same_kinematics(&a, &cluster, 1e-3));
    }

    #[test]
    fn mass_falls_back_to_the_native_hint_then_zero() {
        let pid = Particle::new(1., 0., 0., 1, 1).with_pid_mass(0.5);
        let plain = Particle::new(1., 0., 0., 1, 2);
        assert!(approx_eq(momentum::mass(&pid.four_momentum(-1.)), 0.5));
        // Massless along x, so E is exactly pt
        assert_eq!(plain.four_momentum(-1.)[momentum::E], 1.);
        assert!(approx_eq(momentum::mass(&plain.four_momentum(0.2)), 0.2));
    }

    #[test]
    fn native_order_is_decreasing_pt() {
        let soft = Particle::new(1., 0., 0., 1, 1);
        let hard = Particle::new(3., 0., 0., 1, 2);
        assert_eq!(hard.compare(&soft), Ordering::Less);
        assert_eq!(soft.compare(&hard), Ordering::Greater);
        assert_eq!(soft.compare(&soft), Ordering::Equal);
    }
}
