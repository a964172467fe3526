//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::{functions::phi_0_2pi, Float};
use nalgebra::SVector;
use prefix_num_ops::real::{cos, sin, sinh, sqrt};

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Primary vertex position of an event (cm)
pub type Vertex = SVector<Float, 3>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build a 4-momentum from detector-friendly coordinates
pub fn from_pt_eta_phi_m(pt: Float, eta: Float, phi: Float, mass: Float) -> Momentum {
    let px = pt * cos(phi);
    let py = pt * sin(phi);
    let pz = pt * sinh(eta);
    let p2 = px * px + py * py + pz * pz;
    Momentum::new(px, py, pz, sqrt(p2 + mass * mass))
}

/// Transverse momentum
pub fn pt(p: &Momentum) -> Float {
    p[X].hypot(p[Y])
}

/// Pseudorapidity
///
/// Objects along the beam axis get an infinite pseudorapidity with the sign of
/// their longitudinal momentum, and a momentum at rest gets zero.
///
pub fn eta(p: &Momentum) -> Float {
    let pt = pt(p);
    if pt > 0. {
        (p[Z] / pt).asinh()
    } else if p[Z] == 0. {
        0.
    } else {
        p[Z].signum() * Float::INFINITY
    }
}

/// Azimuthal angle, in [0, 2π)
pub fn phi(p: &Momentum) -> Float {
    phi_0_2pi(p[Y].atan2(p[X]))
}

/// Invariant mass (negative for space-like vectors)
pub fn mass(p: &Momentum) -> Float {
    let m2 = p[E] * p[E] - (p[X] * p[X] + p[Y] * p[Y] + p[Z] * p[Z]);
    m2.signum() * sqrt(m2.abs())
}
