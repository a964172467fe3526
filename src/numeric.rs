//! Basic numerical concepts used throughout the crate

#![allow(missing_docs)]

// Floating-point precision is configured here
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f32")]
pub use std::f32 as reals;
#[cfg(not(feature = "f32"))]
pub type Float = f64;
#[cfg(not(feature = "f32"))]
pub use std::f64 as reals;

/// Relative precision of quantities computed through a few operations
pub const TOLERANCE: Float = 1000. * Float::EPSILON;

/// Mathematical functions
pub mod functions {
    use super::{reals::consts::TAU, Float, TOLERANCE};

    /// Truth that two computed values agree within [`TOLERANCE`]
    ///
    /// The tolerance is relative for magnitudes above 1 and absolute below.
    ///
    pub fn approx_eq(a: Float, b: Float) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.)
    }

    /// Map an azimuthal angle into the [0, 2π) interval
    pub fn phi_0_2pi(phi: Float) -> Float {
        let wrapped = phi.rem_euclid(TAU);
        // rem_euclid may round up to exactly 2π for tiny negative inputs
        if wrapped >= TAU {
            0.
        } else {
            wrapped
        }
    }

}
