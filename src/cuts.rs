//! Kinematic selection applied by containers to individual objects
//!
//! All ranges are inclusive at both ends. Eta and phi ranges are only active
//! when their lower bound is strictly below their upper bound, and phi is
//! compared after mapping into [0, 2π). MC label bounds apply to the absolute
//! value of the label and are disabled while negative. Values which are not
//! numbers never pass an active range.
//!
//! The energy cut applies to the 4-momentum built under the configured mass
//! hypothesis, the same one that containers hand out.

use crate::{
    kinematics::Kinematics,
    momentum::E,
    numeric::{functions::phi_0_2pi, Float},
    rejection::RejectionReason,
};

/// Inclusive range of accepted values
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CutRange {
    /// Lowest accepted value
    pub min: Float,

    /// Highest accepted value
    pub max: Float,
}
//
impl CutRange {
    /// Build a range (bounds are not checked for ordering)
    pub const fn new(min: Float, max: Float) -> Self {
        Self { min, max }
    }

    /// Truth that a value lies within the range, bounds included
    pub fn contains(&self, value: Float) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Truth that the range is wide enough to select anything
    pub fn is_active(&self) -> bool {
        self.min < self.max
    }
}

/// Kinematic quantities which can be cut on with a [`CutRange`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CutKind {
    /// Energy
    Energy,

    /// Transverse momentum
    Pt,

    /// Pseudorapidity
    Eta,

    /// Azimuthal angle
    Phi,
}

/// Selection criteria shared by all container kinds
#[derive(Clone, Debug, PartialEq)]
pub struct KinematicCuts {
    /// Energy range (GeV)
    pub energy: CutRange,

    /// Transverse momentum range (GeV/c)
    pub pt: CutRange,

    /// Pseudorapidity acceptance
    pub eta: CutRange,

    /// Azimuthal acceptance (rad, in [0, 2π) convention)
    pub phi: CutRange,

    /// Minimal absolute MC label (disabled if negative)
    pub min_mc_label: i32,

    /// Maximal absolute MC label (disabled if negative)
    pub max_mc_label: i32,

    /// Mass used to build 4-momenta (if < 0, use the object's own mass)
    pub mass_hypothesis: Float,

    /// Auxiliary flags of which at least one must be set (disabled if 0)
    pub bit_map: u32,
}
//
impl Default for KinematicCuts {
    fn default() -> Self {
        Self {
            energy: CutRange::new(0., 1000.),
            pt: CutRange::new(0., 1000.),
            eta: CutRange::new(-0.9, 0.9),
            phi: CutRange::new(-10., 10.),
            min_mc_label: -1,
            max_mc_label: -1,
            mass_hypothesis: -1.,
            bit_map: 0,
        }
    }
}
//
impl KinematicCuts {
    /// Range currently configured for some kinematic quantity
    pub fn range(&self, kind: CutKind) -> CutRange {
        match kind {
            CutKind::Energy => self.energy,
            CutKind::Pt => self.pt,
            CutKind::Eta => self.eta,
            CutKind::Phi => self.phi,
        }
    }

    /// Configure the range of some kinematic quantity
    pub fn set_range(&mut self, kind: CutKind, min: Float, max: Float) {
        let range = match kind {
            CutKind::Energy => &mut self.energy,
            CutKind::Pt => &mut self.pt,
            CutKind::Eta => &mut self.eta,
            CutKind::Phi => &mut self.phi,
        };
        *range = CutRange::new(min, max);
    }

    /// Evaluate every cut on an object, reporting all violated criteria
    pub fn apply<T: Kinematics + ?Sized>(&self, obj: &T) -> RejectionReason {
        let mut reason = RejectionReason::NONE;

        let energy = obj.four_momentum(self.mass_hypothesis)[E];
        if !self.energy.contains(energy) {
            reason |= RejectionReason::ENERGY_CUT;
        }
        if !self.pt.contains(obj.pt()) {
            reason |= RejectionReason::PT_CUT;
        }

        let eta_ok = !self.eta.is_active() || self.eta.contains(obj.eta());
        let phi_ok = !self.phi.is_active() || self.phi.contains(phi_0_2pi(obj.phi()));
        if !(eta_ok && phi_ok) {
            reason |= RejectionReason::ACCEPTANCE_CUT;
        }

        if !self.accepts_mc_label(obj.label()) {
            reason |= RejectionReason::MC_LABEL_CUT;
        }

        if self.bit_map != 0 && obj.flags() & self.bit_map == 0 {
            reason |= RejectionReason::BIT_MAP_CUT;
        }

        reason
    }

    /// Check a MC label against the configured label range
    fn accepts_mc_label(&self, label: i32) -> bool {
        let abs_label = label.unsigned_abs();
        let above_min = self.min_mc_label < 0 || abs_label >= self.min_mc_label.unsigned_abs();
        let below_max = self.max_mc_label < 0 || abs_label <= self.max_mc_label.unsigned_abs();
        above_min && below_max
    }
}
