//! Concrete physics objects: tracks/particles, calorimeter clusters and jets

use crate::{
    kinematics::{same_kinematics, Kinematics},
    numeric::Float,
};

use prefix_num_ops::real::{cosh, sinh, sqrt};

/// Charged pion mass (GeV/c²), the usual PID-less track mass hypothesis
pub const PION_MASS: Float = 0.13957;

/// Reconstructed track or generator-level particle
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Transverse momentum (GeV/c)
    pub pt: Float,

    /// Pseudorapidity
    pub eta: Float,

    /// Azimuthal angle (rad)
    pub phi: Float,

    /// Mass from particle identification, if any
    pub pid_mass: Option<Float>,

    /// Electric charge in units of e
    pub charge: i8,

    /// MC generation label
    pub label: i32,

    /// Auxiliary flags (track quality bits, ...)
    pub flags: u32,
}
//
impl Particle {
    /// Build an unidentified, unflagged particle
    pub fn new(pt: Float, eta: Float, phi: Float, charge: i8, label: i32) -> Self {
        Self {
            pt,
            eta,
            phi,
            pid_mass: None,
            charge,
            label,
            flags: 0,
        }
    }

    /// Attach a PID mass hypothesis
    pub fn with_pid_mass(mut self, mass: Float) -> Self {
        self.pid_mass = Some(mass);
        self
    }

    /// Attach auxiliary flags
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Truth that two particles are the same within `dist`
    ///
    /// Unlike [`same_kinematics`], this also requires the charges to match.
    ///
    pub fn same_particle(&self, other: &Self, dist: Float) -> bool {
        self.charge == other.charge && same_kinematics(self, other, dist)
    }
}

impl Kinematics for Particle {
    const CLASS_NAME: &'static str = "Particle";

    fn e(&self) -> Float {
        let p = self.pt * cosh(self.eta);
        let m = self.pid_mass.unwrap_or(0.);
        sqrt(p * p + m * m)
    }

    fn pt(&self) -> Float {
        self.pt
    }

    fn eta(&self) -> Float {
        self.eta
    }

    fn phi(&self) -> Float {
        self.phi
    }

    fn label(&self) -> i32 {
        self.label
    }

    fn mass_hint(&self) -> Option<Float> {
        self.pid_mass
    }

    fn flags(&self) -> u32 {
        self.flags
    }
}

/// Calorimeter cluster, seen as a massless object pointing to the vertex
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    /// Deposited energy (GeV)
    pub energy: Float,

    /// Pseudorapidity of the cluster position as seen from the vertex
    pub eta: Float,

    /// Azimuthal angle of the cluster position (rad)
    pub phi: Float,

    /// MC label of the leading contributing particle
    pub label: i32,

    /// Auxiliary flags
    pub flags: u32,
}
//
impl Cluster {
    /// Build an unflagged cluster
    pub fn new(energy: Float, eta: Float, phi: Float, label: i32) -> Self {
        Self {
            energy,
            eta,
            phi,
            label,
            flags: 0,
        }
    }
}

impl Kinematics for Cluster {
    const CLASS_NAME: &'static str = "Cluster";

    fn e(&self) -> Float {
        self.energy
    }

    fn pt(&self) -> Float {
        self.energy / cosh(self.eta)
    }

    fn eta(&self) -> Float {
        self.eta
    }

    fn phi(&self) -> Float {
        self.phi
    }

    fn label(&self) -> i32 {
        self.label
    }

    fn mass_hint(&self) -> Option<Float> {
        Some(0.)
    }

    fn flags(&self) -> u32 {
        self.flags
    }
}

/// Reconstructed jet
#[derive(Clone, Debug, PartialEq)]
pub struct Jet {
    /// Transverse momentum (GeV/c)
    pub pt: Float,

    /// Pseudorapidity of the jet axis
    pub eta: Float,

    /// Azimuthal angle of the jet axis (rad)
    pub phi: Float,

    /// Jet mass (GeV/c²)
    pub mass: Float,

    /// Jet area
    pub area: Float,

    /// MC label (matched generator-level jet)
    pub label: i32,
}

impl Kinematics for Jet {
    const CLASS_NAME: &'static str = "Jet";

    fn e(&self) -> Float {
        let pz = self.pt * sinh(self.eta);
        sqrt(self.pt * self.pt + pz * pz + self.mass * self.mass)
    }

    fn pt(&self) -> Float {
        self.pt
    }

    fn eta(&self) -> Float {
        self.eta
    }

    fn phi(&self) -> Float {
        self.phi
    }

    fn label(&self) -> i32 {
        self.label
    }

    fn mass_hint(&self) -> Option<Float> {
        Some(self.mass)
    }
}
