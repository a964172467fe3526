//! Bit flags describing why an object was rejected by a container
//!
//! A single selection call may violate several cuts at once, so every failed
//! criterion owns one bit and the rejection reason of a call is the bitwise OR
//! of all of them. Bit positions follow the framework's numbering, which keeps
//! room for the kind-specific cuts of particle, cluster and jet containers.

use std::{
    fmt::{self, Display},
    ops::{BitAnd, BitOr, BitOrAssign},
};

/// Set of reasons why an object was rejected
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RejectionReason(u32);
//
impl RejectionReason {
    /// The object was accepted
    pub const NONE: Self = Self(0);

    /// Object is absent (unbound container, out-of-range index)
    pub const NULL_OBJECT: Self = Self(1 << 0);

    /// Transverse momentum cut
    pub const PT_CUT: Self = Self(1 << 1);

    /// Object not in acceptance in eta and/or phi
    pub const ACCEPTANCE_CUT: Self = Self(1 << 2);

    /// Invalid MC label
    pub const MC_LABEL_CUT: Self = Self(1 << 3);

    /// None of the requested auxiliary flag bits is set
    pub const BIT_MAP_CUT: Self = Self(1 << 4);

    /// Energy cut
    pub const ENERGY_CUT: Self = Self(1 << 15);

    /// Every reason known to the base container, with a short name
    pub const ALL: [(Self, &'static str); 6] = [
        (Self::NULL_OBJECT, "null object"),
        (Self::PT_CUT, "pt"),
        (Self::ACCEPTANCE_CUT, "acceptance"),
        (Self::MC_LABEL_CUT, "MC label"),
        (Self::BIT_MAP_CUT, "bit map"),
        (Self::ENERGY_CUT, "energy"),
    ];

    /// Build a rejection reason from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Truth that no reason is set, i.e. the object was accepted
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Truth that all bits of `other` are set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Keep only the reasons which are also in `mask`
    pub const fn test(self, mask: Self) -> Self {
        Self(self.0 & mask.0)
    }

    /// Add a reason to the set
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Position of the lowest set bit, if any
    pub fn bit_position(self) -> Option<u16> {
        (!self.is_empty()).then(|| self.0.trailing_zeros() as u16)
    }

    /// Iterate over the individual reasons which are set
    pub fn iter(self) -> impl Iterator<Item = Self> {
        (0..u32::BITS)
            .map(|bit| Self(1 << bit))
            .filter(move |&flag| self.contains(flag))
    }
}

impl BitOr for RejectionReason {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RejectionReason {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs)
    }
}

impl BitAnd for RejectionReason {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.test(rhs)
    }
}

impl Display for RejectionReason {
    /// List the names of the set reasons, separated by '|'
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(fmt, "accepted");
        }
        let mut first = true;
        for flag in self.iter() {
            if !first {
                write!(fmt, "|")?;
            }
            first = false;
            match Self::ALL.iter().find(|(known, _)| *known == flag) {
                Some((_, name)) => write!(fmt, "{name}")?,
                None => write!(fmt, "bit {}", flag.0.trailing_zeros())?,
            }
        }
        Ok(())
    }
}
