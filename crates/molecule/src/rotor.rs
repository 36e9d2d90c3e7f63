use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{InertiaTol, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotor {
    Atom,
    Linear,
    SphericalTop,
    OblateSymmTop,
    ProlateSymmTop,
    AsymmTop,
}

impl Rotor {
    /// classify the molecular rotor from the principal moments of inertia in
    /// `moms`, sorted in ascending order. moments below `tol.zero_moment` are
    /// zero, and two moments are equal when their ratio differs from one by
    /// less than `tol.equal_moment`
    pub fn classify(moms: &Vec3, tol: &InertiaTol) -> Self {
        let equal = |a: f64, b: f64| (a / b - 1.0).abs() < tol.equal_moment;
        if moms.iter().all(|&m| m < tol.zero_moment) {
            return Rotor::Atom;
        }
        if moms[0] < tol.zero_moment && equal(moms[2], moms[1]) {
            return Rotor::Linear;
        }
        match (equal(moms[1], moms[0]), equal(moms[2], moms[1])) {
            (true, true) => Rotor::SphericalTop,
            (true, false) => Rotor::OblateSymmTop,
            (false, true) => Rotor::ProlateSymmTop,
            (false, false) => Rotor::AsymmTop,
        }
    }

    /// the number of rotational degrees of freedom
    pub const fn rotations(&self) -> usize {
        match self {
            Rotor::Atom => 0,
            Rotor::Linear => 2,
            _ => 3,
        }
    }

    /// the number of translational and rotational degrees of freedom, which
    /// must be removed from a Hessian before extracting vibrations
    pub const fn trivial_modes(&self) -> usize {
        3 + self.rotations()
    }

    /// Report whether or not `self` is either an `OblateSymmTop` or a
    /// `ProlateSymmTop`
    pub fn is_sym_top(&self) -> bool {
        matches!(self, Self::OblateSymmTop | Self::ProlateSymmTop)
    }
}

impl Display for Rotor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rotor::Atom => "an atom",
                Rotor::Linear => "linear",
                Rotor::SphericalTop => "a spherical top",
                Rotor::OblateSymmTop => "an oblate symmetric top",
                Rotor::ProlateSymmTop => "a prolate symmetric top",
                Rotor::AsymmTop => "an asymmetric top",
            }
        )
    }
}
