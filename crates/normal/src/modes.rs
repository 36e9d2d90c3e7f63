use std::fmt::Display;

use molecule::Rotor;
use serde::{Deserialize, Serialize};
use units::{FreqUnit, ME_PER_AMU};

use crate::{Dmat, Dvec};

/// the normal modes of a purified, mass-weighted Hessian, sorted in ascending
/// order by eigenvalue. Negative eigenvalues give negative (imaginary)
/// frequencies
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurifiedModes {
    /// eigenvalues of the purified mass-weighted Hessian in Eh/(u·B²)
    pub eigvals: Dvec,

    /// frequencies in `freq_unit`
    pub freqs: Dvec,

    pub freq_unit: FreqUnit,

    /// orthonormal mass-weighted normal coordinates as columns
    pub lxm: Dmat,

    /// Cartesian displacements for each mode, M^-½ `lxm`, in u^-½
    pub lx: Dmat,

    /// whether each mode is a translation or rotation
    pub trivial: Vec<bool>,

    /// reduced mass of each mode in u
    pub reduced_masses: Dvec,

    pub rotor: Rotor,
}

/// convert an eigenvalue of the mass-weighted Hessian in Eh/(u·B²) to a
/// frequency in `unit`, keeping the sign of the eigenvalue
pub fn eigval_to_freq(eigval: f64, unit: FreqUnit) -> f64 {
    let omega = (eigval.abs() / ME_PER_AMU).sqrt();
    unit.from_angular(omega).copysign(eigval)
}

impl PurifiedModes {
    /// the total number of modes, 3N
    pub fn len(&self) -> usize {
        self.eigvals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigvals.is_empty()
    }

    pub fn n_trivial(&self) -> usize {
        self.trivial.iter().filter(|&&t| t).count()
    }

    /// indices of the vibrational modes, in ascending order of frequency
    pub fn vibrational(&self) -> impl Iterator<Item = usize> + '_ {
        self.trivial
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| (!t).then_some(i))
    }

    /// the frequencies of the vibrational modes in [PurifiedModes::freq_unit]
    pub fn vib_freqs(&self) -> Vec<f64> {
        self.vibrational().map(|i| self.freqs[i]).collect()
    }

    /// indices of the vibrational modes with imaginary frequencies
    pub fn imaginary(&self) -> Vec<usize> {
        self.vibrational().filter(|&i| self.eigvals[i] < 0.0).collect()
    }

    /// all of the frequencies in a different unit
    pub fn freqs_in(&self, unit: FreqUnit) -> Dvec {
        self.eigvals.map(|v| eigval_to_freq(v, unit))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }
}

impl Display for PurifiedModes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>5}{:>14}{:>12}{:>9}",
            "Mode",
            format!("Freq ({})", self.freq_unit),
            "μ (u)",
            "Trivial"
        )?;
        for i in 0..self.len() {
            write!(
                f,
                "{:5}{:14.1}{:12.4}",
                i + 1,
                self.freqs[i],
                self.reduced_masses[i],
            )?;
            if self.trivial[i] {
                write!(f, "{:>9}", "*")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
