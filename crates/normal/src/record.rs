//! Containers for the results of a Hessian or gradient calculation handed over
//! by an output parser, with derived quantities computed on first use

use std::sync::OnceLock;

use molecule::{GeomMismatch, Molecule, Principals};
use serde::{Deserialize, Serialize};
use units::RotConstUnit;

use crate::{
    Config, Dmat, Hessian, Ir, NormalError, PurifiedModes, Raman, intensity,
    purify,
};

/// anything that carries a molecular geometry
pub trait Geometric {
    fn molecule(&self) -> &Molecule;
}

/// a source of a Cartesian Hessian in Eh/bohr² for its geometry
pub trait HessianSource: Geometric {
    fn hessian(&self) -> &Hessian;
}

/// a source of a Cartesian gradient in Eh/bohr for its geometry
pub trait GradientSource: Geometric {
    fn gradient(&self) -> &[f64];
}

/// the data a parser extracts from a Hessian calculation. `None` means the
/// value was not found
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHess {
    pub molecule: Option<Molecule>,
    pub hessian: Option<Hessian>,

    /// total energy in Eh
    pub energy: Option<f64>,

    /// temperature in K
    pub temperature: Option<f64>,

    /// 3N×3 dipole derivatives
    pub dipole_derivatives: Option<Dmat>,

    /// 3N×6 polarizability derivatives
    pub polarizability_derivatives: Option<Dmat>,

    /// frequencies as reported by the program that produced the Hessian
    pub frequencies: Option<Vec<f64>>,

    /// the job types run by the program
    pub jobs: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct HessRecord {
    molecule: Molecule,
    hessian: Hessian,
    energy: f64,
    temperature: f64,
    dipole_derivatives: Option<Dmat>,
    polarizability_derivatives: Option<Dmat>,
    frequencies: Option<Vec<f64>>,
    jobs: Option<Vec<String>>,
    config: Config,

    modes: OnceLock<Result<PurifiedModes, NormalError>>,
    principals: OnceLock<Result<Principals, NormalError>>,
    ir: OnceLock<Result<Option<Ir>, NormalError>>,
    raman: OnceLock<Result<Option<Raman>, NormalError>>,
}

impl HessRecord {
    /// build a record from `raw`, which must contain a molecule, Hessian,
    /// energy, and temperature
    pub fn new(raw: RawHess, config: Config) -> Result<Self, NormalError> {
        use NormalError::MissingRequiredField as Missing;
        let RawHess {
            molecule,
            hessian,
            energy,
            temperature,
            dipole_derivatives,
            polarizability_derivatives,
            frequencies,
            jobs,
        } = raw;
        Ok(Self {
            molecule: molecule.ok_or(Missing("molecule"))?,
            hessian: hessian.ok_or(Missing("hessian"))?,
            energy: energy.ok_or(Missing("energy"))?,
            temperature: temperature.ok_or(Missing("temperature"))?,
            dipole_derivatives,
            polarizability_derivatives,
            frequencies,
            jobs,
            config,
            modes: OnceLock::new(),
            principals: OnceLock::new(),
            ir: OnceLock::new(),
            raman: OnceLock::new(),
        })
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn frequencies(&self) -> Option<&[f64]> {
        self.frequencies.as_deref()
    }

    pub fn jobs(&self) -> Option<&[String]> {
        self.jobs.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn modes(&self) -> Result<&PurifiedModes, NormalError> {
        self.modes
            .get_or_init(|| purify(&self.molecule, &self.hessian, &self.config))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn principals(&self) -> Result<&Principals, NormalError> {
        self.principals
            .get_or_init(|| {
                Ok(self.molecule.principals(&self.config.inertia_tol())?)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// rotational constants in `unit`, in descending order
    pub fn rot_consts(
        &self,
        unit: RotConstUnit,
    ) -> Result<[f64; 3], NormalError> {
        Ok(self.principals()?.rot_consts(unit, self.config.zero_moment))
    }

    /// IR intensities, or `None` if the record has no dipole derivatives
    pub fn ir(&self) -> Result<Option<&Ir>, NormalError> {
        self.ir
            .get_or_init(|| match &self.dipole_derivatives {
                Some(d) => Ok(Some(intensity::ir(self.modes()?, d)?)),
                None => Ok(None),
            })
            .as_ref()
            .map(Option::as_ref)
            .map_err(Clone::clone)
    }

    /// Raman activities, or `None` if the record has no polarizability
    /// derivatives
    pub fn raman(&self) -> Result<Option<&Raman>, NormalError> {
        self.raman
            .get_or_init(|| match &self.polarizability_derivatives {
                Some(p) => Ok(Some(intensity::raman(self.modes()?, p)?)),
                None => Ok(None),
            })
            .as_ref()
            .map(Option::as_ref)
            .map_err(Clone::clone)
    }

    pub fn check_geom(
        &self,
        other: &Molecule,
        tol: f64,
    ) -> Result<(), GeomMismatch> {
        self.molecule.matches(other, tol)
    }
}

impl Geometric for HessRecord {
    fn molecule(&self) -> &Molecule {
        &self.molecule
    }
}

impl HessianSource for HessRecord {
    fn hessian(&self) -> &Hessian {
        &self.hessian
    }
}

/// the data a parser extracts from a gradient calculation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGrad {
    pub molecule: Option<Molecule>,

    /// Cartesian gradient in Eh/bohr
    pub gradient: Option<Vec<f64>>,

    /// total energy in Eh
    pub energy: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct GradRecord {
    molecule: Molecule,
    gradient: Vec<f64>,
    energy: f64,
    config: Config,
    principals: OnceLock<Result<Principals, NormalError>>,
}

impl GradRecord {
    /// build a record from `raw`, which must contain a molecule, a gradient
    /// with one entry per Cartesian coordinate, and an energy
    pub fn new(raw: RawGrad, config: Config) -> Result<Self, NormalError> {
        use NormalError::MissingRequiredField as Missing;
        let molecule = raw.molecule.ok_or(Missing("molecule"))?;
        let gradient = raw.gradient.ok_or(Missing("gradient"))?;
        let energy = raw.energy.ok_or(Missing("energy"))?;
        let n3n = 3 * molecule.natoms();
        if gradient.len() != n3n {
            return Err(NormalError::DimensionMismatch {
                expected: n3n,
                got: gradient.len(),
            });
        }
        Ok(Self {
            molecule,
            gradient,
            energy,
            config,
            principals: OnceLock::new(),
        })
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// root-mean-square of the gradient components
    pub fn rms(&self) -> f64 {
        let n = self.gradient.len() as f64;
        (self.gradient.iter().map(|g| g * g).sum::<f64>() / n).sqrt()
    }

    /// the largest gradient component by magnitude
    pub fn max_abs(&self) -> f64 {
        self.gradient.iter().fold(0.0, |m, g| m.max(g.abs()))
    }

    pub fn principals(&self) -> Result<&Principals, NormalError> {
        self.principals
            .get_or_init(|| {
                Ok(self.molecule.principals(&self.config.inertia_tol())?)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn rot_consts(
        &self,
        unit: RotConstUnit,
    ) -> Result<[f64; 3], NormalError> {
        Ok(self.principals()?.rot_consts(unit, self.config.zero_moment))
    }

    pub fn check_geom(
        &self,
        other: &Molecule,
        tol: f64,
    ) -> Result<(), GeomMismatch> {
        self.molecule.matches(other, tol)
    }
}

impl Geometric for GradRecord {
    fn molecule(&self) -> &Molecule {
        &self.molecule
    }
}

impl GradientSource for GradRecord {
    fn gradient(&self) -> &[f64] {
        &self.gradient
    }
}
