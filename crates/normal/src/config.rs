//! Tolerances and output units for a normal-mode analysis

use std::{fmt::Debug, fs::read_to_string, path::Path, str::FromStr};

use molecule::InertiaTol;
use serde::{Deserialize, Serialize};
use units::{FreqUnit, RotConstUnit};

use crate::NormalError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// principal moments below this value in u·B² are zero
    pub zero_moment: f64,

    /// two principal moments are equal if their ratio deviates from one by
    /// less than this
    pub equal_moment: f64,

    /// allowed deviation of the principal axes from orthonormality
    pub orthonorm_tol: f64,

    /// a translation or rotation vector whose norm drops below this fraction
    /// of its original norm during orthogonalization is linearly dependent
    pub rank_tol: f64,

    /// eigenvalues of the purified Hessian with a magnitude below this, in
    /// Eh/(u·B²), belong to trivial modes
    pub zero_eigval: f64,

    pub freq_unit: FreqUnit,

    pub rot_const_unit: RotConstUnit,
}

impl Default for Config {
    fn default() -> Self {
        let InertiaTol {
            zero_moment,
            equal_moment,
            orthonorm,
        } = InertiaTol::default();
        Self {
            zero_moment,
            equal_moment,
            orthonorm_tol: orthonorm,
            rank_tol: 1e-6,
            zero_eigval: 1e-6,
            freq_unit: FreqUnit::default(),
            rot_const_unit: RotConstUnit::default(),
        }
    }
}

macro_rules! float_builders {
    ($($name: ident$(,)*)*) => {
        $(pub fn $name(mut self, x: f64) -> Self {
            self.$name = x;
            self
        })*
    }
}

impl Config {
    float_builders!(
        zero_moment,
        equal_moment,
        orthonorm_tol,
        rank_tol,
        zero_eigval
    );

    pub fn freq_unit(mut self, unit: FreqUnit) -> Self {
        self.freq_unit = unit;
        self
    }

    pub fn rot_const_unit(mut self, unit: RotConstUnit) -> Self {
        self.rot_const_unit = unit;
        self
    }

    /// the tolerances used for principal axes and rotor classification
    pub fn inertia_tol(&self) -> InertiaTol {
        InertiaTol {
            zero_moment: self.zero_moment,
            equal_moment: self.equal_moment,
            orthonorm: self.orthonorm_tol,
        }
    }

    pub fn load<P>(filename: P) -> Result<Self, NormalError>
    where
        P: AsRef<Path> + Debug,
    {
        let contents = read_to_string(&filename).map_err(|e| {
            NormalError::Config(format!(
                "failed to read config file {filename:?} with {e}"
            ))
        })?;
        contents.parse()
    }

    /// check that every tolerance is positive and finite
    pub fn validate(&self) -> Result<(), NormalError> {
        let tols = [
            ("zero_moment", self.zero_moment),
            ("equal_moment", self.equal_moment),
            ("orthonorm_tol", self.orthonorm_tol),
            ("rank_tol", self.rank_tol),
            ("zero_eigval", self.zero_eigval),
        ];
        for (name, tol) in tols {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(NormalError::Config(format!(
                    "{name} must be positive, got {tol}"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = NormalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ret: Self = toml::from_str(s)
            .map_err(|e| NormalError::Config(e.to_string()))?;
        ret.validate()?;
        Ok(ret)
    }
}
