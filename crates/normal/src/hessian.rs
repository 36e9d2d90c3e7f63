use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use units::{Quantity, Unit};

use crate::{Dmat, NormalError, utils::parse_square};

/// asymmetries larger than this in Eh/bohr² are reported with a warning
const ASYMMETRY_WARN: f64 = 1e-5;

/// a symmetric Cartesian Hessian in Eh/bohr², indexed like the flattened
/// coordinates of its [molecule::Molecule]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hessian {
    mat: Dmat,
}

impl Hessian {
    /// convert `mat`, given in units of `energy`/`length`², to Eh/bohr² and
    /// symmetrize it by averaging each pair of off-diagonal elements
    pub fn new(
        mat: Dmat,
        energy: Unit,
        length: Unit,
    ) -> Result<Self, NormalError> {
        let (rows, cols) = mat.shape();
        if rows != cols {
            return Err(NormalError::DimensionMismatch {
                expected: rows,
                got: cols,
            });
        }
        if mat.iter().any(|x| !x.is_finite()) {
            return Err(NormalError::Parse(
                "non-finite entry in Hessian".to_owned(),
            ));
        }
        let e = units::convert(1.0, energy, Unit::Hartree, Quantity::Energy)?;
        let l = units::convert(1.0, length, Unit::Bohr, Quantity::Length)?;
        let mut mat = mat * (e / (l * l));

        let mut asym: f64 = 0.0;
        for i in 0..rows {
            for j in 0..i {
                let (a, b) = (mat[(i, j)], mat[(j, i)]);
                asym = asym.max((a - b).abs());
                let avg = 0.5 * (a + b);
                mat[(i, j)] = avg;
                mat[(j, i)] = avg;
            }
        }
        debug!("largest Hessian asymmetry: {asym:.2e} Eh/bohr²");
        if asym > ASYMMETRY_WARN {
            warn!("Hessian asymmetry of {asym:.2e} Eh/bohr² removed");
        }
        Ok(Self { mat })
    }

    /// build a Hessian from `mat` already in Eh/bohr²
    pub fn from_atomic(mat: Dmat) -> Result<Self, NormalError> {
        Self::new(mat, Unit::Hartree, Unit::Bohr)
    }

    /// the number of rows (and columns) in the matrix, 3N for N atoms
    pub fn dim(&self) -> usize {
        self.mat.nrows()
    }

    pub fn mat(&self) -> &Dmat {
        &self.mat
    }

    pub fn into_inner(self) -> Dmat {
        self.mat
    }

    /// formation of the secular equation: divide each element by the square
    /// root of the masses of the two atoms it couples. `masses` is in u, one
    /// per atom
    pub fn mass_weighted(&self, masses: &[f64]) -> Result<Dmat, NormalError> {
        let n3n = self.dim();
        if 3 * masses.len() != n3n {
            return Err(NormalError::DimensionMismatch {
                expected: 3 * masses.len(),
                got: n3n,
            });
        }
        let sqm: Vec<_> = masses.iter().map(|w| 1.0 / w.sqrt()).collect();
        let mut fx = self.mat.clone();
        for i in 0..n3n {
            let ii = i / 3;
            for j in i..n3n {
                let jj = j / 3;
                fx[(i, j)] = sqm[ii] * fx[(i, j)] * sqm[jj];
            }
        }
        fx.fill_lower_triangle_with_upper_triangle();
        Ok(fx)
    }
}

impl FromStr for Hessian {
    type Err = NormalError;

    /// parse a full or lower-triangular matrix in Eh/bohr²
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_atomic(parse_square(s)?)
    }
}
