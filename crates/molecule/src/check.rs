use std::{error::Error, fmt::Display};

use crate::Molecule;

/// the ways a geometry from another source can fail to match a [Molecule]
#[derive(Clone, Debug, PartialEq)]
pub enum GeomMismatch {
    /// the coordinate vectors have different lengths
    CoordDim { ours: usize, theirs: usize },

    /// the atom lists have different lengths
    AtomDim { ours: usize, theirs: usize },

    /// at least one coordinate differs by more than the tolerance. `true`
    /// marks each coordinate that matched
    Coords(Vec<bool>),

    /// at least one atomic number differs. `true` marks each atom that matched
    Atoms(Vec<bool>),
}

impl Display for GeomMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for GeomMismatch {}

impl Molecule {
    /// compare `self` to the flattened coordinates `coords` (in bohr) and
    /// `atomic_numbers` read from some other source, such as the geometry
    /// embedded in a gradient or Hessian file
    pub fn check_geom(
        &self,
        coords: &[f64],
        atomic_numbers: &[usize],
        tol: f64,
    ) -> Result<(), GeomMismatch> {
        let ours = self.coords();
        if ours.len() != coords.len() {
            return Err(GeomMismatch::CoordDim {
                ours: ours.len(),
                theirs: coords.len(),
            });
        }
        if self.atoms.len() != atomic_numbers.len() {
            return Err(GeomMismatch::AtomDim {
                ours: self.atoms.len(),
                theirs: atomic_numbers.len(),
            });
        }
        let mask: Vec<_> = ours
            .iter()
            .zip(coords)
            .map(|(a, b)| (a - b).abs() <= tol)
            .collect();
        if !mask.iter().all(|&m| m) {
            return Err(GeomMismatch::Coords(mask));
        }
        let mask: Vec<_> = self
            .atoms
            .iter()
            .zip(atomic_numbers)
            .map(|(a, &b)| a.atomic_number == b)
            .collect();
        if !mask.iter().all(|&m| m) {
            return Err(GeomMismatch::Atoms(mask));
        }
        Ok(())
    }

    /// [Molecule::check_geom] against another `Molecule`
    pub fn matches(&self, other: &Self, tol: f64) -> Result<(), GeomMismatch> {
        self.check_geom(&other.coords(), &other.atomic_numbers(), tol)
    }
}
