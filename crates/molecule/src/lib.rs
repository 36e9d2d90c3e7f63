//! Molecular geometries with atomic masses, moments of inertia, and
//! rotational constants

use std::{error::Error, fmt::Display};

use na::{SymmetricEigen, vector};
use serde::{Deserialize, Serialize};
use units::{Quantity, Unit, UnitError};

pub use atom::*;
pub use check::*;
pub use inertia::*;
pub use rotor::*;

pub mod atom;
mod check;
pub mod elements;
pub mod inertia;
mod mol_traits;
pub mod rotor;
pub mod vector;

use nalgebra as na;

pub type Vec3 = na::Vector3<f64>;
pub type Mat3 = na::Matrix3<f64>;

#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    EmptyGeometry,
    UnknownElement { index: usize, symbol: String },
    DimensionMismatch { expected: usize, got: usize },
    AtomIndex(usize),
    BadMass { index: usize, mass: f64 },
    BadCoordinate { index: usize },
    ZeroVector,
    NegativeMoment(f64),
    NotOrthonormal,
    NoReferenceDisplacement,
    Parse(String),
    Unit(UnitError),
}

impl Display for GeomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for GeomError {}

impl From<UnitError> for GeomError {
    fn from(value: UnitError) -> Self {
        Self::Unit(value)
    }
}

#[derive(
    Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize,
)]
pub enum Axis {
    X = 0,
    Y = 1,
    #[default]
    Z = 2,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Axis({})",
            match self {
                Axis::X => "X",
                Axis::Y => "Y",
                Axis::Z => "Z",
            }
        )
    }
}

/// build a [Molecule] from lines of atomic symbols and coordinates in bohr,
/// returning a `Result<Molecule, GeomError>`
#[macro_export]
macro_rules! molecule {
    ($($sym:ident $x:literal $y:literal $z:literal)+) => {
	$crate::Molecule::from_labels(&[
	    $((stringify!($sym), $x, $y, $z),)*
	])
    };
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// build a `Molecule` from atomic symbols and coordinates in bohr
    pub fn from_labels<S: AsRef<str>>(
        atoms: &[(S, f64, f64, f64)],
    ) -> Result<Self, GeomError> {
        if atoms.is_empty() {
            return Err(GeomError::EmptyGeometry);
        }
        let mut ret = Vec::with_capacity(atoms.len());
        for (index, (sym, x, y, z)) in atoms.iter().enumerate() {
            let sym = sym.as_ref();
            let atom = Atom::new_from_label(sym, *x, *y, *z).map_err(|_| {
                GeomError::UnknownElement {
                    index,
                    symbol: sym.to_owned(),
                }
            })?;
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                return Err(GeomError::BadCoordinate { index });
            }
            ret.push(atom);
        }
        Ok(Self { atoms: ret })
    }

    /// build a `Molecule` from atomic symbols and coordinates in the length
    /// unit `unit`. The coordinates are stored in bohr
    pub fn from_symbols<S: AsRef<str>>(
        atoms: &[(S, f64, f64, f64)],
        unit: Unit,
    ) -> Result<Self, GeomError> {
        Self::from_labels(atoms)?.into_bohr(unit)
    }

    /// parse a `Molecule` as for its [FromStr](std::str::FromStr)
    /// implementation, but with the coordinates in the length unit `unit`.
    /// The coordinates are stored in bohr
    pub fn parse_in(s: &str, unit: Unit) -> Result<Self, GeomError> {
        s.parse::<Self>()?.into_bohr(unit)
    }

    /// rescale coordinates given in `unit` to bohr
    fn into_bohr(mut self, unit: Unit) -> Result<Self, GeomError> {
        let scale = units::convert(1.0, unit, Unit::Bohr, Quantity::Length)?;
        for atom in self.atoms.iter_mut() {
            atom.x *= scale;
            atom.y *= scale;
            atom.z *= scale;
        }
        Ok(self)
    }

    /// build a `Molecule` from a slice of atomic_numbers and a slice of
    /// coordinates in bohr
    pub fn from_slices(
        atomic_numbers: &[usize],
        coords: &[f64],
    ) -> Result<Self, GeomError> {
        if atomic_numbers.is_empty() {
            return Err(GeomError::EmptyGeometry);
        }
        if 3 * atomic_numbers.len() != coords.len() {
            return Err(GeomError::DimensionMismatch {
                expected: 3 * atomic_numbers.len(),
                got: coords.len(),
            });
        }
        let mut atoms = Vec::with_capacity(atomic_numbers.len());
        for (index, (&num, c)) in
            atomic_numbers.iter().zip(coords.chunks_exact(3)).enumerate()
        {
            let atom = Atom::new(num, c[0], c[1], c[2]).map_err(|_| {
                GeomError::UnknownElement {
                    index,
                    symbol: num.to_string(),
                }
            })?;
            atom.check(index)?;
            atoms.push(atom);
        }
        Ok(Self { atoms })
    }

    /// return a copy of `self` with the atomic masses replaced by `masses`
    pub fn with_masses(&self, masses: &[f64]) -> Result<Self, GeomError> {
        if masses.len() != self.atoms.len() {
            return Err(GeomError::DimensionMismatch {
                expected: self.atoms.len(),
                got: masses.len(),
            });
        }
        let mut ret = self.clone();
        for (index, (atom, &mass)) in
            ret.atoms.iter_mut().zip(masses).enumerate()
        {
            if !(mass.is_finite() && mass > 0.0) {
                return Err(GeomError::BadMass { index, mass });
            }
            atom.weight = Some(mass);
        }
        Ok(ret)
    }

    /// check every atom in `self` with [Atom::check], as for a `Molecule`
    /// assembled directly from its fields
    pub fn validate(&self) -> Result<(), GeomError> {
        if self.atoms.is_empty() {
            return Err(GeomError::EmptyGeometry);
        }
        for (index, atom) in self.atoms.iter().enumerate() {
            atom.check(index)?;
        }
        Ok(())
    }

    pub fn natoms(&self) -> usize {
        self.atoms.len()
    }

    /// return the atomic numbers of each atoms as a vector
    pub fn atomic_numbers(&self) -> Vec<usize> {
        self.atoms.iter().map(|a| a.atomic_number).collect()
    }

    pub fn symbols(&self) -> Vec<&'static str> {
        self.atoms.iter().map(Atom::label).collect()
    }

    /// the flattened Cartesian coordinates, x₀ y₀ z₀ x₁ ...
    pub fn coords(&self) -> Vec<f64> {
        self.atoms.iter().flat_map(|a| [a.x, a.y, a.z]).collect()
    }

    /// return the mass of each atom in u
    pub fn masses(&self) -> Vec<f64> {
        self.atoms.iter().map(Atom::weight).collect()
    }

    pub fn mass_of(&self, index: usize) -> Result<f64, GeomError> {
        self.atoms
            .get(index)
            .map(Atom::weight)
            .ok_or(GeomError::AtomIndex(index))
    }

    pub fn total_mass(&self) -> f64 {
        self.atoms.iter().map(Atom::weight).sum()
    }

    /// compute the center of mass of `self`
    pub fn com(&self) -> Vec3 {
        let mut sum = 0.0;
        let mut com = Vec3::zeros();
        for atom in &self.atoms {
            let w = atom.weight();
            sum += w;
            com += w * atom.coord();
        }
        com / sum
    }

    /// return a copy of `self` translated to its center of mass
    pub fn centered(&self) -> Self {
        let mut ret = self.clone();
        ret.translate(-self.com());
        ret
    }

    /// compute the moment of inertia tensor about the origin
    pub fn moi(&self) -> Mat3 {
        let mut ret = Mat3::zeros();
        for atom in &self.atoms {
            let Atom { x, y, z, .. } = atom;
            let w = atom.weight();
            // diagonal
            ret[(0, 0)] += w * (y * y + z * z);
            ret[(1, 1)] += w * (x * x + z * z);
            ret[(2, 2)] += w * (x * x + y * y);
            // off-diagonal
            ret[(1, 0)] -= w * x * y;
            ret[(2, 0)] -= w * x * z;
            ret[(2, 1)] -= w * y * z;
        }
        ret.fill_upper_triangle_with_lower_triangle();
        ret
    }

    /// translate each of the atoms in `self` by vec
    pub fn translate(&mut self, vec: Vec3) -> &mut Self {
        for atom in self.atoms.iter_mut() {
            *atom += vec;
        }
        self
    }

    /// translate `self` to the center of mass and orient the molecule such
    /// that the principal axes are aligned with the Cartesian axes, x
    /// corresponding to the smallest moment of inertia and z to the largest.
    /// returns the principal moments and conditioned axes used to make the
    /// transformation
    pub fn normalize(
        &mut self,
        tol: &InertiaTol,
    ) -> Result<Principals, GeomError> {
        let com = self.com();
        self.translate(-com);
        let principals = self.principals(tol)?;
        *self = self.transform(principals.axes.transpose());
        Ok(principals)
    }

    /// apply the transformation matrix `mat` to the atoms in `self` and return
    /// the new Molecule
    pub fn transform(&self, mat: Mat3) -> Self {
        let mut ret = Vec::with_capacity(self.atoms.len());
        for a @ Atom { x, y, z, .. } in self.atoms.iter() {
            let v = mat * vector![*x, *y, *z];
            ret.push(Atom {
                x: v[0],
                y: v[1],
                z: v[2],
                ..*a
            });
        }
        Self::new(ret)
    }

    pub fn rotate(&self, deg: f64, axis: &Axis) -> Self {
        use Axis::*;
        let deg = deg.to_radians();
        let ct = deg.cos();
        let st = deg.sin();
        // from
        // https://en.wikipedia.org/wiki/Rotation_matrix#In_three_dimensions
        let rot_mat = match axis {
            X => na::matrix![
                1., 0., 0.;
                0., ct, -st;
                0., st, ct;
            ],
            Y => na::matrix![
                ct, 0., st;
                0., 1., 0.;
                -st, 0., ct;
            ],
            Z => na::matrix![
                ct, -st, 0.;
                st, ct, 0.;
                0., 0., 1.;
            ],
        };
        self.transform(rot_mat)
    }
}

/// return the eigendecomposition of `mat`, with the eigenvalues and
/// corresponding eigenvectors in ascending order.
pub fn symm_eigen_decomp3(mat: Mat3) -> (Vec3, Mat3) {
    let SymmetricEigen {
        eigenvectors: vecs,
        eigenvalues: vals,
    } = SymmetricEigen::new(mat);
    let mut pairs: Vec<_> = vals.iter().enumerate().collect();
    pairs.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    let mut ret = Mat3::zeros();
    for (i, (p, _)) in pairs.iter().enumerate() {
        ret.set_column(i, &vecs.column(*p));
    }
    (Vec3::from_iterator(pairs.iter().map(|a| *a.1)), ret)
}
