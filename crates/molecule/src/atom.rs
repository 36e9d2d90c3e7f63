use std::{
    ops::{Add, AddAssign},
    str::FromStr,
};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::{
    GeomError, Vec3,
    elements::{MAX_ATOMIC_NUMBER, SYMBOLS, WEIGHTS, atomic_number},
};

/// A single atom with coordinates in bohr. `weight` overrides the standard
/// atomic weight of the element, as for an isotopic substitution
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawAtom")]
pub struct Atom {
    pub atomic_number: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// the unchecked form of [Atom] read by serde
#[derive(Deserialize)]
struct RawAtom {
    atomic_number: usize,
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    weight: Option<f64>,
}

impl TryFrom<RawAtom> for Atom {
    type Error = GeomError;

    fn try_from(raw: RawAtom) -> Result<Self, Self::Error> {
        let atom = Self {
            atomic_number: raw.atomic_number,
            x: raw.x,
            y: raw.y,
            z: raw.z,
            weight: raw.weight,
        };
        atom.check(0)?;
        Ok(atom)
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}

impl AbsDiffEq for Atom {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() < epsilon;
        self.atomic_number == other.atomic_number
            && close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
    }
}

impl Add<Vec3> for Atom {
    type Output = Atom;

    fn add(self, rhs: Vec3) -> Self::Output {
        Atom {
            x: self.x + rhs[0],
            y: self.y + rhs[1],
            z: self.z + rhs[2],
            ..self
        }
    }
}

impl AddAssign<Vec3> for Atom {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs
    }
}

impl FromStr for Atom {
    type Err = GeomError;

    /// parse an Atom from a line like
    ///  C 1.0 1.0 1.0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();
        let [sym, x, y, z] = fields[..] else {
            return Err(GeomError::Parse(format!(
                "expected 4 fields in atom line `{s}`"
            )));
        };
        let parse = |f: &str| {
            f.parse::<f64>().map_err(|e| {
                GeomError::Parse(format!("bad coordinate `{f}`: {e}"))
            })
        };
        Self::new_from_label(sym, parse(x)?, parse(y)?, parse(z)?)
    }
}

impl Atom {
    /// construct an atom of element `atomic_number`, which must be between 1
    /// and [MAX_ATOMIC_NUMBER], reporting a bad atomic number as occurring at
    /// index 0
    pub fn new(
        atomic_number: usize,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, GeomError> {
        if !(1..=MAX_ATOMIC_NUMBER).contains(&atomic_number) {
            return Err(GeomError::UnknownElement {
                index: 0,
                symbol: atomic_number.to_string(),
            });
        }
        Ok(Self {
            atomic_number,
            x,
            y,
            z,
            weight: None,
        })
    }

    /// construct an atom from its symbol, reporting an unknown symbol as
    /// occurring at index 0
    pub fn new_from_label(
        atomic_symbol: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, GeomError> {
        let Some(num) = atomic_number(atomic_symbol) else {
            return Err(GeomError::UnknownElement {
                index: 0,
                symbol: atomic_symbol.to_owned(),
            });
        };
        Self::new(num, x, y, z)
    }

    /// check that `self` has a known element, finite coordinates, and a
    /// positive mass, reporting any failure as occurring at `index`
    pub fn check(&self, index: usize) -> Result<(), GeomError> {
        if !(1..=MAX_ATOMIC_NUMBER).contains(&self.atomic_number) {
            return Err(GeomError::UnknownElement {
                index,
                symbol: self.atomic_number.to_string(),
            });
        }
        if !self.coord().iter().all(|x| x.is_finite()) {
            return Err(GeomError::BadCoordinate { index });
        }
        let mass = self.weight();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(GeomError::BadMass { index, mass });
        }
        Ok(())
    }

    /// the element symbol of `self`, or the placeholder "X" for an atomic
    /// number outside of [SYMBOLS]
    #[inline]
    pub const fn label(&self) -> &'static str {
        if self.atomic_number <= MAX_ATOMIC_NUMBER {
            SYMBOLS[self.atomic_number]
        } else {
            SYMBOLS[0]
        }
    }

    pub fn coord(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// the mass of `self` in u. NaN for an atomic number outside of [WEIGHTS]
    /// without an explicit weight
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or_else(|| {
            WEIGHTS.get(self.atomic_number).copied().unwrap_or(f64::NAN)
        })
    }
}
