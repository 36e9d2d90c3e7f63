use crate::{Atom, GeomError, Molecule};
use approx::AbsDiffEq;
use std::{fmt::Display, str::FromStr};

impl std::fmt::Debug for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// A Molecule is AbsDiffEq if each of its Atoms is, irrespective of order
impl AbsDiffEq for Molecule {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let mut theirs = other.atoms.clone();
        if self.atoms.len() != theirs.len() {
            return false;
        }
        for atom in &self.atoms {
            // remove each match so it can't be double-counted
            match theirs.iter().position(|b| atom.abs_diff_eq(b, epsilon)) {
                Some(i) => {
                    theirs.remove(i);
                }
                None => return false,
            }
        }
        true
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}

impl FromStr for Molecule {
    type Err = GeomError;

    /// parse lines like
    ///      O           0.000000000    0.000000000   -0.124238453
    ///      H           0.000000000    1.431390207    0.986041184
    ///      H           0.000000000   -1.431390207    0.986041184
    /// into a molecule, with coordinates in bohr. blank lines are skipped
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut atoms = Vec::new();
        for line in s.lines().filter(|l| !l.trim().is_empty()) {
            let atom = line.parse::<Atom>().map_err(|e| match e {
                GeomError::UnknownElement { symbol, .. } => {
                    GeomError::UnknownElement {
                        index: atoms.len(),
                        symbol,
                    }
                }
                e => e,
            })?;
            if !atom.coord().iter().all(|x| x.is_finite()) {
                return Err(GeomError::BadCoordinate { index: atoms.len() });
            }
            atoms.push(atom);
        }
        if atoms.is_empty() {
            return Err(GeomError::EmptyGeometry);
        }
        Ok(Self { atoms })
    }
}

impl Display for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(8);
        let width = f.width().unwrap_or(precision + 4);
        writeln!(f)?;
        for atom in &self.atoms {
            writeln!(
                f,
                "{:5}{:w$.p$}{:w$.p$}{:w$.p$}",
                atom.label(),
                atom.x,
                atom.y,
                atom.z,
                w = width,
                p = precision,
            )?;
        }
        Ok(())
    }
}
