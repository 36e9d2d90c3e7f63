//! Physical constants and unit conversions. Everything is expressed relative
//! to atomic units: bohr, hartree, electron mass, and the atomic unit of time
//! (Ta).

use std::{error::Error, fmt::Display};

mod consts;
mod unit;

pub use consts::*;
pub use unit::*;

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, PartialEq)]
pub enum UnitError {
    UnknownConstant(String),
    IncompatibleUnits {
        from: Unit,
        to: Unit,
        kind: Quantity,
    },
    UnsupportedUnit(String),
}

impl Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for UnitError {}

/// look up the value of the constant named `name`. Names are matched without
/// regard to case, so `Ang_per_Bohr` and `ang_per_bohr` are the same constant
pub fn value_of(name: &str) -> Result<f64, UnitError> {
    name.parse::<Constant>().map(Constant::value)
}

/// convert `value` from `from` to `to`. Both units must measure `kind`
pub fn convert(
    value: f64,
    from: Unit,
    to: Unit,
    kind: Quantity,
) -> Result<f64, UnitError> {
    if from.kind() != kind || to.kind() != kind {
        return Err(UnitError::IncompatibleUnits { from, to, kind });
    }
    Ok(value * from.to_atomic() / to.to_atomic())
}

/// convert a rotational constant expressed in `from` to the same constant in
/// `to`
pub fn convert_rot_const(
    value: f64,
    from: RotConstUnit,
    to: RotConstUnit,
) -> f64 {
    value / from.factor() * to.factor()
}
