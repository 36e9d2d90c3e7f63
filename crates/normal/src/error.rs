use std::{error::Error, fmt::Display};

use molecule::GeomError;
use units::UnitError;

#[derive(Clone, Debug, PartialEq)]
pub enum NormalError {
    /// an input matrix or vector does not match the 3N dimension of the
    /// geometry
    DimensionMismatch { expected: usize, got: usize },

    /// the translation and rotation vectors span fewer than the expected
    /// number of dimensions
    SingularBasis { rank: usize, expected: usize },

    MissingRequiredField(&'static str),

    Geom(GeomError),

    Unit(UnitError),

    Parse(String),

    Config(String),
}

impl Display for NormalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for NormalError {}

impl From<GeomError> for NormalError {
    fn from(value: GeomError) -> Self {
        Self::Geom(value)
    }
}

impl From<UnitError> for NormalError {
    fn from(value: UnitError) -> Self {
        Self::Unit(value)
    }
}
