//! Normal-mode analysis of Cartesian Hessians: mass-weighting, removal of the
//! translational and rotational degrees of freedom, diagonalization, and the
//! spectroscopic quantities derived from the resulting modes

pub use cache::ModeCache;
pub use config::Config;
pub use error::NormalError;
pub use hessian::Hessian;
pub use intensity::{Ir, Raman};
pub use modes::PurifiedModes;
pub use purify::purify;
pub use record::*;

pub mod cache;
pub mod config;
mod error;
pub mod hessian;
pub mod intensity;
pub mod modes;
pub mod purify;
pub mod record;
pub mod utils;


pub type Dvec = nalgebra::DVector<f64>;
pub type Dmat = nalgebra::DMatrix<f64>;

/// run [purify] on anything that can supply a geometry and a Hessian
pub fn analyze<T: HessianSource + ?Sized>(
    src: &T,
    config: &Config,
) -> Result<PurifiedModes, NormalError> {
    purify(src.molecule(), src.hessian(), config)
}
