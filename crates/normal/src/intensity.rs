//! IR intensities and Raman activities of the normal modes

use serde::{Deserialize, Serialize};
use units::{ANG_PER_BOHR, KMMOL_PER_E2AMU};

use crate::{Dmat, NormalError, PurifiedModes};

/// infrared transition data for each mode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ir {
    /// x, y, and z components of the transition dipole of each mode, one
    /// row per mode, in e·u^-½
    pub tdm: Dmat,

    /// squared magnitudes of the transition dipoles in e²/u
    pub magnitudes: Vec<f64>,

    /// intensities in km/mol
    pub intensities: Vec<f64>,
}

/// Raman activity data for each mode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Raman {
    /// activities 45α'² + 7γ'² in Å⁴/u
    pub activities: Vec<f64>,

    /// depolarization ratios 3γ'²/(45α'² + 4γ'²). `None` when the
    /// denominator vanishes
    pub depolarization: Vec<Option<f64>>,
}

/// compute the IR transition dipoles and intensities of `modes` from the
/// Cartesian dipole derivatives in `dipole_derivs`, a 3N×3 matrix with rows
/// ∂μ/∂xₖ in atomic units
pub fn ir(
    modes: &PurifiedModes,
    dipole_derivs: &Dmat,
) -> Result<Ir, NormalError> {
    let n3n = modes.lx.nrows();
    if dipole_derivs.shape() != (n3n, 3) {
        return Err(NormalError::DimensionMismatch {
            expected: 3 * n3n,
            got: dipole_derivs.len(),
        });
    }
    let tdm = modes.lx.transpose() * dipole_derivs;
    let magnitudes: Vec<f64> =
        tdm.row_iter().map(|r| r.norm_squared()).collect();
    let intensities = magnitudes.iter().map(|m| m * KMMOL_PER_E2AMU).collect();
    Ok(Ir {
        tdm,
        magnitudes,
        intensities,
    })
}

/// compute the Raman activities and depolarization ratios of `modes` from the
/// Cartesian polarizability derivatives in `polar_derivs`, a 3N×6 matrix of
/// bohr² with columns in the order xx, xy, xz, yy, yz, zz
pub fn raman(
    modes: &PurifiedModes,
    polar_derivs: &Dmat,
) -> Result<Raman, NormalError> {
    let n3n = modes.lx.nrows();
    if polar_derivs.shape() != (n3n, 6) {
        return Err(NormalError::DimensionMismatch {
            expected: 6 * n3n,
            got: polar_derivs.len(),
        });
    }
    let ang4 = ANG_PER_BOHR.powi(4);
    let dalpha = modes.lx.transpose() * polar_derivs;
    let mut activities = Vec::with_capacity(n3n);
    let mut depolarization = Vec::with_capacity(n3n);
    for row in dalpha.row_iter() {
        let (xx, xy, xz, yy, yz, zz) =
            (row[0], row[1], row[2], row[3], row[4], row[5]);
        let alpha = (xx + yy + zz) / 3.0;
        let gamma2 = 0.5
            * ((xx - yy).powi(2)
                + (yy - zz).powi(2)
                + (zz - xx).powi(2)
                + 6.0 * (xy * xy + xz * xz + yz * yz));
        let a2 = 45.0 * alpha * alpha;
        activities.push((a2 + 7.0 * gamma2) * ang4);
        let denom = a2 + 4.0 * gamma2;
        depolarization.push((denom > 0.0).then(|| 3.0 * gamma2 / denom));
    }
    Ok(Raman {
        activities,
        depolarization,
    })
}
