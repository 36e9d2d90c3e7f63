use std::{f64::consts::PI, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::UnitError;

/// Å per bohr
pub const ANG_PER_BOHR: f64 = 0.52917721067;

/// electron masses per unified atomic mass unit
pub const ME_PER_AMU: f64 = 1822.8885;

/// seconds per atomic unit of time
pub const SEC_PER_TA: f64 = 2.4188843265e-17;

/// speed of light in bohr/Ta
pub const LIGHT_SPEED: f64 = 137.036;

pub const PLANCK: f64 = 2.0 * PI;

pub const PLANCK_BAR: f64 = 1.0;

/// attojoules per hartree. An attojoule is also an mdyne·Å, so force constants
/// in mdyne/Å are aJ/Å²
pub const AJ_PER_HARTREE: f64 = 4.3597447222071;

pub const EV_PER_HARTREE: f64 = 27.211386245988;

pub const KCALMOL_PER_HARTREE: f64 = 627.5094740631;

pub const KJMOL_PER_HARTREE: f64 = 2625.4996394799;

/// cm⁻¹ per hartree
pub const WAVENUM_PER_HARTREE: f64 = 219474.6313632;

pub const DEBYE_PER_AU: f64 = 2.541746473;

pub const AVOGADRO: f64 = 6.02214076e23;

/// converts a squared dipole derivative in e²/u to an IR intensity in km/mol
pub const KMMOL_PER_E2AMU: f64 = 974.8801;

/// Named physical constants available through [crate::value_of]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Constant {
    AngPerBohr,
    MePerAmu,
    SecPerTa,
    LightSpeed,
    Planck,
    PlanckBar,
    AttojoulePerHartree,
    EvPerHartree,
    KcalmolPerHartree,
    KjmolPerHartree,
    WavenumPerHartree,
    DebyePerAu,
    Avogadro,
    KmmolPerE2Amu,
}

impl Constant {
    pub const ALL: [Constant; 14] = [
        Constant::AngPerBohr,
        Constant::MePerAmu,
        Constant::SecPerTa,
        Constant::LightSpeed,
        Constant::Planck,
        Constant::PlanckBar,
        Constant::AttojoulePerHartree,
        Constant::EvPerHartree,
        Constant::KcalmolPerHartree,
        Constant::KjmolPerHartree,
        Constant::WavenumPerHartree,
        Constant::DebyePerAu,
        Constant::Avogadro,
        Constant::KmmolPerE2Amu,
    ];

    pub const fn value(self) -> f64 {
        match self {
            Constant::AngPerBohr => ANG_PER_BOHR,
            Constant::MePerAmu => ME_PER_AMU,
            Constant::SecPerTa => SEC_PER_TA,
            Constant::LightSpeed => LIGHT_SPEED,
            Constant::Planck => PLANCK,
            Constant::PlanckBar => PLANCK_BAR,
            Constant::AttojoulePerHartree => AJ_PER_HARTREE,
            Constant::EvPerHartree => EV_PER_HARTREE,
            Constant::KcalmolPerHartree => KCALMOL_PER_HARTREE,
            Constant::KjmolPerHartree => KJMOL_PER_HARTREE,
            Constant::WavenumPerHartree => WAVENUM_PER_HARTREE,
            Constant::DebyePerAu => DEBYE_PER_AU,
            Constant::Avogadro => AVOGADRO,
            Constant::KmmolPerE2Amu => KMMOL_PER_E2AMU,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Constant::AngPerBohr => "ang_per_bohr",
            Constant::MePerAmu => "me_per_amu",
            Constant::SecPerTa => "sec_per_ta",
            Constant::LightSpeed => "light_speed",
            Constant::Planck => "planck",
            Constant::PlanckBar => "planck_bar",
            Constant::AttojoulePerHartree => "aj_per_hartree",
            Constant::EvPerHartree => "ev_per_hartree",
            Constant::KcalmolPerHartree => "kcalmol_per_hartree",
            Constant::KjmolPerHartree => "kjmol_per_hartree",
            Constant::WavenumPerHartree => "wavenum_per_hartree",
            Constant::DebyePerAu => "debye_per_au",
            Constant::Avogadro => "avogadro",
            Constant::KmmolPerE2Amu => "kmmol_per_e2amu",
        }
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Constant {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnitError::UnknownConstant(s.to_owned()))
    }
}
