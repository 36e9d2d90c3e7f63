use std::{f64::consts::PI, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    ANG_PER_BOHR, AJ_PER_HARTREE, DEBYE_PER_AU, EV_PER_HARTREE,
    KCALMOL_PER_HARTREE, KJMOL_PER_HARTREE, LIGHT_SPEED, ME_PER_AMU,
    SEC_PER_TA, UnitError, WAVENUM_PER_HARTREE,
};

/// find the entry of `table` with a name matching `s`, ignoring case
fn lookup<T: Copy>(
    table: &[(T, &[&'static str])],
    s: &str,
) -> Result<T, UnitError> {
    let s = s.trim();
    table
        .iter()
        .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(s)))
        .map(|(t, _)| *t)
        .ok_or_else(|| UnitError::UnsupportedUnit(s.to_owned()))
}

/// the kind of physical quantity a [Unit] measures
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Quantity {
    Length,
    Energy,
    Mass,
    Time,
    Dipole,
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Quantity::Length => "length",
                Quantity::Energy => "energy",
                Quantity::Mass => "mass",
                Quantity::Time => "time",
                Quantity::Dipole => "dipole",
            }
        )
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Bohr,
    Angstrom,
    Nanometer,
    Picometer,
    Hartree,
    Attojoule,
    ElectronVolt,
    KcalPerMol,
    KjPerMol,
    Wavenumber,
    Amu,
    ElectronMass,
    AtomicTime,
    Second,
    Femtosecond,
    AtomicDipole,
    Debye,
}

impl Unit {
    pub const ALL: [Unit; 17] = [
        Unit::Bohr,
        Unit::Angstrom,
        Unit::Nanometer,
        Unit::Picometer,
        Unit::Hartree,
        Unit::Attojoule,
        Unit::ElectronVolt,
        Unit::KcalPerMol,
        Unit::KjPerMol,
        Unit::Wavenumber,
        Unit::Amu,
        Unit::ElectronMass,
        Unit::AtomicTime,
        Unit::Second,
        Unit::Femtosecond,
        Unit::AtomicDipole,
        Unit::Debye,
    ];

    pub const fn kind(self) -> Quantity {
        use Unit::*;
        match self {
            Bohr | Angstrom | Nanometer | Picometer => Quantity::Length,
            Hartree | Attojoule | ElectronVolt | KcalPerMol | KjPerMol
            | Wavenumber => Quantity::Energy,
            Amu | ElectronMass => Quantity::Mass,
            AtomicTime | Second | Femtosecond => Quantity::Time,
            AtomicDipole | Debye => Quantity::Dipole,
        }
    }

    /// the number of atomic units in one of `self`
    pub fn to_atomic(self) -> f64 {
        use Unit::*;
        match self {
            Bohr | Hartree | ElectronMass | AtomicTime | AtomicDipole => 1.0,
            Angstrom => 1.0 / ANG_PER_BOHR,
            Nanometer => 10.0 / ANG_PER_BOHR,
            Picometer => 0.01 / ANG_PER_BOHR,
            Attojoule => 1.0 / AJ_PER_HARTREE,
            ElectronVolt => 1.0 / EV_PER_HARTREE,
            KcalPerMol => 1.0 / KCALMOL_PER_HARTREE,
            KjPerMol => 1.0 / KJMOL_PER_HARTREE,
            Wavenumber => 1.0 / WAVENUM_PER_HARTREE,
            Amu => ME_PER_AMU,
            Second => 1.0 / SEC_PER_TA,
            Femtosecond => 1e-15 / SEC_PER_TA,
            Debye => 1.0 / DEBYE_PER_AU,
        }
    }

    pub const fn label(self) -> &'static str {
        self.names()[0]
    }

    /// the label of `self` followed by any accepted aliases
    const fn names(self) -> &'static [&'static str] {
        use Unit::*;
        match self {
            Bohr => &["bohr", "a0"],
            Angstrom => &["angstrom", "ang", "Å"],
            Nanometer => &["nm", "nanometer"],
            Picometer => &["pm", "picometer"],
            Hartree => &["hartree", "Eh"],
            Attojoule => &["aJ", "attojoule"],
            ElectronVolt => &["eV", "electronvolt"],
            KcalPerMol => &["kcal/mol", "kcal_per_mol"],
            KjPerMol => &["kJ/mol", "kj_per_mol"],
            Wavenumber => &["cm-1", "cm^-1", "wavenumber"],
            Amu => &["amu", "u", "Da"],
            ElectronMass => &["me", "electron_mass"],
            AtomicTime => &["Ta", "atomic_time"],
            Second => &["s", "sec", "second"],
            Femtosecond => &["fs", "femtosecond"],
            AtomicDipole => &["e*bohr", "ea0"],
            Debye => &["debye", "D"],
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let table: Vec<_> = Self::ALL.iter().map(|u| (*u, u.names())).collect();
        lookup(&table, s)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.label().to_owned()
    }
}

/// Units for frequencies. Vibrational frequencies come out of the mass-weighted
/// Hessian as angular frequencies in 1/Ta, and [FreqUnit::factor] converts
/// from there.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum FreqUnit {
    AngFreqAtomic,
    AngFreqSeconds,
    CyclicFreqAtomic,
    CyclicFreqHz,
    CyclicFreqMHz,
    WaveNumAtomic,
    #[default]
    WaveNumCM,
}

impl FreqUnit {
    pub const ALL: [FreqUnit; 7] = [
        FreqUnit::AngFreqAtomic,
        FreqUnit::AngFreqSeconds,
        FreqUnit::CyclicFreqAtomic,
        FreqUnit::CyclicFreqHz,
        FreqUnit::CyclicFreqMHz,
        FreqUnit::WaveNumAtomic,
        FreqUnit::WaveNumCM,
    ];

    /// multiply an angular frequency in 1/Ta by this to get `self`
    pub fn factor(self) -> f64 {
        use FreqUnit::*;
        match self {
            AngFreqAtomic => 1.0,
            AngFreqSeconds => 1.0 / SEC_PER_TA,
            CyclicFreqAtomic => 1.0 / (2.0 * PI),
            CyclicFreqHz => 1.0 / (2.0 * PI * SEC_PER_TA),
            CyclicFreqMHz => 1.0 / (2.0 * PI * SEC_PER_TA) / 1.0e6,
            WaveNumAtomic => 1.0 / (2.0 * PI * LIGHT_SPEED),
            WaveNumCM => 1.0e8 / (2.0 * PI * LIGHT_SPEED * ANG_PER_BOHR),
        }
    }

    pub fn from_angular(self, omega: f64) -> f64 {
        omega * self.factor()
    }

    pub const fn label(self) -> &'static str {
        self.names()[0]
    }

    const fn names(self) -> &'static [&'static str] {
        use FreqUnit::*;
        match self {
            AngFreqAtomic => &["1/Ta", "AngFreqAtomic", "ANGFREQ_ATOMIC"],
            AngFreqSeconds => &["1/s", "AngFreqSeconds", "ANGFREQ_SECS"],
            CyclicFreqAtomic => {
                &["cyc/Ta", "CyclicFreqAtomic", "CYCFREQ_ATOMIC"]
            }
            CyclicFreqHz => &["cyc/s", "CyclicFreqHz", "CYCFREQ_HZ", "Hz"],
            CyclicFreqMHz => &["MHz", "CyclicFreqMHz", "CYCFREQ_MHZ"],
            WaveNumAtomic => &["cyc/B", "WaveNumAtomic", "WAVENUM_ATOMIC"],
            WaveNumCM => &["cyc/cm", "WaveNumCM", "WAVENUM_CM", "cm-1"],
        }
    }
}

impl Display for FreqUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FreqUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let table: Vec<_> = Self::ALL.iter().map(|u| (*u, u.names())).collect();
        lookup(&table, s)
    }
}

impl TryFrom<String> for FreqUnit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FreqUnit> for String {
    fn from(value: FreqUnit) -> Self {
        value.label().to_owned()
    }
}

/// Units for rotational constants. `InvInertia` is the bare 1/(2I) with I in
/// u·B², and the rest are the frequency units of [FreqUnit]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum RotConstUnit {
    #[default]
    InvInertia,
    AngFreqAtomic,
    AngFreqSeconds,
    CyclicFreqAtomic,
    CyclicFreqHz,
    CyclicFreqMHz,
    WaveNumAtomic,
    WaveNumCM,
}

impl RotConstUnit {
    pub const ALL: [RotConstUnit; 8] = [
        RotConstUnit::InvInertia,
        RotConstUnit::AngFreqAtomic,
        RotConstUnit::AngFreqSeconds,
        RotConstUnit::CyclicFreqAtomic,
        RotConstUnit::CyclicFreqHz,
        RotConstUnit::CyclicFreqMHz,
        RotConstUnit::WaveNumAtomic,
        RotConstUnit::WaveNumCM,
    ];

    /// the frequency unit corresponding to `self`, if any
    pub const fn freq_unit(self) -> Option<FreqUnit> {
        use RotConstUnit::*;
        match self {
            InvInertia => None,
            AngFreqAtomic => Some(FreqUnit::AngFreqAtomic),
            AngFreqSeconds => Some(FreqUnit::AngFreqSeconds),
            CyclicFreqAtomic => Some(FreqUnit::CyclicFreqAtomic),
            CyclicFreqHz => Some(FreqUnit::CyclicFreqHz),
            CyclicFreqMHz => Some(FreqUnit::CyclicFreqMHz),
            WaveNumAtomic => Some(FreqUnit::WaveNumAtomic),
            WaveNumCM => Some(FreqUnit::WaveNumCM),
        }
    }

    /// the rotational constant for a principal moment `I` in u·B² is
    /// `factor / I`
    pub fn factor(self) -> f64 {
        match self.freq_unit() {
            None => 0.5,
            Some(u) => 0.5 / ME_PER_AMU * u.factor(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self.freq_unit() {
            None => "1/(amu*B^2)",
            Some(u) => u.label(),
        }
    }
}

impl Display for RotConstUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RotConstUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const INV: &[&str] = &["1/(amu*B^2)", "InvInertia", "INV_INERTIA"];
        let table: Vec<_> = Self::ALL
            .iter()
            .map(|u| (*u, u.freq_unit().map_or(INV, FreqUnit::names)))
            .collect();
        lookup(&table, s)
    }
}

impl TryFrom<String> for RotConstUnit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RotConstUnit> for String {
    fn from(value: RotConstUnit) -> Self {
        value.label().to_owned()
    }
}
