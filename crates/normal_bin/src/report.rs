//! The text and JSON summaries of a finished job

use std::fmt::Display;

use log::warn;
use molecule::{Molecule, Rotor};
use normal::{Geometric, HessRecord, NormalError};
use serde::Serialize;
use units::{FreqUnit, RotConstUnit};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// the job file this report came from
    pub name: String,

    pub molecule: Molecule,

    /// total energy in Eh
    pub energy: f64,

    pub rotor: Rotor,

    /// principal moments of inertia in u·B², in ascending order
    pub moments: [f64; 3],

    pub rot_const_unit: RotConstUnit,

    /// rotational constants in descending order
    pub rot_consts: [f64; 3],

    pub freq_unit: FreqUnit,

    /// vibrational frequencies in ascending order, with imaginary frequencies
    /// as negative values
    pub freqs: Vec<f64>,

    /// reduced masses of the vibrations in u
    pub reduced_masses: Vec<f64>,

    /// IR intensities of the vibrations in km/mol
    pub ir: Option<Vec<f64>>,

    /// Raman activities of the vibrations in Å⁴/u
    pub raman: Option<Vec<f64>>,

    /// failures of the optional intensities, which are left out of the report
    /// without failing the job
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Report {
    /// summarize `record`. A failure of the frequencies or rotational
    /// constants fails the whole report, but the IR and Raman intensities are
    /// only recorded as missing
    pub fn new(name: &str, record: &HessRecord) -> Result<Self, NormalError> {
        let config = record.config();
        let principals = record.principals()?;
        let modes = record.modes()?;
        let vib: Vec<usize> = modes.vibrational().collect();
        let pick = |v: &[f64]| vib.iter().map(|&i| v[i]).collect::<Vec<_>>();
        let mut errors = Vec::new();
        let ir = match record.ir() {
            Ok(ir) => ir.map(|ir| pick(&ir.intensities)),
            Err(e) => {
                warn!("{name}: skipping IR intensities: {e}");
                errors.push(format!("IR intensities failed: {e}"));
                None
            }
        };
        let raman = match record.raman() {
            Ok(raman) => raman.map(|r| pick(&r.activities)),
            Err(e) => {
                warn!("{name}: skipping Raman activities: {e}");
                errors.push(format!("Raman activities failed: {e}"));
                None
            }
        };
        Ok(Self {
            name: name.to_owned(),
            molecule: record.molecule().clone(),
            energy: record.energy(),
            rotor: principals.rotor,
            moments: principals.moments.into(),
            rot_const_unit: config.rot_const_unit,
            rot_consts: record.rot_consts(config.rot_const_unit)?,
            freq_unit: modes.freq_unit,
            freqs: pick(modes.freqs.as_slice()),
            reduced_masses: pick(modes.reduced_masses.as_slice()),
            ir,
            raman,
            errors,
        })
    }

    pub fn write_output(
        &self,
        mut w: impl std::io::Write,
    ) -> std::io::Result<()> {
        writeln!(w, "{self}")
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Job: {}", self.name)?;
        writeln!(f, "\nGeometry (bohr):")?;
        writeln!(f, "{:.8}", self.molecule)?;
        writeln!(f, "Energy (Eh): {:.10}", self.energy)?;
        writeln!(f, "\nMolecule is {}", self.rotor)?;

        writeln!(f, "\nRotational Constants ({}):", self.rot_const_unit)?;
        let [a, b, c] = self.rot_consts;
        match self.rotor {
            Rotor::Atom => writeln!(f, "none")?,
            Rotor::Linear => {
                writeln!(f, "{:^20}", "B")?;
                writeln!(f, "{b:20.12}")?;
            }
            _ => {
                writeln!(f, "{:^20}{:^20}{:^20}", "A", "B", "C")?;
                writeln!(f, "{a:20.12}{b:20.12}{c:20.12}")?;
            }
        }

        writeln!(f, "\nVibrational Frequencies ({}):", self.freq_unit)?;
        write!(f, "{:>5}{:>12}{:>10}", "Mode", "Freq", "μ (u)")?;
        if self.ir.is_some() {
            write!(f, "{:>14}", "IR (km/mol)")?;
        }
        if self.raman.is_some() {
            write!(f, "{:>14}", "Raman (Å⁴/u)")?;
        }
        writeln!(f)?;
        for (i, (freq, mu)) in
            self.freqs.iter().zip(&self.reduced_masses).enumerate()
        {
            write!(f, "{:5}{freq:12.1}{mu:10.4}", i + 1)?;
            if let Some(ir) = &self.ir {
                write!(f, "{:14.4}", ir[i])?;
            }
            if let Some(raman) = &self.raman {
                write!(f, "{:14.4}", raman[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
