//! TOML job files describing one normal-mode analysis

use std::{
    fmt::Debug,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use molecule::Molecule;
use normal::{
    Config, HessRecord, Hessian, RawHess,
    utils::{parse_rows, parse_square},
};
use serde::Deserialize;
use units::{Quantity, Unit};

/// Matrices can either be literal strings in the job file, or the name of a
/// file to be loaded. Relative file names are resolved against the directory
/// containing the job file
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MatrixSrc {
    Literal(String),
    File { file: String },
}

impl MatrixSrc {
    fn read(&self, dir: &Path) -> Result<String> {
        match self {
            MatrixSrc::Literal(s) => Ok(s.clone()),
            MatrixSrc::File { file } => {
                let path = dir.join(file);
                read_to_string(&path).with_context(|| {
                    format!("failed to read matrix file {}", path.display())
                })
            }
        }
    }
}

fn bohr() -> Unit {
    Unit::Bohr
}

fn hartree() -> Unit {
    Unit::Hartree
}

fn room_temperature() -> f64 {
    298.15
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// one line per atom with an atomic symbol followed by its x, y, and z
    /// coordinates
    pub geometry: String,

    /// the unit of the coordinates in `geometry`
    #[serde(default = "bohr")]
    pub length_unit: Unit,

    /// optional atomic masses in u replacing the standard atomic weights,
    /// one per atom
    pub masses: Option<Vec<f64>>,

    /// the Cartesian Hessian, either the full 3N×3N matrix or its lower
    /// triangle, in `energy_unit`/`length_unit`²
    pub hessian: MatrixSrc,

    /// the energy unit of `hessian` and `energy`
    #[serde(default = "hartree")]
    pub energy_unit: Unit,

    pub energy: Option<f64>,

    /// temperature in K
    #[serde(default = "room_temperature")]
    pub temperature: f64,

    /// optional 3N×3 dipole derivatives in atomic units
    pub dipole_derivatives: Option<MatrixSrc>,

    /// optional 3N×6 polarizability derivatives in atomic units, with the
    /// columns ordered xx, xy, xz, yy, yz, zz
    pub polarizability_derivatives: Option<MatrixSrc>,

    #[serde(default)]
    pub config: Config,

    /// the directory of the job file, for resolving matrix files
    #[serde(skip)]
    dir: PathBuf,
}

impl Job {
    pub fn load<P>(filename: P) -> Result<Self>
    where
        P: AsRef<Path> + Debug,
    {
        let contents = read_to_string(&filename).with_context(|| {
            format!("failed to read job file {filename:?}")
        })?;
        let mut job: Self = toml::from_str(&contents).with_context(|| {
            format!("failed to deserialize job file {filename:?}")
        })?;
        job.config.validate()?;
        job.dir = filename
            .as_ref()
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(job)
    }

    /// the molecule described by `geometry`, `length_unit`, and `masses`,
    /// with coordinates in bohr
    pub fn molecule(&self) -> Result<Molecule> {
        let mol = Molecule::parse_in(&self.geometry, self.length_unit)
            .context("failed to parse geometry")?;
        match &self.masses {
            Some(masses) => Ok(mol.with_masses(masses)?),
            None => Ok(mol),
        }
    }

    /// load every piece of the job into a [HessRecord]. The energy is zero if
    /// the job file doesn't give one
    pub fn into_record(self) -> Result<HessRecord> {
        let molecule = self.molecule()?;
        let mat = parse_square(&self.hessian.read(&self.dir)?)
            .context("failed to parse Hessian")?;
        let hessian = Hessian::new(mat, self.energy_unit, self.length_unit)?;
        let energy = units::convert(
            self.energy.unwrap_or_default(),
            self.energy_unit,
            Unit::Hartree,
            Quantity::Energy,
        )?;
        let dipole_derivatives = match &self.dipole_derivatives {
            Some(src) => Some(
                parse_rows(&src.read(&self.dir)?, 3)
                    .context("failed to parse dipole derivatives")?,
            ),
            None => None,
        };
        let polarizability_derivatives = match &self.polarizability_derivatives
        {
            Some(src) => Some(
                parse_rows(&src.read(&self.dir)?, 6)
                    .context("failed to parse polarizability derivatives")?,
            ),
            None => None,
        };
        let raw = RawHess {
            molecule: Some(molecule),
            hessian: Some(hessian),
            energy: Some(energy),
            temperature: Some(self.temperature),
            dipole_derivatives,
            polarizability_derivatives,
            ..RawHess::default()
        };
        Ok(HessRecord::new(raw, self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = r#"
geometry = """
H 0.0000000000  1.4313901416 0.9860410955
O 0.0000000000  0.0000000000 -0.1242384417
H 0.0000000000 -1.4313901416 0.9860410955
"""
hessian = { file = "water.hess" }
"#;

    #[test]
    fn defaults() {
        let job: Job = toml::from_str(WATER).unwrap();
        assert_eq!(job.length_unit, Unit::Bohr);
        assert_eq!(job.energy_unit, Unit::Hartree);
        assert_eq!(job.energy, None);
        assert_eq!(job.temperature, 298.15);
        assert_eq!(job.config, Config::default());
        assert_eq!(
            job.hessian,
            MatrixSrc::File {
                file: "water.hess".to_owned()
            }
        );
    }

    #[test]
    fn overrides() {
        let input = r#"
geometry = "He 0 0 0"
length_unit = "angstrom"
hessian = "0 0 0 0 0 0 0 0 0"
energy_unit = "kcal/mol"
energy = 1.0

[config]
freq_unit = "MHz"
"#;
        let job: Job = toml::from_str(input).unwrap();
        assert_eq!(job.length_unit, Unit::Angstrom);
        assert_eq!(job.energy_unit, Unit::KcalPerMol);
        assert_eq!(job.config.freq_unit, units::FreqUnit::CyclicFreqMHz);
        assert!(matches!(job.hessian, MatrixSrc::Literal(_)));
        let rec = job.into_record().unwrap();
        let want = 1.0 / units::KCALMOL_PER_HARTREE;
        assert!((rec.energy() - want).abs() < 1e-15);
    }

    #[test]
    fn unknown_field() {
        let input = format!("{WATER}\nstep_size = 0.005\n");
        assert!(toml::from_str::<Job>(&input).is_err());
    }

    #[test]
    fn angstrom_geometry() {
        let input = r#"
geometry = "H 0 0 0\nH 0 0 0.74"
length_unit = "angstrom"
masses = [2.014, 2.014]
hessian = "0"
"#;
        let job: Job = toml::from_str(input).unwrap();
        let mol = job.molecule().unwrap();
        let want = 0.74 / units::ANG_PER_BOHR;
        assert!((mol.atoms[1].z - want).abs() < 1e-12);
        assert_eq!(mol.masses(), vec![2.014, 2.014]);

        let bad = r#"
geometry = "H 0 0 0\nH 0 0 0.74"
length_unit = "hartree"
hessian = "0"
"#;
        let job: Job = toml::from_str(bad).unwrap();
        assert!(job.molecule().is_err());
    }
}
