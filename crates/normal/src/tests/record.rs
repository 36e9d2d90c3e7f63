use approx::assert_abs_diff_eq;
use test_case::test_case;
use units::RotConstUnit;

use super::*;

fn raw_water() -> RawHess {
    RawHess {
        molecule: Some(water()),
        hessian: Some(water_hessian()),
        energy: Some(-76.0266327341),
        temperature: Some(298.15),
        ..RawHess::default()
    }
}

#[test_case("molecule" ; "molecule")]
#[test_case("hessian" ; "hessian")]
#[test_case("energy" ; "energy")]
#[test_case("temperature" ; "temperature")]
fn missing_field(field: &'static str) {
    let mut raw = raw_water();
    match field {
        "molecule" => raw.molecule = None,
        "hessian" => raw.hessian = None,
        "energy" => raw.energy = None,
        "temperature" => raw.temperature = None,
        _ => unreachable!(),
    }
    assert_eq!(
        HessRecord::new(raw, Config::default()).unwrap_err(),
        NormalError::MissingRequiredField(field)
    );
}

#[test]
fn optional_fields() {
    let rec = HessRecord::new(raw_water(), Config::default()).unwrap();
    assert_eq!(rec.energy(), -76.0266327341);
    assert_eq!(rec.temperature(), 298.15);
    assert_eq!(rec.frequencies(), None);
    assert_eq!(rec.jobs(), None);
    assert_eq!(rec.ir(), Ok(None));
    assert_eq!(rec.raman(), Ok(None));
}

#[test]
fn zero_values_are_kept() {
    let raw = RawHess {
        energy: Some(0.0),
        temperature: Some(0.0),
        frequencies: Some(vec![0.0; 3]),
        ..raw_water()
    };
    let rec = HessRecord::new(raw, Config::default()).unwrap();
    assert_eq!(rec.energy(), 0.0);
    assert_eq!(rec.temperature(), 0.0);
    assert_eq!(rec.frequencies(), Some(&[0.0; 3][..]));
}

#[test]
fn derived() {
    let mut raw = raw_water();
    raw.dipole_derivatives = Some(Dmat::zeros(9, 3));
    raw.jobs = Some(vec!["freq".to_owned()]);
    let rec = HessRecord::new(raw, Config::default()).unwrap();

    let modes = rec.modes().unwrap();
    assert_abs_diff_eq!(
        &modes.vib_freqs()[..],
        &[1650.828243, 3833.470203, 3943.440490][..],
        epsilon = 1e-4
    );
    // computed once and then reused
    assert!(std::ptr::eq(modes, rec.modes().unwrap()));

    let rc = rec.rot_consts(RotConstUnit::WaveNumCM).unwrap();
    assert_abs_diff_eq!(
        &rc[..],
        &[27.27735133, 14.57516584, 9.49935503][..],
        epsilon = 1e-6
    );
    assert_eq!(rec.principals().unwrap().rotor, molecule::Rotor::AsymmTop);

    let ir = rec.ir().unwrap().unwrap();
    assert!(ir.intensities.iter().all(|&i| i == 0.0));
    assert_eq!(rec.jobs(), Some(&["freq".to_owned()][..]));

    // the record can stand in for any Hessian source
    assert_eq!(&analyze(&rec, rec.config()).unwrap(), modes);
}

#[test]
fn partial_results() {
    // a Hessian for the wrong number of atoms spoils the modes and everything
    // built on them, but not the rotational constants
    let mut raw = raw_water();
    raw.hessian = Some(Hessian::from_atomic(Dmat::identity(6, 6)).unwrap());
    raw.dipole_derivatives = Some(Dmat::zeros(9, 3));
    let rec = HessRecord::new(raw, Config::default()).unwrap();
    let err = NormalError::DimensionMismatch {
        expected: 9,
        got: 6,
    };
    assert_eq!(rec.modes().unwrap_err(), err);
    assert_eq!(rec.ir().unwrap_err(), err);
    assert_eq!(rec.raman(), Ok(None));
    assert!(rec.rot_consts(RotConstUnit::InvInertia).is_ok());

    // and bad dipole derivatives don't affect the modes
    let mut raw = raw_water();
    raw.dipole_derivatives = Some(Dmat::zeros(3, 3));
    let rec = HessRecord::new(raw, Config::default()).unwrap();
    assert!(matches!(
        rec.ir(),
        Err(NormalError::DimensionMismatch { .. })
    ));
    assert!(rec.modes().is_ok());
}

#[test]
fn check_geom() {
    let rec = HessRecord::new(raw_water(), Config::default()).unwrap();
    assert_eq!(rec.check_geom(&water(), 1e-10), Ok(()));
    let mut moved = water();
    moved.translate(Vec3::new(0.0, 0.0, 1e-3));
    assert!(matches!(
        rec.check_geom(&moved, 1e-6),
        Err(molecule::GeomMismatch::Coords(_))
    ));
}

#[test]
fn grad_record() {
    let raw = RawGrad {
        molecule: Some(water()),
        gradient: Some(vec![0.0, 0.03, -0.04, 0.0, 0.0, 0.08, 0.0, -0.03, -0.04]),
        energy: Some(-76.0),
    };
    let rec = GradRecord::new(raw.clone(), Config::default()).unwrap();
    assert_eq!(rec.energy(), -76.0);
    assert_eq!(rec.max_abs(), 0.08);
    let want = (2.0 * 0.03f64.powi(2) + 2.0 * 0.04f64.powi(2) + 0.08f64.powi(2))
        / 9.0;
    assert_abs_diff_eq!(rec.rms(), want.sqrt(), epsilon = 1e-15);
    assert_eq!(rec.gradient().len(), 9);
    assert_eq!(rec.check_geom(rec.molecule(), 0.0), Ok(()));
    let rc = rec.rot_consts(RotConstUnit::InvInertia).unwrap();
    assert_abs_diff_eq!(
        &rc[..],
        &[0.2265572565, 0.1210568265, 0.0788987093][..],
        epsilon = 1e-9
    );

    let short = RawGrad {
        gradient: Some(vec![0.0; 6]),
        ..raw.clone()
    };
    assert_eq!(
        GradRecord::new(short, Config::default()).unwrap_err(),
        NormalError::DimensionMismatch {
            expected: 9,
            got: 6
        }
    );
    let missing = RawGrad {
        energy: None,
        ..raw
    };
    assert_eq!(
        GradRecord::new(missing, Config::default()).unwrap_err(),
        NormalError::MissingRequiredField("energy")
    );
}
