use approx::assert_abs_diff_eq;
use insta::assert_snapshot;
use test_case::test_case;

use crate::*;

#[test_case("ang_per_bohr", 0.52917721067)]
#[test_case("Ang_per_Bohr", 0.52917721067; "mixed case")]
#[test_case("me_per_amu", 1822.8885)]
#[test_case("light_speed", 137.036)]
#[test_case("planck", 2.0 * std::f64::consts::PI)]
#[test_case("planck_bar", 1.0)]
fn constants(name: &str, want: f64) {
    assert_eq!(value_of(name).unwrap(), want);
}

#[test]
fn unknown_constant() {
    assert_eq!(
        value_of("speed_of_dark"),
        Err(UnitError::UnknownConstant("speed_of_dark".to_owned()))
    );
}

#[test]
fn constant_names_round_trip() {
    for c in Constant::ALL {
        assert_eq!(c.to_string().parse::<Constant>().unwrap(), c);
    }
}

#[test_case(1.0, Unit::Angstrom, Unit::Bohr, Quantity::Length, 1.8897261254578281)]
#[test_case(1.0, Unit::Hartree, Unit::ElectronVolt, Quantity::Energy, 27.211386245988)]
#[test_case(1.0, Unit::Hartree, Unit::Wavenumber, Quantity::Energy, 219474.6313632)]
#[test_case(4.3597447222071, Unit::Attojoule, Unit::Hartree, Quantity::Energy, 1.0)]
#[test_case(1.0, Unit::Amu, Unit::ElectronMass, Quantity::Mass, 1822.8885)]
#[test_case(1.0, Unit::Debye, Unit::AtomicDipole, Quantity::Dipole, 0.39343031)]
#[test_case(1.0, Unit::Femtosecond, Unit::AtomicTime, Quantity::Time, 41.341373)]
fn conversions(value: f64, from: Unit, to: Unit, kind: Quantity, want: f64) {
    let got = convert(value, from, to, kind).unwrap();
    assert_abs_diff_eq!(got, want, epsilon = 1e-6 * want.abs());
}

#[test]
fn incompatible() {
    assert_eq!(
        convert(1.0, Unit::Bohr, Unit::Hartree, Quantity::Length),
        Err(UnitError::IncompatibleUnits {
            from: Unit::Bohr,
            to: Unit::Hartree,
            kind: Quantity::Length,
        })
    );
    // both units agree with each other but not with the requested kind
    assert!(convert(1.0, Unit::Bohr, Unit::Angstrom, Quantity::Mass).is_err());
}

#[test]
fn convert_round_trips() {
    for from in Unit::ALL {
        for to in Unit::ALL.into_iter().filter(|u| u.kind() == from.kind()) {
            let x = 3.14159;
            let there = convert(x, from, to, from.kind()).unwrap();
            let back = convert(there, to, from, from.kind()).unwrap();
            assert_abs_diff_eq!(back, x, epsilon = 1e-12);
        }
    }
}

#[test]
fn rot_const_round_trips() {
    for a in RotConstUnit::ALL {
        for b in RotConstUnit::ALL {
            let x = 0.2265;
            let back = convert_rot_const(convert_rot_const(x, a, b), b, a);
            assert_abs_diff_eq!(back, x, epsilon = 1e-12);
        }
    }
}

#[test]
fn rot_const_factors() {
    // one u·B² moment of inertia
    let inv = RotConstUnit::InvInertia.factor();
    assert_eq!(inv, 0.5);
    let cm = RotConstUnit::WaveNumCM.factor();
    assert_abs_diff_eq!(cm, 60.199_9, epsilon = 1e-3);
    let mhz = RotConstUnit::CyclicFreqMHz.factor();
    let hz = RotConstUnit::CyclicFreqHz.factor();
    assert_abs_diff_eq!(mhz * 1e6, hz, epsilon = 1e-6 * hz);
}

#[test_case("INV_INERTIA", RotConstUnit::InvInertia)]
#[test_case("ANGFREQ_SECS", RotConstUnit::AngFreqSeconds)]
#[test_case("mhz", RotConstUnit::CyclicFreqMHz)]
#[test_case("cyc/cm", RotConstUnit::WaveNumCM)]
#[test_case("WaveNumAtomic", RotConstUnit::WaveNumAtomic)]
fn rot_const_selectors(s: &str, want: RotConstUnit) {
    assert_eq!(s.parse::<RotConstUnit>().unwrap(), want);
}

#[test]
fn unsupported_unit() {
    assert_eq!(
        "furlongs/fortnight".parse::<RotConstUnit>(),
        Err(UnitError::UnsupportedUnit("furlongs/fortnight".to_owned()))
    );
    assert!("parsec".parse::<Unit>().is_err());
    assert!("INV_INERTIA".parse::<FreqUnit>().is_err());
}

#[test]
fn unit_labels_parse() {
    for u in Unit::ALL {
        assert_eq!(u.label().parse::<Unit>().unwrap(), u);
    }
    for u in RotConstUnit::ALL {
        assert_eq!(u.label().parse::<RotConstUnit>().unwrap(), u);
    }
}

#[test]
fn rot_const_labels() {
    let got: Vec<_> = RotConstUnit::ALL
        .iter()
        .map(|u| format!("{:<18}{}", format!("{u:?}"), u))
        .collect();
    assert_snapshot!(got.join("\n"), @r"
    InvInertia        1/(amu*B^2)
    AngFreqAtomic     1/Ta
    AngFreqSeconds    1/s
    CyclicFreqAtomic  cyc/Ta
    CyclicFreqHz      cyc/s
    CyclicFreqMHz     MHz
    WaveNumAtomic     cyc/B
    WaveNumCM         cyc/cm
    ");
}
