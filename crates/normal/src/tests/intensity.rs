use approx::assert_abs_diff_eq;
use units::{ANG_PER_BOHR, KMMOL_PER_E2AMU};

use super::*;
use crate::intensity::{ir, raman};

/// dipole derivatives of fixed partial charges on each atom
fn charges(q: &[f64]) -> Dmat {
    let mut ret = Dmat::zeros(3 * q.len(), 3);
    for (k, q) in q.iter().enumerate() {
        for a in 0..3 {
            ret[(3 * k + a, a)] = *q;
        }
    }
    ret
}

#[test]
fn water_ir() {
    let modes =
        purify(&water(), &water_hessian(), &Config::default()).unwrap();
    let q = [0.4, -0.8, 0.4];
    let got = ir(&modes, &charges(&q)).unwrap();
    assert_eq!(got.tdm.shape(), (9, 3));

    let vib: Vec<f64> =
        modes.vibrational().map(|i| got.intensities[i]).collect();
    assert_abs_diff_eq!(
        &vib[..],
        &[230.326257, 118.174578, 227.135197][..],
        epsilon = 1e-3
    );
    for (m, i) in got.magnitudes.iter().zip(&got.intensities) {
        assert_abs_diff_eq!(m * KMMOL_PER_E2AMU, *i, epsilon = 1e-12);
    }

    // the squared transition dipoles summed over every mode add up to
    // Σ qₖ²/mₖ in each direction
    let masses = water().masses();
    let want: f64 = q.iter().zip(&masses).map(|(q, m)| 3.0 * q * q / m).sum();
    let total: f64 = got.magnitudes.iter().sum();
    assert_abs_diff_eq!(total, want, epsilon = 1e-10);
}

#[test]
fn ir_dimensions() {
    let modes =
        purify(&water(), &water_hessian(), &Config::default()).unwrap();
    assert_eq!(
        ir(&modes, &Dmat::zeros(6, 3)),
        Err(NormalError::DimensionMismatch {
            expected: 27,
            got: 18
        })
    );
    assert_eq!(
        raman(&modes, &Dmat::zeros(9, 3)),
        Err(NormalError::DimensionMismatch {
            expected: 54,
            got: 27
        })
    );
}

#[test]
fn isotropic_raman() {
    let modes =
        purify(&water(), &water_hessian(), &Config::default()).unwrap();
    // only the diagonal of the polarizability changes, all by the same amount
    let c = [0.3, -0.1, 0.7, 1.2, -0.4, 0.05, 0.9, 0.2, -0.6];
    let mut polar = Dmat::zeros(9, 6);
    for (i, c) in c.iter().enumerate() {
        polar[(i, 0)] = *c;
        polar[(i, 3)] = *c;
        polar[(i, 5)] = *c;
    }
    let got = raman(&modes, &polar).unwrap();
    let ang4 = ANG_PER_BOHR.powi(4);
    for i in 0..9 {
        let s: f64 = (0..9).map(|k| modes.lx[(k, i)] * c[k]).sum();
        assert_abs_diff_eq!(
            got.activities[i],
            45.0 * s * s * ang4,
            epsilon = 1e-10
        );
        if s.abs() > 1e-8 {
            assert_abs_diff_eq!(got.depolarization[i].unwrap(), 0.0);
        }
    }
}

#[test]
fn anisotropic_raman() {
    let modes =
        purify(&water(), &water_hessian(), &Config::default()).unwrap();
    // only the xy component changes
    let mut polar = Dmat::zeros(9, 6);
    for i in 0..9 {
        polar[(i, 1)] = 0.1 * (i as f64 + 1.0);
    }
    let got = raman(&modes, &polar).unwrap();
    let ang4 = ANG_PER_BOHR.powi(4);
    for i in 0..9 {
        let xy: f64 = (0..9).map(|k| modes.lx[(k, i)] * polar[(k, 1)]).sum();
        let gamma2 = 3.0 * xy * xy;
        assert_abs_diff_eq!(
            got.activities[i],
            7.0 * gamma2 * ang4,
            epsilon = 1e-10
        );
        if xy.abs() > 1e-8 {
            assert_abs_diff_eq!(
                got.depolarization[i].unwrap(),
                0.75,
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn raman_without_activity() {
    let modes =
        purify(&water(), &water_hessian(), &Config::default()).unwrap();
    let got = raman(&modes, &Dmat::zeros(9, 6)).unwrap();
    assert!(got.activities.iter().all(|&a| a == 0.0));
    assert!(got.depolarization.iter().all(Option::is_none));
}
