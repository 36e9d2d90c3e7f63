//! Projection of the translations and rotations out of a mass-weighted
//! Hessian and diagonalization of what remains

use log::{debug, trace, warn};
use molecule::{Molecule, Principals};

use crate::{
    Config, Dmat, Dvec, Hessian, NormalError, PurifiedModes,
    modes::eigval_to_freq, utils::linalg::symm_eigen_decomp,
};

/// candidate translation and rotation vectors in mass-weighted Cartesian
/// coordinates. The three translations come first, followed by a rotation
/// about each principal axis with a moment of at least `zero_moment`
pub(crate) fn tr_candidates(
    mol: &Molecule,
    principals: &Principals,
    zero_moment: f64,
) -> Vec<Dvec> {
    let n3n = 3 * mol.natoms();
    let ctr = mol.centered();
    let sqm: Vec<f64> = ctr.masses().iter().map(|m| m.sqrt()).collect();
    let mut ret = Vec::with_capacity(6);
    for axis in 0..3 {
        let mut v = Dvec::zeros(n3n);
        for (k, s) in sqm.iter().enumerate() {
            v[3 * k + axis] = *s;
        }
        ret.push(v);
    }
    for (axis, moment) in principals.moments.iter().enumerate() {
        if *moment < zero_moment {
            continue;
        }
        let e = principals.axes.column(axis);
        let mut v = Dvec::zeros(n3n);
        for (k, atom) in ctr.atoms.iter().enumerate() {
            let d = e.cross(&atom.coord()) * sqm[k];
            v.fixed_rows_mut::<3>(3 * k).copy_from(&d);
        }
        ret.push(v);
    }
    ret
}

/// modified Gram-Schmidt orthonormalization of `candidates`. A candidate whose
/// remaining norm falls below `rank_tol` times its original norm is linearly
/// dependent on the previous ones and is dropped. Returns the orthonormal
/// vectors as columns, or [NormalError::SingularBasis] if fewer than
/// `expected` survive
pub(crate) fn orthonormalize(
    candidates: Vec<Dvec>,
    expected: usize,
    rank_tol: f64,
) -> Result<Dmat, NormalError> {
    let mut basis: Vec<Dvec> = Vec::with_capacity(candidates.len());
    for (i, mut v) in candidates.into_iter().enumerate() {
        let norm0 = v.norm();
        for b in &basis {
            let d = b.dot(&v);
            v.axpy(-d, b, 1.0);
        }
        let norm = v.norm();
        trace!("candidate {i}: norm {norm0:.3e}, residual {norm:.3e}");
        // written so that NaN is dropped
        if norm > rank_tol * norm0 && norm0 > 0.0 {
            basis.push(v / norm);
        }
    }
    let rank = basis.len();
    debug!("translation/rotation basis has rank {rank} of {expected}");
    if rank < expected {
        return Err(NormalError::SingularBasis { rank, expected });
    }
    Ok(Dmat::from_columns(&basis))
}

/// build the orthonormal translation/rotation basis for `mol`, returning the
/// principal moments and axes used to construct it alongside the basis. Any
/// orthonormal set of rotation axes spans the same rotations, so the axes are
/// taken straight from the eigensolver without conditioning
pub fn tr_basis(
    mol: &Molecule,
    config: &Config,
) -> Result<(Principals, Dmat), NormalError> {
    let principals = mol.raw_principals(&config.inertia_tol())?;
    let cands = tr_candidates(mol, &principals, config.zero_moment);
    let basis = orthonormalize(
        cands,
        principals.rotor.trivial_modes(),
        config.rank_tol,
    )?;
    Ok((principals, basis))
}

/// compute the normal modes of `mol` from its Cartesian Hessian `hess` after
/// projecting the translations and rotations out of the mass-weighted
/// Hessian
pub fn purify(
    mol: &Molecule,
    hess: &Hessian,
    config: &Config,
) -> Result<PurifiedModes, NormalError> {
    mol.validate()?;
    let n3n = 3 * mol.natoms();
    if hess.dim() != n3n {
        return Err(NormalError::DimensionMismatch {
            expected: n3n,
            got: hess.dim(),
        });
    }
    let masses = mol.masses();
    let fxm = hess.mass_weighted(&masses)?;

    let (principals, basis) = tr_basis(mol, config)?;
    let rank = basis.ncols();
    let proj = Dmat::identity(n3n, n3n) - &basis * basis.transpose();
    let pure = &proj * fxm * &proj;
    // restore exact symmetry lost to rounding in the products
    let pure = 0.5 * (&pure + pure.transpose());

    let (eigvals, mut lxm) = symm_eigen_decomp(pure);
    for mut col in lxm.column_iter_mut() {
        let norm = col.norm();
        if norm > 0.0 {
            col /= norm;
        }
    }

    let mut trivial: Vec<bool> =
        eigvals.iter().map(|v| v.abs() < config.zero_eigval).collect();
    let nzero = trivial.iter().filter(|&&t| t).count();
    if nzero != rank {
        warn!(
            "found {nzero} eigenvalues below {:.1e} but removed {rank} \
             translations and rotations, flagging the {rank} smallest",
            config.zero_eigval
        );
        let mut order: Vec<usize> = (0..n3n).collect();
        order.sort_by(|&a, &b| eigvals[a].abs().total_cmp(&eigvals[b].abs()));
        trivial = vec![false; n3n];
        for &i in &order[..rank] {
            trivial[i] = true;
        }
    }

    let freqs = eigvals.map(|v| eigval_to_freq(v, config.freq_unit));
    for (i, f) in freqs.iter().enumerate() {
        if !trivial[i] && *f < 0.0 {
            warn!(
                "imaginary frequency {:.1}i {} in mode {}",
                -f,
                config.freq_unit,
                i + 1
            );
        }
    }

    let sqm: Vec<f64> = masses.iter().map(|w| 1.0 / w.sqrt()).collect();
    let mut lx = lxm.clone();
    for i in 0..n3n {
        let ii = i / 3;
        for j in 0..n3n {
            lx[(i, j)] = sqm[ii] * lxm[(i, j)];
        }
    }
    let reduced_masses = Dvec::from_iterator(
        n3n,
        lx.column_iter().map(|c| 1.0 / c.norm_squared()),
    );

    Ok(PurifiedModes {
        eigvals,
        freqs,
        freq_unit: config.freq_unit,
        lxm,
        lx,
        trivial,
        reduced_masses,
        rotor: principals.rotor,
    })
}
