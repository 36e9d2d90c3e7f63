//! small vector utilities used to condition principal axes

use nalgebra::{Dim, Matrix, Storage};

use crate::{GeomError, Vec3};

/// vectors shorter than this are treated as the zero vector
pub const ZERO_VEC_TOL: f64 = 1e-6;

/// minimum angle in degrees between two vectors that are not parallel
pub const NON_PARALLEL_TOL: f64 = 1e-3;

/// the projection of `vec` onto `onto`
pub fn proj(vec: &Vec3, onto: &Vec3) -> Result<Vec3, GeomError> {
    let n2 = onto.norm_squared();
    if n2.sqrt() < ZERO_VEC_TOL {
        return Err(GeomError::ZeroVector);
    }
    Ok(vec.dot(onto) / n2 * onto)
}

/// the rejection of `vec` from `onto`, the part of `vec` orthogonal to `onto`
pub fn rej(vec: &Vec3, onto: &Vec3) -> Result<Vec3, GeomError> {
    Ok(vec - proj(vec, onto)?)
}

/// the angle between `a` and `b` in degrees
pub fn vec_angle(a: &Vec3, b: &Vec3) -> Result<f64, GeomError> {
    let (na, nb) = (a.norm(), b.norm());
    if na < ZERO_VEC_TOL || nb < ZERO_VEC_TOL {
        return Err(GeomError::ZeroVector);
    }
    let dot = (a.dot(b) / na / nb).clamp(-1.0, 1.0);
    Ok(dot.acos().to_degrees())
}

/// report whether `a` and `b` are parallel or anti-parallel to within
/// [NON_PARALLEL_TOL]
pub fn parallel_check(a: &Vec3, b: &Vec3) -> Result<bool, GeomError> {
    let angle = vec_angle(a, b)?;
    Ok(angle.min((angle - 180.0).abs()) < NON_PARALLEL_TOL)
}

/// check the columns of `a` for orthonormality, returning each pair of columns
/// `(i, j)` whose dot product deviates from δᵢⱼ by more than `tol`. Pairs with
/// `i == j` are normalization failures, and an empty return means `a` is
/// orthonormal
pub fn orthonorm_check<R, C, S>(
    a: &Matrix<f64, R, C, S>,
    tol: f64,
) -> Vec<(usize, usize)>
where
    R: Dim,
    C: Dim,
    S: Storage<f64, R, C>,
{
    let cols = a.ncols();
    let mut ret = Vec::new();
    for i in 0..cols {
        for j in i..cols {
            let delta = if i == j { 1.0 } else { 0.0 };
            let d = a.column(i).dot(&a.column(j));
            // written so that NaN fails
            if !((d - delta).abs() <= tol) {
                ret.push((i, j));
            }
        }
    }
    ret
}
