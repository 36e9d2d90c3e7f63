//! principal moments of inertia, conditioned principal axes, and rotational
//! constants

use log::debug;
use serde::{Deserialize, Serialize};
use units::RotConstUnit;

use crate::{
    GeomError, Mat3, Molecule, Rotor, Vec3, symm_eigen_decomp3,
    vector::{ZERO_VEC_TOL, orthonorm_check, parallel_check, rej},
};

/// tolerances for working with the inertia tensor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InertiaTol {
    /// moments below this value in u·B² are zero
    pub zero_moment: f64,

    /// two moments are equal if their ratio deviates from one by less than
    /// this
    pub equal_moment: f64,

    /// allowed deviation of the principal axes from orthonormality
    pub orthonorm: f64,
}

impl Default for InertiaTol {
    fn default() -> Self {
        Self {
            zero_moment: 1e-3,
            equal_moment: 1e-3,
            orthonorm: 1e-8,
        }
    }
}

/// the principal moments of inertia of a molecule in u·B², in ascending order,
/// with the corresponding principal axes as the columns of `axes`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principals {
    pub moments: Vec3,
    pub axes: Mat3,
    pub rotor: Rotor,
}

impl Principals {
    /// rotational constants in `unit`, in descending order. zero moments of
    /// atoms and linear molecules are replaced by `zero_moment` so that the
    /// constants stay finite
    pub fn rot_consts(&self, unit: RotConstUnit, zero_moment: f64) -> [f64; 3] {
        let mut moms = self.moments;
        match self.rotor {
            Rotor::Atom => moms = Vec3::repeat(zero_moment),
            Rotor::Linear => moms[0] = zero_moment,
            _ => {}
        }
        let f = unit.factor();
        [f / moms[0], f / moms[1], f / moms[2]]
    }
}

/// the first atomic displacement in `geom` that is not orthogonal to `vec`
fn first_non_orthogonal(
    vec: &Vec3,
    geom: &[Vec3],
    tol: f64,
) -> Result<Vec3, GeomError> {
    let vec = vec.normalize();
    geom.iter()
        .filter(|d| d.norm() >= ZERO_VEC_TOL)
        .map(|d| d.normalize())
        .find(|d| d.dot(&vec).abs() > tol)
        .ok_or(GeomError::NoReferenceDisplacement)
}

/// the first atomic displacement in `geom` that is not parallel to `vec`
fn first_non_parallel(vec: &Vec3, geom: &[Vec3]) -> Result<Vec3, GeomError> {
    for d in geom.iter().filter(|d| d.norm() >= ZERO_VEC_TOL) {
        if !parallel_check(d, vec)? {
            return Ok(d.normalize());
        }
    }
    Err(GeomError::NoReferenceDisplacement)
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

impl Molecule {
    /// the inertia tensor Σ mₖ(|rₖ|²I₃ - rₖrₖᵀ) about the center of mass
    pub fn inertia_tensor(&self) -> Mat3 {
        self.centered().moi()
    }

    /// eigendecompose the inertia tensor and classify the rotor without
    /// conditioning the axes. The columns of `axes` are orthonormal, but their
    /// signs and their orientation within a degenerate subspace are whatever
    /// the eigensolver returns
    pub fn raw_principals(
        &self,
        tol: &InertiaTol,
    ) -> Result<Principals, GeomError> {
        self.validate()?;
        let (moments, axes) = symm_eigen_decomp3(self.inertia_tensor());
        if moments[0] < -tol.zero_moment {
            return Err(GeomError::NegativeMoment(moments[0]));
        }
        let rotor = Rotor::classify(&moments, tol);
        debug!("principal moments {moments:.8} for {rotor}");
        Ok(Principals {
            moments,
            axes,
            rotor,
        })
    }

    /// eigendecompose the inertia tensor and classify the rotor. The principal
    /// axes are conditioned so that the same molecule yields the same axes
    /// regardless of how the eigensolver chooses their signs: each axis points
    /// toward the first atom with a non-trivial projection on it, and the
    /// axes form a right-handed system
    pub fn principals(
        &self,
        tol: &InertiaTol,
    ) -> Result<Principals, GeomError> {
        let ctr = self.centered();
        let Principals {
            moments,
            axes: vecs,
            rotor,
        } = ctr.raw_principals(tol)?;

        let geom: Vec<Vec3> = ctr.atoms.iter().map(|a| a.coord()).collect();
        let on = tol.orthonorm;
        let mut axes = Mat3::zeros();
        match rotor {
            Rotor::Atom => axes = Mat3::identity(),
            Rotor::Linear => {
                let a = geom
                    .iter()
                    .find(|d| d.norm() >= ZERO_VEC_TOL)
                    .ok_or(GeomError::NoReferenceDisplacement)?
                    .normalize();
                let b = if parallel_check(&a, &Vec3::x())? {
                    rej(&Vec3::y(), &a)?
                } else {
                    rej(&Vec3::x(), &a)?
                }
                .normalize();
                axes.set_column(0, &a);
                axes.set_column(1, &b);
                axes.set_column(2, &a.cross(&b));
            }
            Rotor::AsymmTop => {
                if !orthonorm_check(&vecs, on).is_empty() {
                    return Err(GeomError::NotOrthonormal);
                }
                let a: Vec3 = vecs.column(0).into_owned();
                let b: Vec3 = vecs.column(1).into_owned();
                let c: Vec3 = vecs.column(2).into_owned();
                let a = a * sign(a.dot(&first_non_orthogonal(&a, &geom, on)?));
                let b = b * sign(b.dot(&first_non_orthogonal(&b, &geom, on)?));
                let c = c * sign(c.dot(&a.cross(&b)));
                axes.set_column(0, &a);
                axes.set_column(1, &b);
                axes.set_column(2, &c);
            }
            Rotor::OblateSymmTop => {
                let unique: Vec3 = vecs.column(2).into_owned();
                let a =
                    rej(&first_non_parallel(&unique, &geom)?, &unique)?
                        .normalize();
                let c = match first_non_orthogonal(&unique, &geom, on) {
                    Ok(d) => unique * sign(unique.dot(&d)),
                    // every atom lies in the plane perpendicular to the
                    // unique axis, so take the normal of that plane from the
                    // first pair of displacements that are not parallel
                    Err(GeomError::NoReferenceDisplacement) => {
                        a.cross(&first_non_parallel(&a, &geom)?)
                    }
                    Err(e) => return Err(e),
                }
                .normalize();
                axes.set_column(0, &a);
                axes.set_column(1, &c.cross(&a));
                axes.set_column(2, &c);
            }
            Rotor::ProlateSymmTop => {
                let unique: Vec3 = vecs.column(0).into_owned();
                let a = unique
                    * sign(unique.dot(&first_non_orthogonal(
                        &unique, &geom, on,
                    )?));
                let b = rej(&first_non_parallel(&a, &geom)?, &a)?.normalize();
                axes.set_column(0, &a);
                axes.set_column(1, &b);
                axes.set_column(2, &a.cross(&b));
            }
            Rotor::SphericalTop => {
                let a = geom
                    .iter()
                    .find(|d| d.norm() >= ZERO_VEC_TOL)
                    .ok_or(GeomError::NoReferenceDisplacement)?
                    .normalize();
                let b = rej(&first_non_parallel(&a, &geom)?, &a)?.normalize();
                axes.set_column(0, &a);
                axes.set_column(1, &b);
                axes.set_column(2, &a.cross(&b));
            }
        }
        if !orthonorm_check(&axes, on).is_empty() {
            return Err(GeomError::NotOrthonormal);
        }
        Ok(Principals {
            moments,
            axes,
            rotor,
        })
    }

    /// rotational constants B = h/(8π²cI) of `self` in `unit`, in descending
    /// order
    pub fn rot_consts(
        &self,
        unit: RotConstUnit,
        tol: &InertiaTol,
    ) -> Result<[f64; 3], GeomError> {
        Ok(self.principals(tol)?.rot_consts(unit, tol.zero_moment))
    }
}
