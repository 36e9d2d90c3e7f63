use crate::{Dmat, Dvec};
use nalgebra::SymmetricEigen;

/// compute the eigendecomposition of the symmetric matrix `mat` and return the
/// eigenvalues in ascending order along with the corresponding eigenvectors as
/// columns
pub fn symm_eigen_decomp(mat: Dmat) -> (Dvec, Dmat) {
    let SymmetricEigen {
        eigenvectors: vecs,
        eigenvalues: vals,
    } = SymmetricEigen::new(mat);
    let mut pairs: Vec<_> = vals.iter().enumerate().collect();
    pairs.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    let (rows, cols) = vecs.shape();
    let mut ret = Dmat::zeros(rows, cols);
    for (i, (p, _)) in pairs.iter().enumerate() {
        ret.set_column(i, &vecs.column(*p));
    }
    (
        Dvec::from_iterator(vals.len(), pairs.iter().map(|a| *a.1)),
        ret,
    )
}
