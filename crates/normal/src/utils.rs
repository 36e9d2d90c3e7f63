//! parsing of whitespace-separated matrices

use crate::{Dmat, NormalError};

pub mod linalg;

/// parse every whitespace-separated entry in `s` as an `f64`
pub fn parse_numbers(s: &str) -> Result<Vec<f64>, NormalError> {
    s.split_whitespace()
        .map(|w| {
            w.parse::<f64>().map_err(|e| {
                NormalError::Parse(format!("failed to parse `{w}` with {e}"))
            })
        })
        .collect()
}

/// parse a square matrix whose dimension is a multiple of three from `s`.
/// `s` can hold either the full matrix in row-major order or only its lower
/// triangle, row by row, in which case the upper triangle is filled by
/// symmetry
pub fn parse_square(s: &str) -> Result<Dmat, NormalError> {
    let data = parse_numbers(s)?;
    let len = data.len();
    if let Some(n) = exact_sqrt(len).filter(|n| n % 3 == 0 && *n > 0) {
        return Ok(Dmat::from_row_slice(n, n, &data));
    }
    let Some(n) = triangle_side(len).filter(|n| n % 3 == 0 && *n > 0) else {
        return Err(NormalError::Parse(format!(
            "{len} entries cannot form a full or lower-triangular matrix \
             with a dimension divisible by 3"
        )));
    };
    let mut ret = Dmat::zeros(n, n);
    let mut entries = data.into_iter();
    for i in 0..n {
        for j in 0..=i {
            // the count was checked above
            let v = entries.next().unwrap_or_default();
            ret[(i, j)] = v;
            ret[(j, i)] = v;
        }
    }
    Ok(ret)
}

/// parse a matrix with `cols` columns from the row-major entries in `s`
pub fn parse_rows(s: &str, cols: usize) -> Result<Dmat, NormalError> {
    let data = parse_numbers(s)?;
    if cols == 0 || data.is_empty() || data.len() % cols != 0 {
        return Err(NormalError::Parse(format!(
            "{} entries cannot form a matrix with {cols} columns",
            data.len()
        )));
    }
    Ok(Dmat::from_row_slice(data.len() / cols, cols, &data))
}

fn exact_sqrt(len: usize) -> Option<usize> {
    let n = (len as f64).sqrt().round() as usize;
    (n * n == len).then_some(n)
}

/// the side `n` of a lower triangle with n(n+1)/2 entries
fn triangle_side(len: usize) -> Option<usize> {
    let n = (((8 * len + 1) as f64).sqrt().round() as usize).saturating_sub(1)
        / 2;
    (n * (n + 1) / 2 == len).then_some(n)
}
