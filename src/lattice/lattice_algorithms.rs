use nalgebra::{Matrix3, Vector3};

use crate::errors::MappingError;
use crate::Result;

/// Lovász condition parameter of the LLL reduction.
const LLL_DELTA: f64 = 0.75;

/// Reduce a 3D lattice basis with the Lenstra–Lenstra–Lovász algorithm.
///
/// The reduced basis spans the same lattice with short, nearly orthogonal
/// columns. This is what makes the Voronoi-relevant vector search of
/// [`crate::lattice::voronoi_cells`] complete for skewed cells.
///
/// # Arguments
/// * `basis` - Lattice vectors as columns (must be non-singular)
///
/// # Returns
/// Reduced lattice vectors as columns
pub fn lll_reduce(basis: &Matrix3<f64>) -> Matrix3<f64> {
    let mut b: [Vector3<f64>; 3] = [
        basis.column(0).into(),
        basis.column(1).into(),
        basis.column(2).into(),
    ];

    let mut k = 1;
    while k < 3 {
        // Size reduction of b[k] against all earlier vectors
        for j in (0..k).rev() {
            let gs = gram_schmidt(&b);
            let mu = b[k].dot(&gs[j]) / gs[j].norm_squared();
            let q = mu.round();
            if q != 0.0 {
                let shift = q * b[j];
                b[k] -= shift;
            }
        }

        let gs = gram_schmidt(&b);
        let mu = b[k].dot(&gs[k - 1]) / gs[k - 1].norm_squared();
        if gs[k].norm_squared() >= (LLL_DELTA - mu * mu) * gs[k - 1].norm_squared() {
            k += 1;
        } else {
            b.swap(k, k - 1);
            k = (k - 1).max(1);
        }
    }

    Matrix3::from_columns(&b)
}

fn gram_schmidt(b: &[Vector3<f64>; 3]) -> [Vector3<f64>; 3] {
    let mut gs = *b;
    for i in 0..3 {
        for j in 0..i {
            let gs_j = gs[j];
            gs[i] -= b[i].dot(&gs_j) / gs_j.norm_squared() * gs_j;
        }
    }
    gs
}

/// Check that every component of `v` is within `tol` of an integer.
pub fn is_integer(v: &Vector3<f64>, tol: f64) -> bool {
    v.iter().all(|x| (x - x.round()).abs() < tol)
}

/// Round a floating point matrix to the nearest integer matrix.
///
/// Fails with [`MappingError::NonIntegralTransformation`] if any entry is
/// further than `tol` from its rounded value.
pub fn round_to_integer_matrix(matrix: &Matrix3<f64>, tol: f64) -> Result<Matrix3<i64>> {
    let max_residual = matrix
        .iter()
        .map(|x| (x - x.round()).abs())
        .fold(0.0_f64, f64::max);
    if max_residual > tol {
        return Err(MappingError::NonIntegralTransformation { max_residual });
    }
    Ok(matrix.map(|x| x.round() as i64))
}

/// Determinant of an integer 3x3 matrix, computed exactly.
pub fn integer_determinant(m: &Matrix3<i64>) -> i64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}
