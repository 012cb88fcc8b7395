use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// A single symmetry operation in Cartesian coordinates: `x -> matrix * x + translation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymOp {
    /// Orthogonal point operation
    pub matrix: Matrix3<f64>,
    /// Cartesian translation
    pub translation: Vector3<f64>,
}

impl SymOp {
    /// Create a new symmetry operation
    pub fn new(matrix: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            matrix,
            translation,
        }
    }

    /// Create identity operation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Pure translation
    pub fn translation(translation: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix3::identity(),
            translation,
        }
    }

    /// Apply symmetry operation to a point
    pub fn apply(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * point + self.translation
    }

    /// Operation equivalent to applying `other` first, then `self`
    pub fn compose(&self, other: &SymOp) -> SymOp {
        SymOp {
            matrix: self.matrix * other.matrix,
            translation: self.matrix * other.translation + self.translation,
        }
    }

    /// Check if the point operation is the identity
    pub fn has_identity_matrix(&self, tol: f64) -> bool {
        (self.matrix - Matrix3::identity()).abs().max() < tol
    }
}

/// Use `{identity}` in place of an empty factor group
pub fn normalize_factor_group(factor_group: Vec<SymOp>) -> Vec<SymOp> {
    if factor_group.is_empty() {
        vec![SymOp::identity()]
    } else {
        factor_group
    }
}

/// Translations that map a structure onto itself without a point operation.
///
/// These are the translations of the factor group operations whose matrix is
/// the identity; for a factor group containing the identity the zero vector
/// is always among them.
pub fn make_internal_translations(factor_group: &[SymOp], tol: f64) -> Vec<Vector3<f64>> {
    factor_group
        .iter()
        .filter(|op| op.has_identity_matrix(tol))
        .map(|op| op.translation)
        .collect()
}
