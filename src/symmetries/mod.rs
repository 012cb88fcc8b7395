// Symmetries module: Contains symmetry operations and symmetry-adapted displacement modes
// This module provides the factor group handling used to deduplicate trial translations

// ======================== MODULE DECLARATIONS ========================
pub mod invariant_modes;
pub mod symmetry_operations;


// ======================== SYMMETRY OPERATIONS ========================
pub use symmetry_operations::{
    SymOp,                      // struct - Cartesian symmetry operation (matrix + translation)
    make_internal_translations, // fn(factor_group: &[SymOp], tol: f64) -> Vec<Vector3<f64>> - translations of identity-matrix ops
    normalize_factor_group,     // fn(factor_group: Vec<SymOp>) -> Vec<SymOp> - empty -> {identity}
};
// SymOp impl methods:
//   new(matrix: Matrix3<f64>, translation: Vector3<f64>) -> Self      - creates operation
//   identity() -> Self                                                - identity operation
//   translation(translation: Vector3<f64>) -> Self                    - pure translation
//   apply(&self, point: &Vector3<f64>) -> Vector3<f64>                - applies operation to point
//   compose(&self, other: &SymOp) -> SymOp                            - `other` first, then `self`
//   has_identity_matrix(&self, tol: f64) -> bool                      - point operation is identity

// ======================== INVARIANT DISPLACEMENT MODES ========================
pub use invariant_modes::{
    make_invariant_shuffle_modes,    // fn(prim: &BasicStructure, factor_group: &[SymOp]) -> Result<Vec<Matrix3xX<f64>>>
    make_permutation_representation, // fn(prim: &BasicStructure, factor_group: &[SymOp]) -> Result<Vec<Vec<usize>>>
};
