use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::errors::MappingError;
use crate::lattice::Lattice;
use crate::Result;

/// A lattice mapping `F * L1 * T * N = L2`.
///
/// `L1` is the prim lattice, `L2` the lattice of the structure being mapped,
/// `F` the deformation gradient, `T` the (integer-valued) transformation
/// matrix to the superlattice and `N` a unimodular reorientation of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeMapping {
    pub deformation_gradient: Matrix3<f64>,
    pub transformation_matrix_to_super: Matrix3<f64>,
    pub reorientation: Matrix3<f64>,
}

impl LatticeMapping {
    pub fn new(
        deformation_gradient: Matrix3<f64>,
        transformation_matrix_to_super: Matrix3<f64>,
        reorientation: Matrix3<f64>,
    ) -> Self {
        LatticeMapping {
            deformation_gradient,
            transformation_matrix_to_super,
            reorientation,
        }
    }

    /// Identity mapping of a lattice onto itself
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Matrix3::identity(), Matrix3::identity())
    }
}

/// Map lattices without reorienting the child.
///
/// Solves `F * L1 * T = L2` for the deformation gradient, e.g. to relate an
/// ideal structure to the same structure after relaxation. `T` defaults to
/// the identity when `lattice2` is not a superlattice of `lattice1`.
pub fn map_lattices_without_reorientation(
    lattice1: &Lattice,
    lattice2: &Lattice,
    transformation_matrix_to_super: Option<Matrix3<i64>>,
) -> Result<LatticeMapping> {
    let transformation = transformation_matrix_to_super
        .unwrap_or_else(Matrix3::identity)
        .map(|x| x as f64);
    let transformation_inverse = transformation.try_inverse().ok_or_else(|| {
        MappingError::SingularMatrix("transformation matrix to superlattice".to_string())
    })?;

    let deformation_gradient = lattice2.column_vector_matrix()
        * transformation_inverse
        * lattice1.inv_column_vector_matrix();

    Ok(LatticeMapping::new(
        deformation_gradient,
        transformation,
        Matrix3::identity(),
    ))
}
