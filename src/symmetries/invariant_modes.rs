// Symmetry-invariant displacement modes of a prim
//
// A displacement field of the prim is a 3 x N_site matrix. A factor group
// operation acts on it by permuting sites and rotating each displacement;
// the modes returned here span the fields left unchanged by every
// operation, with rigid translations of the whole structure removed.

use nalgebra::{DMatrix, Matrix3xX, SymmetricEigen};

use crate::errors::MappingError;
use crate::lattice::is_integer;
use crate::structure::BasicStructure;
use crate::symmetries::symmetry_operations::SymOp;
use crate::Result;

// Eigenvalues of a projector are 0 or 1
const PROJECTOR_EIGENVALUE_CUTOFF: f64 = 0.5;

/// Site permutation induced by each factor group operation.
///
/// `result[op][b]` is the site that site `b` is mapped onto, i.e. the site
/// `b'` for which `op(r_b) - r_b'` is a lattice vector.
pub fn make_permutation_representation(
    prim: &BasicStructure,
    factor_group: &[SymOp],
) -> Result<Vec<Vec<usize>>> {
    let lattice = prim.lattice();
    let basis = prim.basis();

    factor_group
        .iter()
        .enumerate()
        .map(|(op_index, op)| {
            basis
                .iter()
                .enumerate()
                .map(|(site_index, site)| {
                    let transformed = op.apply(&site.coordinate_cart);
                    basis
                        .iter()
                        .position(|other| {
                            let diff_frac = lattice.cart_to_frac(&(transformed - other.coordinate_cart));
                            is_integer(&diff_frac, lattice.tol())
                        })
                        .ok_or_else(|| {
                            MappingError::InvalidFactorGroup(format!(
                                "operation {op_index} maps site {site_index} onto no prim site"
                            ))
                        })
                })
                .collect::<Result<Vec<usize>>>()
        })
        .collect()
}

/// Orthonormal basis of the symmetry-invariant, non-translational
/// displacement fields of the prim.
///
/// Built from the Reynolds projector `P = 1/|G| Σ_g R(g)` of the
/// displacement representation, times the projector removing rigid
/// translations. The eigenvectors of that (symmetric) projector with
/// eigenvalue 1 are the modes.
pub fn make_invariant_shuffle_modes(
    prim: &BasicStructure,
    factor_group: &[SymOp],
) -> Result<Vec<Matrix3xX<f64>>> {
    let n_site = prim.basis().len();
    let dim = 3 * n_site;
    if n_site == 0 || factor_group.is_empty() {
        return Ok(Vec::new());
    }

    let permutations = make_permutation_representation(prim, factor_group)?;

    let mut reynolds = DMatrix::<f64>::zeros(dim, dim);
    for (op, permutation) in factor_group.iter().zip(&permutations) {
        for (from_site, to_site) in permutation.iter().enumerate() {
            let mut block = reynolds.fixed_view_mut::<3, 3>(3 * to_site, 3 * from_site);
            block += op.matrix;
        }
    }
    reynolds /= factor_group.len() as f64;

    // Remove the rigid translation subspace
    let mut translation_projector = DMatrix::<f64>::zeros(dim, dim);
    for a in 0..n_site {
        for b in 0..n_site {
            for i in 0..3 {
                translation_projector[(3 * a + i, 3 * b + i)] = 1.0 / n_site as f64;
            }
        }
    }
    let shuffle = &reynolds - &reynolds * &translation_projector;
    let symmetric = (&shuffle + shuffle.transpose()) * 0.5;

    let eigen = SymmetricEigen::new(symmetric);
    let modes = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .filter(|(_, value)| **value > PROJECTOR_EIGENVALUE_CUTOFF)
        .map(|(index, _)| {
            let vector = eigen.eigenvectors.column(index);
            Matrix3xX::from_fn(n_site, |row, col| vector[3 * col + row])
        })
        .collect();

    Ok(modes)
}
