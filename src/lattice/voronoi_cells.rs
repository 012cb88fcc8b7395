// Voronoi cell geometry of 3D lattices
//
// The Voronoi (Wigner-Seitz) cell of the origin is described here by its
// Voronoi-relevant lattice vectors rather than by an explicit polyhedron:
// a point x lies inside the cell iff 2 v·x / |v|² <= 1 for every relevant v.
// That is all the periodic displacement code needs.

// ======================== IMPORTS ========================
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::lattice::lattice_algorithms::lll_reduce;

// ======================== CONSTANTS ========================
// Shell of the reduced basis searched for relevant vectors
const RELEVANT_VECTOR_SHELL: usize = 2;

// ======================== LATTICE POINT GENERATION ========================

/// Generate 3D lattice points by shell
///
/// Returns all lattice points n·a₁ + m·a₂ + l·a₃ with |n|,|m|,|l| ≤ max_shell
/// (excluding the origin)
pub fn generate_lattice_points_3d_by_shell(
    basis: &Matrix3<f64>,
    max_shell: usize,
) -> Vec<Vector3<f64>> {
    let vector_a1 = basis.column(0);
    let vector_a2 = basis.column(1);
    let vector_a3 = basis.column(2);
    let shell_limit = max_shell as i32;

    let mut lattice_points = Vec::new();
    for n in -shell_limit..=shell_limit {
        for m in -shell_limit..=shell_limit {
            for l in -shell_limit..=shell_limit {
                if n == 0 && m == 0 && l == 0 {
                    continue; // Skip origin
                }
                let point = (n as f64) * vector_a1 + (m as f64) * vector_a2 + (l as f64) * vector_a3;
                lattice_points.push(point);
            }
        }
    }
    lattice_points
}

// ======================== VORONOI-RELEVANT VECTORS ========================

/// Find the lattice vectors whose perpendicular bisector planes bound the
/// Voronoi cell of the origin.
///
/// Candidates are generated from the LLL-reduced basis; a candidate `v` is
/// kept when `v/2` lies inside the closed Voronoi cell of every other
/// candidate, i.e. `w·v <= |w|²` for all `w`. Vectors whose midpoint falls on
/// an edge or corner of the cell are kept as well; they never change the
/// cell and are harmless for [`VoronoiTable::max_voronoi_measure`].
///
/// Parameters:
/// - `basis`: Columns are the lattice vectors a₁, a₂, a₃
/// - `tolerance`: Relative tolerance applied to the bisector test
pub fn compute_voronoi_relevant_vectors(basis: &Matrix3<f64>, tolerance: f64) -> Vec<Vector3<f64>> {
    let reduced = lll_reduce(basis);
    let candidates = generate_lattice_points_3d_by_shell(&reduced, RELEVANT_VECTOR_SHELL);

    candidates
        .iter()
        .filter(|v| {
            candidates.iter().all(|w| {
                let w_norm_squared = w.norm_squared();
                w.dot(v) <= w_norm_squared * (1.0 + tolerance)
            })
        })
        .copied()
        .collect()
}

// ======================== VORONOI TABLE ========================

/// Voronoi-relevant vectors of a lattice with the derived inner radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoronoiTable {
    /// Lattice vectors bounding the Voronoi cell of the origin.
    pub relevant_vectors: Vec<Vector3<f64>>,
    /// Radius of the largest sphere inscribed in the Voronoi cell.
    pub inner_radius: f64,
}

impl VoronoiTable {
    pub fn new(basis: &Matrix3<f64>, tolerance: f64) -> Self {
        let relevant_vectors = compute_voronoi_relevant_vectors(basis, tolerance);
        let inner_radius = relevant_vectors
            .iter()
            .map(|v| 0.5 * v.norm())
            .fold(f64::INFINITY, f64::min);
        VoronoiTable {
            relevant_vectors,
            inner_radius,
        }
    }

    /// Largest Voronoi measure `2 v·x / |v|²` of a Cartesian point, and the
    /// lattice vector attaining it.
    ///
    /// A measure greater than 1 means `x` lies outside the Voronoi cell, and
    /// `x - v` is strictly shorter than `x`.
    pub fn max_voronoi_measure(&self, cart: &Vector3<f64>) -> (f64, Vector3<f64>) {
        let mut max_measure = f64::NEG_INFINITY;
        let mut lattice_translation = Vector3::zeros();
        for v in &self.relevant_vectors {
            let measure = 2.0 * v.dot(cart) / v.norm_squared();
            if measure > max_measure {
                max_measure = measure;
                lattice_translation = *v;
            }
        }
        (max_measure, lattice_translation)
    }
}
