use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::errors::MappingError;
use crate::lattice::voronoi_cells::VoronoiTable;
use crate::Result;

/// A 3D lattice with the geometry needed for periodic displacements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// Real‐space lattice vectors (columns).
    pub direct: Matrix3<f64>,
    /// Inverse of `direct`; maps Cartesian to fractional coordinates.
    pub inverse: Matrix3<f64>,
    /// Unit cell volume = det(direct).
    pub cell_volume: f64,
    /// Tolerance for float comparisons.
    pub tol: f64,
    /// Voronoi-relevant vectors and inner Voronoi radius
    pub voronoi: VoronoiTable,
}

impl Lattice {
    /// Construct a new lattice from real‐space lattice vectors (columns).
    pub fn new(direct: Matrix3<f64>, tol: f64) -> Result<Self> {
        // 1) Volume and inverse; degeneracy is judged relative to the box
        // spanned by the vector lengths so the check does not depend on scale
        let cell_volume = direct.determinant();
        let length_product: f64 = direct.column_iter().map(|column| column.norm()).product();
        if cell_volume.abs() <= tol * length_product {
            return Err(MappingError::SingularMatrix(format!(
                "lattice vectors are linearly dependent (volume {cell_volume:e})"
            )));
        }
        let inverse = direct.try_inverse().ok_or_else(|| {
            MappingError::SingularMatrix("lattice column vector matrix".to_string())
        })?;

        // 2) Voronoi cell description
        let voronoi = VoronoiTable::new(&direct, tol);

        Ok(Lattice {
            direct,
            inverse,
            cell_volume,
            tol,
            voronoi,
        })
    }

    /// Convert fractional (u,v,w) coords → cartesian.
    pub fn frac_to_cart(&self, v_frac: &Vector3<f64>) -> Vector3<f64> {
        self.direct * v_frac
    }

    /// Convert cartesian coords → fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: &Vector3<f64>) -> Vector3<f64> {
        self.inverse * v_cart
    }

    pub fn column_vector_matrix(&self) -> &Matrix3<f64> {
        &self.direct
    }

    pub fn inv_column_vector_matrix(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    /// Get the tolerance used for floating point comparisons
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Radius of the largest sphere centered at the origin that fits in the
    /// Voronoi cell (half the shortest lattice vector).
    pub fn inner_voronoi_radius(&self) -> f64 {
        self.voronoi.inner_radius
    }

    pub fn voronoi_relevant_vectors(&self) -> &[Vector3<f64>] {
        &self.voronoi.relevant_vectors
    }

    /// See [`VoronoiTable::max_voronoi_measure`].
    pub fn max_voronoi_measure(&self, cart: &Vector3<f64>) -> (f64, Vector3<f64>) {
        self.voronoi.max_voronoi_measure(cart)
    }

    /// Get the lattice vectors as separate Vector3 objects
    pub fn lattice_vectors(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        (
            self.direct.column(0).into(),
            self.direct.column(1).into(),
            self.direct.column(2).into(),
        )
    }
}
