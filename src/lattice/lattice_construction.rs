use nalgebra::Matrix3;

use crate::config::DEFAULT_LATTICE_TOLERANCE;
use crate::lattice::lattice_algorithms::integer_determinant;
use crate::lattice::Lattice;
use crate::errors::MappingError;
use crate::Result;

// Standard lattice construction utilities for common 3D lattices

/// Create a simple cubic lattice with given lattice parameter
pub fn cubic_lattice(a: f64) -> Result<Lattice> {
    let direct = Matrix3::new(a, 0.0, 0.0, 0.0, a, 0.0, 0.0, 0.0, a);
    Lattice::new(direct, DEFAULT_LATTICE_TOLERANCE)
}

/// Create the primitive cell of a body-centered cubic lattice
pub fn body_centered_cubic_lattice(a: f64) -> Result<Lattice> {
    let h = a / 2.0;
    let direct = Matrix3::new(-h, h, h, h, -h, h, h, h, -h);
    Lattice::new(direct, DEFAULT_LATTICE_TOLERANCE)
}

/// Create the primitive cell of a face-centered cubic lattice
pub fn face_centered_cubic_lattice(a: f64) -> Result<Lattice> {
    let h = a / 2.0;
    let direct = Matrix3::new(0.0, h, h, h, 0.0, h, h, h, 0.0);
    Lattice::new(direct, DEFAULT_LATTICE_TOLERANCE)
}

/// Create a hexagonal lattice with in-plane parameter a and height c
pub fn hexagonal_lattice(a: f64, c: f64) -> Result<Lattice> {
    let direct = Matrix3::new(
        a,
        -a / 2.0,
        0.0,
        0.0,
        a * 3.0_f64.sqrt() / 2.0,
        0.0,
        0.0,
        0.0,
        c,
    );
    Lattice::new(direct, DEFAULT_LATTICE_TOLERANCE)
}

/// Create a (possibly triclinic) lattice from lengths and angles (radians).
///
/// `a` lies along x, `b` in the xy-plane.
pub fn lattice_from_parameters(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<Lattice> {
    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();
    let direct = Matrix3::new(
        a,
        b * gamma.cos(),
        cx,
        0.0,
        b * gamma.sin(),
        cy,
        0.0,
        0.0,
        cz,
    );
    Lattice::new(direct, DEFAULT_LATTICE_TOLERANCE)
}

// Utility functions for lattice transformations

/// Create the superlattice S = L * T of a lattice.
///
/// The result keeps the tolerance of `lattice`.
pub fn make_superlattice(lattice: &Lattice, transformation_matrix: &Matrix3<i64>) -> Result<Lattice> {
    if integer_determinant(transformation_matrix) == 0 {
        return Err(MappingError::SingularMatrix(
            "transformation matrix to superlattice".to_string(),
        ));
    }
    let supercell_direct = lattice.column_vector_matrix() * transformation_matrix.map(|x| x as f64);
    Lattice::new(supercell_direct, lattice.tol())
}
