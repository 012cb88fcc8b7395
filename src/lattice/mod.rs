// Lattice module: 3D lattices, their Voronoi geometry, and supercells
// This module provides the periodic geometry the mapping search is built on

// ======================== MODULE DECLARATIONS ========================
pub mod lattice3d;
pub mod lattice_algorithms;
pub mod lattice_construction;
pub mod unitcellcoord;
pub mod voronoi_cells;


// ======================== 3D LATTICE STRUCTURE ========================
pub use lattice3d::Lattice; // struct - 3D lattice with inverse, tolerance and Voronoi table
// Lattice impl methods:
//   new(direct: Matrix3<f64>, tol: f64) -> Result<Self>                - constructs lattice, fails if singular
//   frac_to_cart(&self, v_frac: &Vector3<f64>) -> Vector3<f64>          - converts fractional to cartesian coordinates
//   cart_to_frac(&self, v_cart: &Vector3<f64>) -> Vector3<f64>          - converts cartesian to fractional coordinates
//   column_vector_matrix(&self) -> &Matrix3<f64>                        - lattice vectors as columns
//   inv_column_vector_matrix(&self) -> &Matrix3<f64>                    - inverse of the column vector matrix
//   tol(&self) -> f64                                                   - floating point tolerance
//   inner_voronoi_radius(&self) -> f64                                  - half the shortest lattice vector
//   max_voronoi_measure(&self, cart: &Vector3<f64>) -> (f64, Vector3<f64>) - largest Voronoi measure and its lattice vector

// ======================== VORONOI CELL GEOMETRY ========================
pub use voronoi_cells::{
    VoronoiTable,                        // struct - Voronoi-relevant vectors and inner radius
    compute_voronoi_relevant_vectors,    // fn(basis: &Matrix3<f64>, tolerance: f64) -> Vec<Vector3<f64>>
    generate_lattice_points_3d_by_shell, // fn(basis: &Matrix3<f64>, max_shell: usize) -> Vec<Vector3<f64>>
};

// ======================== LATTICE ALGORITHMS ========================
pub use lattice_algorithms::{
    integer_determinant,     // fn(m: &Matrix3<i64>) -> i64
    is_integer,              // fn(v: &Vector3<f64>, tol: f64) -> bool
    lll_reduce,              // fn(basis: &Matrix3<f64>) -> Matrix3<f64>
    round_to_integer_matrix, // fn(matrix: &Matrix3<f64>, tol: f64) -> Result<Matrix3<i64>>
};

// ======================== LATTICE CONSTRUCTION UTILITIES ========================
pub use lattice_construction::{
    body_centered_cubic_lattice, // fn(a: f64) -> Result<Lattice>
    cubic_lattice,               // fn(a: f64) -> Result<Lattice>
    face_centered_cubic_lattice, // fn(a: f64) -> Result<Lattice>
    hexagonal_lattice,           // fn(a: f64, c: f64) -> Result<Lattice>
    lattice_from_parameters,     // fn(a, b, c, alpha, beta, gamma) -> Result<Lattice>
    make_superlattice,           // fn(lattice: &Lattice, T: &Matrix3<i64>) -> Result<Lattice>
};

// ======================== SUPERCELL SITE INDEXING ========================
pub use unitcellcoord::{
    UnitCell,                    // type - Vector3<i64> prim unit cell coordinates
    UnitCellCoord,               // struct - (sublattice, unitcell)
    UnitCellCoordIndexConverter, // struct - linear site index <-> UnitCellCoord bijection
};
