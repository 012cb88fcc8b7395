// Mapping module: atom-to-site mapping geometry for one lattice mapping of a structure onto a prim
// This module provides periodic displacements, trial translations, and assignment cost matrices

// ======================== MODULE DECLARATIONS ========================
pub mod atom_mapping;
pub mod cost_matrix;
pub mod lattice_mapping;
pub mod pbc_displacement;
pub mod search_data;
pub mod trial_translations;

// Test modules
mod _tests_cost_matrix;
mod _tests_pbc_displacement;

// ======================== PERIODIC DISPLACEMENTS ========================
pub use pbc_displacement::{
    fast_pbc_displacement_cart,   // fn(lattice: &Lattice, site_cart, atom_cart) -> Vector3<f64> - rounding in fractional coordinates
    robust_pbc_displacement_cart, // fn(lattice: &Lattice, site_cart, atom_cart) -> Vector3<f64> - reduced into the Voronoi cell
};

// ======================== TRIAL TRANSLATIONS ========================
pub use trial_translations::{
    is_new_unique_translation,                // fn(prim_lattice, test, internal, current) -> bool
    make_trial_translations_from_coordinates, // fn(atoms, atom_type, prim_lattice, prim_sites, allowed, factor_group) -> Vec<Vector3<f64>>
};

// ======================== DISPLACEMENT FIELD & COST MATRIX ========================
pub use cost_matrix::{
    AtomMappingCostFunction, // trait - Fn(&Vector3<f64>, &str, &[String], f64) -> f64 + Sync
    SiteDisplacements,       // type - Vec<Vec<Vector3<f64>>>, [site][atom]
    make_atom_mapping_cost,  // fn - default cost: 0 / infinity for vacancies, infinity if disallowed, |d|² otherwise
    make_cost_matrix,        // fn(f, site_displacements, atom_type, allowed_atom_types, infinity) -> Result<DMatrix<f64>>
    make_site_displacements, // fn(lattice, sites, atoms, trial_translation) -> Result<SiteDisplacements>
};

// ======================== LATTICE MAPPING ========================
pub use lattice_mapping::{
    LatticeMapping,                     // struct - F * L1 * T * N = L2
    map_lattices_without_reorientation, // fn(lattice1, lattice2, T: Option<Matrix3<i64>>) -> Result<LatticeMapping>
};

// ======================== RESULTS ========================
pub use atom_mapping::{
    AssignmentSolver,   // trait - external minimum cost assignment solver
    AtomMapping,        // struct - displacement, permutation, translation
    AtomMappingResults, // struct - ordered collection of ScoredAtomMapping
    ScoredAtomMapping,  // struct - AtomMapping with its cost
};

// ======================== SEARCH DATA ========================
pub use search_data::{
    AtomMappingSearchData,    // struct - displacements and cost matrix for one trial translation
    LatticeMappingSearchData, // struct - supercell geometry for one lattice mapping
    PrimSearchData,           // struct - prim sites, allowed types, factor group, invariant modes
    StructureSearchData,      // struct - structure lattice, atoms, types, factor group
    make_trial_translations,  // fn(lattice_mapping_data: &LatticeMappingSearchData) -> Vec<Vector3<f64>>
};
