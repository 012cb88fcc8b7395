//! Atom mapping search data
//!
//! Geometry for mapping the atoms of a crystal structure onto the sites of a
//! reference ("prim") structure: minimum-image periodic displacements,
//! candidate trial translations, and the cost matrix of the site/atom
//! assignment problem, layered as
//! prim + structure -> lattice mapping -> trial translation.

pub mod config;
pub mod errors;
pub mod lattice;
pub mod mapping;
pub mod structure;
pub mod symmetries;

pub use errors::MappingError;
pub use lattice::{Lattice, UnitCellCoord, UnitCellCoordIndexConverter};
pub use mapping::{
    AssignmentSolver, AtomMapping, AtomMappingResults, AtomMappingSearchData, LatticeMapping,
    LatticeMappingSearchData, PrimSearchData, ScoredAtomMapping, StructureSearchData,
};
pub use structure::BasicStructure;
pub use symmetries::SymOp;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, MappingError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
