// Structure module: the reference crystal structure model
// Supplies site coordinates, allowed occupants and vacancy permissions to the search

// ======================== MODULE DECLARATIONS ========================
pub mod basic_structure;


// ======================== STRUCTURE TYPES ========================
pub use basic_structure::{
    AtomPosition,   // struct - named atom of a molecule, relative Cartesian position
    BasicStructure, // struct - lattice plus basis sites
    Molecule,       // struct - site occupant (atomic when it has one atom)
    Site,           // struct - basis site with allowed occupants
    is_vacancy,     // fn(name: &str) -> bool - "Va", "VA" or "va"
};
