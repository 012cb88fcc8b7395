use thiserror::Error;

/// Errors raised while building search data or mapping atoms.
///
/// Every variant is a violated precondition of the computation in progress.
/// An infeasible site/atom pairing is not an error; it is priced at the
/// "infinity" value of the cost matrix instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("atom_type.len() ({n_atom_type}) != atom_coordinate_cart.ncols() ({n_coordinate})")]
    AtomTypeCountMismatch {
        n_atom_type: usize,
        n_coordinate: usize,
    },

    #[error("only prim with atomic occupants are supported (site {site_index} allows '{occupant}')")]
    MolecularOccupant { site_index: usize, occupant: String },

    #[error("more atoms ({n_atom}) than sites ({n_site})")]
    TooManyAtoms { n_atom: usize, n_site: usize },

    #[error("site displacements have {n_displacement_site} sites but allowed_atom_types has {n_allowed_atom_types}")]
    SiteCountMismatch {
        n_displacement_site: usize,
        n_allowed_atom_types: usize,
    },

    #[error("site {site_index} has {n_displacement_atom} displacements but atom_type has {n_atom_type} entries")]
    AtomCountMismatch {
        site_index: usize,
        n_displacement_atom: usize,
        n_atom_type: usize,
    },

    #[error("singular matrix: {0}")]
    SingularMatrix(String),

    #[error("transformation matrix is not integral (max residual {max_residual:e})")]
    NonIntegralTransformation { max_residual: f64 },

    #[error("invalid factor group: {0}")]
    InvalidFactorGroup(String),

    #[error("supercell enumeration failed: expected {expected} unit cells, found {found}")]
    SupercellEnumeration { expected: usize, found: usize },

    #[error("prim search data was built without symmetry-invariant displacement modes")]
    MissingInvariantModes,

    #[error("displacement has {found} columns, expected {expected}")]
    DisplacementShape { expected: usize, found: usize },

    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),
}
