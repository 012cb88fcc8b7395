// Constants

// Tolerances
pub const DEFAULT_LATTICE_TOLERANCE: f64 = 1e-5; // Default `Lattice::tol`
pub const INTEGER_ROUNDING_TOLERANCE: f64 = 1e-5; // Max |x - round(x)| accepted for T * N

// Assignment problem
pub const DEFAULT_INFINITY: f64 = 1e20; // Cost of a disallowed site/atom pairing

// Occupants
pub const VACANCY_NAME: &str = "Va"; // Name given to padded vacancies
pub const VACANCY_NAMES: [&str; 3] = ["Va", "VA", "va"];
