// Reference ("prim") structure model: a lattice plus basis sites, each
// with the list of occupants allowed on it.

use nalgebra::{Matrix3xX, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::{VACANCY_NAME, VACANCY_NAMES};
use crate::lattice::Lattice;

/// Check whether an atom type or occupant name denotes a vacancy
pub fn is_vacancy(name: &str) -> bool {
    VACANCY_NAMES.contains(&name)
}

/// An atom of a molecule, positioned relative to the molecule's site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomPosition {
    pub name: String,
    pub cart: Vector3<f64>,
}

/// A site occupant: a named group of atoms.
///
/// Atomic occupants have exactly one atom at the site position. A vacancy
/// is represented as a single atom with a vacancy name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub name: String,
    pub atoms: Vec<AtomPosition>,
}

impl Molecule {
    /// Single atom occupant
    pub fn atom(name: impl Into<String>) -> Self {
        let name = name.into();
        Molecule {
            atoms: vec![AtomPosition {
                name: name.clone(),
                cart: Vector3::zeros(),
            }],
            name,
        }
    }

    pub fn vacancy() -> Self {
        Self::atom(VACANCY_NAME)
    }

    pub fn is_vacancy(&self) -> bool {
        is_vacancy(&self.name)
    }

    pub fn is_atomic(&self) -> bool {
        self.atoms.len() <= 1
    }
}

/// A basis site with its allowed occupants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub coordinate_cart: Vector3<f64>,
    pub occupant_dof: Vec<Molecule>,
}

impl Site {
    pub fn new(coordinate_cart: Vector3<f64>, occupant_dof: Vec<Molecule>) -> Self {
        Site {
            coordinate_cart,
            occupant_dof,
        }
    }

    /// Site allowing the given atom types (names matching a vacancy
    /// spelling become vacancies).
    pub fn with_atom_types(coordinate_cart: Vector3<f64>, atom_types: &[&str]) -> Self {
        let occupant_dof = atom_types.iter().map(|name| Molecule::atom(*name)).collect();
        Site::new(coordinate_cart, occupant_dof)
    }

    pub fn vacancy_allowed(&self) -> bool {
        self.occupant_dof.iter().any(Molecule::is_vacancy)
    }
}

/// A crystal structure: lattice plus basis sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicStructure {
    pub lattice: Lattice,
    pub basis: Vec<Site>,
}

impl BasicStructure {
    pub fn new(lattice: Lattice, basis: Vec<Site>) -> Self {
        BasicStructure { lattice, basis }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn basis(&self) -> &[Site] {
        &self.basis
    }

    /// Names of the occupants allowed on each site
    pub fn allowed_molecule_names(&self) -> Vec<Vec<String>> {
        self.basis
            .iter()
            .map(|site| site.occupant_dof.iter().map(|mol| mol.name.clone()).collect())
            .collect()
    }

    /// Whether each site may be vacant
    pub fn vacancies_allowed(&self) -> Vec<bool> {
        self.basis.iter().map(Site::vacancy_allowed).collect()
    }

    /// Site coordinates as columns of a shape=(3, N_site) matrix
    pub fn site_coordinate_cart(&self) -> Matrix3xX<f64> {
        Matrix3xX::from_fn(self.basis.len(), |row, col| self.basis[col].coordinate_cart[row])
    }
}
