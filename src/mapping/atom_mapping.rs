use nalgebra::{DMatrix, Matrix3xX, Vector3};
use serde::{Deserialize, Serialize};

/// Atom mapping transformation.
///
/// `displacement` has one column per supercell site; `permutation[i]` is the
/// index of the atom mapped onto site `i` (indices `>= N_atom` are added
/// vacancies); `translation` is the trial translation that was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomMapping {
    pub displacement: Matrix3xX<f64>,
    pub permutation: Vec<usize>,
    pub translation: Vector3<f64>,
}

impl AtomMapping {
    pub fn new(displacement: Matrix3xX<f64>, permutation: Vec<usize>, translation: Vector3<f64>) -> Self {
        AtomMapping {
            displacement,
            permutation,
            translation,
        }
    }
}

/// An [`AtomMapping`] with its cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAtomMapping {
    pub atom_cost: f64,
    pub atom_mapping: AtomMapping,
}

impl ScoredAtomMapping {
    pub fn new(atom_cost: f64, atom_mapping: AtomMapping) -> Self {
        ScoredAtomMapping {
            atom_cost,
            atom_mapping,
        }
    }
}

/// Ordered collection of scored atom mappings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtomMappingResults {
    pub data: Vec<ScoredAtomMapping>,
}

impl AtomMappingResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scored: ScoredAtomMapping) {
        self.data.push(scored);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredAtomMapping> {
        self.data.iter()
    }
}

impl<'a> IntoIterator for &'a AtomMappingResults {
    type Item = &'a ScoredAtomMapping;
    type IntoIter = std::slice::Iter<'a, ScoredAtomMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for AtomMappingResults {
    type Item = ScoredAtomMapping;
    type IntoIter = std::vec::IntoIter<ScoredAtomMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl FromIterator<ScoredAtomMapping> for AtomMappingResults {
    fn from_iter<I: IntoIterator<Item = ScoredAtomMapping>>(iter: I) -> Self {
        AtomMappingResults {
            data: iter.into_iter().collect(),
        }
    }
}

/// Minimum cost linear assignment solver.
///
/// Given a square cost matrix, returns `permutation[row] = column` of a
/// minimum cost assignment together with its total cost, or `None` if no
/// assignment was found.
pub trait AssignmentSolver {
    fn solve(&self, cost_matrix: &DMatrix<f64>) -> Option<(Vec<usize>, f64)>;
}
