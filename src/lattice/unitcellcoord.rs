use std::collections::HashMap;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::errors::MappingError;
use crate::lattice::lattice_algorithms::integer_determinant;
use crate::Result;

// Slack on the [0, 1) supercell-fractional window
const WITHIN_TOLERANCE: f64 = 1e-8;

/// Integer prim-lattice coordinates of a unit cell
pub type UnitCell = Vector3<i64>;

/// A site identified by its sublattice (prim basis index) and unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitCellCoord {
    pub sublattice: usize,
    pub unitcell: UnitCell,
}

impl UnitCellCoord {
    pub fn new(sublattice: usize, unitcell: UnitCell) -> Self {
        UnitCellCoord {
            sublattice,
            unitcell,
        }
    }
}

/// Bijection between linear supercell site indices and [`UnitCellCoord`].
///
/// Site `l` has sublattice `l / N_unitcell` and unit cell `l % N_unitcell`.
/// Unit cells are the prim lattice points whose supercell fractional
/// coordinates `T⁻¹ · ijk` lie in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct UnitCellCoordIndexConverter {
    transformation_matrix: Matrix3<i64>,
    transformation_inverse: Matrix3<f64>,
    n_sublattice: usize,
    unitcells: Vec<UnitCell>,
    unitcell_index: HashMap<UnitCell, usize>,
}

impl UnitCellCoordIndexConverter {
    pub fn new(transformation_matrix: Matrix3<i64>, n_sublattice: usize) -> Result<Self> {
        let det = integer_determinant(&transformation_matrix);
        if det == 0 {
            return Err(MappingError::SingularMatrix(
                "transformation matrix to superlattice".to_string(),
            ));
        }
        let transformation_f64 = transformation_matrix.map(|x| x as f64);
        let transformation_inverse = transformation_f64.try_inverse().ok_or_else(|| {
            MappingError::SingularMatrix("transformation matrix to superlattice".to_string())
        })?;

        // Bounding box of the supercell in prim fractional coordinates
        let mut lower = Vector3::repeat(i64::MAX);
        let mut upper = Vector3::repeat(i64::MIN);
        for corner in 0..8 {
            let selector = Vector3::new(corner & 1, (corner >> 1) & 1, (corner >> 2) & 1).map(|x| x as i64);
            let point = transformation_matrix * selector;
            for axis in 0..3 {
                lower[axis] = lower[axis].min(point[axis]);
                upper[axis] = upper[axis].max(point[axis]);
            }
        }

        let mut unitcells = Vec::with_capacity(det.unsigned_abs() as usize);
        for i in lower[0]..=upper[0] {
            for j in lower[1]..=upper[1] {
                for k in lower[2]..=upper[2] {
                    let unitcell = UnitCell::new(i, j, k);
                    let super_frac = transformation_inverse * unitcell.map(|x| x as f64);
                    let within = super_frac
                        .iter()
                        .all(|x| *x > -WITHIN_TOLERANCE && *x < 1.0 - WITHIN_TOLERANCE);
                    if within {
                        unitcells.push(unitcell);
                    }
                }
            }
        }

        let expected = det.unsigned_abs() as usize;
        if unitcells.len() != expected {
            return Err(MappingError::SupercellEnumeration {
                expected,
                found: unitcells.len(),
            });
        }

        let unitcell_index = unitcells
            .iter()
            .enumerate()
            .map(|(index, unitcell)| (*unitcell, index))
            .collect();

        Ok(UnitCellCoordIndexConverter {
            transformation_matrix,
            transformation_inverse,
            n_sublattice,
            unitcells,
            unitcell_index,
        })
    }

    pub fn transformation_matrix(&self) -> &Matrix3<i64> {
        &self.transformation_matrix
    }

    pub fn total_unitcells(&self) -> usize {
        self.unitcells.len()
    }

    pub fn total_sites(&self) -> usize {
        self.n_sublattice * self.unitcells.len()
    }

    /// Unit cells inside the supercell, in linear index order.
    pub fn unitcells(&self) -> &[UnitCell] {
        &self.unitcells
    }

    /// Map a linear site index to its [`UnitCellCoord`].
    ///
    /// # Panics
    /// Panics if `linear_index >= total_sites()`
    pub fn unitcellcoord(&self, linear_index: usize) -> UnitCellCoord {
        let n_unitcell = self.unitcells.len();
        UnitCellCoord::new(
            linear_index / n_unitcell,
            self.unitcells[linear_index % n_unitcell],
        )
    }

    /// Translate a unit cell by supercell lattice vectors so it lies inside
    /// the supercell.
    pub fn bring_within(&self, unitcell: &UnitCell) -> UnitCell {
        let super_frac = self.transformation_inverse * unitcell.map(|x| x as f64);
        let super_translation = super_frac.map(|x| (x + WITHIN_TOLERANCE).floor() as i64);
        unitcell - self.transformation_matrix * super_translation
    }

    /// Map a [`UnitCellCoord`] (any periodic image) to its linear site index.
    ///
    /// Returns `None` if the sublattice index is out of range.
    pub fn linear_index(&self, coord: &UnitCellCoord) -> Option<usize> {
        if coord.sublattice >= self.n_sublattice {
            return None;
        }
        let within = self.bring_within(&coord.unitcell);
        self.unitcell_index
            .get(&within)
            .map(|cell_index| coord.sublattice * self.unitcells.len() + cell_index)
    }
}
