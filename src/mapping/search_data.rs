// Search data aggregates
//
// StructureSearchData / PrimSearchData -> LatticeMappingSearchData -> AtomMappingSearchData
//
// Each layer is built once from the previous ones and never mutated. Upstream
// layers are shared through `Arc`, so one prim and one structure can feed
// many lattice mappings, and one lattice mapping many trial translations,
// from any number of threads.

use std::sync::Arc;

use log::debug;
use nalgebra::{DMatrix, Matrix3, Matrix3xX, Vector3};

use crate::config::INTEGER_ROUNDING_TOLERANCE;
use crate::errors::MappingError;
use crate::lattice::{make_superlattice, round_to_integer_matrix, Lattice, UnitCellCoordIndexConverter};
use crate::mapping::atom_mapping::{AssignmentSolver, AtomMapping, ScoredAtomMapping};
use crate::mapping::cost_matrix::{
    make_cost_matrix, make_site_displacements, AtomMappingCostFunction, SiteDisplacements,
};
use crate::mapping::lattice_mapping::LatticeMapping;
use crate::mapping::trial_translations::make_trial_translations_from_coordinates;
use crate::structure::BasicStructure;
use crate::symmetries::{make_invariant_shuffle_modes, normalize_factor_group, SymOp};
use crate::Result;

// ======================== STRUCTURE DATA ========================

/// The structure being mapped.
#[derive(Debug, Clone)]
pub struct StructureSearchData {
    /// The structure's lattice
    pub lattice: Lattice,
    /// Number of atoms (including explicit vacancies)
    pub n_atom: usize,
    /// Shape=(3, N_atom) Cartesian atom coordinates, without the inverse
    /// lattice mapping deformation applied
    pub atom_coordinate_cart: Matrix3xX<f64>,
    /// Atom types. Vacancies listed here must be mapped.
    pub atom_type: Vec<String>,
    /// Structure factor group; `{identity}` if none was given
    pub structure_factor_group: Vec<SymOp>,
}

impl StructureSearchData {
    pub fn new(
        lattice: Lattice,
        atom_coordinate_cart: Matrix3xX<f64>,
        atom_type: Vec<String>,
        structure_factor_group: Vec<SymOp>,
    ) -> Result<Self> {
        if atom_type.len() != atom_coordinate_cart.ncols() {
            return Err(MappingError::AtomTypeCountMismatch {
                n_atom_type: atom_type.len(),
                n_coordinate: atom_coordinate_cart.ncols(),
            });
        }
        debug!("structure search data: {} atoms", atom_type.len());

        Ok(StructureSearchData {
            lattice,
            n_atom: atom_coordinate_cart.ncols(),
            atom_coordinate_cart,
            atom_type,
            structure_factor_group: normalize_factor_group(structure_factor_group),
        })
    }
}

// ======================== PRIM DATA ========================

/// The reference structure atoms are mapped onto.
#[derive(Debug, Clone)]
pub struct PrimSearchData {
    pub prim: Arc<BasicStructure>,
    pub prim_lattice: Lattice,
    pub n_prim_site: usize,
    /// Shape=(3, N_prim_site) prim site coordinates
    pub prim_site_coordinate_cart: Matrix3xX<f64>,
    pub prim_allowed_atom_types: Vec<Vec<String>>,
    /// Whether each prim site may be vacant
    pub vacancies_allowed: Vec<bool>,
    /// Prim factor group; `{identity}` if none was given
    pub prim_factor_group: Vec<SymOp>,
    /// Symmetry-invariant shuffle modes, if requested at construction
    pub prim_sym_invariant_displacement_modes: Option<Vec<Matrix3xX<f64>>>,
}

impl PrimSearchData {
    /// Fails if any site allows a molecular (multi-atom) occupant.
    pub fn new(
        prim: Arc<BasicStructure>,
        prim_factor_group: Vec<SymOp>,
        make_prim_sym_invariant_displacement_modes: bool,
    ) -> Result<Self> {
        for (site_index, site) in prim.basis().iter().enumerate() {
            if let Some(molecule) = site.occupant_dof.iter().find(|mol| !mol.is_atomic()) {
                return Err(MappingError::MolecularOccupant {
                    site_index,
                    occupant: molecule.name.clone(),
                });
            }
        }

        let prim_factor_group = normalize_factor_group(prim_factor_group);
        let prim_sym_invariant_displacement_modes = if make_prim_sym_invariant_displacement_modes {
            Some(make_invariant_shuffle_modes(&prim, &prim_factor_group)?)
        } else {
            None
        };

        debug!(
            "prim search data: {} sites, {} factor group operations",
            prim.basis().len(),
            prim_factor_group.len()
        );

        Ok(PrimSearchData {
            prim_lattice: prim.lattice().clone(),
            n_prim_site: prim.basis().len(),
            prim_site_coordinate_cart: prim.site_coordinate_cart(),
            prim_allowed_atom_types: prim.allowed_molecule_names(),
            vacancies_allowed: prim.vacancies_allowed(),
            prim_factor_group,
            prim_sym_invariant_displacement_modes,
            prim,
        })
    }
}

// ======================== LATTICE MAPPING DATA ========================

/// Data specific to one lattice mapping of the structure onto a prim superlattice.
#[derive(Debug, Clone)]
pub struct LatticeMappingSearchData {
    pub prim_data: Arc<PrimSearchData>,
    pub structure_data: Arc<StructureSearchData>,
    pub lattice_mapping: LatticeMapping,
    /// round(T * N)
    pub transformation_matrix_to_super: Matrix3<i64>,
    /// Ideal superlattice S1 = L1 * round(T * N)
    pub supercell_lattice: Lattice,
    pub unitcellcoord_index_converter: UnitCellCoordIndexConverter,
    pub n_supercell_site: usize,
    /// Shape=(3, N_atom) atom coordinates with F⁻¹ applied
    pub atom_coordinate_cart_in_supercell: Matrix3xX<f64>,
    /// Shape=(3, N_supercell_site) supercell site coordinates
    pub supercell_site_coordinate_cart: Matrix3xX<f64>,
    pub supercell_allowed_atom_types: Vec<Vec<String>>,
}

impl LatticeMappingSearchData {
    /// Fails if `T * N` is not integral within
    /// [`INTEGER_ROUNDING_TOLERANCE`], or if `F` or `T * N` is singular.
    pub fn new(
        prim_data: Arc<PrimSearchData>,
        structure_data: Arc<StructureSearchData>,
        lattice_mapping: LatticeMapping,
    ) -> Result<Self> {
        let transformation_matrix_to_super = round_to_integer_matrix(
            &(lattice_mapping.transformation_matrix_to_super * lattice_mapping.reorientation),
            INTEGER_ROUNDING_TOLERANCE,
        )?;
        let supercell_lattice = make_superlattice(&prim_data.prim_lattice, &transformation_matrix_to_super)?;
        let unitcellcoord_index_converter =
            UnitCellCoordIndexConverter::new(transformation_matrix_to_super, prim_data.n_prim_site)?;
        let n_supercell_site = unitcellcoord_index_converter.total_sites();

        let deformation_inverse = lattice_mapping
            .deformation_gradient
            .try_inverse()
            .ok_or_else(|| MappingError::SingularMatrix("deformation gradient".to_string()))?;
        let atom_coordinate_cart_in_supercell = deformation_inverse * &structure_data.atom_coordinate_cart;

        let prim_lattice_matrix = prim_data.prim_lattice.column_vector_matrix();
        let mut supercell_site_coordinate_cart = Matrix3xX::zeros(n_supercell_site);
        let mut supercell_allowed_atom_types = Vec::with_capacity(n_supercell_site);
        for l in 0..n_supercell_site {
            let coord = unitcellcoord_index_converter.unitcellcoord(l);
            let site_cart = prim_data.prim_site_coordinate_cart.column(coord.sublattice)
                + prim_lattice_matrix * coord.unitcell.map(|x| x as f64);
            supercell_site_coordinate_cart.set_column(l, &site_cart);
            supercell_allowed_atom_types.push(prim_data.prim_allowed_atom_types[coord.sublattice].clone());
        }

        debug!(
            "lattice mapping search data: {} supercell sites, {} atoms",
            n_supercell_site, structure_data.n_atom
        );

        Ok(LatticeMappingSearchData {
            prim_data,
            structure_data,
            lattice_mapping,
            transformation_matrix_to_super,
            supercell_lattice,
            unitcellcoord_index_converter,
            n_supercell_site,
            atom_coordinate_cart_in_supercell,
            supercell_site_coordinate_cart,
            supercell_allowed_atom_types,
        })
    }

    /// Remove the symmetry-preserving part of a supercell displacement field.
    ///
    /// The prim's invariant shuffle modes are tiled over the supercell and
    /// the projection of `displacement` (shape=(3, N_supercell_site)) onto
    /// them is subtracted.
    pub fn make_symmetry_breaking_displacement(
        &self,
        displacement: &Matrix3xX<f64>,
    ) -> Result<Matrix3xX<f64>> {
        let modes = self
            .prim_data
            .prim_sym_invariant_displacement_modes
            .as_ref()
            .ok_or(MappingError::MissingInvariantModes)?;
        if displacement.ncols() != self.n_supercell_site {
            return Err(MappingError::DisplacementShape {
                expected: self.n_supercell_site,
                found: displacement.ncols(),
            });
        }

        let mut symmetry_breaking = displacement.clone();
        for mode in modes {
            let tiled = Matrix3xX::from_fn(self.n_supercell_site, |row, l| {
                mode[(row, self.unitcellcoord_index_converter.unitcellcoord(l).sublattice)]
            });
            let norm_squared = tiled.norm_squared();
            if norm_squared > 0.0 {
                symmetry_breaking -= &tiled * (displacement.dot(&tiled) / norm_squared);
            }
        }
        Ok(symmetry_breaking)
    }
}

/// Make the candidate trial translations of a lattice mapping.
///
/// See [`make_trial_translations_from_coordinates`].
pub fn make_trial_translations(lattice_mapping_data: &LatticeMappingSearchData) -> Vec<Vector3<f64>> {
    let prim_data = &lattice_mapping_data.prim_data;
    make_trial_translations_from_coordinates(
        &lattice_mapping_data.atom_coordinate_cart_in_supercell,
        &lattice_mapping_data.structure_data.atom_type,
        &prim_data.prim_lattice,
        &prim_data.prim_site_coordinate_cart,
        &prim_data.prim_allowed_atom_types,
        &prim_data.prim_factor_group,
    )
}

// ======================== ATOM MAPPING DATA ========================

/// Data specific to one trial translation of a lattice mapping.
#[derive(Debug, Clone)]
pub struct AtomMappingSearchData {
    pub lattice_mapping_data: Arc<LatticeMappingSearchData>,
    /// Translation applied to `atom_coordinate_cart_in_supercell`
    pub trial_translation_cart: Vector3<f64>,
    /// `[site_index][atom_index]` periodic displacements
    pub site_displacements: SiteDisplacements,
    /// Shape=(N_supercell_site, N_supercell_site) assignment costs
    pub cost_matrix: DMatrix<f64>,
    /// Cost of disallowed assignments
    pub infinity: f64,
}

impl AtomMappingSearchData {
    pub fn new<F: AtomMappingCostFunction + ?Sized>(
        lattice_mapping_data: Arc<LatticeMappingSearchData>,
        trial_translation_cart: Vector3<f64>,
        atom_mapping_cost_f: &F,
        infinity: f64,
    ) -> Result<Self> {
        let site_displacements = make_site_displacements(
            &lattice_mapping_data.supercell_lattice,
            &lattice_mapping_data.supercell_site_coordinate_cart,
            &lattice_mapping_data.atom_coordinate_cart_in_supercell,
            &trial_translation_cart,
        )?;
        let cost_matrix = make_cost_matrix(
            atom_mapping_cost_f,
            &site_displacements,
            &lattice_mapping_data.structure_data.atom_type,
            &lattice_mapping_data.supercell_allowed_atom_types,
            infinity,
        )?;

        Ok(AtomMappingSearchData {
            lattice_mapping_data,
            trial_translation_cart,
            site_displacements,
            cost_matrix,
            infinity,
        })
    }

    /// Build the [`AtomMapping`] for an assignment `permutation[site] = atom`.
    ///
    /// Sites assigned an index `>= N_atom` (added vacancies) get a zero
    /// displacement.
    pub fn make_atom_mapping(&self, permutation: Vec<usize>) -> Result<AtomMapping> {
        let n_site = self.lattice_mapping_data.n_supercell_site;
        let n_atom = self.lattice_mapping_data.structure_data.n_atom;
        if permutation.len() != n_site {
            return Err(MappingError::InvalidPermutation(format!(
                "length {} != number of sites {n_site}",
                permutation.len()
            )));
        }
        let mut seen = vec![false; n_site];
        for &atom_index in &permutation {
            if atom_index >= n_site || seen[atom_index] {
                return Err(MappingError::InvalidPermutation(format!(
                    "atom index {atom_index} is out of range or repeated"
                )));
            }
            seen[atom_index] = true;
        }

        let mut displacement = Matrix3xX::zeros(n_site);
        for (site_index, &atom_index) in permutation.iter().enumerate() {
            if atom_index < n_atom {
                displacement.set_column(site_index, &self.site_displacements[site_index][atom_index]);
            }
        }

        Ok(AtomMapping::new(displacement, permutation, self.trial_translation_cart))
    }

    /// Solve the assignment problem with an external solver.
    ///
    /// Returns `None` if the solver finds no assignment or the best one
    /// costs at least `infinity` (some atom is on a disallowed site).
    pub fn solve<S: AssignmentSolver + ?Sized>(&self, solver: &S) -> Result<Option<ScoredAtomMapping>> {
        let Some((permutation, cost)) = solver.solve(&self.cost_matrix) else {
            return Ok(None);
        };
        if cost >= self.infinity {
            return Ok(None);
        }
        let atom_mapping = self.make_atom_mapping(permutation)?;
        Ok(Some(ScoredAtomMapping::new(cost, atom_mapping)))
    }
}
