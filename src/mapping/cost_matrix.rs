use nalgebra::{DMatrix, Matrix3xX, Vector3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::VACANCY_NAME;
use crate::errors::MappingError;
use crate::lattice::Lattice;
use crate::mapping::pbc_displacement::robust_pbc_displacement_cart;
use crate::structure::is_vacancy;
use crate::Result;

/// Site-to-atom displacements, indexed `[site_index][atom_index]`
pub type SiteDisplacements = Vec<Vec<Vector3<f64>>>;

/// Atom mapping cost of a single atom on a single site.
///
/// Arguments are the periodic site-to-atom displacement, the atom type, the
/// atom types allowed on the site, and the value used for disallowed
/// mappings. Implementations must be pure.
pub trait AtomMappingCostFunction: Fn(&Vector3<f64>, &str, &[String], f64) -> f64 + Sync {}

impl<F> AtomMappingCostFunction for F where F: Fn(&Vector3<f64>, &str, &[String], f64) -> f64 + Sync {}

/// Default atom mapping cost.
///
/// - A vacancy costs 0.0 on a site that allows vacancies, `infinity` otherwise.
/// - An atom on a site that does not allow its type costs `infinity`.
/// - Otherwise the cost is the squared displacement length.
pub fn make_atom_mapping_cost(
    displacement: &Vector3<f64>,
    atom_type: &str,
    allowed_atom_types: &[String],
    infinity: f64,
) -> f64 {
    if is_vacancy(atom_type) {
        return if allowed_atom_types.iter().any(|t| is_vacancy(t)) {
            0.0
        } else {
            infinity
        };
    }

    if !allowed_atom_types.iter().any(|t| t == atom_type) {
        return infinity;
    }

    displacement.norm_squared()
}

/// Make the site-to-atom displacement field for one trial translation.
///
/// `result[i][j]` is the minimum length displacement under the periodic
/// boundary conditions of `lattice` satisfying
///
/// ```text
/// site_coordinate_cart[i] + result[i][j] ==
///     atom_coordinate_cart_in_supercell[j] + trial_translation
/// ```
///
/// Fails if there are more atoms than sites.
pub fn make_site_displacements(
    lattice: &Lattice,
    supercell_site_coordinate_cart: &Matrix3xX<f64>,
    atom_coordinate_cart_in_supercell: &Matrix3xX<f64>,
    trial_translation: &Vector3<f64>,
) -> Result<SiteDisplacements> {
    let n_atom = atom_coordinate_cart_in_supercell.ncols();
    let n_site = supercell_site_coordinate_cart.ncols();
    if n_atom > n_site {
        return Err(MappingError::TooManyAtoms { n_atom, n_site });
    }

    let translated_atoms: Vec<Vector3<f64>> = atom_coordinate_cart_in_supercell
        .column_iter()
        .map(|atom| atom + trial_translation)
        .collect();

    let site_row = |site_index: usize| -> Vec<Vector3<f64>> {
        let site_cart: Vector3<f64> = supercell_site_coordinate_cart.column(site_index).into();
        translated_atoms
            .iter()
            .map(|atom_cart| robust_pbc_displacement_cart(lattice, &site_cart, atom_cart))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let site_displacements = (0..n_site).into_par_iter().map(site_row).collect();
    #[cfg(not(feature = "parallel"))]
    let site_displacements = (0..n_site).map(site_row).collect();

    Ok(site_displacements)
}

/// Make the square assignment problem cost matrix.
///
/// `cost_matrix[(i, j)]` is the cost of mapping atom `j` onto site `i`,
/// matching the `permutation[site] = atom` convention of
/// [`crate::mapping::AtomMapping`]. If there are fewer atoms than sites,
/// columns `N_atom..N_site` are vacancies with zero displacement.
///
/// Fails if the displacement field does not have one row per entry of
/// `allowed_atom_types` and one column per entry of `atom_type`.
pub fn make_cost_matrix<F: AtomMappingCostFunction + ?Sized>(
    f: &F,
    site_displacements: &SiteDisplacements,
    atom_type: &[String],
    allowed_atom_types: &[Vec<String>],
    infinity: f64,
) -> Result<DMatrix<f64>> {
    if site_displacements.len() != allowed_atom_types.len() {
        return Err(MappingError::SiteCountMismatch {
            n_displacement_site: site_displacements.len(),
            n_allowed_atom_types: allowed_atom_types.len(),
        });
    }
    if let Some((site_index, row)) = site_displacements
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != atom_type.len())
    {
        return Err(MappingError::AtomCountMismatch {
            site_index,
            n_displacement_atom: row.len(),
            n_atom_type: atom_type.len(),
        });
    }

    let n_site = allowed_atom_types.len();
    let n_atom = atom_type.len();
    if n_atom > n_site {
        return Err(MappingError::TooManyAtoms { n_atom, n_site });
    }

    let zero = Vector3::zeros();
    let cost_matrix = DMatrix::from_fn(n_site, n_site, |site_index, atom_index| {
        let allowed = &allowed_atom_types[site_index];
        if atom_index < n_atom {
            f(
                &site_displacements[site_index][atom_index],
                &atom_type[atom_index],
                allowed,
                infinity,
            )
        } else {
            f(&zero, VACANCY_NAME, allowed, infinity)
        }
    });

    Ok(cost_matrix)
}
