use log::trace;
use nalgebra::{Matrix3xX, Vector3};

use crate::lattice::{is_integer, Lattice};
use crate::structure::is_vacancy;
use crate::symmetries::{make_internal_translations, SymOp};

/// Check whether `test_translation_cart` is new up to prim symmetry.
///
/// Equivalent translations are generated by
///
/// ```text
/// test_translation + any internal translation + any prim lattice vector
/// ```
///
/// so the test translation is rejected if, for some internal translation,
/// `test + internal - existing` is a prim lattice vector for an already
/// accepted translation. With a single internal translation (identity only)
/// every translation is accepted.
pub fn is_new_unique_translation(
    prim_lattice: &Lattice,
    test_translation_cart: &Vector3<f64>,
    internal_translations_cart: &[Vector3<f64>],
    current_unique_translations_cart: &[Vector3<f64>],
) -> bool {
    if internal_translations_cart.len() == 1 {
        return true;
    }

    let tol = prim_lattice.tol();
    !internal_translations_cart.iter().any(|internal_translation| {
        let x = test_translation_cart + internal_translation;
        current_unique_translations_cart
            .iter()
            .any(|y| is_integer(&prim_lattice.cart_to_frac(&(x - y)), tol))
    })
}

/// Whether a site allowing `allowed_atom_types` accepts `atom_type`.
///
/// Vacancy spellings are interchangeable, as in the default mapping cost.
fn is_allowed_on_site(atom_type: &str, allowed_atom_types: &[String]) -> bool {
    let atom_is_vacancy = is_vacancy(atom_type);
    allowed_atom_types
        .iter()
        .any(|t| t == atom_type || (atom_is_vacancy && is_vacancy(t)))
}

/// Number of prim sites allowing each atom type
fn count_allowed_sites(atom_type: &str, prim_allowed_atom_types: &[Vec<String>]) -> usize {
    prim_allowed_atom_types
        .iter()
        .filter(|allowed| is_allowed_on_site(atom_type, allowed))
        .count()
}

/// Make the candidate translations that bring atoms into registry with prim sites.
///
/// The translations are those for which
///
/// ```text
/// site_coordinate_cart[i] + site_displacements[i][j] =
///     F⁻¹ * atom_coordinate_cart[j] + trial_translation
/// ```
///
/// can hold with small displacements. They are generated from the atom with
/// the fewest allowed prim sites (the first one on ties), one per allowed
/// site, and deduplicated with [`is_new_unique_translation`].
///
/// Returns an empty list if some atom is allowed on no prim site.
///
/// # Arguments
/// * `atom_coordinate_cart_in_supercell` - Shape=(3, N_atom) atom coordinates with F⁻¹ applied
/// * `atom_type` - Size=N_atom atom types (may include vacancies)
/// * `prim_lattice` - The prim's lattice
/// * `prim_site_coordinate_cart` - Shape=(3, N_prim_site) prim site coordinates
/// * `prim_allowed_atom_types` - Atom types allowed on each prim site
/// * `prim_factor_group` - Prim factor group, used to find internal translations
pub fn make_trial_translations_from_coordinates(
    atom_coordinate_cart_in_supercell: &Matrix3xX<f64>,
    atom_type: &[String],
    prim_lattice: &Lattice,
    prim_site_coordinate_cart: &Matrix3xX<f64>,
    prim_allowed_atom_types: &[Vec<String>],
    prim_factor_group: &[SymOp],
) -> Vec<Vector3<f64>> {
    let mut trial_translations = Vec::new();

    // Atom with the fewest allowed prim sites
    let mut best_atom_index = 0;
    let mut min_n_allowed_sites = prim_allowed_atom_types.len() + 1;
    for (atom_index, atom_type_name) in atom_type.iter().enumerate() {
        let n_allowed_sites = count_allowed_sites(atom_type_name, prim_allowed_atom_types);
        if n_allowed_sites == 0 {
            trace!("atom {atom_index} ('{atom_type_name}') is allowed on no prim site");
            return trial_translations;
        }
        if n_allowed_sites < min_n_allowed_sites {
            best_atom_index = atom_index;
            min_n_allowed_sites = n_allowed_sites;
        }
    }
    let Some(best_atom_type) = atom_type.get(best_atom_index) else {
        return trial_translations;
    };
    trace!(
        "generating trial translations from atom {best_atom_index} ('{best_atom_type}'), {min_n_allowed_sites} allowed sites"
    );

    let internal_translations = make_internal_translations(prim_factor_group, prim_lattice.tol());
    let atom_cart = atom_coordinate_cart_in_supercell.column(best_atom_index);

    for (prim_site_index, allowed_atom_types) in prim_allowed_atom_types.iter().enumerate() {
        if !is_allowed_on_site(best_atom_type, allowed_atom_types) {
            continue;
        }
        let test_translation: Vector3<f64> = prim_site_coordinate_cart.column(prim_site_index) - atom_cart;
        if is_new_unique_translation(
            prim_lattice,
            &test_translation,
            &internal_translations,
            &trial_translations,
        ) {
            trial_translations.push(test_translation);
        }
    }

    trace!("found {} unique trial translations", trial_translations.len());
    trial_translations
}
