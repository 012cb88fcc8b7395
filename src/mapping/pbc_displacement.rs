use nalgebra::Vector3;

use crate::lattice::Lattice;

/// Minimum length displacement `atom_cart - site_cart` under periodic
/// boundary conditions, using the "fast" method.
///
/// Integer lattice translations are removed by rounding the fractional
/// displacement. This is exact for lattices where rounding finds the nearest
/// image (e.g. orthogonal cells) but may miss the true minimum in skewed cells.
pub fn fast_pbc_displacement_cart(
    lattice: &Lattice,
    site_cart: &Vector3<f64>,
    atom_cart: &Vector3<f64>,
) -> Vector3<f64> {
    let disp_cart = atom_cart - site_cart;
    let mut disp_frac = lattice.cart_to_frac(&disp_cart);
    disp_frac -= disp_frac.map(f64::round);
    lattice.frac_to_cart(&disp_frac)
}

/// Minimum length displacement `atom_cart - site_cart` under periodic
/// boundary conditions, using the "robust" method.
///
/// Starts from [`fast_pbc_displacement_cart`] and, unless the result is
/// already inside the inscribed sphere of the Voronoi cell, subtracts the
/// lattice vector of largest Voronoi measure until the displacement lies in
/// the Voronoi cell of the site. Each step strictly shortens the vector, so
/// the loop terminates.
pub fn robust_pbc_displacement_cart(
    lattice: &Lattice,
    site_cart: &Vector3<f64>,
    atom_cart: &Vector3<f64>,
) -> Vector3<f64> {
    let mut disp_cart = fast_pbc_displacement_cart(lattice, site_cart, atom_cart);
    if disp_cart.norm() < lattice.inner_voronoi_radius() + lattice.tol() {
        return disp_cart;
    }
    loop {
        let (measure, lattice_translation) = lattice.max_voronoi_measure(&disp_cart);
        if measure <= 1.0 + lattice.tol() {
            return disp_cart;
        }
        disp_cart -= lattice_translation;
    }
}
