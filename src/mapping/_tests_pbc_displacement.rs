#[cfg(test)]
mod _tests_pbc_displacement {
    use super::super::pbc_displacement::*;
    use crate::lattice::{cubic_lattice, lattice_from_parameters, Lattice};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    const TOL: f64 = 1e-5;

    // Square in xy, written with a skewed second vector (b = (5, 1, 0))
    fn skewed_square_lattice() -> Lattice {
        Lattice::new(Matrix3::new(1.0, 5.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0), TOL).unwrap()
    }

    fn brute_force_min_norm(lattice: &Lattice, disp: &Vector3<f64>) -> f64 {
        let mut best = f64::INFINITY;
        for i in -4..=4 {
            for j in -4..=4 {
                for k in -4..=4 {
                    let translation = lattice.frac_to_cart(&Vector3::new(i as f64, j as f64, k as f64));
                    best = best.min((disp - translation).norm());
                }
            }
        }
        best
    }

    fn is_lattice_translation(lattice: &Lattice, v: &Vector3<f64>) -> bool {
        let frac = lattice.cart_to_frac(v);
        frac.iter().all(|x| (x - x.round()).abs() < 1e-8)
    }

    #[test]
    fn test_fast_and_robust_agree_on_cubic() {
        let lattice = cubic_lattice(2.0).unwrap();
        let site = Vector3::new(0.1, 0.2, 0.3);
        for atom in [
            Vector3::new(1.9, -0.7, 3.2),
            Vector3::new(-4.4, 0.9, 0.05),
            Vector3::new(0.6, 1.25, -1.1),
        ] {
            let fast = fast_pbc_displacement_cart(&lattice, &site, &atom);
            let robust = robust_pbc_displacement_cart(&lattice, &site, &atom);
            assert_relative_eq!(fast, robust, epsilon = 1e-10);
            assert!(fast.iter().all(|x| x.abs() <= 1.0 + 1e-10));
        }
    }

    #[test]
    fn test_robust_beats_fast_on_skewed_lattice() {
        let lattice = skewed_square_lattice();
        let site = Vector3::zeros();
        let atom = Vector3::new(0.4, 0.6, 0.0);

        let fast = fast_pbc_displacement_cart(&lattice, &site, &atom);
        let robust = robust_pbc_displacement_cart(&lattice, &site, &atom);

        assert_relative_eq!(fast, Vector3::new(-1.6, -0.4, 0.0), epsilon = 1e-10);
        assert_relative_eq!(robust, Vector3::new(0.4, -0.4, 0.0), epsilon = 1e-10);
        assert!(robust.norm() < fast.norm());
        assert!(is_lattice_translation(&lattice, &(atom - site - robust)));
    }

    #[test]
    fn test_robust_is_minimum_image_on_triclinic() {
        let lattice = lattice_from_parameters(2.0, 3.0, 2.5, 1.3, 1.7, 1.0).unwrap();
        let site = Vector3::new(0.3, -0.2, 0.1);
        let atoms = [
            Vector3::new(4.1, 2.2, -3.0),
            Vector3::new(-2.7, 5.3, 1.9),
            Vector3::new(0.9, -0.8, 2.6),
            Vector3::new(7.0, 7.0, 7.0),
        ];
        for atom in &atoms {
            let fast = fast_pbc_displacement_cart(&lattice, &site, atom);
            let robust = robust_pbc_displacement_cart(&lattice, &site, atom);
            let disp = atom - site;

            assert!(robust.norm() <= fast.norm() + 1e-10);
            assert!(robust.norm() <= brute_force_min_norm(&lattice, &fast) + 1e-6);
            assert!(is_lattice_translation(&lattice, &(disp - robust)));
            assert!(is_lattice_translation(&lattice, &(disp - fast)));
        }
    }

    #[test]
    fn test_minimal_displacement_is_unchanged() {
        let cubic = cubic_lattice(1.0).unwrap();
        let skewed = skewed_square_lattice();
        let disp = Vector3::new(0.2, -0.3, 0.1);
        let site = Vector3::new(3.0, 1.0, -2.0);
        let atom = site + disp;
        for lattice in [&cubic, &skewed] {
            let robust = robust_pbc_displacement_cart(lattice, &site, &atom);
            assert_relative_eq!(robust, disp, epsilon = 1e-10);
            let again = robust_pbc_displacement_cart(lattice, &Vector3::zeros(), &robust);
            assert_relative_eq!(again, robust, epsilon = 1e-10);
        }
        let fast = fast_pbc_displacement_cart(&cubic, &site, &atom);
        assert_relative_eq!(fast, disp, epsilon = 1e-10);
        let fast_again = fast_pbc_displacement_cart(&cubic, &Vector3::zeros(), &fast);
        assert_relative_eq!(fast_again, fast, epsilon = 1e-10);
    }
}
