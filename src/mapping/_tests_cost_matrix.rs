#[cfg(test)]
mod _tests_cost_matrix {
    use super::super::cost_matrix::*;
    use crate::errors::MappingError;
    use crate::lattice::cubic_lattice;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3xX, Vector3};

    const INF: f64 = 1e20;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_cost_rules() {
        let d = Vector3::new(0.3, 0.4, 0.0);
        let a_only = strings(&["A"]);
        let a_or_va = strings(&["A", "Va"]);

        assert_relative_eq!(make_atom_mapping_cost(&d, "A", &a_only, INF), 0.25, epsilon = 1e-12);
        assert_eq!(make_atom_mapping_cost(&d, "B", &a_only, INF), INF);
        assert_eq!(make_atom_mapping_cost(&d, "Va", &a_only, INF), INF);
        // vacancies are free wherever they are allowed, regardless of displacement
        assert_eq!(make_atom_mapping_cost(&Vector3::new(5.0, 5.0, 5.0), "Va", &a_or_va, INF), 0.0);
        assert_eq!(make_atom_mapping_cost(&d, "VA", &strings(&["B", "va"]), INF), 0.0);
    }

    #[test]
    fn test_site_displacements_are_minimum_image() {
        let lattice = cubic_lattice(2.0).unwrap();
        let sites = Matrix3xX::from_columns(&[Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0)]);
        let atoms = Matrix3xX::from_columns(&[Vector3::new(1.9, 0.0, 0.1)]);
        let translation = Vector3::new(0.2, 0.0, 0.0);

        let displacements = make_site_displacements(&lattice, &sites, &atoms, &translation).unwrap();
        assert_eq!(displacements.len(), 2);
        assert_eq!(displacements[0].len(), 1);
        assert_relative_eq!(displacements[0][0], Vector3::new(0.1, 0.0, 0.1), epsilon = 1e-10);
        assert_relative_eq!(displacements[1][0], Vector3::new(-0.9, -1.0, -0.9), epsilon = 1e-10);
    }

    #[test]
    fn test_site_displacements_too_many_atoms() {
        let lattice = cubic_lattice(1.0).unwrap();
        let sites = Matrix3xX::from_columns(&[Vector3::zeros()]);
        let atoms = Matrix3xX::from_columns(&[Vector3::zeros(), Vector3::new(0.5, 0.5, 0.5)]);
        let result = make_site_displacements(&lattice, &sites, &atoms, &Vector3::zeros());
        assert_eq!(result, Err(MappingError::TooManyAtoms { n_atom: 2, n_site: 1 }));
    }

    #[test]
    fn test_cost_matrix_pads_with_vacancies() {
        // 3 sites, 1 atom: columns 1 and 2 are implied vacancies
        let site_displacements = vec![
            vec![Vector3::new(0.1, 0.0, 0.0)],
            vec![Vector3::new(0.0, 0.2, 0.0)],
            vec![Vector3::new(0.0, 0.0, 0.3)],
        ];
        let atom_type = strings(&["A"]);
        let allowed = vec![strings(&["A"]), strings(&["A", "Va"]), strings(&["B", "Va"])];

        let cost = make_cost_matrix(&make_atom_mapping_cost, &site_displacements, &atom_type, &allowed, INF)
            .unwrap();
        assert_eq!(cost.shape(), (3, 3));

        assert_relative_eq!(cost[(0, 0)], 0.01, epsilon = 1e-12);
        assert_relative_eq!(cost[(1, 0)], 0.04, epsilon = 1e-12);
        assert_eq!(cost[(2, 0)], INF);
        for col in 1..3 {
            assert_eq!(cost[(0, col)], INF);
            assert_eq!(cost[(1, col)], 0.0);
            assert_eq!(cost[(2, col)], 0.0);
        }
    }

    #[test]
    fn test_cost_matrix_with_custom_cost_function() {
        let site_displacements = vec![vec![Vector3::new(1.0, 2.0, 2.0)], vec![Vector3::zeros()]];
        let atom_type = strings(&["A"]);
        let allowed = vec![strings(&["A"]), strings(&["A", "Va"])];

        // padded columns see a zero displacement and the vacancy name
        let seen_vacancy = |d: &Vector3<f64>, t: &str, _allowed: &[String], _inf: f64| -> f64 {
            if t == "Va" {
                assert_eq!(*d, Vector3::zeros());
                -1.0
            } else {
                d.norm()
            }
        };
        let cost = make_cost_matrix(&seen_vacancy, &site_displacements, &atom_type, &allowed, INF).unwrap();
        assert_relative_eq!(cost[(0, 0)], 3.0, epsilon = 1e-12);
        assert_relative_eq!(cost[(1, 0)], 0.0, epsilon = 1e-12);
        assert_eq!(cost[(0, 1)], -1.0);
        assert_eq!(cost[(1, 1)], -1.0);
    }

    #[test]
    fn test_cost_matrix_dimension_errors() {
        let atom_type = strings(&["A"]);
        let allowed = vec![strings(&["A"]), strings(&["A"])];

        let wrong_site_count = vec![vec![Vector3::zeros()]];
        assert_eq!(
            make_cost_matrix(&make_atom_mapping_cost, &wrong_site_count, &atom_type, &allowed, INF),
            Err(MappingError::SiteCountMismatch {
                n_displacement_site: 1,
                n_allowed_atom_types: 2
            })
        );

        let wrong_atom_count = vec![vec![Vector3::zeros()], vec![Vector3::zeros(), Vector3::zeros()]];
        assert_eq!(
            make_cost_matrix(&make_atom_mapping_cost, &wrong_atom_count, &atom_type, &allowed, INF),
            Err(MappingError::AtomCountMismatch {
                site_index: 1,
                n_displacement_atom: 2,
                n_atom_type: 1
            })
        );

        let too_many_atoms = vec![vec![Vector3::zeros(), Vector3::zeros()]];
        assert_eq!(
            make_cost_matrix(
                &make_atom_mapping_cost,
                &too_many_atoms,
                &strings(&["A", "A"]),
                &allowed[..1],
                INF
            ),
            Err(MappingError::TooManyAtoms { n_atom: 2, n_site: 1 })
        );
    }
}
