use atom_mapping_search::lattice::{cubic_lattice, lattice_from_parameters, Lattice};
use atom_mapping_search::mapping::{
    fast_pbc_displacement_cart, make_atom_mapping_cost, make_trial_translations,
    map_lattices_without_reorientation, robust_pbc_displacement_cart, AtomMappingSearchData,
    LatticeMappingSearchData, PrimSearchData, StructureSearchData,
};
use atom_mapping_search::config::DEFAULT_INFINITY;
use atom_mapping_search::structure::{BasicStructure, Site};
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::{Matrix3, Matrix3xX, Vector3};
use std::hint::black_box;
use std::sync::Arc;

/// Periodic displacement methods on a well-shaped and a strongly skewed cell.
/// The skewed cell is where the robust method pays for its Voronoi reduction.
fn bench_pbc_displacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("pbc_displacement");

    let cubic = cubic_lattice(1.0).unwrap();
    let skewed = Lattice::new(
        Matrix3::new(
            1.0, 5.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ),
        1e-5,
    )
    .unwrap();
    let triclinic = lattice_from_parameters(2.0, 3.0, 2.5, 1.3, 1.7, 1.0).unwrap();

    let site = Vector3::new(0.1, 0.2, 0.3);
    let atom = Vector3::new(4.4, -2.6, 3.7);

    for (name, lattice) in [("cubic", &cubic), ("skewed", &skewed), ("triclinic", &triclinic)] {
        group.bench_function(format!("fast_{name}"), |b| {
            b.iter(|| fast_pbc_displacement_cart(black_box(lattice), black_box(&site), black_box(&atom)))
        });
        group.bench_function(format!("robust_{name}"), |b| {
            b.iter(|| robust_pbc_displacement_cart(black_box(lattice), black_box(&site), black_box(&atom)))
        });
    }

    group.finish();
}

/// Search data for a 3x3x3 supercell of a two-site cubic prim
fn setup_lattice_mapping_data() -> Arc<LatticeMappingSearchData> {
    let prim = Arc::new(BasicStructure::new(
        cubic_lattice(1.0).unwrap(),
        vec![
            Site::with_atom_types(Vector3::zeros(), &["A", "B"]),
            Site::with_atom_types(Vector3::new(0.5, 0.5, 0.5), &["A", "Va"]),
        ],
    ));
    let prim_data = Arc::new(PrimSearchData::new(prim, Vec::new(), false).unwrap());

    let structure_lattice = cubic_lattice(3.03).unwrap();
    let mut atoms = Vec::new();
    let mut atom_type = Vec::new();
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                let corner = Vector3::new(i as f64, j as f64, k as f64) * 1.01;
                atoms.push(corner + Vector3::new(0.02, -0.01, 0.0));
                atom_type.push(if (i + j + k) % 2 == 0 { "A" } else { "B" }.to_string());
                if (i + j + k) % 3 != 0 {
                    atoms.push(corner + Vector3::new(0.5, 0.51, 0.49));
                    atom_type.push("A".to_string());
                }
            }
        }
    }
    let structure_data = Arc::new(
        StructureSearchData::new(
            structure_lattice.clone(),
            Matrix3xX::from_columns(&atoms),
            atom_type,
            Vec::new(),
        )
        .unwrap(),
    );

    let lattice_mapping = map_lattices_without_reorientation(
        &prim_data.prim_lattice,
        &structure_lattice,
        Some(Matrix3::new(3, 0, 0, 0, 3, 0, 0, 0, 3)),
    )
    .unwrap();
    Arc::new(LatticeMappingSearchData::new(prim_data, structure_data, lattice_mapping).unwrap())
}

fn bench_search_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_data");
    group.sample_size(20);

    let lattice_mapping_data = setup_lattice_mapping_data();

    group.bench_function("make_trial_translations_3x3x3", |b| {
        b.iter(|| make_trial_translations(black_box(&lattice_mapping_data)))
    });

    let translations = make_trial_translations(&lattice_mapping_data);
    group.bench_function("atom_mapping_search_data_3x3x3", |b| {
        b.iter(|| {
            AtomMappingSearchData::new(
                Arc::clone(&lattice_mapping_data),
                black_box(translations[0]),
                &make_atom_mapping_cost,
                DEFAULT_INFINITY,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pbc_displacement, bench_search_data);
criterion_main!(benches);
