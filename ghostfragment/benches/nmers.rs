#![allow(clippy::needless_return)]
use std::sync::Arc;

use ghostfragment::{FragmentedNuclei, Molecule, NMers, Nucleus, Vector3D};
use ghostfragment::fragmenting::DistanceScreening;

use criterion::{BenchmarkGroup, Criterion, measurement::WallTime, SamplingMode};
use criterion::{criterion_group, criterion_main};

/// Water molecules on a cubic grid with 5 Bohr spacing, one fragment per
/// molecule
fn water_grid(size: usize) -> FragmentedNuclei {
    let mut molecule = Molecule::new();
    for i in 0..size {
        for j in 0..size {
            for k in 0..size {
                let center = Vector3D::new(5.0 * i as f64, 5.0 * j as f64, 5.0 * k as f64);
                molecule.add_nucleus(Nucleus::new("O", 8, 29156.9, center));
                molecule.add_nucleus(Nucleus::hydrogen(center + Vector3D::new(1.43, 1.1, 0.0)));
                molecule.add_nucleus(Nucleus::hydrogen(center + Vector3D::new(-1.43, 1.1, 0.0)));
            }
        }
    }

    let natoms = molecule.size();
    let mut fragments = FragmentedNuclei::new(Arc::new(molecule));
    for i in (0..natoms).step_by(3) {
        fragments.insert([i, i + 1, i + 2]).expect("invalid fragment");
    }
    return fragments;
}

fn run_nmers(mut group: BenchmarkGroup<WallTime>, size: usize, test_mode: bool) {
    let fragments = water_grid(size);
    let max_order = if test_mode { 2 } else { 3 };

    for n in 2..=max_order {
        group.bench_function(&format!("n = {}", n), |b| b.iter(|| {
            NMers::new(fragments.clone(), n).unwrap()
        }));

        let screening = DistanceScreening::new(6.0).unwrap();
        group.bench_function(&format!("n = {} (screened)", n), |b| b.iter(|| {
            screening.nmers(fragments.clone(), n).unwrap()
        }));
    }
}

fn nmers(c: &mut Criterion) {
    let test_mode = std::env::args().any(|arg| arg == "--test");

    let mut group = c.benchmark_group("N-mers/8 water molecules");
    group.noise_threshold(0.05);
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);
    run_nmers(group, 2, test_mode);

    let mut group = c.benchmark_group("N-mers/27 water molecules");
    group.noise_threshold(0.05);
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);
    run_nmers(group, 3, test_mode);
}

criterion_group!(all, nmers);
criterion_main!(all);
