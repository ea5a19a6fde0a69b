#![allow(clippy::needless_return)]
use ewaldine::{energy, EnergyOptions, System, UnitCell, Vector3D};

use criterion::{Criterion, criterion_group, criterion_main};

/// Build a rock salt supercell with `repeat³` conventional cubic cells of 8
/// ions each
fn rock_salt(repeat: usize) -> (System, Vec<f64>) {
    let length = 2.0;
    let cell = UnitCell::cubic(length * repeat as f64).expect("invalid cell");

    let basis = [
        (Vector3D::new(0.0, 0.0, 0.0), 1.0),
        (Vector3D::new(1.0, 1.0, 0.0), 1.0),
        (Vector3D::new(1.0, 0.0, 1.0), 1.0),
        (Vector3D::new(0.0, 1.0, 1.0), 1.0),
        (Vector3D::new(1.0, 0.0, 0.0), -1.0),
        (Vector3D::new(0.0, 1.0, 0.0), -1.0),
        (Vector3D::new(0.0, 0.0, 1.0), -1.0),
        (Vector3D::new(1.0, 1.0, 1.0), -1.0),
    ];

    let mut positions = Vec::new();
    let mut charges = Vec::new();
    for i in 0..repeat {
        for j in 0..repeat {
            for k in 0..repeat {
                let origin = length * Vector3D::new(i as f64, j as f64, k as f64);
                for (position, charge) in basis {
                    positions.push(origin + position);
                    charges.push(charge);
                }
            }
        }
    }

    let system = System::new(cell, positions).expect("invalid system");
    return (system, charges);
}

fn ewald_energy(c: &mut Criterion) {
    let mut group = c.benchmark_group("ewald energy");

    for repeat in [1, 2] {
        let (system, charges) = rock_salt(repeat);
        let neighbors = system.neighbors();

        group.bench_function(format!("neighbors, {} sites", system.size()), |b| b.iter(|| {
            system.neighbors()
        }));

        group.bench_function(format!("energy, {} sites", system.size()), |b| b.iter(|| {
            energy(&system, EnergyOptions {
                charges: Some(&charges),
                neighbors: Some(&neighbors),
                ..Default::default()
            }).expect("energy computation failed")
        }));
    }

    group.finish();
}

criterion_group!(benches, ewald_energy);
criterion_main!(benches);
