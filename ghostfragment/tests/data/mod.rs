#![allow(dead_code)]

use ghostfragment::{Molecule, Nucleus, Vector3D};

const OXYGEN_MASS: f64 = 29156.9;
const CARBON_MASS: f64 = 21874.66;

/// C-C and C-H bond lengths, in Bohr
pub const CC_BOND: f64 = 2.91;
pub const CH_BOND: f64 = 2.06;

/// `n` water molecules stacked along the z axis, 3 Bohr apart
pub fn water_cluster(n: usize) -> Molecule {
    let mut molecule = Molecule::new();
    for i in 0..n {
        let z = 3.0 * i as f64;
        molecule.add_nucleus(Nucleus::new("O", 8, OXYGEN_MASS, Vector3D::new(0.0, -0.07579039945857, z)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(0.86681456860648, 0.60144316994806, z)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(-0.86681456860648, 0.60144316994806, z)));
    }
    return molecule;
}

/// A linear alkane with `n` carbons along the x axis. Each carbon is followed
/// by its hydrogen atoms, and all C-H bonds have the same length.
pub fn alkane(n: usize) -> Molecule {
    let mut molecule = Molecule::new();
    for i in 0..n {
        let x = CC_BOND * i as f64;
        molecule.add_nucleus(Nucleus::new("C", 6, CARBON_MASS, Vector3D::new(x, 0.0, 0.0)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(x, CH_BOND, 0.0)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(x, -CH_BOND, 0.0)));
        if i == 0 {
            molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(x - CH_BOND, 0.0, 0.0)));
        }
        if i == n - 1 {
            molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(x + CH_BOND, 0.0, 0.0)));
        }
    }
    return molecule;
}

/// Size of all the subsystems, used to check that the GMBE weights count
/// every atom exactly once
pub fn subsystem_sizes(subsystems: &ghostfragment::FragmentedNuclei) -> Vec<f64> {
    subsystems.iter().map(|subsystem| subsystem.len() as f64).collect()
}
