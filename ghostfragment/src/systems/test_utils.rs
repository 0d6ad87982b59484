use std::sync::Arc;

use crate::{Molecule, Nucleus, Vector3D};
use crate::fragmenting::FragmentedNuclei;

const OXYGEN_MASS: f64 = 29156.9;
const CARBON_MASS: f64 = 21874.66;

pub fn test_molecule(name: &str) -> Molecule {
    match name {
        "water" => water(1),
        "water-dimer" => water(2),
        "water-trimer" => water(3),
        "water-tetramer" => water(4),
        "ethane" => ethane(),
        "H2" => hydrogen_molecule(),
        "H" => Molecule::from_iter([Nucleus::hydrogen(Vector3D::zero())]),
        "empty" => Molecule::new(),
        _ => panic!("unknown test molecule {}", name)
    }
}

/// `n` water molecules, stacked 3 Bohr apart along the z axis
pub fn water(n: usize) -> Molecule {
    let mut molecule = Molecule::new();
    for i in 0..n {
        let z = 3.0 * i as f64;
        molecule.add_nucleus(Nucleus::new("O", 8, OXYGEN_MASS, Vector3D::new(0.0, -0.07579039945857, z)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(0.86681456860648, 0.60144316994806, z)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(-0.86681456860648, 0.60144316994806, z)));
    }
    return molecule;
}

/// The fragments of `water(n)`, with one water molecule per fragment
pub fn water_fragments(n: usize) -> FragmentedNuclei {
    let mut fragments = FragmentedNuclei::new(Arc::new(water(n)));
    for i in 0..n {
        fragments.insert([3 * i, 3 * i + 1, 3 * i + 2]).unwrap();
    }
    return fragments;
}

/// Staggered ethane, carbons first and then the hydrogen of each carbon
fn ethane() -> Molecule {
    let mut molecule = Molecule::new();
    molecule.add_nucleus(Nucleus::new("C", 6, CARBON_MASS, Vector3D::new(0.0, 0.0, 0.0)));
    molecule.add_nucleus(Nucleus::new("C", 6, CARBON_MASS, Vector3D::new(2.910178, 0.0, 0.0)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(-0.685971, 1.942638, 0.0)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(-0.685971, -0.971319, 1.681856)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(-0.685971, -0.971319, -1.681856)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(3.596149, -1.942638, 0.0)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(3.596149, 0.971319, 1.681856)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(3.596149, 0.971319, -1.681856)));
    return molecule;
}

/// H2 with a slightly compressed bond, inside the default covalent cutoff
fn hydrogen_molecule() -> Molecule {
    let mut molecule = Molecule::new();
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(0.0, 0.0, 0.0)));
    molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(0.0, 0.0, 1.2)));
    return molecule;
}

/// `n` hydrogen atoms, 10 Bohr apart on the x axis. Useful when only the
/// number of atoms matters.
pub fn hydrogen_line(n: usize) -> Molecule {
    (0..n).map(|i| Nucleus::hydrogen(Vector3D::new(10.0 * i as f64, 0.0, 0.0))).collect()
}
