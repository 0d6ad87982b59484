use ghostfragment::{Molecule, Nucleus, Pipeline, Vector3D};

/// Build a cluster of `n` water molecules on a line
fn water_cluster(n: usize) -> Molecule {
    let mut molecule = Molecule::new();
    for i in 0..n {
        let z = 5.0 * i as f64;
        molecule.add_nucleus(Nucleus::new("O", 8, 29156.9, Vector3D::new(0.0, -0.0758, z)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(0.8668, 0.6014, z)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(-0.8668, 0.6014, z)));
    }
    return molecule;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::from_json(r#"{
        "fragmenter": {"type": "cluster"},
        "nmers": 2,
        "neutral_singlet": true
    }"#)?;

    let fragmentation = pipeline.run(water_cluster(4))?;

    println!("{} fragments", fragmentation.fragments.len());
    for (i, subsystem) in fragmentation.subsystems.iter().enumerate() {
        println!(
            "subsystem {}: nuclei {:?}, weight {}",
            i, subsystem, fragmentation.weights[i]
        );
    }

    // the energy of each subsystem would come from an electronic structure
    // code, here we use the number of nuclei
    let values = fragmentation.subsystems.iter()
        .map(|subsystem| subsystem.len() as f64)
        .collect::<Vec<_>>();
    println!("recombined: {}", fragmentation.recombine(&values)?);

    Ok(())
}
