use ghostfragment::Pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).expect("expected a command line argument");

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    let molecules = ghostfragment::systems::read_from_file(&path)?;

    let pipeline = Pipeline::from_json(r#"{
        "nodes": "HeavyAtom",
        "fragmenter": {"type": "cluster"},
        "nmers": 2,
        "screening": 10.0,
        "capper": {"type": "dclc"}
    }"#)?;

    for molecule in molecules {
        let natoms = molecule.size();
        let fragmentation = time_graph::spanned!("Full fragmentation", {
            pipeline.run(molecule)?
        });

        println!(
            "{} atoms: {} fragments, {} subsystems, {} caps",
            natoms,
            fragmentation.fragments.len(),
            fragmentation.subsystems.len(),
            fragmentation.capped.ncaps(),
        );
    }

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}
