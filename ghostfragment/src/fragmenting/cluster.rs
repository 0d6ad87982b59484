use std::collections::BTreeSet;

use log::debug;

use crate::Error;
use crate::topology::{ConnectivityTable, NuclearGraph};

use super::{FragmenterBase, FragmentedNuclei};

/// Cluster fragments: each connected component of the nuclear graph becomes
/// one fragment, so every nucleus ends up in exactly one fragment.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Cluster {}

impl FragmenterBase for Cluster {
    fn name(&self) -> String {
        "cluster fragments".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    #[time_graph::instrument(name = "Cluster::fragment")]
    fn fragment(&self, graph: &NuclearGraph, _connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error> {
        let edges = graph.edges();
        let mut fragments = FragmentedNuclei::new(graph.supersystem().clone());

        let mut seen = vec![false; graph.nnodes()];
        for start in 0..graph.nnodes() {
            if seen[start] {
                continue;
            }

            // absorb nodes bonded to the component until it stops growing
            let mut component = BTreeSet::from([start]);
            let mut frontier = vec![start];
            while !frontier.is_empty() {
                let mut next = Vec::new();
                for node in frontier {
                    for &neighbor in edges.bonded_atoms(node) {
                        if component.insert(neighbor) {
                            next.push(neighbor);
                        }
                    }
                }
                frontier = next;
            }

            let mut atoms = BTreeSet::new();
            for node in component {
                seen[node] = true;
                atoms.extend(graph.node(node));
            }
            fragments.insert_set(atoms)?;
        }

        debug!("found {} clusters in {} nodes", fragments.len(), graph.nnodes());
        return Ok(fragments);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::systems::test_utils::test_molecule;
    use crate::topology::{CovalentRadii, Partition};
    use super::*;

    fn cluster(name: &str) -> FragmentedNuclei {
        let molecule = Arc::new(test_molecule(name));
        let connectivity = CovalentRadii::default().compute(&molecule).unwrap();
        let graph = NuclearGraph::build(molecule, Partition::Atoms, &connectivity).unwrap();
        return Cluster {}.fragment(&graph, &connectivity).unwrap();
    }

    #[test]
    fn water_trimer() {
        let fragments = cluster("water-trimer");
        assert_eq!(fragments.len(), 3);
        for i in 0..3 {
            assert_eq!(fragments[i], BTreeSet::from([3 * i, 3 * i + 1, 3 * i + 2]));
        }

        let fragments = cluster("ethane");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].len(), 8);
    }

    #[test]
    fn idempotent() {
        let fragments = cluster("water-tetramer");

        // use the clusters as nodes, without edges between them
        let natoms = fragments.supersystem().size();
        let graph = NuclearGraph::new(fragments.clone(), ConnectivityTable::new(fragments.len())).unwrap();
        let again = Cluster {}.fragment(&graph, &ConnectivityTable::new(natoms)).unwrap();
        assert_eq!(again, fragments);
    }

    #[test]
    fn empty() {
        assert!(cluster("empty").is_empty());
    }
}
