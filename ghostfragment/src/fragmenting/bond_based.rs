use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexSet;
use log::debug;

use crate::Error;
use crate::topology::{ConnectivityTable, NuclearGraph};

use super::{FragmenterBase, FragmentedNuclei};

/// Bond-based fragments: each node of the nuclear graph is grown into a
/// fragment containing all the nodes at most `nbonds` edges away from it.
///
/// Fragments which are strict subsets of another fragment are removed, so the
/// final fragments never contain each other.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BondBased {
    /// Maximal number of edges (bonds between nodes) between the central node
    /// of a fragment and any other node in the fragment
    #[serde(default)]
    pub nbonds: usize,
}

impl BondBased {
    /// Get all the nodes at most `self.nbonds` edges away from `root`
    fn neighborhood(&self, edges: &ConnectivityTable, root: usize) -> BTreeSet<usize> {
        let mut distances = vec![usize::MAX; edges.natoms()];
        distances[root] = 0;

        let mut queue = VecDeque::from([root]);
        let mut visited = BTreeSet::new();
        while let Some(node) = queue.pop_front() {
            visited.insert(node);
            let distance = distances[node];
            if distance == self.nbonds {
                continue;
            }

            for &neighbor in edges.bonded_atoms(node) {
                if distances[neighbor] == usize::MAX {
                    distances[neighbor] = distance + 1;
                    queue.push_back(neighbor);
                }
            }
        }

        return visited;
    }
}

impl FragmenterBase for BondBased {
    fn name(&self) -> String {
        "bond-based fragments".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    #[time_graph::instrument(name = "BondBased::fragment")]
    fn fragment(&self, graph: &NuclearGraph, _connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error> {
        let mut candidates = IndexSet::with_capacity(graph.nnodes());
        for root in 0..graph.nnodes() {
            let mut atoms = BTreeSet::<usize>::new();
            for node in self.neighborhood(graph.edges(), root) {
                atoms.extend(graph.node(node));
            }
            candidates.insert(atoms);
        }

        let ncandidates = candidates.len();
        let mut fragments = FragmentedNuclei::new(graph.supersystem().clone());
        let pruned = super::insert_maximal_sets(&mut fragments, candidates.into_iter().collect())?;

        debug!(
            "bond-based fragmentation with nbonds={}: {} candidates, {} subsets removed",
            self.nbonds, ncandidates, pruned
        );
        return Ok(fragments);
    }
}
