use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

use crate::{Error, Molecule};
use crate::fragmenting::{FragmentedNuclei, HeavyAtom};
use super::ConnectivityTable;

/// Strategy used to group atoms into the nodes (pseudo-atoms) of a
/// `NuclearGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum Partition {
    /// Each atom is its own node
    Atoms,
    /// Each heavy atom together with the hydrogen atoms bonded to it is a
    /// node, see `HeavyAtom`
    #[default]
    HeavyAtom,
}

impl Partition {
    /// Group the atoms in `molecule` into disjoint nodes, using the atomic
    /// `connectivity` if needed.
    pub fn nodes(&self, molecule: &Arc<Molecule>, connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error> {
        match self {
            Partition::Atoms => {
                let mut nodes = FragmentedNuclei::new(Arc::clone(molecule));
                for i in 0..molecule.size() {
                    nodes.insert([i])?;
                }
                Ok(nodes)
            }
            Partition::HeavyAtom => HeavyAtom::default().partition(molecule, connectivity),
        }
    }
}

/// A graph where each node is a group of nuclei (a pseudo-atom), and two
/// nodes are connected if any of their nuclei are bonded.
#[derive(Debug, Clone, PartialEq)]
pub struct NuclearGraph {
    nodes: FragmentedNuclei,
    /// Connectivity over node indexes
    edges: ConnectivityTable,
}

impl NuclearGraph {
    /// Create a graph from the given `nodes` and `edges`. The edges refer to
    /// node indexes, not to nuclei indexes.
    pub fn new(nodes: FragmentedNuclei, edges: ConnectivityTable) -> Result<NuclearGraph, Error> {
        if nodes.len() != edges.natoms() {
            return Err(Error::InvalidParameter(format!(
                "the edges are defined for {} nodes, but the graph contains {} nodes",
                edges.natoms(), nodes.len()
            )));
        }

        Ok(NuclearGraph { nodes, edges })
    }

    /// Create a graph from the given `nodes`, using the atomic connectivity
    /// to define the edges: nodes `i` and `j` are connected if any nucleus in
    /// node `i` is bonded to any nucleus in node `j`.
    pub fn from_connectivity(nodes: FragmentedNuclei, connectivity: &ConnectivityTable) -> Result<NuclearGraph, Error> {
        let natoms = nodes.supersystem().size();
        if connectivity.natoms() != natoms {
            return Err(Error::InvalidParameter(format!(
                "the connectivity is defined for {} atoms, but the supersystem contains {} atoms",
                connectivity.natoms(), natoms
            )));
        }

        let nnodes = nodes.len();
        let mut edges = ConnectivityTable::new(nnodes);
        for i in 0..nnodes {
            // all the atoms bonded to any atom in node i
            let mut bonded_to_i = BTreeSet::<usize>::new();
            for &atom in &nodes[i] {
                bonded_to_i.extend(connectivity.bonded_atoms(atom));
            }

            for j in (i + 1)..nnodes {
                if nodes[j].iter().any(|atom| bonded_to_i.contains(atom)) {
                    edges.add_bond(i, j)?;
                }
            }
        }

        debug!("nuclear graph contains {} nodes and {} edges", nnodes, edges.nbonds());
        return NuclearGraph::new(nodes, edges);
    }

    /// Build the graph of `molecule`: first group atoms into nodes using the
    /// given `partition`, then connect the nodes according to the atomic
    /// `connectivity`.
    #[time_graph::instrument(name = "NuclearGraph::build")]
    pub fn build(molecule: Arc<Molecule>, partition: Partition, connectivity: &ConnectivityTable) -> Result<NuclearGraph, Error> {
        let nodes = partition.nodes(&molecule, connectivity)?;
        return NuclearGraph::from_connectivity(nodes, connectivity);
    }

    /// Get the supersystem of this graph
    pub fn supersystem(&self) -> &Arc<Molecule> {
        self.nodes.supersystem()
    }

    /// Get all the nodes of this graph
    pub fn nodes(&self) -> &FragmentedNuclei {
        &self.nodes
    }

    /// Get the nuclei indexes in node `i`
    pub fn node(&self, i: usize) -> &BTreeSet<usize> {
        &self.nodes[i]
    }

    /// Get the number of nodes in this graph
    pub fn nnodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get the edges of this graph, as a connectivity table over nodes
    pub fn edges(&self) -> &ConnectivityTable {
        &self.edges
    }
}
