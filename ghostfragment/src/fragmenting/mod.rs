//! Generation of fragments, n-mers, intersections and many-body expansion
//! weights.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::Error;
use crate::topology::{ConnectivityTable, NuclearGraph};

mod fragmented;
pub use self::fragmented::FragmentedNuclei;

mod fragmenter;
pub use self::fragmenter::{Fragmenter, FragmenterParameters};

mod bond_based;
pub use self::bond_based::BondBased;

mod cluster;
pub use self::cluster::Cluster;

mod heavy_atom;
pub use self::heavy_atom::HeavyAtom;

mod nmers;
pub use self::nmers::NMers;

mod screening;
pub use self::screening::{minimum_distances, DistanceScreening};

mod intersections;
pub use self::intersections::find_intersections;

mod weights;
pub use self::weights::{gmbe_weights, FragmentWeights};

/// Common interface to all the strategies turning a `NuclearGraph` into
/// fragments.
pub trait FragmenterBase: std::fmt::Debug + Send + Sync {
    /// Get the name of this fragmenter
    fn name(&self) -> String;

    /// Get the parameters used to create this fragmenter as a JSON string
    fn parameters(&self) -> String;

    /// Create fragments from the nodes and edges of the `graph`. The atomic
    /// `connectivity` of the supersystem is also available for strategies
    /// working at the atomic level.
    fn fragment(&self, graph: &NuclearGraph, connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error>;
}

/// For each set in `sets`, check if it is a strict subset of any other set.
///
/// All entries are compared against the full population, so the result does
/// not depend on the order of `sets`.
pub(crate) fn dominated_sets(sets: &[BTreeSet<usize>]) -> Vec<bool> {
    sets.par_iter()
        .map(|set| sets.iter().any(|other| set.len() < other.len() && set.is_subset(other)))
        .collect()
}

/// Insert all sets in `candidates` that are not strict subsets of another
/// candidate in `fragments`, keeping the order of `candidates`.
pub(crate) fn insert_maximal_sets(fragments: &mut FragmentedNuclei, candidates: Vec<BTreeSet<usize>>) -> Result<usize, Error> {
    let dominated = dominated_sets(&candidates);
    let mut pruned = 0;
    for (candidate, dominated) in candidates.into_iter().zip(dominated) {
        if dominated {
            pruned += 1;
        } else {
            fragments.insert_set(candidate)?;
        }
    }
    return Ok(pruned);
}
