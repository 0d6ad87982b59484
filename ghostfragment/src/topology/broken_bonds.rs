use std::collections::BTreeSet;

use log::debug;

use crate::Error;
use crate::fragmenting::FragmentedNuclei;
use super::ConnectivityTable;

/// Bonds broken when forming a single fragment. Each bond is stored as
/// `(anchor, removed)`, where `anchor` is the index of a nucleus inside the
/// fragment, and `removed` the index of a nucleus it was bonded to outside of
/// the fragment.
pub type BrokenBonds = BTreeSet<(usize, usize)>;

/// Find the bonds broken by each of the `fragments`, according to the atomic
/// `connectivity` of the supersystem.
///
/// A bond between atom `a` in fragment `i` and atom `b` in fragment `j` is
/// reported as `(a, b)` for fragment `i` and as `(b, a)` for fragment `j`.
#[time_graph::instrument(name = "find_broken_bonds")]
pub fn find_broken_bonds(fragments: &FragmentedNuclei, connectivity: &ConnectivityTable) -> Result<Vec<BrokenBonds>, Error> {
    let natoms = fragments.supersystem().size();
    if connectivity.natoms() != natoms {
        return Err(Error::InvalidParameter(format!(
            "the connectivity is defined for {} atoms, but the supersystem contains {} atoms",
            connectivity.natoms(), natoms
        )));
    }

    let mut all_broken = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let mut broken = BrokenBonds::new();
        for &anchor in fragment {
            for &removed in connectivity.bonded_atoms(anchor) {
                if !fragment.contains(&removed) {
                    broken.insert((anchor, removed));
                }
            }
        }
        all_broken.push(broken);
    }

    debug!(
        "found {} broken bonds in {} fragments",
        all_broken.iter().map(|b| b.len()).sum::<usize>(), fragments.len()
    );

    return Ok(all_broken);
}
