use std::collections::BTreeSet;

use log::debug;

use crate::Error;

use super::FragmentedNuclei;

/// Intersect `current` with all the `fragments`, and recursively intersect
/// every new intersection with the fragments coming after the one which
/// created it.
fn intersect_recursive(
    current: &BTreeSet<usize>,
    fragments: &[&BTreeSet<usize>],
    intersections: &mut BTreeSet<BTreeSet<usize>>,
) {
    for (i, fragment) in fragments.iter().enumerate() {
        let intersection = current.intersection(fragment).copied().collect::<BTreeSet<_>>();
        if intersection.is_empty() || intersections.contains(&intersection) {
            continue;
        }

        intersections.insert(intersection.clone());
        intersect_recursive(&intersection, &fragments[(i + 1)..], intersections);
    }
}

/// Find all the intersections between the given `fragments`, including the
/// intersections of intersections.
///
/// The returned collection contains the initial fragments, in the same
/// order, followed by all the new intersections sorted in lexicographic
/// order. Intersections which are equal to one of the initial fragments are
/// not duplicated.
#[time_graph::instrument(name = "find_intersections")]
pub fn find_intersections(fragments: &FragmentedNuclei) -> Result<FragmentedNuclei, Error> {
    let all = fragments.iter().collect::<Vec<_>>();

    let mut intersections = BTreeSet::new();
    for (i, fragment) in all.iter().enumerate() {
        intersect_recursive(fragment, &all[(i + 1)..], &mut intersections);
    }

    let mut subsystems = fragments.clone();
    for intersection in intersections {
        subsystems.insert_set(intersection)?;
    }

    debug!(
        "found {} new intersections between {} fragments",
        subsystems.len() - fragments.len(), fragments.len()
    );
    return Ok(subsystems);
}
