use std::sync::Arc;

use log::debug;

use crate::{Error, Molecule};
use crate::topology::{ConnectivityTable, NuclearGraph};

use super::{FragmenterBase, FragmentedNuclei};

/// Heavy atom fragments: every atom heavier than hydrogen is grouped with the
/// hydrogen atoms bonded to it.
///
/// Hydrogen atoms which are not bonded to any heavy atom are kept alone, or
/// together with the other hydrogen of a H₂ molecule. A hydrogen atom bonded
/// to more than one atom is an error.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HeavyAtom {}

impl HeavyAtom {
    /// Group the atoms of `molecule` according to the heavy atoms they are
    /// bonded to. The resulting groups are disjoint.
    pub fn partition(&self, molecule: &Arc<Molecule>, connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error> {
        if connectivity.natoms() != molecule.size() {
            return Err(Error::InvalidParameter(format!(
                "the connectivity is defined for {} atoms, but the molecule contains {} atoms",
                connectivity.natoms(), molecule.size()
            )));
        }

        if let Some(nucleus) = molecule.nuclei().iter().find(|n| n.atomic_number() == 0) {
            return Err(Error::UnsupportedElement(nucleus.atomic_number()));
        }

        let is_hydrogen = |i: usize| molecule[i].atomic_number() == 1;

        let mut fragments = FragmentedNuclei::new(Arc::clone(molecule));
        for atom in 0..molecule.size() {
            let bonded = connectivity.bonded_atoms(atom);
            if !is_hydrogen(atom) {
                let hydrogens = bonded.iter().copied().filter(|&i| is_hydrogen(i));
                fragments.insert(std::iter::once(atom).chain(hydrogens))?;
                continue;
            }

            let mut partners = bonded.iter().copied();
            match (partners.next(), partners.next()) {
                (None, _) => { fragments.insert([atom])?; }
                (Some(other), None) => {
                    if !is_hydrogen(other) || other < atom {
                        // already part of another fragment
                        continue;
                    }
                    fragments.insert([atom, other])?;
                }
                (Some(_), Some(_)) => {
                    return Err(Error::InvalidTopology(format!(
                        "hydrogen atom {} is bonded to {} atoms, expected at most 1",
                        atom, bonded.len()
                    )));
                }
            }
        }

        debug!("grouped {} atoms into {} heavy atom fragments", molecule.size(), fragments.len());
        return Ok(fragments);
    }
}

impl FragmenterBase for HeavyAtom {
    fn name(&self) -> String {
        "heavy atom fragments".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    #[time_graph::instrument(name = "HeavyAtom::fragment")]
    fn fragment(&self, graph: &NuclearGraph, connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error> {
        self.partition(graph.supersystem(), connectivity)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::{Nucleus, Vector3D};
    use crate::systems::test_utils::{hydrogen_line, test_molecule};
    use crate::topology::CovalentRadii;
    use super::*;

    fn partition(molecule: Molecule) -> Result<FragmentedNuclei, Error> {
        let connectivity = CovalentRadii::default().compute(&molecule)?;
        return HeavyAtom {}.partition(&Arc::new(molecule), &connectivity);
    }

    #[test]
    fn ethane() {
        let fragments = partition(test_molecule("ethane")).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], BTreeSet::from([0, 2, 3, 4]));
        assert_eq!(fragments[1], BTreeSet::from([1, 5, 6, 7]));
    }

    #[test]
    fn water() {
        let fragments = partition(test_molecule("water-dimer")).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], BTreeSet::from([0, 1, 2]));
        assert_eq!(fragments[1], BTreeSet::from([3, 4, 5]));
    }

    #[test]
    fn hydrogens() {
        let fragments = partition(test_molecule("H2")).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0], BTreeSet::from([0, 1]));

        let fragments = partition(test_molecule("H")).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0], BTreeSet::from([0]));

        let fragments = partition(hydrogen_line(3)).unwrap();
        assert_eq!(fragments.len(), 3);

        assert!(partition(test_molecule("empty")).unwrap().is_empty());
    }

    #[test]
    fn overbonded_hydrogen() {
        let molecule = Arc::new(hydrogen_line(3));
        let connectivity = ConnectivityTable::with_bonds(3, [(0, 1), (1, 2)]).unwrap();

        let error = HeavyAtom {}.partition(&molecule, &connectivity).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid topology: hydrogen atom 1 is bonded to 2 atoms, expected at most 1"
        );
    }

    #[test]
    fn hydrogen_pair_next_to_lone_hydrogen() {
        let molecule = Arc::new(hydrogen_line(3));
        let connectivity = ConnectivityTable::with_bonds(3, [(1, 2)]).unwrap();

        let fragments = HeavyAtom {}.partition(&molecule, &connectivity).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], BTreeSet::from([0]));
        assert_eq!(fragments[1], BTreeSet::from([1, 2]));
    }

    #[test]
    fn ghost_atom() {
        let molecule = Arc::new(Molecule::from_iter([
            Nucleus::new("X", 0, 0.0, Vector3D::zero()),
            Nucleus::hydrogen(Vector3D::new(1.0, 0.0, 0.0)),
        ]));
        let connectivity = ConnectivityTable::new(2);

        let error = HeavyAtom {}.partition(&molecule, &connectivity).unwrap_err();
        assert!(matches!(error, Error::UnsupportedElement(0)));

        let error = HeavyAtom {}.partition(&molecule, &ConnectivityTable::new(3)).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }
}
