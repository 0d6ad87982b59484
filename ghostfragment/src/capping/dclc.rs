use std::collections::HashMap;

use crate::{Error, Molecule, Nucleus};
use crate::fragmenting::FragmentedNuclei;
use crate::topology::{covalent_radius, BrokenBonds, ConnectivityTable};

use super::{CapperBase, CappedFragments};

/// Capping with the average bond length in the supersystem.
///
/// For each broken bond between an anchor `A` and a removed atom, the cap is
/// placed on the bond vector, at the average distance between bonded atoms
/// of the same elements as `A` and the cap in the supersystem. If there are
/// no such bonds, the sum of the covalent radii is used instead.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Dclc {
    /// Nucleus to use as a cap, hydrogen by default. The position of this
    /// nucleus is ignored.
    #[serde(default)]
    pub cap: Nucleus,
}

/// Get the average length of bonds between atoms with atomic numbers
/// `anchor` and `cap` in `molecule`, or the sum of their covalent radii if
/// there are no such bonds.
pub(crate) fn average_bond_length(
    molecule: &Molecule,
    connectivity: &ConnectivityTable,
    anchor: usize,
    cap: usize,
) -> Result<f64, Error> {
    let mut total = 0.0;
    let mut count = 0;
    for (i, nucleus) in molecule.nuclei().iter().enumerate() {
        if nucleus.atomic_number() != anchor {
            continue;
        }

        for &j in connectivity.bonded_atoms(i) {
            if molecule[j].atomic_number() == cap {
                total += nucleus.distance(&molecule[j]);
                count += 1;
            }
        }
    }

    if count == 0 {
        return Ok(covalent_radius(anchor)? + covalent_radius(cap)?);
    }
    return Ok(total / count as f64);
}

impl CapperBase for Dclc {
    fn name(&self) -> String {
        "DCLC capping".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    #[time_graph::instrument(name = "Dclc::cap")]
    fn cap(
        &self,
        fragments: &FragmentedNuclei,
        broken_bonds: &[BrokenBonds],
        connectivity: &ConnectivityTable,
    ) -> Result<CappedFragments, Error> {
        super::check_inputs(fragments, broken_bonds, connectivity)?;

        let molecule = fragments.supersystem();
        let cap_z = self.cap.atomic_number();
        let mut lengths = HashMap::new();

        super::place_caps(fragments, broken_bonds, &self.cap, |anchor, removed| {
            let vector = super::bond_vector(molecule, anchor, removed)?;

            let anchor_z = molecule[anchor].atomic_number();
            let length = match lengths.get(&(anchor_z, cap_z)).copied() {
                Some(length) => length,
                None => {
                    let length = average_bond_length(molecule, connectivity, anchor_z, cap_z)?;
                    lengths.insert((anchor_z, cap_z), length);
                    length
                }
            };

            Ok(molecule[anchor].position() + vector * (length / vector.norm()))
        })
    }
}
