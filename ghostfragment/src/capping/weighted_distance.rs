use crate::{Error, Nucleus};
use crate::fragmenting::FragmentedNuclei;
use crate::topology::{covalent_radius, BrokenBonds, ConnectivityTable};

use super::{CapperBase, CappedFragments};

/// Capping at a distance weighted by covalent radii.
///
/// For a broken bond `A-B`, the cap `X` is placed on the bond vector, at a
/// fraction `(σ_A + σ_X) / (σ_A + σ_B)` of the `A-B` distance from `A`, where
/// `σ` are the covalent radii.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WeightedDistance {
    /// Nucleus to use as a cap, hydrogen by default. The position of this
    /// nucleus is ignored.
    #[serde(default)]
    pub cap: Nucleus,
}

impl CapperBase for WeightedDistance {
    fn name(&self) -> String {
        "weighted distance capping".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    #[time_graph::instrument(name = "WeightedDistance::cap")]
    fn cap(
        &self,
        fragments: &FragmentedNuclei,
        broken_bonds: &[BrokenBonds],
        connectivity: &ConnectivityTable,
    ) -> Result<CappedFragments, Error> {
        super::check_inputs(fragments, broken_bonds, connectivity)?;

        let molecule = fragments.supersystem();
        let cap_radius = covalent_radius(self.cap.atomic_number())?;

        super::place_caps(fragments, broken_bonds, &self.cap, |anchor, removed| {
            let vector = super::bond_vector(molecule, anchor, removed)?;

            let anchor_radius = covalent_radius(molecule[anchor].atomic_number())?;
            let removed_radius = covalent_radius(molecule[removed].atomic_number())?;
            let ratio = (anchor_radius + cap_radius) / (anchor_radius + removed_radius);

            Ok(molecule[anchor].position() + ratio * vector)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use crate::systems::test_utils::test_molecule;
    use crate::topology::{find_broken_bonds, CovalentRadii};
    use super::*;

    #[test]
    fn ethane() {
        let molecule = Arc::new(test_molecule("ethane"));
        let connectivity = CovalentRadii::default().compute(&molecule).unwrap();
        let mut fragments = FragmentedNuclei::new(molecule.clone());
        fragments.insert([0, 2, 3, 4]).unwrap();
        fragments.insert([1, 5, 6, 7]).unwrap();
        let broken = find_broken_bonds(&fragments, &connectivity).unwrap();

        let capped = WeightedDistance::default().cap(&fragments, &broken, &connectivity).unwrap();
        assert_eq!(capped.ncaps(), 2);

        let sigma_c = covalent_radius(6).unwrap();
        let sigma_h = covalent_radius(1).unwrap();
        let ratio = (sigma_c + sigma_h) / (2.0 * sigma_c);
        let expected = ratio * molecule[0].distance(&molecule[1]);

        for (fragment, anchor) in [(0, 0), (1, 1)] {
            let cap = &capped.caps(fragment)[0];
            assert_eq!(cap.anchor, anchor);
            assert_relative_eq!(cap.nucleus.distance(&molecule[anchor]), expected, epsilon = 1e-6);
            assert_relative_eq!(
                cap.nucleus.distance(&molecule[cap.replaced]),
                molecule[0].distance(&molecule[1]) - expected,
                epsilon = 1e-6
            );
        }
    }
}
