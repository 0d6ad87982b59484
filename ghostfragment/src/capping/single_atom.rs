use crate::{Error, Nucleus};
use crate::fragmenting::FragmentedNuclei;
use crate::topology::{BrokenBonds, ConnectivityTable};

use super::{CapperBase, CappedFragments};

/// Capping by replacing the removed atom of each broken bond with the cap,
/// at the exact same position.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SingleAtom {
    /// Nucleus to use as a cap, hydrogen by default. The position of this
    /// nucleus is ignored.
    #[serde(default)]
    pub cap: Nucleus,
}

impl CapperBase for SingleAtom {
    fn name(&self) -> String {
        "single atom capping".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    #[time_graph::instrument(name = "SingleAtom::cap")]
    fn cap(
        &self,
        fragments: &FragmentedNuclei,
        broken_bonds: &[BrokenBonds],
        connectivity: &ConnectivityTable,
    ) -> Result<CappedFragments, Error> {
        super::check_inputs(fragments, broken_bonds, connectivity)?;

        let molecule = fragments.supersystem();
        super::place_caps(fragments, broken_bonds, &self.cap, |_, removed| {
            Ok(molecule[removed].position())
        })
    }
}
