use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::Lazy;

use crate::Error;
use crate::fragmenting::{FragmentedNuclei, NMers};
use crate::topology::{find_broken_bonds, BrokenBonds, ConnectivityTable};

use super::{CapperBase, CappedFragments};
use super::{Dclc, SingleAtom, WeightedDistance};

/// A capping strategy, created from its registered name and JSON parameters.
#[derive(Debug)]
pub struct Capper {
    implementation: Box<dyn CapperBase>,
    parameters: String,
}

impl From<Box<dyn CapperBase>> for Capper {
    fn from(implementation: Box<dyn CapperBase>) -> Capper {
        let parameters = implementation.parameters();
        Capper {
            implementation: implementation,
            parameters: parameters,
        }
    }
}

impl Capper {
    /// Create a new capper with the given `name` and `parameters`.
    ///
    /// The available cappers are `"dclc"`, `"weighted_distance"` and
    /// `"single_atom"`. The `parameters` should be formatted as JSON.
    pub fn new(name: &str, parameters: String) -> Result<Capper, Error> {
        let creator = match REGISTERED_CAPPERS.get(name) {
            Some(creator) => creator,
            None => {
                return Err(Error::InvalidParameter(
                    format!("unknown capper with name '{}'", name)
                ));
            }
        };

        return Ok(Capper {
            implementation: creator(&parameters)?,
            parameters: parameters,
        })
    }

    /// Get the name of this capper
    pub fn name(&self) -> String {
        self.implementation.name()
    }

    /// Get the parameters used to create this capper in a string, formatted
    /// as JSON.
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    /// Cap the `broken_bonds` of each fragment in `fragments`
    pub fn cap(
        &self,
        fragments: &FragmentedNuclei,
        broken_bonds: &[BrokenBonds],
        connectivity: &ConnectivityTable,
    ) -> Result<CappedFragments, Error> {
        let capped = self.implementation.cap(fragments, broken_bonds, connectivity)?;
        debug!("{} placed {} caps on {} fragments", self.name(), capped.ncaps(), capped.len());
        return Ok(capped);
    }

    /// Find the bonds broken by the `fragments` and cap them
    pub fn cap_fragments(&self, fragments: &FragmentedNuclei, connectivity: &ConnectivityTable) -> Result<CappedFragments, Error> {
        let broken_bonds = find_broken_bonds(fragments, connectivity)?;
        return self.cap(fragments, &broken_bonds, connectivity);
    }

    /// Cap the n-mers in `nmers`. Each n-mer is first flattened to the union
    /// of its fragments, and then capped as a fragment; fragment `i` in the
    /// output corresponds to n-mer `i`.
    #[time_graph::instrument(name = "Capper::cap_nmers")]
    pub fn cap_nmers(&self, nmers: &NMers, connectivity: &ConnectivityTable) -> Result<CappedFragments, Error> {
        let flattened = nmers.flatten()?;
        return self.cap_fragments(&flattened, connectivity);
    }
}

/// Parameters of all the capping strategies, tagged by the name of the
/// strategy in the `type` field.
#[derive(Debug, Clone)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum CapperParameters {
    /// See `Dclc`
    #[serde(rename = "dclc")]
    Dclc(Dclc),
    /// See `WeightedDistance`
    #[serde(rename = "weighted_distance")]
    WeightedDistance(WeightedDistance),
    /// See `SingleAtom`
    #[serde(rename = "single_atom")]
    SingleAtom(SingleAtom),
}

impl Default for CapperParameters {
    fn default() -> CapperParameters {
        CapperParameters::Dclc(Dclc::default())
    }
}

impl From<CapperParameters> for Capper {
    fn from(parameters: CapperParameters) -> Capper {
        let implementation: Box<dyn CapperBase> = match parameters {
            CapperParameters::Dclc(capper) => Box::new(capper),
            CapperParameters::WeightedDistance(capper) => Box::new(capper),
            CapperParameters::SingleAtom(capper) => Box::new(capper),
        };
        return Capper::from(implementation);
    }
}

type CapperCreator = fn(&str) -> Result<Box<dyn CapperBase>, Error>;

macro_rules! add_capper {
    ($map :expr, $name :literal, $type :ty) => (
        $map.insert($name, (|json| {
            let value = serde_json::from_str::<$type>(json)?;
            Ok(Box::new(value))
        }) as CapperCreator);
    );
}

static REGISTERED_CAPPERS: Lazy<BTreeMap<&'static str, CapperCreator>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    add_capper!(map, "dclc", Dclc);
    add_capper!(map, "weighted_distance", WeightedDistance);
    add_capper!(map, "single_atom", SingleAtom);
    return map;
});
