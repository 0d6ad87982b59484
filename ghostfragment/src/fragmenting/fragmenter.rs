use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::Error;
use crate::topology::{ConnectivityTable, NuclearGraph};

use super::{FragmenterBase, FragmentedNuclei};
use super::{BondBased, Cluster, HeavyAtom};

/// A fragmentation strategy, created from its registered name and JSON
/// parameters.
#[derive(Debug)]
pub struct Fragmenter {
    implementation: Box<dyn FragmenterBase>,
    parameters: String,
}

impl From<Box<dyn FragmenterBase>> for Fragmenter {
    fn from(implementation: Box<dyn FragmenterBase>) -> Fragmenter {
        let parameters = implementation.parameters();
        Fragmenter {
            implementation: implementation,
            parameters: parameters,
        }
    }
}

impl Fragmenter {
    /// Create a new fragmenter with the given `name` and `parameters`.
    ///
    /// The available fragmenters are `"bond_based"`, `"cluster"` and
    /// `"heavy_atom"`. The `parameters` should be formatted as JSON.
    ///
    /// # Errors
    ///
    /// This function returns an error if there is no registered fragmenter
    /// with the given `name`, or if the parameters are invalid for this
    /// fragmenter.
    pub fn new(name: &str, parameters: String) -> Result<Fragmenter, Error> {
        let creator = match REGISTERED_FRAGMENTERS.get(name) {
            Some(creator) => creator,
            None => {
                return Err(Error::InvalidParameter(
                    format!("unknown fragmenter with name '{}'", name)
                ));
            }
        };

        return Ok(Fragmenter {
            implementation: creator(&parameters)?,
            parameters: parameters,
        })
    }

    /// Get the name of this fragmenter
    pub fn name(&self) -> String {
        self.implementation.name()
    }

    /// Get the parameters used to create this fragmenter in a string,
    /// formatted as JSON.
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    /// Create fragments from the given `graph` and atomic `connectivity`
    pub fn fragment(&self, graph: &NuclearGraph, connectivity: &ConnectivityTable) -> Result<FragmentedNuclei, Error> {
        self.implementation.fragment(graph, connectivity)
    }
}

/// Parameters of all the fragmentation strategies, tagged by the name of the
/// strategy in the `type` field.
#[derive(Debug, Clone)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum FragmenterParameters {
    /// See `BondBased`
    #[serde(rename = "bond_based")]
    BondBased(BondBased),
    /// See `Cluster`
    #[serde(rename = "cluster")]
    Cluster(Cluster),
    /// See `HeavyAtom`
    #[serde(rename = "heavy_atom")]
    HeavyAtom(HeavyAtom),
}

impl From<FragmenterParameters> for Fragmenter {
    fn from(parameters: FragmenterParameters) -> Fragmenter {
        let implementation: Box<dyn FragmenterBase> = match parameters {
            FragmenterParameters::BondBased(fragmenter) => Box::new(fragmenter),
            FragmenterParameters::Cluster(fragmenter) => Box::new(fragmenter),
            FragmenterParameters::HeavyAtom(fragmenter) => Box::new(fragmenter),
        };
        return Fragmenter::from(implementation);
    }
}

type FragmenterCreator = fn(&str) -> Result<Box<dyn FragmenterBase>, Error>;

macro_rules! add_fragmenter {
    ($map :expr, $name :literal, $type :ty) => (
        $map.insert($name, (|json| {
            let value = serde_json::from_str::<$type>(json)?;
            Ok(Box::new(value))
        }) as FragmenterCreator);
    );
}

static REGISTERED_FRAGMENTERS: Lazy<BTreeMap<&'static str, FragmenterCreator>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    add_fragmenter!(map, "bond_based", BondBased);
    add_fragmenter!(map, "cluster", Cluster);
    add_fragmenter!(map, "heavy_atom", HeavyAtom);
    return map;
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered() {
        let fragmenter = Fragmenter::new("bond_based", r#"{"nbonds": 2}"#.into()).unwrap();
        assert_eq!(fragmenter.name(), "bond-based fragments");
        assert_eq!(fragmenter.parameters(), r#"{"nbonds": 2}"#);

        let fragmenter = Fragmenter::new("cluster", "{}".into()).unwrap();
        assert_eq!(fragmenter.name(), "cluster fragments");

        let fragmenter = Fragmenter::new("heavy_atom", "{}".into()).unwrap();
        assert_eq!(fragmenter.name(), "heavy atom fragments");
    }

    #[test]
    fn invalid() {
        let error = Fragmenter::new("nope", "{}".into()).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: unknown fragmenter with name 'nope'");

        let error = Fragmenter::new("bond_based", r#"{"nbonds": -1}"#.into()).unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn from_parameters() {
        let parameters: FragmenterParameters = serde_json::from_str(
            r#"{"type": "bond_based", "nbonds": 1}"#
        ).unwrap();
        let fragmenter = Fragmenter::from(parameters);
        assert_eq!(fragmenter.name(), "bond-based fragments");
        assert_eq!(fragmenter.parameters(), r#"{"nbonds":1}"#);

        let parameters: FragmenterParameters = serde_json::from_str(r#"{"type": "cluster"}"#).unwrap();
        assert_eq!(Fragmenter::from(parameters).name(), "cluster fragments");
    }
}
