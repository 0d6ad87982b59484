use std::sync::Arc;

use log::info;

use crate::{Error, Molecule};
use crate::capping::{Capper, CapperParameters, CappedFragments};
use crate::charges::{neutral_singlet, ChargeMultiplicity};
use crate::fragmenting::{find_intersections, gmbe_weights};
use crate::fragmenting::{DistanceScreening, FragmentedNuclei, Fragmenter, FragmenterParameters, FragmentWeights, NMers};
use crate::topology::{find_broken_bonds, BrokenBonds, ConnectivityTable, CovalentRadii, NuclearGraph, Partition};

/// Parameters of a full fragmentation pipeline.
#[derive(Debug, Clone)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PipelineParameters {
    /// How to compute the connectivity of the supersystem
    #[serde(default)]
    pub connectivity: CovalentRadii,
    /// How to group atoms into the nodes of the nuclear graph
    #[serde(default)]
    pub nodes: Partition,
    /// How to create fragments from the nuclear graph
    pub fragmenter: FragmenterParameters,
    /// If set, create n-mers of this order from the fragments, and use them
    /// instead of the fragments in the rest of the pipeline
    #[serde(default)]
    pub nmers: Option<usize>,
    /// Distance threshold (in Bohr) used to screen n-mers. By default, all
    /// n-mers are kept.
    #[serde(default)]
    pub screening: Option<f64>,
    /// How to cap the bonds broken by the subsystems
    #[serde(default)]
    pub capper: CapperParameters,
    /// Total charge of the supersystem
    #[serde(default)]
    pub charge: i32,
    /// Spin multiplicity of the supersystem
    #[serde(default = "default_multiplicity")]
    pub multiplicity: usize,
    /// Assign a neutral singlet state to all capped subsystems, failing if
    /// some of them have an odd number of electrons
    #[serde(default)]
    pub neutral_singlet: bool,
}

fn default_multiplicity() -> usize {
    1
}

/// All the data produced by `Pipeline::run`.
#[derive(Debug, Clone)]
pub struct Fragmentation {
    /// Atomic connectivity of the supersystem
    pub connectivity: ConnectivityTable,
    /// Nuclear graph of the supersystem
    pub graph: NuclearGraph,
    /// Fragments created from the nuclear graph
    pub fragments: FragmentedNuclei,
    /// N-mers of the fragments, if requested
    pub nmers: Option<NMers>,
    /// Fragments (or flattened n-mers), followed by all their intersections
    pub subsystems: FragmentedNuclei,
    /// GMBE weight of each subsystem
    pub weights: FragmentWeights,
    /// Bonds broken by each subsystem
    pub broken_bonds: Vec<BrokenBonds>,
    /// Capped subsystems
    pub capped: CappedFragments,
    /// Charge and multiplicity of each capped subsystem, if requested
    pub charges: Option<Vec<ChargeMultiplicity>>,
}

impl Fragmentation {
    /// Recombine per-subsystem `values` with the GMBE weights
    pub fn recombine(&self, values: &[f64]) -> Result<f64, Error> {
        self.weights.recombine(values)
    }
}

/// A full fragmentation pipeline: connectivity, nuclear graph, fragments,
/// optional n-mers, intersections, capping, charges and GMBE weights.
#[derive(Debug)]
pub struct Pipeline {
    parameters: PipelineParameters,
    fragmenter: Fragmenter,
    capper: Capper,
    screening: DistanceScreening,
}

impl Pipeline {
    /// Create a new pipeline with the given `parameters`
    pub fn new(parameters: PipelineParameters) -> Result<Pipeline, Error> {
        if parameters.multiplicity == 0 {
            return Err(Error::InvalidParameter(
                "multiplicity must be at least 1".into()
            ));
        }

        let screening = match parameters.screening {
            Some(threshold) => DistanceScreening::new(threshold)?,
            None => DistanceScreening::default(),
        };

        return Ok(Pipeline {
            fragmenter: Fragmenter::from(parameters.fragmenter.clone()),
            capper: Capper::from(parameters.capper.clone()),
            screening: screening,
            parameters: parameters,
        });
    }

    /// Create a new pipeline from JSON formatted parameters
    pub fn from_json(parameters: &str) -> Result<Pipeline, Error> {
        let parameters = serde_json::from_str(parameters)?;
        return Pipeline::new(parameters);
    }

    /// Get the parameters of this pipeline
    pub fn parameters(&self) -> &PipelineParameters {
        &self.parameters
    }

    /// Run the full pipeline on `molecule`. The charge and multiplicity of
    /// the molecule are replaced by the ones in the parameters.
    #[time_graph::instrument(name = "Pipeline::run")]
    pub fn run(&self, molecule: Molecule) -> Result<Fragmentation, Error> {
        let mut molecule = molecule;
        molecule.set_charge(self.parameters.charge);
        molecule.set_multiplicity(self.parameters.multiplicity);
        let molecule = Arc::new(molecule);

        let connectivity = self.parameters.connectivity.compute(&molecule)?;
        let graph = NuclearGraph::build(Arc::clone(&molecule), self.parameters.nodes, &connectivity)?;
        let fragments = self.fragmenter.fragment(&graph, &connectivity)?;

        let (nmers, top_level) = match self.parameters.nmers {
            Some(n) => {
                let nmers = self.screening.nmers(fragments.clone(), n)?;
                let flattened = nmers.flatten()?;
                (Some(nmers), flattened)
            }
            None => (None, fragments.clone()),
        };

        let subsystems = find_intersections(&top_level)?;
        let weights = gmbe_weights(&subsystems);

        let broken_bonds = find_broken_bonds(&subsystems, &connectivity)?;
        let capped = self.capper.cap(&subsystems, &broken_bonds, &connectivity)?;

        let charges = if self.parameters.neutral_singlet {
            Some(neutral_singlet(&capped)?)
        } else {
            None
        };

        info!(
            "{} fragmented {} atoms into {} fragments and {} subsystems",
            self.fragmenter.name(), molecule.size(), fragments.len(), subsystems.len()
        );

        return Ok(Fragmentation {
            connectivity,
            graph,
            fragments,
            nmers,
            subsystems,
            weights,
            broken_bonds,
            capped,
            charges,
        });
    }
}
