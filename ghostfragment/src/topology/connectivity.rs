use std::collections::BTreeSet;

use log::debug;

use crate::{Error, Molecule};
use super::covalent_radius;

/// Symmetric bonding relation between the atoms of a system.
///
/// Atoms are identified by their index in `0..natoms`. A pair of atoms is
/// either bonded or not, and atoms are never bonded to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityTable {
    /// `bonded[i]` contains all the atoms bonded to atom `i`
    bonded: Vec<BTreeSet<usize>>,
    /// Number of unique bonds
    nbonds: usize,
}

impl ConnectivityTable {
    /// Create a new connectivity table for `natoms` atoms, without any bonds
    pub fn new(natoms: usize) -> ConnectivityTable {
        ConnectivityTable {
            bonded: vec![BTreeSet::new(); natoms],
            nbonds: 0,
        }
    }

    /// Create a connectivity table for `natoms` atoms, containing all the
    /// given `bonds`
    pub fn with_bonds(natoms: usize, bonds: impl IntoIterator<Item = (usize, usize)>) -> Result<ConnectivityTable, Error> {
        let mut table = ConnectivityTable::new(natoms);
        for (i, j) in bonds {
            table.add_bond(i, j)?;
        }
        return Ok(table);
    }

    /// Get the number of atoms in this table
    pub fn natoms(&self) -> usize {
        self.bonded.len()
    }

    /// Get the number of bonds in this table
    pub fn nbonds(&self) -> usize {
        self.nbonds
    }

    /// Mark atoms `i` and `j` as bonded. Adding the same bond multiple times
    /// is not an error.
    pub fn add_bond(&mut self, i: usize, j: usize) -> Result<(), Error> {
        if i == j {
            return Err(Error::InvalidParameter(format!(
                "atom {} can not be bonded to itself", i
            )));
        }

        let natoms = self.natoms();
        if i >= natoms || j >= natoms {
            return Err(Error::InvalidParameter(format!(
                "bond {}-{} is out of bounds for a system with {} atoms", i, j, natoms
            )));
        }

        if self.bonded[i].insert(j) {
            self.bonded[j].insert(i);
            self.nbonds += 1;
        }

        Ok(())
    }

    /// Are atoms `i` and `j` bonded?
    pub fn are_bonded(&self, i: usize, j: usize) -> bool {
        self.bonded.get(i).map_or(false, |bonded| bonded.contains(&j))
    }

    /// Get the set of atoms bonded to atom `i`.
    ///
    /// # Panics
    ///
    /// If `i` is not smaller than `self.natoms()`.
    pub fn bonded_atoms(&self, i: usize) -> &BTreeSet<usize> {
        &self.bonded[i]
    }

    /// Iterate over all the bonds `(i, j)` in this table, with `i < j`
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bonded.iter().enumerate().flat_map(|(i, bonded)| {
            bonded.range((i + 1)..).map(move |&j| (i, j))
        })
    }
}

/// Connectivity from covalent radii.
///
/// Atoms `i` and `j`, separated by a distance `r_ij` are considered bonded if
/// `r_ij <= (1 + tau) * (sigma_i + sigma_j)`, where `sigma_i` is the covalent
/// radius of atom `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CovalentRadii {
    /// How much larger than the sum of covalent radii can the distance
    /// between two atoms be for them to be considered bonded, as a ratio.
    #[serde(default = "CovalentRadii::default_tau")]
    pub tau: f64,
}

impl Default for CovalentRadii {
    fn default() -> CovalentRadii {
        CovalentRadii { tau: CovalentRadii::default_tau() }
    }
}

impl CovalentRadii {
    fn default_tau() -> f64 {
        0.10
    }

    /// Compute the connectivity of the given `molecule`.
    ///
    /// This fails if any of the atoms does not have a tabulated covalent
    /// radius.
    #[time_graph::instrument(name = "CovalentRadii::compute")]
    pub fn compute(&self, molecule: &Molecule) -> Result<ConnectivityTable, Error> {
        if !self.tau.is_finite() || self.tau <= -1.0 {
            return Err(Error::InvalidParameter(format!(
                "tau must be a finite number larger than -1, got {}", self.tau
            )));
        }

        let radii = molecule.nuclei().iter()
            .map(|nucleus| covalent_radius(nucleus.atomic_number()))
            .collect::<Result<Vec<_>, _>>()?;

        let scale = 1.0 + self.tau;
        let natoms = molecule.size();
        let mut table = ConnectivityTable::new(natoms);
        for i in 0..natoms {
            for j in (i + 1)..natoms {
                let distance = molecule[i].distance(&molecule[j]);
                if distance <= scale * (radii[i] + radii[j]) {
                    table.add_bond(i, j)?;
                }
            }
        }

        debug!("found {} bonds between {} atoms", table.nbonds(), natoms);
        return Ok(table);
    }
}
