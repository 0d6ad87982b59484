//! Capping of the bonds broken when creating fragments.
//!
//! For each broken bond `(anchor, removed)`, a cap nucleus (usually a
//! hydrogen atom) is placed along the bond vector, starting from the anchor.
//! The different cappers only differ in the position they give to the cap.

use crate::{Error, Molecule, Nucleus, Vector3D};
use crate::fragmenting::FragmentedNuclei;
use crate::topology::{BrokenBonds, ConnectivityTable};

mod capper;
pub use self::capper::{Capper, CapperParameters};

mod dclc;
pub use self::dclc::Dclc;

mod weighted_distance;
pub use self::weighted_distance::WeightedDistance;

mod single_atom;
pub use self::single_atom::SingleAtom;

/// A single cap, replacing nucleus `replaced` bonded to nucleus `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cap {
    /// Index of the nucleus inside the fragment
    pub anchor: usize,
    /// Index of the nucleus outside the fragment this cap replaces
    pub replaced: usize,
    /// The cap itself
    pub nucleus: Nucleus,
}

/// Fragments together with the caps of each fragment.
///
/// Caps are stored separately from the fragments: the nuclear indexes of a
/// fragment are not modified by capping.
#[derive(Debug, Clone, PartialEq)]
pub struct CappedFragments {
    fragments: FragmentedNuclei,
    caps: Vec<Vec<Cap>>,
}

impl CappedFragments {
    /// Associate `caps[i]` with the fragment at index `i`
    pub fn new(fragments: FragmentedNuclei, caps: Vec<Vec<Cap>>) -> Result<CappedFragments, Error> {
        if fragments.len() != caps.len() {
            return Err(Error::InvalidParameter(format!(
                "got {} sets of caps for {} fragments", caps.len(), fragments.len()
            )));
        }

        return Ok(CappedFragments { fragments, caps });
    }

    /// Get the fragments, without the caps
    pub fn fragments(&self) -> &FragmentedNuclei {
        &self.fragments
    }

    /// Get the supersystem of the fragments
    pub fn supersystem(&self) -> &Molecule {
        self.fragments.supersystem()
    }

    /// Get the number of fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Are there no fragments?
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the caps of the fragment at `index`
    pub fn caps(&self, index: usize) -> &[Cap] {
        &self.caps[index]
    }

    /// Get the total number of caps in all fragments
    pub fn ncaps(&self) -> usize {
        self.caps.iter().map(Vec::len).sum()
    }

    /// Get the fragment at `index` and its caps as a standalone molecule.
    /// Caps are placed after the nuclei of the fragment.
    pub fn molecule(&self, index: usize) -> Option<Molecule> {
        let mut molecule = self.fragments.molecule(index)?;
        for cap in &self.caps[index] {
            molecule.add_nucleus(cap.nucleus.clone());
        }
        return Some(molecule);
    }
}

/// Common interface to all the strategies placing caps on broken bonds.
pub trait CapperBase: std::fmt::Debug + Send + Sync {
    /// Get the name of this capper
    fn name(&self) -> String;

    /// Get the parameters used to create this capper as a JSON string
    fn parameters(&self) -> String;

    /// Cap all the `broken_bonds` of the `fragments`, where `broken_bonds[i]`
    /// contains the bonds broken by fragment `i`. The atomic `connectivity`
    /// of the supersystem is also available for cappers that need it.
    fn cap(
        &self,
        fragments: &FragmentedNuclei,
        broken_bonds: &[BrokenBonds],
        connectivity: &ConnectivityTable,
    ) -> Result<CappedFragments, Error>;
}

/// Check that the inputs of a capper are consistent with each other
fn check_inputs(fragments: &FragmentedNuclei, broken_bonds: &[BrokenBonds], connectivity: &ConnectivityTable) -> Result<(), Error> {
    if broken_bonds.len() != fragments.len() {
        return Err(Error::InvalidParameter(format!(
            "got {} sets of broken bonds for {} fragments", broken_bonds.len(), fragments.len()
        )));
    }

    let natoms = fragments.supersystem().size();
    if connectivity.natoms() != natoms {
        return Err(Error::InvalidParameter(format!(
            "the connectivity is defined for {} atoms, but the supersystem contains {} atoms",
            connectivity.natoms(), natoms
        )));
    }

    for &(anchor, removed) in broken_bonds.iter().flatten() {
        if anchor >= natoms || removed >= natoms {
            return Err(Error::InvalidParameter(format!(
                "broken bond {}-{} is out of bounds for a supersystem with {} nuclei",
                anchor, removed, natoms
            )));
        }
    }

    return Ok(());
}

/// Get the vector going from `anchor` to `removed`
fn bond_vector(molecule: &Molecule, anchor: usize, removed: usize) -> Result<Vector3D, Error> {
    let vector = molecule[removed].position() - molecule[anchor].position();
    if vector.norm2() == 0.0 {
        return Err(Error::InvalidParameter(format!(
            "nuclei {} and {} are at the same position, can not place a cap between them",
            anchor, removed
        )));
    }
    return Ok(vector);
}

/// Create caps for all broken bonds, using `position` to get the position of
/// a cap from the anchor and removed nuclei indexes.
fn place_caps<F>(
    fragments: &FragmentedNuclei,
    broken_bonds: &[BrokenBonds],
    template: &Nucleus,
    mut position: F,
) -> Result<CappedFragments, Error> where F: FnMut(usize, usize) -> Result<Vector3D, Error> {
    let mut caps = Vec::with_capacity(fragments.len());
    for bonds in broken_bonds {
        let mut fragment_caps = Vec::with_capacity(bonds.len());
        for &(anchor, removed) in bonds {
            fragment_caps.push(Cap {
                anchor: anchor,
                replaced: removed,
                nucleus: template.with_position(position(anchor, removed)?),
            });
        }
        caps.push(fragment_caps);
    }

    return CappedFragments::new(fragments.clone(), caps);
}
