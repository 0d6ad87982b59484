use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::{Error, Molecule};

/// A collection of fragments of a single supersystem.
///
/// Each fragment is a set of indexes of nuclei in the supersystem. Fragments
/// can overlap, but a given set of nuclei is only stored once: inserting the
/// same fragment twice returns the index of the first insertion. Fragments
/// keep the order in which they were inserted.
#[derive(Debug, Clone)]
pub struct FragmentedNuclei {
    supersystem: Arc<Molecule>,
    fragments: IndexSet<BTreeSet<usize>>,
}

impl FragmentedNuclei {
    /// Create an empty set of fragments for the given `supersystem`
    pub fn new(supersystem: Arc<Molecule>) -> FragmentedNuclei {
        FragmentedNuclei {
            supersystem: supersystem,
            fragments: IndexSet::new(),
        }
    }

    /// Get the supersystem these fragments refer to
    pub fn supersystem(&self) -> &Arc<Molecule> {
        &self.supersystem
    }

    /// Add a new fragment containing the nuclei with the given `indexes`,
    /// and get the position of this fragment in the collection.
    ///
    /// If an identical fragment already exists, nothing is added and the
    /// position of the existing fragment is returned.
    pub fn insert(&mut self, indexes: impl IntoIterator<Item = usize>) -> Result<usize, Error> {
        let fragment = indexes.into_iter().collect::<BTreeSet<_>>();
        self.insert_set(fragment)
    }

    pub(crate) fn insert_set(&mut self, fragment: BTreeSet<usize>) -> Result<usize, Error> {
        let size = self.supersystem.size();
        match fragment.last() {
            None => {
                return Err(Error::InvalidParameter("fragments can not be empty".into()));
            }
            Some(&last) if last >= size => {
                return Err(Error::InvalidParameter(format!(
                    "nucleus index {} is out of bounds for a supersystem with {} nuclei",
                    last, size
                )));
            }
            Some(_) => {}
        }

        let (position, _) = self.fragments.insert_full(fragment);
        return Ok(position);
    }

    /// Get the number of fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Is this collection of fragments empty?
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the nuclear indexes of the fragment at `index`, if any
    pub fn get(&self, index: usize) -> Option<&BTreeSet<usize>> {
        self.fragments.get_index(index)
    }

    /// Get the position of the given `fragment` in this collection, if it
    /// was inserted before
    pub fn position(&self, fragment: &BTreeSet<usize>) -> Option<usize> {
        self.fragments.get_index_of(fragment)
    }

    /// Iterate over the nuclear indexes of all fragments
    pub fn iter(&self) -> indexmap::set::Iter<'_, BTreeSet<usize>> {
        self.fragments.iter()
    }

    /// Extract the fragment at `index` as a standalone molecule. The charge
    /// and multiplicity of the result are the default ones.
    pub fn molecule(&self, index: usize) -> Option<Molecule> {
        let fragment = self.get(index)?;
        let molecule = fragment.iter()
            .map(|&i| self.supersystem[i].clone())
            .collect();
        return Some(molecule);
    }
}

impl std::ops::Index<usize> for FragmentedNuclei {
    type Output = BTreeSet<usize>;

    fn index(&self, index: usize) -> &BTreeSet<usize> {
        &self.fragments[index]
    }
}

impl<'a> IntoIterator for &'a FragmentedNuclei {
    type Item = &'a BTreeSet<usize>;
    type IntoIter = indexmap::set::Iter<'a, BTreeSet<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for FragmentedNuclei {
    fn eq(&self, other: &FragmentedNuclei) -> bool {
        // the order of fragments matters, which is not the case for IndexSet
        // equality
        self.supersystem == other.supersystem && self.iter().eq(other.iter())
    }
}
