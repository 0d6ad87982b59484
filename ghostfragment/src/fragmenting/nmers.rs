use std::collections::BTreeSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, warn};

use crate::Error;

use super::FragmentedNuclei;

/// Combinations of `n` base fragments, and the nuclei they contain.
///
/// Each n-mer is stored as the set of indexes of the base fragments it
/// contains. Two combinations of fragments containing the same nuclei are
/// only stored once, and for `n > 1`, n-mers whose nuclei are a subset of the
/// nuclei of another n-mer are removed.
#[derive(Debug, Clone)]
pub struct NMers {
    fragments: FragmentedNuclei,
    order: usize,
    nmers: Vec<BTreeSet<usize>>,
}

impl NMers {
    /// Create all the `n`-mers of the given base `fragments`.
    ///
    /// For `n == 1`, the n-mers are the base fragments themselves, even if
    /// some of them are subsets of others.
    ///
    /// # Errors
    ///
    /// This function fails if `n` is larger than the number of fragments.
    #[time_graph::instrument(name = "NMers::new")]
    pub fn new(fragments: FragmentedNuclei, n: usize) -> Result<NMers, Error> {
        NMers::check_order(&fragments, n)?;

        let nfragments = fragments.len();
        return match n {
            0 => {
                warn!("0-mers were requested, no n-mer will be created");
                Ok(NMers { fragments, order: 0, nmers: Vec::new() })
            }
            1 => {
                let nmers = (0..nfragments).map(|i| BTreeSet::from([i])).collect();
                Ok(NMers { fragments, order: 1, nmers })
            }
            _ => {
                let combinations = Combinations::new(nfragments, n)
                    .map(|combination| combination.into_iter().collect());
                Ok(NMers::from_combinations(fragments, n, combinations))
            }
        };
    }

    pub(crate) fn check_order(fragments: &FragmentedNuclei, n: usize) -> Result<(), Error> {
        if n > fragments.len() {
            return Err(Error::InvalidParameter(format!(
                "can not make {}-mers with only {} fragments", n, fragments.len()
            )));
        }
        return Ok(());
    }

    /// Create n-mers from the given combinations of fragment indexes,
    /// removing duplicated nuclei sets and n-mers contained in other n-mers.
    pub(crate) fn from_combinations(
        fragments: FragmentedNuclei,
        n: usize,
        combinations: impl Iterator<Item = BTreeSet<usize>>,
    ) -> NMers {
        let mut unique = IndexMap::new();
        let mut ncandidates = 0;
        for combination in combinations {
            ncandidates += 1;
            let mut nuclei = BTreeSet::new();
            for &fragment in &combination {
                nuclei.extend(&fragments[fragment]);
            }

            // keep the first combination giving a set of nuclei
            if let Entry::Vacant(entry) = unique.entry(nuclei) {
                entry.insert(combination);
            }
        }

        let (nuclei, combinations): (Vec<_>, Vec<_>) = unique.into_iter().unzip();
        let dominated = super::dominated_sets(&nuclei);
        let nmers = combinations.into_iter()
            .zip(dominated)
            .filter_map(|(combination, dominated)| (!dominated).then_some(combination))
            .collect::<Vec<_>>();

        debug!(
            "created {} {}-mers from {} combinations ({} unique)",
            nmers.len(), n, ncandidates, nuclei.len()
        );

        return NMers {
            fragments: fragments,
            order: n,
            nmers: nmers,
        };
    }

    /// Get the base fragments of these n-mers
    pub fn fragments(&self) -> &FragmentedNuclei {
        &self.fragments
    }

    /// Get the number of fragments combined in each n-mer
    pub fn order(&self) -> usize {
        self.order
    }

    /// Get the number of n-mers
    pub fn len(&self) -> usize {
        self.nmers.len()
    }

    /// Are there no n-mers?
    pub fn is_empty(&self) -> bool {
        self.nmers.is_empty()
    }

    /// Get the fragment indexes of the n-mer at `index`, if any
    pub fn get(&self, index: usize) -> Option<&BTreeSet<usize>> {
        self.nmers.get(index)
    }

    /// Iterate over the fragment indexes of all n-mers
    pub fn iter(&self) -> std::slice::Iter<'_, BTreeSet<usize>> {
        self.nmers.iter()
    }

    /// Get the indexes of all nuclei in the n-mer at `index`
    pub fn nuclear_indices(&self, index: usize) -> BTreeSet<usize> {
        let mut nuclei = BTreeSet::new();
        for &fragment in &self.nmers[index] {
            nuclei.extend(&self.fragments[fragment]);
        }
        return nuclei;
    }

    /// Express each n-mer as a fragment of the supersystem. The fragment at
    /// index `i` in the output corresponds to the n-mer at index `i`.
    pub fn flatten(&self) -> Result<FragmentedNuclei, Error> {
        let mut flattened = FragmentedNuclei::new(self.fragments.supersystem().clone());
        for index in 0..self.len() {
            flattened.insert_set(self.nuclear_indices(index))?;
        }
        debug_assert_eq!(flattened.len(), self.len());
        return Ok(flattened);
    }
}

impl std::ops::Index<usize> for NMers {
    type Output = BTreeSet<usize>;

    fn index(&self, index: usize) -> &BTreeSet<usize> {
        &self.nmers[index]
    }
}

impl<'a> IntoIterator for &'a NMers {
    type Item = &'a BTreeSet<usize>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all the combinations of `k` indexes in `0..n`, in
/// lexicographic order.
pub(crate) struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Combinations {
        Combinations {
            n: n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();

        // find the right-most index that can still be incremented
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        return Some(current);
    }
}
