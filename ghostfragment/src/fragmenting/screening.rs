use std::collections::BTreeSet;

use log::{debug, warn};
use ndarray::{Array2, Axis};
use ndarray::parallel::prelude::*;

use crate::Error;

use super::{FragmentedNuclei, NMers};

/// Distance based screening of n-mers.
///
/// Two fragments form a surviving pair if the minimal distance between any of
/// their nuclei is at most `threshold`. Larger n-mers survive if they can be
/// built by adding a surviving pair to a surviving n-mer of lower order, with
/// exactly one of the pair's fragments already in the n-mer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceScreening {
    threshold: f64,
}

impl Default for DistanceScreening {
    fn default() -> DistanceScreening {
        DistanceScreening { threshold: f64::INFINITY }
    }
}

impl DistanceScreening {
    /// Create a new screening with the given distance `threshold`, in Bohr
    pub fn new(threshold: f64) -> Result<DistanceScreening, Error> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "screening threshold must be a positive number, got {}", threshold
            )));
        }
        return Ok(DistanceScreening { threshold });
    }

    /// Get the distance threshold of this screening
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Create the n-mers of `fragments` which survive this screening.
    ///
    /// Fragments which could not be grown to `n`-mers are kept as lower order
    /// n-mers, unless they are contained in another surviving n-mer. Without
    /// threshold, this gives the same result as `NMers::new`.
    #[time_graph::instrument(name = "DistanceScreening::nmers")]
    pub fn nmers(&self, fragments: FragmentedNuclei, n: usize) -> Result<NMers, Error> {
        NMers::check_order(&fragments, n)?;
        if n < 2 {
            return NMers::new(fragments, n);
        }

        let distances = minimum_distances(&fragments);
        let nfragments = fragments.len();

        let mut pairs = Vec::new();
        for i in 0..nfragments {
            for j in (i + 1)..nfragments {
                if distances[[i, j]] <= self.threshold {
                    pairs.push(BTreeSet::from([i, j]));
                }
            }
        }

        if pairs.is_empty() {
            warn!(
                "no pair of fragments is closer than {} Bohr, only monomers survive the screening",
                self.threshold
            );
        }

        let mut levels = vec![pairs.iter().cloned().collect::<BTreeSet<_>>()];
        for _ in 3..=n {
            let mut next = BTreeSet::new();
            if let Some(previous) = levels.last() {
                for mmer in previous {
                    for pair in &pairs {
                        if pair.intersection(mmer).count() == 1 {
                            next.insert(mmer.union(pair).copied().collect::<BTreeSet<_>>());
                        }
                    }
                }
            }
            levels.push(next);
        }

        debug!(
            "{} fragment pairs survived screening with threshold {}, {} {}-mers",
            pairs.len(), self.threshold, levels.last().map_or(0, BTreeSet::len), n
        );

        // highest order first, lower orders are pruned if they are contained
        // in a surviving larger n-mer
        let monomers = (0..nfragments).map(|i| BTreeSet::from([i]));
        let candidates = levels.into_iter().rev().flatten().chain(monomers);
        return Ok(NMers::from_combinations(fragments, n, candidates));
    }
}

/// Compute the minimal distance between nuclei of all pairs of `fragments`.
/// The diagonal of the resulting matrix is zero.
pub fn minimum_distances(fragments: &FragmentedNuclei) -> Array2<f64> {
    let molecule = fragments.supersystem();
    let nfragments = fragments.len();

    let mut distances = Array2::zeros((nfragments, nfragments));
    distances.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            for j in 0..nfragments {
                if i == j {
                    continue;
                }

                let mut minimum = f64::INFINITY;
                for &a in &fragments[i] {
                    for &b in &fragments[j] {
                        minimum = f64::min(minimum, molecule[a].distance(&molecule[b]));
                    }
                }
                row[j] = minimum;
            }
        });

    return distances;
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::systems::test_utils::water_fragments;
    use super::*;

    fn collect(nmers: &NMers) -> Vec<Vec<usize>> {
        nmers.iter().map(|nmer| nmer.iter().copied().collect()).collect()
    }

    #[test]
    fn distances() {
        let distances = minimum_distances(&water_fragments(3));
        assert_eq!(distances.shape(), [3, 3]);
        assert_eq!(distances[[1, 1]], 0.0);
        assert_relative_eq!(distances[[0, 1]], 3.0, max_relative = 1e-12);
        assert_relative_eq!(distances[[1, 0]], 3.0, max_relative = 1e-12);
        assert_relative_eq!(distances[[0, 2]], 6.0, max_relative = 1e-12);
    }

    #[test]
    fn without_threshold() {
        let screened = DistanceScreening::default().nmers(water_fragments(4), 3).unwrap();
        let all = NMers::new(water_fragments(4), 3).unwrap();
        assert_eq!(collect(&screened), collect(&all));
    }

    #[test]
    fn neighboring_water() {
        let screening = DistanceScreening::new(4.0).unwrap();

        let dimers = screening.nmers(water_fragments(4), 2).unwrap();
        assert_eq!(collect(&dimers), [[0, 1], [1, 2], [2, 3]]);

        let trimers = screening.nmers(water_fragments(4), 3).unwrap();
        assert_eq!(collect(&trimers), [[0, 1, 2], [1, 2, 3]]);

        let tetramers = screening.nmers(water_fragments(4), 4).unwrap();
        assert_eq!(collect(&tetramers), [[0, 1, 2, 3]]);
    }

    #[test]
    fn everything_screened() {
        let screening = DistanceScreening::new(1.0).unwrap();
        let nmers = screening.nmers(water_fragments(3), 2).unwrap();
        assert_eq!(collect(&nmers), [[0], [1], [2]]);

        let error = screening.nmers(water_fragments(3), 4).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: can not make 4-mers with only 3 fragments");
    }

    #[test]
    fn invalid_threshold() {
        assert!(DistanceScreening::new(-1.0).is_err());
        assert!(DistanceScreening::new(f64::NAN).is_err());
        assert!(DistanceScreening::new(0.0).is_ok());
    }
}
