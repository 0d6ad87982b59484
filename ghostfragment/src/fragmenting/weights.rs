use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;

use crate::Error;

use super::FragmentedNuclei;

/// Coefficients of the subsystems in a many-body expansion, in the same order
/// as the subsystems.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentWeights {
    weights: Vec<f64>,
}

impl FragmentWeights {
    /// Create weights from their values
    pub fn new(weights: Vec<f64>) -> FragmentWeights {
        FragmentWeights { weights }
    }

    /// Get the number of weights
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Are there no weights?
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Get all weights as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Iterate over all weights
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.weights.iter()
    }

    /// Combine per-subsystem `values` (energies, or any other extensive
    /// property) into the value for the full system, as `sum_i w_i v_i`.
    pub fn recombine(&self, values: &[f64]) -> Result<f64, Error> {
        if values.len() != self.weights.len() {
            return Err(Error::InvalidParameter(format!(
                "expected {} values to recombine, got {}",
                self.weights.len(), values.len()
            )));
        }

        return Ok(self.weights.iter().zip(values).map(|(w, v)| w * v).sum());
    }
}

impl std::ops::Index<usize> for FragmentWeights {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.weights[index]
    }
}

/// Compute the generalized many-body expansion weights of all `subsystems`.
///
/// The subsystems should already contain all their intersections (see
/// `find_intersections`). The weight of each subsystem is one minus the sum
/// of the weights of all its strict supersets. Subsystems are processed from
/// the largest to the smallest, so the weights of supersets are always known.
#[time_graph::instrument(name = "gmbe_weights")]
pub fn gmbe_weights(subsystems: &FragmentedNuclei) -> FragmentWeights {
    let mut by_size = BTreeMap::<usize, Vec<usize>>::new();
    for (i, subsystem) in subsystems.iter().enumerate() {
        by_size.entry(subsystem.len()).or_default().push(i);
    }

    let mut weights = vec![0.0; subsystems.len()];
    // all the subsystems larger than the ones currently processed
    let mut larger: Vec<usize> = Vec::new();
    for (_, group) in by_size.into_iter().rev() {
        // subsystems of the same size can not contain each other
        let group_weights = group.par_iter()
            .map(|&i| {
                let subset = &subsystems[i];
                let mut weight = 1.0;
                for &j in &larger {
                    if subset.is_subset(&subsystems[j]) {
                        weight -= weights[j];
                    }
                }
                weight
            })
            .collect::<Vec<_>>();

        for (&i, weight) in group.iter().zip(group_weights) {
            weights[i] = weight;
        }
        larger.extend(group);
    }

    debug!("computed GMBE weights for {} subsystems", subsystems.len());
    return FragmentWeights::new(weights);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use crate::systems::test_utils::{hydrogen_line, water_fragments};
    use crate::fragmenting::find_intersections;
    use super::*;

    fn subsystems(sets: &[&[usize]]) -> FragmentedNuclei {
        let mut fragments = FragmentedNuclei::new(Arc::new(hydrogen_line(8)));
        for set in sets {
            fragments.insert(set.iter().copied()).unwrap();
        }
        return find_intersections(&fragments).unwrap();
    }

    #[test]
    fn disjoint() {
        let weights = gmbe_weights(&water_fragments(3));
        assert_eq!(weights.as_slice(), [1.0, 1.0, 1.0]);

        let weights = gmbe_weights(&subsystems(&[]));
        assert!(weights.is_empty());
    }

    #[test]
    fn two_overlapping_fragments() {
        let subsystems = subsystems(&[&[0, 1, 2], &[2, 3]]);
        assert_eq!(subsystems.len(), 3);

        let weights = gmbe_weights(&subsystems);
        assert_eq!(weights.as_slice(), [1.0, 1.0, -1.0]);
    }

    #[test]
    fn nested_intersections() {
        // subsystems are the fragments, then {2, 3}, {3}, {3, 4, 5}
        let subsystems = subsystems(&[&[0, 1, 2, 3], &[2, 3, 4, 5], &[3, 4, 5, 6]]);
        assert_eq!(subsystems.len(), 6);

        let weights = gmbe_weights(&subsystems);
        assert_eq!(weights.as_slice(), [1.0, 1.0, 1.0, -1.0, 0.0, -1.0]);
    }

    #[test]
    fn atom_count() {
        let cases: &[&[&[usize]]] = &[
            &[&[0, 1, 2, 3, 4], &[4, 5, 6, 7]],
            &[&[0, 1, 2, 3], &[2, 3, 4, 5], &[3, 4, 5, 6], &[6, 7]],
            &[&[0, 1, 2, 3], &[2, 3, 4], &[2, 4, 5, 6], &[2, 6, 7]],
            &[&[0, 1, 2], &[1, 2, 3], &[2, 3, 4], &[3, 4, 5], &[4, 5, 6], &[5, 6, 7]],
        ];

        for fragments in cases {
            let subsystems = subsystems(fragments);
            let sizes = subsystems.iter().map(|s| s.len() as f64).collect::<Vec<_>>();

            let weights = gmbe_weights(&subsystems);
            assert_relative_eq!(weights.recombine(&sizes).unwrap(), 8.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn recombine() {
        let weights = FragmentWeights::new(vec![1.0, 1.0, -1.0]);
        assert_eq!(weights.len(), 3);
        assert_eq!(weights[2], -1.0);
        assert_eq!(weights.recombine(&[2.0, 3.0, 0.5]).unwrap(), 4.5);

        let error = weights.recombine(&[1.0]).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected 3 values to recombine, got 1");
    }
}
