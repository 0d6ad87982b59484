//! Assignment of charges and spin multiplicities to capped fragments.

use log::debug;

use crate::Error;
use crate::capping::CappedFragments;

/// Charge and spin multiplicity of a single (capped) fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct ChargeMultiplicity {
    /// Total charge of the fragment, in units of the elementary charge
    pub charge: i32,
    /// Spin multiplicity `2S + 1` of the fragment
    pub multiplicity: usize,
}

impl Default for ChargeMultiplicity {
    fn default() -> ChargeMultiplicity {
        ChargeMultiplicity { charge: 0, multiplicity: 1 }
    }
}

/// Get the number of electrons in the neutral fragment at `index`, including
/// the electrons of the caps.
pub fn electrons(capped: &CappedFragments, index: usize) -> usize {
    let supersystem = capped.supersystem();
    let fragment: usize = capped.fragments()[index].iter()
        .map(|&i| supersystem[i].atomic_number())
        .sum();
    let caps: usize = capped.caps(index).iter()
        .map(|cap| cap.nucleus.atomic_number())
        .sum();
    return fragment + caps;
}

/// Make every capped fragment a neutral singlet.
///
/// This fails if any of the fragments has an odd number of electrons, since
/// it can not be a singlet when neutral.
pub fn neutral_singlet(capped: &CappedFragments) -> Result<Vec<ChargeMultiplicity>, Error> {
    let mut result = Vec::with_capacity(capped.len());
    for index in 0..capped.len() {
        let electrons = electrons(capped, index);
        if electrons % 2 == 1 {
            return Err(Error::InvalidParameter(format!(
                "fragment {} has an odd number of electrons ({}) and can not be a neutral singlet",
                index, electrons
            )));
        }
        result.push(ChargeMultiplicity::default());
    }

    debug!("assigned neutral singlet state to {} fragments", result.len());
    return Ok(result);
}
