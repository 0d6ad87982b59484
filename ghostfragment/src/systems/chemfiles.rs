use std::path::Path;

use super::Molecule;
use crate::Error;

#[cfg(feature = "chemfiles")]
impl From<chemfiles::Error> for Error {
    fn from(error: chemfiles::Error) -> Error {
        Error::Chemfiles(error.message)
    }
}

/// Conversion factor from Angstrom to Bohr
#[cfg(feature = "chemfiles")]
const ANGSTROM_TO_BOHR: f64 = 1.0 / 0.529177210903;
/// Conversion factor from Dalton to electron masses
#[cfg(feature = "chemfiles")]
const DALTON_TO_ELECTRON_MASS: f64 = 1822.888486;

/// Read all structures in the file at the given `path` using
/// [chemfiles](https://chemfiles.org/), and convert them to `Molecule`s.
///
/// Positions are converted from Angstrom to Bohr and masses from Dalton to
/// electron masses. All molecules are neutral singlets, use
/// `Molecule::set_charge` and `Molecule::set_multiplicity` to change this.
#[cfg(feature = "chemfiles")]
#[allow(clippy::needless_range_loop)]
pub fn read_from_file(path: impl AsRef<Path>) -> Result<Vec<Molecule>, Error> {
    use crate::{Nucleus, Vector3D};

    let mut molecules = Vec::new();

    let mut trajectory = chemfiles::Trajectory::open(path, 'r')?;
    let mut frame = chemfiles::Frame::new();

    for _ in 0..trajectory.nsteps() {
        trajectory.read(&mut frame)?;

        let positions = frame.positions();
        let mut molecule = Molecule::new();
        for i in 0..frame.size() {
            let atom = frame.atom(i);
            let position = Vector3D::from(positions[i]) * ANGSTROM_TO_BOHR;
            molecule.add_nucleus(Nucleus::new(
                atom.atomic_type(),
                atom.atomic_number() as usize,
                atom.mass() * DALTON_TO_ELECTRON_MASS,
                position,
            ));
        }

        molecules.push(molecule);
    }

    return Ok(molecules);
}

/// Read all structures in the file at the given `path` using
/// [chemfiles](https://chemfiles.org/), and convert them to `Molecule`s.
///
/// This function is only available with the `chemfiles` feature enabled.
#[cfg(not(feature = "chemfiles"))]
pub fn read_from_file(_: impl AsRef<Path>) -> Result<Vec<Molecule>, Error> {
    Err(Error::Chemfiles(
        "read_from_file is only available with the chemfiles feature enabled".into()
    ))
}
