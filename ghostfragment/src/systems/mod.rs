use crate::Vector3D;

mod chemfiles;
pub use self::chemfiles::read_from_file;

#[cfg(test)]
pub(crate) mod test_utils;

/// Mass of a hydrogen atom, in atomic units (electron masses)
pub const HYDROGEN_MASS: f64 = 1837.289;

/// A single nucleus, with its element, mass and Cartesian position (in Bohr).
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Nucleus {
    /// Chemical symbol of the element
    symbol: String,
    /// Atomic number of the element
    atomic_number: usize,
    /// Mass of the nucleus, in atomic units
    mass: f64,
    /// Cartesian position of the nucleus
    #[serde(default)]
    #[schemars(with = "[f64; 3]")]
    position: Vector3D,
}

impl Nucleus {
    /// Create a new nucleus from its `symbol`, `atomic_number`, `mass` and
    /// `position`
    pub fn new(symbol: impl Into<String>, atomic_number: usize, mass: f64, position: Vector3D) -> Nucleus {
        Nucleus {
            symbol: symbol.into(),
            atomic_number: atomic_number,
            mass: mass,
            position: position,
        }
    }

    /// Create a hydrogen nucleus at the given `position`
    pub fn hydrogen(position: Vector3D) -> Nucleus {
        Nucleus::new("H", 1, HYDROGEN_MASS, position)
    }

    /// Get the chemical symbol of this nucleus
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the atomic number (`Z`) of this nucleus
    pub fn atomic_number(&self) -> usize {
        self.atomic_number
    }

    /// Get the mass of this nucleus
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Get the position of this nucleus
    pub fn position(&self) -> Vector3D {
        self.position
    }

    /// Get a copy of this nucleus, moved to `position`
    #[must_use]
    pub fn with_position(&self, position: Vector3D) -> Nucleus {
        Nucleus {
            position: position,
            ..self.clone()
        }
    }

    /// Get the distance between this nucleus and `other`
    pub fn distance(&self, other: &Nucleus) -> f64 {
        self.position.distance(&other.position)
    }
}

impl Default for Nucleus {
    fn default() -> Nucleus {
        Nucleus::hydrogen(Vector3D::zero())
    }
}

/// An ordered collection of nuclei, together with the total charge and spin
/// multiplicity of the system.
///
/// This is the supersystem every fragment refers to: fragments store indexes
/// into `Molecule::nuclei()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    nuclei: Vec<Nucleus>,
    charge: i32,
    multiplicity: usize,
}

impl Default for Molecule {
    fn default() -> Molecule {
        Molecule::new()
    }
}

impl Molecule {
    /// Create a new empty, neutral, singlet molecule
    pub fn new() -> Molecule {
        Molecule {
            nuclei: Vec::new(),
            charge: 0,
            multiplicity: 1,
        }
    }

    /// Add a nucleus at the end of this molecule
    pub fn add_nucleus(&mut self, nucleus: Nucleus) {
        self.nuclei.push(nucleus);
    }

    /// Set the total charge of this molecule
    pub fn set_charge(&mut self, charge: i32) {
        self.charge = charge;
    }

    /// Set the spin multiplicity of this molecule
    pub fn set_multiplicity(&mut self, multiplicity: usize) {
        self.multiplicity = multiplicity;
    }

    /// Get the total charge of this molecule
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Get the spin multiplicity of this molecule
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// Get the number of nuclei in this molecule
    pub fn size(&self) -> usize {
        self.nuclei.len()
    }

    /// Is this molecule empty?
    pub fn is_empty(&self) -> bool {
        self.nuclei.is_empty()
    }

    /// Get all the nuclei in this molecule
    pub fn nuclei(&self) -> &[Nucleus] {
        &self.nuclei
    }

    /// Get the position of all nuclei in this molecule
    pub fn positions(&self) -> Vec<Vector3D> {
        self.nuclei.iter().map(|n| n.position()).collect()
    }
}

impl std::ops::Index<usize> for Molecule {
    type Output = Nucleus;

    fn index(&self, index: usize) -> &Nucleus {
        &self.nuclei[index]
    }
}

impl FromIterator<Nucleus> for Molecule {
    fn from_iter<T: IntoIterator<Item = Nucleus>>(iter: T) -> Molecule {
        let mut molecule = Molecule::new();
        for nucleus in iter {
            molecule.add_nucleus(nucleus);
        }
        return molecule;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_nuclei() {
        let mut molecule = Molecule::new();
        molecule.add_nucleus(Nucleus::new("O", 8, 29156.9, Vector3D::new(0.0, 0.0, 0.0)));
        molecule.add_nucleus(Nucleus::hydrogen(Vector3D::new(1.8, 0.0, 0.0)));

        assert_eq!(molecule.size(), 2);
        assert_eq!(molecule.charge(), 0);
        assert_eq!(molecule.multiplicity(), 1);

        assert_eq!(molecule[0].symbol(), "O");
        assert_eq!(molecule[1].atomic_number(), 1);
        assert_eq!(molecule[1].mass(), HYDROGEN_MASS);
        assert_eq!(molecule.positions(), [
            Vector3D::new(0.0, 0.0, 0.0),
            Vector3D::new(1.8, 0.0, 0.0),
        ]);
        assert_eq!(molecule[0].distance(&molecule[1]), 1.8);
    }

    #[test]
    fn moved_nucleus() {
        let nucleus = Nucleus::hydrogen(Vector3D::zero());
        let moved = nucleus.with_position(Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(moved.symbol(), "H");
        assert_eq!(moved.position(), Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(nucleus.position(), Vector3D::zero());
    }

    #[test]
    fn nucleus_from_json() {
        let nucleus: Nucleus = serde_json::from_str(
            r#"{"symbol": "F", "atomic_number": 9, "mass": 34631.97}"#
        ).unwrap();
        assert_eq!(nucleus.atomic_number(), 9);
        assert_eq!(nucleus.position(), Vector3D::zero());
    }
}
