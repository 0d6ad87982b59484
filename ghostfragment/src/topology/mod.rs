//! Bonding topology of molecular systems: atomic connectivity from covalent
//! radii, graphs over pseudo-atoms, and bonds broken by fragmentation.

mod covalent_radius;
pub use self::covalent_radius::covalent_radius;

mod connectivity;
pub use self::connectivity::{ConnectivityTable, CovalentRadii};

mod nuclear_graph;
pub use self::nuclear_graph::{NuclearGraph, Partition};

mod broken_bonds;
pub use self::broken_bonds::{find_broken_bonds, BrokenBonds};
