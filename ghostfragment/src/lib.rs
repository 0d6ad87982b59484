#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_sign_loss)]
#![allow(clippy::default_trait_access)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Fragment-based decomposition of molecular systems.
//!
//! This crate breaks a molecular supersystem into (possibly overlapping)
//! fragments, builds n-mers and intersections out of them, caps the covalent
//! bonds broken in the process, and computes the generalized many-body
//! expansion weights used to recombine per-subsystem properties.
//!
//! All collections produced here reference the original supersystem by atom
//! index; the electronic structure calculations themselves are left to the
//! caller.

pub mod types;
pub use types::Vector3D;

mod errors;
pub use self::errors::Error;

pub mod systems;
pub use systems::{Molecule, Nucleus};

pub mod topology;
pub use topology::{ConnectivityTable, NuclearGraph};

pub mod fragmenting;
pub use fragmenting::{FragmentedNuclei, Fragmenter, NMers, FragmentWeights};

pub mod capping;
pub use capping::{Capper, CappedFragments};

pub mod charges;

mod pipeline;
pub use pipeline::{Pipeline, PipelineParameters, Fragmentation};
