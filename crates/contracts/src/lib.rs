//! Access to compiled contract artifacts.
//!
//! Contracts are compiled outside of this repository (e.g. by Hardhat) and
//! the resulting JSON artifacts are looked up by contract name at runtime.

mod artifact;
mod registry;

pub use {
    artifact::{Artifact, ArtifactError},
    registry::{ArtifactRegistry, DEFAULT_ARTIFACTS_DIR},
};
