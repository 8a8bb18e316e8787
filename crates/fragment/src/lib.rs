//! Implementor fragments: the data one generated file contributes for one
//! trait, and the loader that hands it to the trait's registry.
//!
//! # Loading paths
//!
//! - [`FragmentLoader`] wraps a fragment read at runtime (see [`format`]).
//! - [`fragment!`] embeds a fragment at build time; [`load_registered`] runs
//!   every embedded fragment. Link order decides the order they run in, which
//!   the registry does not depend on.

pub mod format;
mod loader;
mod model;
mod recording;

pub use implementors_bridge::{AttachReport, Intake, Registry, RegistrySet, RegistryStats, Submission, TraitPath};
pub use loader::{FragmentDef, FragmentLoader, load_registered};
pub use model::{FragmentPayload, ImplementorEntry, PackageImplementors};
pub use recording::RecordingIntake;

#[doc(hidden)]
pub use inventory;

/// Registry for one trait's fragments.
pub type ImplementorRegistry = Registry<FragmentPayload>;

/// Registries for all traits in a session.
pub type ImplementorRegistries = RegistrySet<FragmentPayload>;
