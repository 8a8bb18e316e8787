//! Fragment loaders.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{FragmentPayload, ImplementorRegistries, ImplementorRegistry, PackageImplementors, Submission, TraitPath};

/// One fragment ready to be handed to its trait's registry.
///
/// Consumed by [`FragmentLoader::load`], so a fragment is submitted once.
#[derive(Debug, Clone)]
pub struct FragmentLoader {
	trait_path: TraitPath,
	implementors: PackageImplementors,
	origin: Option<Arc<str>>,
}

impl FragmentLoader {
	pub fn new(trait_path: impl Into<TraitPath>, implementors: PackageImplementors) -> Self {
		Self {
			trait_path: trait_path.into(),
			implementors,
			origin: None,
		}
	}

	pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
		self.origin = Some(origin.into());
		self
	}

	pub fn trait_path(&self) -> &TraitPath {
		&self.trait_path
	}

	pub fn implementors(&self) -> &PackageImplementors {
		&self.implementors
	}

	pub fn origin(&self) -> Option<&str> {
		self.origin.as_deref()
	}

	/// Submits this fragment to its trait's registry in `registries`, creating
	/// that registry if this is the first fragment for the trait.
	pub fn load(self, registries: &ImplementorRegistries) -> Submission {
		let registry = registries.get_or_create(&self.trait_path);
		self.load_into(&registry)
	}

	/// Submits this fragment to a registry the caller already resolved.
	pub fn load_into(self, registry: &ImplementorRegistry) -> Submission {
		let packages = self.implementors.len();
		let mut payload = FragmentPayload::new(self.implementors);
		if let Some(origin) = self.origin {
			payload = payload.with_origin(origin);
		}

		let submission = registry.submit(payload);
		trace!(trait_path = %self.trait_path, packages, ?submission, "fragment loaded");
		submission
	}
}

/// A fragment embedded at build time through [`fragment!`](crate::fragment).
pub struct FragmentDef {
	pub trait_path: &'static str,
	pub packages: &'static [(&'static str, &'static [&'static str])],
}

inventory::collect!(FragmentDef);

impl FragmentDef {
	pub const fn new(trait_path: &'static str, packages: &'static [(&'static str, &'static [&'static str])]) -> Self {
		Self { trait_path, packages }
	}

	pub fn loader(&self) -> FragmentLoader {
		let implementors = self.packages.iter().map(|(package, entries)| (*package, entries.iter().copied())).collect();
		FragmentLoader::new(self.trait_path, implementors).with_origin(self.trait_path)
	}
}

/// Runs every fragment embedded with [`fragment!`](crate::fragment) once.
///
/// Returns how many fragments were submitted.
pub fn load_registered(registries: &ImplementorRegistries) -> usize {
	let mut loaded = 0;
	for def in inventory::iter::<FragmentDef> {
		def.loader().load(registries);
		loaded += 1;
	}
	debug!(loaded, "embedded fragments loaded");
	loaded
}

/// Embeds a fragment in the binary.
///
/// ```ignore
/// implementors_fragment::fragment!("core::ops::Shr" {
///     "libc" => [],
///     "wlc" => ["impl Shr for Flags"],
/// });
/// ```
#[macro_export]
macro_rules! fragment {
	($trait_path:literal { $($package:literal => [$($entry:literal),* $(,)?]),* $(,)? }) => {
		$crate::inventory::submit! {
			$crate::FragmentDef::new($trait_path, &[$(($package, &[$($entry),*])),*])
		}
	};
}
