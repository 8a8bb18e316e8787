//! Registries for every trait seen during one session.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{AttachReport, Intake, Registry, Submission, TraitPath};

/// One [`Registry`] per trait, created on first use by either side.
///
/// A loader submitting for a trait nobody has mentioned yet and a consumer
/// attaching before any fragment arrived both just create the registry.
pub struct RegistrySet<P> {
	registries: RwLock<FxHashMap<TraitPath, Arc<Registry<P>>>>,
}

impl<P> Default for RegistrySet<P> {
	fn default() -> Self {
		Self {
			registries: RwLock::new(FxHashMap::default()),
		}
	}
}

impl<P> RegistrySet<P> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Looks up an existing registry without creating one.
	pub fn get(&self, path: &str) -> Option<Arc<Registry<P>>> {
		self.registries.read().get(path).cloned()
	}

	/// Returns the registry for `path`, creating it if needed.
	pub fn get_or_create(&self, path: &TraitPath) -> Arc<Registry<P>> {
		if let Some(registry) = self.registries.read().get(path.as_str()) {
			return Arc::clone(registry);
		}

		let mut registries = self.registries.write();
		let registry = registries.entry(path.clone()).or_insert_with(|| {
			debug!(trait_path = %path, "creating registry");
			Arc::new(Registry::new(path.as_str()))
		});
		Arc::clone(registry)
	}

	/// Submits `payload` to the registry for `path`.
	pub fn submit(&self, path: &TraitPath, payload: P) -> Submission {
		self.get_or_create(path).submit(payload)
	}

	/// Attaches `intake` as the consumer for `path`.
	pub fn attach_consumer<I>(&self, path: &TraitPath, intake: I) -> AttachReport
	where
		I: Intake<P> + 'static,
	{
		self.get_or_create(path).attach_consumer(intake)
	}

	/// Attaches a consumer built by `factory` to every registry that exists now.
	///
	/// Registries created afterwards stay unattached until given a consumer of
	/// their own.
	pub fn attach_all<F, I>(&self, mut factory: F) -> Vec<(TraitPath, AttachReport)>
	where
		F: FnMut(&TraitPath) -> I,
		I: Intake<P> + 'static,
	{
		let mut registries: Vec<_> = self
			.registries
			.read()
			.iter()
			.map(|(path, registry)| (path.clone(), Arc::clone(registry)))
			.collect();
		registries.sort_by(|a, b| a.0.cmp(&b.0));

		// Delivery runs intakes, which may submit back into this set.
		registries
			.into_iter()
			.map(|(path, registry)| {
				let report = registry.attach_consumer(factory(&path));
				(path, report)
			})
			.collect()
	}

	/// Known trait paths, sorted.
	pub fn traits(&self) -> Vec<TraitPath> {
		let mut paths: Vec<_> = self.registries.read().keys().cloned().collect();
		paths.sort();
		paths
	}

	pub fn len(&self) -> usize {
		self.registries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.registries.read().is_empty()
	}
}
