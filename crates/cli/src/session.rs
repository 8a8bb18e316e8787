//! One simulated page load: fragments arrive in some order and the consumer
//! attaches somewhere in between.

use std::collections::{BTreeMap, BTreeSet};

use implementors_fragment::{FragmentLoader, FragmentPayload, ImplementorRegistries, RecordingIntake, RegistryStats, TraitPath};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::LoadOrder;

/// What one trait's consumer received.
#[derive(Debug, Clone)]
pub struct TraitReport {
	pub trait_path: TraitPath,
	pub payloads: Vec<FragmentPayload>,
	pub stats: RegistryStats,
}

#[derive(Debug, Clone)]
pub struct SessionReport {
	pub traits: Vec<TraitReport>,
	/// Fragments loaded before consumers attached.
	pub attached_after: usize,
}

/// Arranges loaders in the requested order.
pub fn order_loaders(loaders: &mut [FragmentLoader], order: LoadOrder, seed: u64) {
	match order {
		LoadOrder::Sorted => sort(loaders),
		LoadOrder::Reverse => {
			sort(loaders);
			loaders.reverse();
		}
		LoadOrder::Shuffle => loaders.shuffle(&mut StdRng::seed_from_u64(seed)),
	}
}

fn sort(loaders: &mut [FragmentLoader]) {
	loaders.sort_by(|a, b| a.trait_path().cmp(b.trait_path()).then_with(|| a.origin().cmp(&b.origin())));
}

/// Loads `loaders` in order, attaching one consumer per trait after the first
/// `attach_after` of them (after all of them when `None`).
pub fn run(loaders: Vec<FragmentLoader>, attach_after: Option<usize>) -> SessionReport {
	let registries = ImplementorRegistries::new();
	let traits: BTreeSet<TraitPath> = loaders.iter().map(|loader| loader.trait_path().clone()).collect();
	let attach_at = attach_after.unwrap_or(loaders.len()).min(loaders.len());

	let mut loaders = loaders.into_iter();
	for loader in loaders.by_ref().take(attach_at) {
		loader.load(&registries);
	}

	let mut intakes = BTreeMap::new();
	for path in traits {
		let intake = RecordingIntake::new();
		let report = registries.attach_consumer(&path, intake.clone());
		debug!(trait_path = %path, drained = report.drained, "consumer attached");
		intakes.insert(path, intake);
	}

	for loader in loaders {
		loader.load(&registries);
	}

	let traits = intakes
		.into_iter()
		.map(|(trait_path, intake)| {
			let stats = registries.get(trait_path.as_str()).map(|registry| registry.stats()).unwrap_or_default();
			TraitReport {
				trait_path,
				payloads: intake.take(),
				stats,
			}
		})
		.collect();

	SessionReport {
		traits,
		attached_after: attach_at,
	}
}
