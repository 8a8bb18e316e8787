//! Fragment loaders and a consumer meeting in either order.

use implementors_fragment::{
	FragmentLoader, ImplementorRegistries, PackageImplementors, RecordingIntake, Submission, TraitPath, fragment, load_registered,
};
use pretty_assertions::assert_eq;

fragment!("test::Embedded" {
	"pkgA" => ["impl Embedded for A"],
	"pkgB" => [],
});

fragment!("test::Embedded" {
	"pkgC" => ["impl Embedded for C", "impl Embedded for D",],
});

fn implementors(packages: &[(&str, &[&str])]) -> PackageImplementors {
	packages.iter().map(|(package, entries)| (*package, entries.iter().copied())).collect()
}

#[test]
fn buffered_fragments_drain_in_submission_order() {
	let registries = ImplementorRegistries::new();
	let path = TraitPath::from("core::ops::Shr");

	let first = implementors(&[("pkgA", &["entry1"])]);
	let second = implementors(&[("pkgB", &[])]);
	FragmentLoader::new(path.clone(), first.clone()).load(&registries);
	FragmentLoader::new(path.clone(), second.clone()).load(&registries);

	let intake = RecordingIntake::new();
	let report = registries.attach_consumer(&path, intake.clone());

	assert_eq!(report.drained, 2);
	let received: Vec<_> = intake.received().into_iter().map(|p| p.into_implementors()).collect();
	assert_eq!(received, vec![first, second]);
	assert_eq!(registries.get("core::ops::Shr").map(|r| r.pending_len()), Some(0));
}

#[test]
fn consumer_first_receives_immediately() {
	let registries = ImplementorRegistries::new();
	let path = TraitPath::from("std::error::Error");
	let intake = RecordingIntake::new();
	registries.attach_consumer(&path, intake.clone());
	let registry = registries.get_or_create(&path);

	let payload = implementors(&[("pkgC", &["entry2", "entry3"])]);
	let submission = FragmentLoader::new(path.clone(), payload.clone()).load(&registries);

	assert_eq!(submission, Submission::Forwarded);
	assert_eq!(registry.pending_len(), 0);
	let received = intake.received();
	assert_eq!(received.len(), 1);
	assert_eq!(received[0].implementors(), &payload);
}

#[test]
fn same_package_in_two_fragments_is_not_merged() {
	let registries = ImplementorRegistries::new();
	let path = TraitPath::from("core::ops::Shr");
	let first = implementors(&[("pkgA", &["old"])]);
	let second = implementors(&[("pkgA", &["new", "newer"])]);
	FragmentLoader::new(path.clone(), first.clone()).load(&registries);
	FragmentLoader::new(path.clone(), second.clone()).load(&registries);

	let intake = RecordingIntake::new();
	registries.attach_consumer(&path, intake.clone());

	let received: Vec<_> = intake.take().into_iter().map(|p| p.into_implementors()).collect();
	assert_eq!(received, vec![first, second]);
	assert!(intake.is_empty());
}

#[test]
fn embedded_fragments_reach_late_consumer() {
	let registries = ImplementorRegistries::new();
	let loaded = load_registered(&registries);
	assert!(loaded >= 2);

	let intake = RecordingIntake::new();
	let report = registries.attach_consumer(&TraitPath::from("test::Embedded"), intake.clone());
	assert_eq!(report.drained, 2);

	// Link order decides which embedded fragment arrives first.
	let mut packages: Vec<Vec<String>> = intake
		.received()
		.iter()
		.map(|p| p.implementors().packages().map(str::to_owned).collect())
		.collect();
	packages.sort();
	assert_eq!(packages, vec![vec!["pkgA".to_string(), "pkgB".to_string()], vec!["pkgC".to_string()]]);

	let embedded = intake.received();
	let c = embedded.iter().find_map(|p| p.implementors().get("pkgC")).expect("pkgC delivered");
	assert_eq!(c.iter().map(|e| e.as_str()).collect::<Vec<_>>(), vec!["impl Embedded for C", "impl Embedded for D"]);
}
