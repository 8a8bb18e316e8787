//! Fragment data model.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rendered markup for one type implementing one trait. Opaque.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementorEntry(Box<str>);

impl ImplementorEntry {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for ImplementorEntry {
	fn from(markup: &str) -> Self {
		Self(markup.into())
	}
}

impl From<String> for ImplementorEntry {
	fn from(markup: String) -> Self {
		Self(markup.into_boxed_str())
	}
}

impl fmt::Debug for ImplementorEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for ImplementorEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Package name to implementor entries, in declaration order.
///
/// Re-inserting a package replaces its entries and keeps its original
/// position. Entries are kept exactly as given: never sorted, never
/// deduplicated. Equality is order-sensitive.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageImplementors(IndexMap<String, Vec<ImplementorEntry>>);

impl PackageImplementors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the entries for `package`, returning the ones it replaced.
	pub fn insert<I, E>(&mut self, package: impl Into<String>, entries: I) -> Option<Vec<ImplementorEntry>>
	where
		I: IntoIterator<Item = E>,
		E: Into<ImplementorEntry>,
	{
		self.0.insert(package.into(), entries.into_iter().map(Into::into).collect())
	}

	pub fn get(&self, package: &str) -> Option<&[ImplementorEntry]> {
		self.0.get(package).map(Vec::as_slice)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[ImplementorEntry])> {
		self.0.iter().map(|(package, entries)| (package.as_str(), entries.as_slice()))
	}

	pub fn packages(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Number of packages, including those with no implementors.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Total entries across all packages.
	pub fn entry_count(&self) -> usize {
		self.0.values().map(Vec::len).sum()
	}
}

impl PartialEq for PackageImplementors {
	fn eq(&self, other: &Self) -> bool {
		self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
	}
}

impl Eq for PackageImplementors {}

impl fmt::Debug for PackageImplementors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.0.iter()).finish()
	}
}

impl<K, I, E> FromIterator<(K, I)> for PackageImplementors
where
	K: Into<String>,
	I: IntoIterator<Item = E>,
	E: Into<ImplementorEntry>,
{
	fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
		let mut implementors = Self::new();
		for (package, entries) in iter {
			implementors.insert(package, entries);
		}
		implementors
	}
}

/// One fragment's contribution, delivered to the consumer as a unit.
///
/// The trait it belongs to is implied by the registry it was submitted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentPayload {
	implementors: PackageImplementors,
	origin: Option<Arc<str>>,
}

impl FragmentPayload {
	pub fn new(implementors: PackageImplementors) -> Self {
		Self { implementors, origin: None }
	}

	/// Tags the payload with where it came from (a file path, a fragment id).
	pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
		self.origin = Some(origin.into());
		self
	}

	pub fn implementors(&self) -> &PackageImplementors {
		&self.implementors
	}

	pub fn origin(&self) -> Option<&str> {
		self.origin.as_deref()
	}

	pub fn into_implementors(self) -> PackageImplementors {
		self.implementors
	}
}
