use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Fully qualified path of the trait a registry collects implementors for,
/// e.g. `core::ops::Shr`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraitPath(Arc<str>);

impl TraitPath {
	pub fn new(path: impl Into<Arc<str>>) -> Self {
		Self(path.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Last path segment, the bare trait name.
	pub fn name(&self) -> &str {
		self.0.rsplit("::").next().unwrap_or(&self.0)
	}
}

impl Borrow<str> for TraitPath {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for TraitPath {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl From<String> for TraitPath {
	fn from(path: String) -> Self {
		Self::new(path)
	}
}

impl fmt::Display for TraitPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for TraitPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TraitPath({:?})", &*self.0)
	}
}
