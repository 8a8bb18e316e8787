//! On-disk fragment encodings.
//!
//! A fragment file maps package names to lists of markup strings. Two
//! encodings exist:
//!
//! - JSON: one object, keys in declaration order.
//! - Script: the self-registering form documentation generators emit, one
//!   `implementors["pkg"] = [...];` assignment per line, wrapped in the code
//!   that hands the result to the page. Only the assignments are read.
//!
//! Neither format's markup is interpreted.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{ImplementorEntry, PackageImplementors, TraitPath};

/// Errors reading a fragment file's contents.
#[derive(Debug, Error)]
pub enum FormatError {
	/// The JSON document is malformed or not an object of string arrays.
	#[error("invalid JSON fragment: {0}")]
	Json(#[from] serde_json::Error),

	/// An assignment's package name is not a valid string literal.
	#[error("line {line}: invalid package name literal: {source}")]
	PackageName {
		line: usize,
		source: serde_json::Error,
	},

	/// An assignment's right-hand side is not a list of string literals.
	#[error("line {line}: invalid entry list for package '{package}': {source}")]
	Entries {
		line: usize,
		package: String,
		source: serde_json::Error,
	},
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Encoding of a fragment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentFormat {
	Json,
	Script,
}

impl FragmentFormat {
	/// Picks the format from a file extension (`json` or `js`).
	pub fn from_path(path: &Path) -> Option<Self> {
		match path.extension()?.to_str()? {
			"json" => Some(Self::Json),
			"js" => Some(Self::Script),
			_ => None,
		}
	}
}

/// Parses fragment file contents.
pub fn parse(format: FragmentFormat, text: &str) -> Result<PackageImplementors> {
	match format {
		FragmentFormat::Json => parse_json(text),
		FragmentFormat::Script => parse_script(text),
	}
}

/// Parses a JSON fragment. Duplicate package names keep the last value.
pub fn parse_json(text: &str) -> Result<PackageImplementors> {
	Ok(serde_json::from_str(text)?)
}

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^\s*implementors\[(?P<package>"(?:[^"\\]|\\.)*")\]\s*=\s*(?P<entries>\[.*\])\s*;\s*$"#).expect("assignment pattern is valid")
});

static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\]$").expect("trailing comma pattern is valid"));

/// Parses the script form. Lines other than package assignments are skipped;
/// a repeated package name replaces the earlier assignment.
pub fn parse_script(text: &str) -> Result<PackageImplementors> {
	let mut implementors = PackageImplementors::new();

	for (index, line) in text.lines().enumerate() {
		let Some(captures) = ASSIGNMENT.captures(line) else {
			continue;
		};
		let line = index + 1;

		let package: String = serde_json::from_str(&captures["package"]).map_err(|source| FormatError::PackageName { line, source })?;
		let entries = TRAILING_COMMA.replace(&captures["entries"], "]");
		let entries: Vec<ImplementorEntry> = match serde_json::from_str(&entries) {
			Ok(entries) => entries,
			Err(source) => return Err(FormatError::Entries { line, package, source }),
		};

		implementors.insert(package, entries);
	}

	Ok(implementors)
}

/// Renders a fragment as pretty-printed JSON.
pub fn to_json(implementors: &PackageImplementors) -> Result<String> {
	Ok(serde_json::to_string_pretty(implementors)?)
}

/// Derives the trait path from a fragment file's location under an
/// implementors directory: `core/ops/trait.Shr.js` is `core::ops::Shr`.
///
/// Returns `None` for files outside `root` or not named `trait.<Name>.<ext>`.
pub fn trait_path_from_file(root: &Path, file: &Path) -> Option<TraitPath> {
	let relative = file.strip_prefix(root).ok()?;
	let name = relative.file_name()?.to_str()?.strip_prefix("trait.")?;
	let name = Path::new(name).file_stem()?.to_str()?;
	if name.is_empty() {
		return None;
	}

	let mut segments = Vec::new();
	for component in relative.parent()?.components() {
		match component {
			Component::Normal(segment) => segments.push(segment.to_str()?),
			_ => return None,
		}
	}
	segments.push(name);

	Some(TraitPath::from(segments.join("::")))
}
