//! Finding and reading fragment files under a documentation root.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use implementors_fragment::format::{self, FormatError, FragmentFormat};
use implementors_fragment::{FragmentLoader, TraitPath};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScanError {
	#[error("not a directory: {0}")]
	NotADirectory(PathBuf),

	#[error("walking {root}: {source}")]
	Walk {
		root: PathBuf,
		source: ignore::Error,
	},

	#[error("I/O error reading {path}: {source}")]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("{path}: {source}")]
	Format {
		path: PathBuf,
		source: FormatError,
	},
}

/// A fragment file and what its location says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
	pub path: PathBuf,
	pub trait_path: TraitPath,
	pub format: FragmentFormat,
}

/// The directory fragments live in: `<root>/implementors` when present,
/// otherwise `root` itself.
pub fn implementors_dir(root: &Path) -> PathBuf {
	let nested = root.join("implementors");
	if nested.is_dir() { nested } else { root.to_path_buf() }
}

/// Lists fragment files under `root`, sorted by path.
///
/// Build output directories are usually ignored by version control, so ignore
/// files are not consulted.
pub fn discover(root: &Path) -> Result<Vec<FragmentFile>, ScanError> {
	let dir = implementors_dir(root);
	if !dir.is_dir() {
		return Err(ScanError::NotADirectory(dir));
	}

	let walker = WalkBuilder::new(&dir).standard_filters(false).follow_links(false).sort_by_file_name(|a, b| a.cmp(b)).build();

	let mut files = Vec::new();
	for entry in walker {
		let entry = entry.map_err(|source| ScanError::Walk { root: dir.clone(), source })?;
		if !entry.file_type().is_some_and(|ty| ty.is_file()) {
			continue;
		}

		let path = entry.into_path();
		let Some(format) = FragmentFormat::from_path(&path) else {
			continue;
		};
		let Some(trait_path) = format::trait_path_from_file(&dir, &path) else {
			warn!(path = %path.display(), "skipping file not named trait.<Name>");
			continue;
		};
		files.push(FragmentFile { path, trait_path, format });
	}

	debug!(dir = %dir.display(), count = files.len(), "discovered fragment files");
	Ok(files)
}

/// Reads one file into a loader tagged with the file's path.
pub fn read_loader(file: &FragmentFile) -> Result<FragmentLoader, ScanError> {
	let text = std::fs::read_to_string(&file.path).map_err(|source| ScanError::Read {
		path: file.path.clone(),
		source,
	})?;
	let implementors = format::parse(file.format, &text).map_err(|source| ScanError::Format {
		path: file.path.clone(),
		source,
	})?;

	Ok(FragmentLoader::new(file.trait_path.clone(), implementors).with_origin(file.path.display().to_string()))
}

pub fn read_all(files: &[FragmentFile]) -> Result<Vec<FragmentLoader>, ScanError> {
	files.iter().map(read_loader).collect()
}
