//! Settings from an optional TOML file, overridden by command line flags.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The file could not be read.
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},

	/// The file is not valid TOML for [`FileConfig`].
	#[error("invalid config {path}: {source}")]
	Parse {
		path: PathBuf,
		source: toml::de::Error,
	},
}

/// Order fragments are loaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoadOrder {
	/// By trait path, then file path.
	#[default]
	Sorted,
	/// Sorted, then reversed.
	Reverse,
	/// Seeded shuffle.
	Shuffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

/// One configuration layer. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
	pub root: Option<PathBuf>,
	pub order: Option<LoadOrder>,
	pub seed: Option<u64>,
	pub attach_after: Option<usize>,
	pub output: Option<OutputFormat>,
}

impl FileConfig {
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&text).map_err(|source| ConfigError::Parse {
			path: path.to_path_buf(),
			source,
		})
	}

	pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	/// Merges `other` over `self`; fields set in `other` win.
	pub fn merge(&mut self, other: FileConfig) {
		if other.root.is_some() {
			self.root = other.root;
		}
		if other.order.is_some() {
			self.order = other.order;
		}
		if other.seed.is_some() {
			self.seed = other.seed;
		}
		if other.attach_after.is_some() {
			self.attach_after = other.attach_after;
		}
		if other.output.is_some() {
			self.output = other.output;
		}
	}
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub root: PathBuf,
	pub order: LoadOrder,
	pub seed: u64,
	/// Fragments loaded before the consumer attaches; `None` attaches after all.
	pub attach_after: Option<usize>,
	pub output: OutputFormat,
}

impl From<FileConfig> for Settings {
	fn from(config: FileConfig) -> Self {
		Self {
			root: config.root.unwrap_or_else(|| PathBuf::from(".")),
			order: config.order.unwrap_or_default(),
			seed: config.seed.unwrap_or_default(),
			attach_after: config.attach_after,
			output: config.output.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests;
