//! `implementors` binary.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use implementors_cli::config::{FileConfig, LoadOrder, OutputFormat, Settings};
use implementors_cli::{render, scan, session};
use tracing::info;

/// Command line arguments. Set flags override the config file.
#[derive(Parser, Debug)]
#[command(name = "implementors")]
#[command(about = "Load trait implementor fragments and show what the page consumer receives")]
struct Args {
	/// Documentation root, or its implementors directory
	#[arg(value_name = "DIR")]
	root: Option<PathBuf>,

	/// TOML config file
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Fragment load order
	#[arg(long, value_enum)]
	order: Option<LoadOrder>,

	/// Seed for `--order shuffle`
	#[arg(long)]
	seed: Option<u64>,

	/// Fragments to load before the consumer attaches (default: all)
	#[arg(long, value_name = "N")]
	attach_after: Option<usize>,

	/// Output format
	#[arg(long, value_enum)]
	output: Option<OutputFormat>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

impl Args {
	fn overrides(&self) -> FileConfig {
		FileConfig {
			root: self.root.clone(),
			order: self.order,
			seed: self.seed,
			attach_after: self.attach_after,
			output: self.output,
		}
	}
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let mut config = match &args.config {
		Some(path) => FileConfig::load(path)?,
		None => FileConfig::default(),
	};
	config.merge(args.overrides());
	let settings = Settings::from(config);

	let files = scan::discover(&settings.root).with_context(|| format!("scanning {}", settings.root.display()))?;
	let mut loaders = scan::read_all(&files)?;
	info!(fragments = loaders.len(), order = ?settings.order, "loading fragments");

	session::order_loaders(&mut loaders, settings.order, settings.seed);
	let report = session::run(loaders, settings.attach_after);

	match settings.output {
		OutputFormat::Text => render::render_text(&report, &mut io::stdout().lock())?,
		OutputFormat::Json => println!("{}", render::render_json(&report)?),
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("IMPLEMENTORS_LOG").or_else(|_| EnvFilter::try_from_default_env()).unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("implementors=debug,warn")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(true).init();
}
