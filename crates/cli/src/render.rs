//! Output of a [`SessionReport`].

use std::io::{self, Write};

use implementors_fragment::PackageImplementors;
use serde::Serialize;

use crate::session::SessionReport;

/// Writes one block per trait: every package of every received payload, with
/// its entries indented below it.
pub fn render_text(report: &SessionReport, out: &mut impl Write) -> io::Result<()> {
	for (index, trait_report) in report.traits.iter().enumerate() {
		if index > 0 {
			writeln!(out)?;
		}
		let stats = trait_report.stats;
		writeln!(
			out,
			"{} ({} fragments: {} drained, {} forwarded)",
			trait_report.trait_path, stats.delivered, stats.drained, stats.forwarded
		)?;

		for payload in &trait_report.payloads {
			if let Some(origin) = payload.origin() {
				writeln!(out, "  # {origin}")?;
			}
			for (package, entries) in payload.implementors().iter() {
				writeln!(out, "  {package}")?;
				for entry in entries {
					writeln!(out, "    {entry}")?;
				}
			}
		}
	}
	Ok(())
}

#[derive(Serialize)]
struct TraitView<'a> {
	#[serde(rename = "trait")]
	trait_path: &'a str,
	fragments: Vec<FragmentView<'a>>,
}

#[derive(Serialize)]
struct FragmentView<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	origin: Option<&'a str>,
	implementors: &'a PackageImplementors,
}

/// Renders the report as a JSON array of `{ "trait", "fragments" }` objects.
/// Package order inside each fragment is kept.
pub fn render_json(report: &SessionReport) -> serde_json::Result<String> {
	let views: Vec<_> = report
		.traits
		.iter()
		.map(|trait_report| TraitView {
			trait_path: trait_report.trait_path.as_str(),
			fragments: trait_report
				.payloads
				.iter()
				.map(|payload| FragmentView {
					origin: payload.origin(),
					implementors: payload.implementors(),
				})
				.collect(),
		})
		.collect();
	serde_json::to_string_pretty(&views)
}
