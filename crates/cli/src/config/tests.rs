use std::path::PathBuf;

use super::{FileConfig, LoadOrder, OutputFormat, Settings};

#[test]
fn parses_all_fields() {
	let config = FileConfig::parse(
		r#"
root = "target/doc"
order = "shuffle"
seed = 42
attach_after = 3
output = "json"
"#,
	)
	.expect("parse");

	assert_eq!(config.root, Some(PathBuf::from("target/doc")));
	assert_eq!(config.order, Some(LoadOrder::Shuffle));
	assert_eq!(config.seed, Some(42));
	assert_eq!(config.attach_after, Some(3));
	assert_eq!(config.output, Some(OutputFormat::Json));
}

#[test]
fn rejects_unknown_keys() {
	assert!(FileConfig::parse("colour = \"red\"").is_err());
}

#[test]
fn later_layer_wins_only_where_set() {
	let mut base = FileConfig::parse("root = \"docs\"\norder = \"reverse\"\nseed = 1").expect("parse");
	base.merge(FileConfig {
		order: Some(LoadOrder::Sorted),
		attach_after: Some(0),
		..FileConfig::default()
	});

	let settings = Settings::from(base);
	assert_eq!(settings.root, PathBuf::from("docs"));
	assert_eq!(settings.order, LoadOrder::Sorted);
	assert_eq!(settings.seed, 1);
	assert_eq!(settings.attach_after, Some(0));
	assert_eq!(settings.output, OutputFormat::Text);
}

#[test]
fn defaults_attach_after_everything() {
	let settings = Settings::from(FileConfig::default());
	assert_eq!(settings.root, PathBuf::from("."));
	assert_eq!(settings.attach_after, None);
	assert_eq!(settings.order, LoadOrder::Sorted);
}
