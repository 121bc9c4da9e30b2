use crate::config::types::Config;
use crate::error::{PodshiftError, Result};
use std::path::Path;

/// Parse a rules config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| PodshiftError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a rules config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	toml::from_str(content).map_err(|source| PodshiftError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::ScopeConfig;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
[[rules]]
intent = "rename vendored header dir"
pattern = '(HEADER_DIR\s*=\s*")(Vendor)(")'
template = '${1}{tag}${2}${3}'
scope = ["MyPod.podspec"]
skip_tagged_group = 2

[[rules]]
pattern = 'use_frameworks!'
template = '# use_frameworks!'
scope = "Other.podspec"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 2);

		let rule1 = &config.rules[0];
		assert_eq!(rule1.intent.as_deref(), Some("rename vendored header dir"));
		assert_eq!(rule1.skip_tagged_group, Some(2));
		assert!(matches!(rule1.scope, Some(ScopeConfig::Many(_))));

		let rule2 = &config.rules[1];
		assert!(rule2.intent.is_none());
		assert!(matches!(rule2.scope, Some(ScopeConfig::One(_))));
	}

	#[test]
	fn test_parse_follow_guard() {
		let content = r#"
[[rules]]
pattern = '("FB)([^"]*")'
template = '"{tag}FB${2}'
unless_followed_by = { group = 1, suffixes = ["Folly"] }
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		let guard = config.rules[0].unless_followed_by.as_ref().unwrap();
		assert_eq!(guard.group, 1);
		assert_eq!(guard.suffixes, vec!["Folly".to_string()]);
	}

	#[test]
	fn test_parse_rejects_unknown_field() {
		let content = r#"
[[rules]]
pattern = 'foo'
template = 'bar'
replace = 'typo'
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		assert!(matches!(
			result.unwrap_err(),
			PodshiftError::ConfigParseError { .. }
		));
	}

	#[test]
	fn test_parse_missing_pattern_is_an_error() {
		let content = r#"
[[rules]]
template = 'bar'
"#;
		let path = PathBuf::from("test.toml");
		assert!(parse_config_str(content, &path).is_err());
	}
}
