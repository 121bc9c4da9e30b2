use std::path::PathBuf;

/// Library-level structured errors for podshift.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PodshiftError {
	#[error("Invalid pattern in rule {index} ({intent}): {pattern}")]
	InvalidPattern {
		index: usize,
		intent: String,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error(
		"Rule {index} ({intent}) template references group {group}, but the pattern only defines {available} group(s)"
	)]
	GroupOutOfRange {
		index: usize,
		intent: String,
		group: usize,
		available: usize,
	},

	#[error("Rule {index} ({intent}) template references unknown group name: {name}")]
	UnknownGroupName {
		index: usize,
		intent: String,
		name: String,
	},

	#[error(
		"Rule {index} ({intent}) guard references group {group}, but the pattern only defines {available} group(s)"
	)]
	GuardGroupOutOfRange {
		index: usize,
		intent: String,
		group: usize,
		available: usize,
	},

	#[error("Rules file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read rules file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse rules file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Target not found: {path}")]
	TargetNotFound { path: PathBuf },

	#[error("Failed to read directory: {path}")]
	DirReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read manifest: {path}")]
	FileReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write manifest: {path}")]
	FileWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using PodshiftError.
pub type Result<T> = std::result::Result<T, PodshiftError>;
