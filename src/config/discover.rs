use crate::config::parser::parse_config_file;
use crate::error::{PodshiftError, Result};
use crate::rules::RuleSpec;
use std::path::{Path, PathBuf};

/// File name looked up for extra rewrite rules.
pub const CONFIG_FILE_NAME: &str = ".podshift.toml";

/// Locate the extra-rules config file.
///
/// Lookup order: an explicit path (must exist), then `.podshift.toml` in
/// `base_dir`, then `~/.podshift.toml`. Absence of any config is not an
/// error.
pub fn find_config(explicit: Option<&Path>, base_dir: &Path) -> Result<Option<PathBuf>> {
	if let Some(path) = explicit {
		if !path.exists() {
			return Err(PodshiftError::ConfigNotFound {
				path: path.to_path_buf(),
			});
		}
		return Ok(Some(path.to_path_buf()));
	}

	let local = base_dir.join(CONFIG_FILE_NAME);
	if local.exists() {
		return Ok(Some(local));
	}

	// No resolvable home directory just means no user config to consult
	let Some(home) = dirs::home_dir() else {
		return Ok(None);
	};
	let user = home.join(CONFIG_FILE_NAME);
	if user.exists() {
		return Ok(Some(user));
	}

	Ok(None)
}

/// Load extra rules from the discovered config, if any.
///
/// Returned specs are meant to be appended after the built-in table; their
/// patterns are validated later, at pipeline construction.
pub fn load_extra_rules(explicit: Option<&Path>, base_dir: &Path) -> Result<Vec<RuleSpec>> {
	let Some(path) = find_config(explicit, base_dir)? else {
		return Ok(Vec::new());
	};

	let config = parse_config_file(&path)?;
	Ok(config.rules.into_iter().map(RuleSpec::from).collect())
}
