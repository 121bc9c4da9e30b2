use crate::rules::{FollowGuard, RuleSpec, Scope};
use serde::Deserialize;

/// Top-level configuration from a `.podshift.toml` file.
///
/// Config rules are appended after the built-in table, so they see content
/// the built-ins have already rewritten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
	/// Extra rewrite rules, applied in declaration order.
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// One rewrite rule as declared in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
	/// Short label used in error messages and `rules show` output.
	pub intent: Option<String>,

	/// Regex source. Use `[\s\S]` classes to span newlines.
	pub pattern: String,

	/// Replacement text; `{tag}` interpolates the version tag, `${N}` the
	/// N-th capture group.
	pub template: String,

	/// File name or list of file names the rule is restricted to.
	/// Omit to apply the rule to every file.
	pub scope: Option<ScopeConfig>,

	/// Skip matches whose capture group is immediately followed by one of
	/// the given suffixes (stand-in for a negative lookahead).
	pub unless_followed_by: Option<FollowGuardConfig>,

	/// Skip matches whose capture group already starts with the bound tag.
	pub skip_tagged_group: Option<usize>,
}

/// A scope declared either as a single file name or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScopeConfig {
	One(String),
	Many(Vec<String>),
}

/// Emulated-lookahead guard as declared in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FollowGuardConfig {
	pub group: usize,
	pub suffixes: Vec<String>,
}

impl From<RuleConfig> for RuleSpec {
	fn from(config: RuleConfig) -> Self {
		let intent = config
			.intent
			.unwrap_or_else(|| format!("config rule ({})", config.pattern));

		let scope = match config.scope {
			None => Scope::All,
			Some(ScopeConfig::One(name)) => Scope::Files(vec![name]),
			Some(ScopeConfig::Many(names)) => Scope::Files(names),
		};

		RuleSpec {
			intent,
			pattern: config.pattern,
			template: config.template,
			scope,
			unless_followed_by: config.unless_followed_by.map(|g| FollowGuard {
				group: g.group,
				suffixes: g.suffixes,
			}),
			skip_tagged_group: config.skip_tagged_group,
		}
	}
}
