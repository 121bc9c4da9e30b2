//! Extra-rule configuration for podshift.
//!
//! This module handles:
//! - TOML rules file parsing
//! - Config file discovery (explicit path, scan directory, home directory)
//! - Conversion of declared rules into engine rule specs

pub mod discover;
pub mod parser;
pub mod types;

pub use discover::{CONFIG_FILE_NAME, find_config, load_extra_rules};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, FollowGuardConfig, RuleConfig, ScopeConfig};
