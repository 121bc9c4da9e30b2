//! The rewrite-rule engine for podshift.
//!
//! This module handles:
//! - The rule data model (pattern, template, scope, guards)
//! - Compilation and construction-time validation of rules
//! - The tag-bound pipeline that rewrites manifest content

pub mod pipeline;
pub mod rule;
pub mod table;

pub use pipeline::Pipeline;
pub use rule::{CompiledRule, FollowGuard, RuleSpec, Scope};
pub use table::builtin_rules;
