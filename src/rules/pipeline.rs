use crate::error::Result;
use crate::rules::rule::{CompiledRule, RuleSpec};
use crate::rules::table::builtin_rules;

/// An ordered, tag-bound sequence of compiled rewrite rules.
///
/// A pipeline is constructed once per version tag and is read-only
/// thereafter. Applying it to one file can never affect the result for
/// another: `transform` is a pure function of its inputs, so a single
/// instance may be shared freely across threads.
#[derive(Debug)]
pub struct Pipeline {
	tag: String,
	rules: Vec<CompiledRule>,
}

impl Pipeline {
	/// Build a pipeline over the built-in rule table.
	///
	/// Fails if any rule's pattern is invalid or its template references a
	/// capture group the pattern does not define; the error names the
	/// offending rule by position and intent.
	pub fn new(tag: &str) -> Result<Self> {
		Self::with_rules(tag, builtin_rules())
	}

	/// Build a pipeline over an explicit rule list.
	pub fn with_rules(tag: &str, specs: Vec<RuleSpec>) -> Result<Self> {
		let rules = specs
			.into_iter()
			.enumerate()
			.map(|(index, spec)| CompiledRule::compile(index, spec, tag))
			.collect::<Result<Vec<_>>>()?;

		Ok(Pipeline {
			tag: tag.to_string(),
			rules,
		})
	}

	/// The version tag bound into this pipeline.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// The compiled rules, in application order.
	pub fn rules(&self) -> &[CompiledRule] {
		&self.rules
	}

	/// Rewrite one manifest's content.
	///
	/// Folds over the rule table in declared order: every rule whose scope
	/// admits `file_name` is applied to the accumulated content, each rule's
	/// output feeding the next. Out-of-scope rules pass the accumulator
	/// through unchanged. A single pass, no early exit, no fixed-point
	/// iteration.
	pub fn transform(&self, file_name: &str, content: &str) -> String {
		self.rules
			.iter()
			.filter(|rule| rule.spec.scope.applies_to(file_name))
			.fold(content.to_string(), |acc, rule| rule.apply(&acc))
	}
}
