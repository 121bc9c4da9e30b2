use crate::error::{PodshiftError, Result};
use regex::{Captures, Regex};

/// The set of file names a rule is restricted to.
#[derive(Debug, Clone)]
pub enum Scope {
	/// The rule applies to every file name.
	All,

	/// The rule applies only to these exact file names.
	Files(Vec<String>),
}

impl Scope {
	/// Check whether this scope admits the given file name.
	///
	/// Membership is exact string comparison, not pattern matching: scope is a
	/// filter on which manifest a structural fix targets, distinct from the
	/// content pattern.
	pub fn applies_to(&self, file_name: &str) -> bool {
		match self {
			Scope::All => true,
			Scope::Files(names) => names.iter().any(|name| name == file_name),
		}
	}
}

/// Post-match filter standing in for a negative lookahead.
///
/// A match is discarded when the text immediately after capture group `group`
/// starts with any of `suffixes`. The `regex` crate has no lookaround, so the
/// exclusion runs as an explicit check against the haystack instead.
#[derive(Debug, Clone)]
pub struct FollowGuard {
	/// Capture group whose trailing text is inspected.
	pub group: usize,

	/// Literal suffixes that disqualify the match.
	pub suffixes: Vec<String>,
}

/// A declarative rewrite rule before compilation.
#[derive(Debug, Clone)]
pub struct RuleSpec {
	/// Short label identifying the rule in error messages and listings.
	pub intent: String,

	/// Regex source. Matching is always global (every non-overlapping
	/// occurrence); use `[\s\S]` classes to span newlines.
	pub pattern: String,

	/// Replacement text. `{tag}` interpolates the version tag; `${N}` the
	/// N-th capture group of each match.
	pub template: String,

	/// Which file names the rule participates in.
	pub scope: Scope,

	/// Emulated negative lookahead, if any.
	pub unless_followed_by: Option<FollowGuard>,

	/// When set, a match whose capture group already starts with the bound
	/// tag is left untouched, so re-running the pipeline on its own output
	/// cannot double-prefix a name.
	pub skip_tagged_group: Option<usize>,
}

impl RuleSpec {
	/// Create an unscoped, unguarded rule.
	pub fn new(intent: &str, pattern: &str, template: &str) -> Self {
		RuleSpec {
			intent: intent.to_string(),
			pattern: pattern.to_string(),
			template: template.to_string(),
			scope: Scope::All,
			unless_followed_by: None,
			skip_tagged_group: None,
		}
	}

	/// Restrict the rule to the given file names.
	pub fn scoped(mut self, files: &[&str]) -> Self {
		self.scope = Scope::Files(files.iter().map(|f| f.to_string()).collect());
		self
	}

	/// Discard matches where `group` is immediately followed by any of
	/// `suffixes`.
	pub fn unless_followed_by(mut self, group: usize, suffixes: &[&str]) -> Self {
		self.unless_followed_by = Some(FollowGuard {
			group,
			suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
		});
		self
	}

	/// Discard matches where `group` already starts with the bound tag.
	pub fn skip_tagged(mut self, group: usize) -> Self {
		self.skip_tagged_group = Some(group);
		self
	}
}

/// A rule with its pattern compiled and its template bound to a version tag.
#[derive(Debug)]
pub struct CompiledRule {
	/// The declarative rule this was compiled from.
	pub spec: RuleSpec,

	/// Compiled search pattern.
	pub regex: Regex,

	/// Template with `{tag}` already replaced by the literal tag value.
	pub template: String,

	/// The bound tag, used by the idempotence guard.
	tag: String,
}

impl CompiledRule {
	/// Compile a rule, binding `tag` into its template.
	///
	/// Fails on an invalid pattern, on a template reference to a capture
	/// group the pattern does not define, and on a guard naming a group the
	/// pattern does not define. These are configuration errors and surface
	/// here rather than silently corrupting output at apply time.
	pub fn compile(index: usize, spec: RuleSpec, tag: &str) -> Result<Self> {
		let regex = Regex::new(&spec.pattern).map_err(|source| PodshiftError::InvalidPattern {
			index,
			intent: spec.intent.clone(),
			pattern: spec.pattern.clone(),
			source,
		})?;

		// Dollar signs in the tag are escaped so binding can never introduce
		// new group references into the template.
		let template = spec.template.replace("{tag}", &tag.replace('$', "$$"));

		let available = regex.captures_len() - 1;
		for group_ref in referenced_groups(&template) {
			match group_ref {
				GroupRef::Number(group) => {
					if group > available {
						return Err(PodshiftError::GroupOutOfRange {
							index,
							intent: spec.intent.clone(),
							group,
							available,
						});
					}
				}
				GroupRef::Name(name) => {
					if !regex.capture_names().flatten().any(|n| n == name) {
						return Err(PodshiftError::UnknownGroupName {
							index,
							intent: spec.intent.clone(),
							name,
						});
					}
				}
			}
		}

		let guard_groups = spec
			.unless_followed_by
			.as_ref()
			.map(|g| g.group)
			.into_iter()
			.chain(spec.skip_tagged_group);
		for group in guard_groups {
			if group > available {
				return Err(PodshiftError::GuardGroupOutOfRange {
					index,
					intent: spec.intent.clone(),
					group,
					available,
				});
			}
		}

		Ok(CompiledRule {
			spec,
			regex,
			template,
			tag: tag.to_string(),
		})
	}

	/// Replace every non-overlapping match of the pattern in `content`.
	///
	/// Guarded matches are emitted verbatim. Zero matches returns the content
	/// unchanged; that is not an error.
	pub fn apply(&self, content: &str) -> String {
		self.regex
			.replace_all(content, |caps: &Captures| {
				if self.is_guarded(caps, content) {
					return caps[0].to_string();
				}
				let mut expanded = String::new();
				caps.expand(&self.template, &mut expanded);
				expanded
			})
			.into_owned()
	}

	fn is_guarded(&self, caps: &Captures, haystack: &str) -> bool {
		if let Some(ref guard) = self.spec.unless_followed_by
			&& let Some(m) = caps.get(guard.group)
		{
			let trailing = &haystack[m.end()..];
			if guard.suffixes.iter().any(|s| trailing.starts_with(s)) {
				return true;
			}
		}

		if let Some(group) = self.spec.skip_tagged_group
			&& !self.tag.is_empty()
			&& let Some(m) = caps.get(group)
			&& haystack[m.start()..].starts_with(&self.tag)
		{
			return true;
		}

		false
	}
}

/// A capture-group reference found in a replacement template.
#[derive(Debug, PartialEq)]
enum GroupRef {
	Number(usize),
	Name(String),
}

/// Scan a template for `$N`, `${N}`, `$name` and `${name}` references,
/// honoring `$$` as a literal dollar sign. Mirrors the expansion syntax of
/// `Captures::expand` so validation and substitution agree.
fn referenced_groups(template: &str) -> Vec<GroupRef> {
	let bytes = template.as_bytes();
	let mut refs = Vec::new();
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] != b'$' {
			i += 1;
			continue;
		}
		if bytes.get(i + 1) == Some(&b'$') {
			i += 2;
			continue;
		}

		let (name, next) = if bytes.get(i + 1) == Some(&b'{') {
			match template[i + 2..].find('}') {
				Some(end) => (&template[i + 2..i + 2 + end], i + 2 + end + 1),
				// Unclosed brace is passed through literally by expand()
				None => {
					i += 1;
					continue;
				}
			}
		} else {
			let start = i + 1;
			let mut end = start;
			while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
				end += 1;
			}
			(&template[start..end], end)
		};

		if !name.is_empty() {
			match name.parse::<usize>() {
				Ok(n) => refs.push(GroupRef::Number(n)),
				Err(_) => refs.push(GroupRef::Name(name.to_string())),
			}
		}
		i = next.max(i + 1);
	}

	refs
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compile(spec: RuleSpec, tag: &str) -> Result<CompiledRule> {
		CompiledRule::compile(0, spec, tag)
	}

	#[test]
	fn test_scope_all_applies_to_every_file() {
		let scope = Scope::All;
		assert!(scope.applies_to("React-Core.podspec"));
		assert!(scope.applies_to("anything-at-all"));
		assert!(scope.applies_to(""));
	}

	#[test]
	fn test_scope_files_is_exact_membership() {
		let scope = Scope::Files(vec![
			"Yoga.podspec".to_string(),
			"ReactCommon.podspec".to_string(),
		]);
		assert!(scope.applies_to("Yoga.podspec"));
		assert!(scope.applies_to("ReactCommon.podspec"));
		assert!(!scope.applies_to("React-Core.podspec"));
		// No pattern semantics: a substring is not a member
		assert!(!scope.applies_to("Yoga"));
		assert!(!scope.applies_to("Yoga.podspec.bak"));
	}

	#[test]
	fn test_compile_invalid_pattern() {
		let spec = RuleSpec::new("broken", r"[unclosed", "x");
		let err = compile(spec, "V1").unwrap_err();
		match err {
			PodshiftError::InvalidPattern { index, intent, pattern, .. } => {
				assert_eq!(index, 0);
				assert_eq!(intent, "broken");
				assert_eq!(pattern, "[unclosed");
			}
			other => panic!("Expected InvalidPattern, got {other:?}"),
		}
	}

	#[test]
	fn test_compile_rejects_out_of_range_group() {
		let spec = RuleSpec::new("bad ref", r"(\w+)", "${1}-${2}");
		let err = compile(spec, "V1").unwrap_err();
		match err {
			PodshiftError::GroupOutOfRange { group, available, .. } => {
				assert_eq!(group, 2);
				assert_eq!(available, 1);
			}
			other => panic!("Expected GroupOutOfRange, got {other:?}"),
		}
	}

	#[test]
	fn test_compile_rejects_unknown_group_name() {
		let spec = RuleSpec::new("bad name", r"(\w+)", "$missing");
		let err = compile(spec, "V1").unwrap_err();
		match err {
			PodshiftError::UnknownGroupName { name, .. } => {
				assert_eq!(name, "missing");
			}
			other => panic!("Expected UnknownGroupName, got {other:?}"),
		}
	}

	#[test]
	fn test_compile_accepts_named_group() {
		let spec = RuleSpec::new("named", r"(?P<word>\w+)", "[$word]");
		let rule = compile(spec, "V1").unwrap();
		assert_eq!(rule.apply("hi"), "[hi]");
	}

	#[test]
	fn test_compile_rejects_guard_group_out_of_range() {
		let spec = RuleSpec::new("bad guard", r"(\w+)", "${1}").skip_tagged(3);
		let err = compile(spec, "V1").unwrap_err();
		match err {
			PodshiftError::GuardGroupOutOfRange { group, available, .. } => {
				assert_eq!(group, 3);
				assert_eq!(available, 1);
			}
			other => panic!("Expected GuardGroupOutOfRange, got {other:?}"),
		}
	}

	#[test]
	fn test_tag_bound_once_into_template() {
		let spec = RuleSpec::new("tagging", r"(name)", "{tag}${1}");
		let rule = compile(spec, "ABI50_0_0").unwrap();
		assert_eq!(rule.template, "ABI50_0_0${1}");
		assert_eq!(rule.apply("name"), "ABI50_0_0name");
	}

	#[test]
	fn test_tag_with_dollar_is_literal() {
		// A tag containing '$' must not be misread as a group reference
		let spec = RuleSpec::new("tagging", r"(name)", "{tag}${1}");
		let rule = compile(spec, "$2x").unwrap();
		assert_eq!(rule.apply("name"), "$2xname");
	}

	#[test]
	fn test_apply_is_global() {
		let spec = RuleSpec::new("global", r"foo", "bar");
		let rule = compile(spec, "V1").unwrap();
		assert_eq!(rule.apply("foo foo foo"), "bar bar bar");
	}

	#[test]
	fn test_apply_zero_matches_is_identity() {
		let spec = RuleSpec::new("noop", r"absent", "replaced");
		let rule = compile(spec, "V1").unwrap();
		let content = "nothing here matches\nat all\n";
		assert_eq!(rule.apply(content), content);
	}

	#[test]
	fn test_apply_multiline_block() {
		let spec = RuleSpec::new("strip block", r"source\s*=\s*\{[\s\S]+?end", "");
		let rule = compile(spec, "V1").unwrap();
		let content = "before\nsource = { :git => \"url\",\n  :tag => \"v1\"\n}\nend\nafter\n";
		assert_eq!(rule.apply(content), "before\n\nafter\n");
	}

	#[test]
	fn test_follow_guard_discards_match() {
		let spec = RuleSpec::new("prefix deps", r#"(\.dependency\s+["'])(FB)([^"']*["'])"#, "${1}{tag}${2}${3}")
			.unless_followed_by(2, &["Folly"]);
		let rule = compile(spec, "ABI50_0_0").unwrap();
		assert_eq!(
			rule.apply(r#".dependency "FBFolly""#),
			r#".dependency "FBFolly""#
		);
		assert_eq!(
			rule.apply(r#".dependency "FBReactNativeSpec""#),
			r#".dependency "ABI50_0_0FBReactNativeSpec""#
		);
	}

	#[test]
	fn test_skip_tagged_guard_prevents_double_prefix() {
		let spec = RuleSpec::new(
			"prefix fields",
			r#"\.(name)(\s*=\s*["'])([^"']+)(["'])"#,
			".${1}${2}{tag}${3}${4}",
		)
		.skip_tagged(3);
		let rule = compile(spec, "ABI50_0_0").unwrap();

		let once = rule.apply(r#".name = "React-Core""#);
		assert_eq!(once, r#".name = "ABI50_0_0React-Core""#);
		let twice = rule.apply(&once);
		assert_eq!(twice, once);
	}

	#[test]
	fn test_referenced_groups_syntax() {
		assert_eq!(
			referenced_groups("${1}x$2$$3${name}$word"),
			vec![
				GroupRef::Number(1),
				GroupRef::Number(2),
				GroupRef::Name("name".to_string()),
				GroupRef::Name("word".to_string()),
			]
		);
	}

	#[test]
	fn test_referenced_groups_bare_digit_letter_run_is_a_name() {
		// Matches expand() semantics: `$1a` refers to a group named "1a"
		assert_eq!(
			referenced_groups("$1a"),
			vec![GroupRef::Name("1a".to_string())]
		);
	}
}
