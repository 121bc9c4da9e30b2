use crate::rules::rule::RuleSpec;

/// The built-in rewrite table for versioning React Native podspecs.
///
/// Order is load-bearing: the source-conditional strip must run before the
/// source repoint, or the two would clobber each other. Rules are tried
/// unconditionally in this order for every file; scope alone gates
/// participation.
pub fn builtin_rules() -> Vec<RuleSpec> {
	vec![
		// Common rules
		RuleSpec::new(
			"prefix podspec name fields",
			r#"\.(name|header_dir|module_name)(\s*=\s*["'])([^"']+)(["'])"#,
			".${1}${2}{tag}${3}${4}",
		)
		.skip_tagged(3),
		RuleSpec::new(
			"prefix dependency names",
			r#"(\.dependency\s+["'])(Yoga|React-|ReactCommon|RCT|FB)([^"']*["'])"#,
			"${1}{tag}${2}${3}",
		)
		.unless_followed_by(2, &["Folly", "-Folly"])
		.skip_tagged(2),
		RuleSpec::new(
			"strip source conditional block",
			r"source\s*=\s*\{[\s\S]+?end",
			"",
		),
		RuleSpec::new(
			"point source at local directory",
			r"(\.source\s*=\s*)\S+\n",
			"${1}{ :path => \".\" }\n",
		),
		// React-Core & ReactCommon
		RuleSpec::new(
			"prefix blob header_subspecs",
			r"\{(RCTBlobManager),(RCTFileReaderModule)\}",
			"{{tag}${1},{tag}${2}}",
		)
		.scoped(&["React-Core.podspec"]),
		RuleSpec::new(
			"prefix accessibility resources",
			r#""AccessibilityResources""#,
			"\"{tag}AccessibilityResources\"",
		)
		.scoped(&["React-Core.podspec"]),
		RuleSpec::new(
			"prefix private header search path",
			r"(Headers/Private/)(React-Core)",
			"${1}{tag}${2}",
		)
		.scoped(&["React-Core.podspec", "ReactCommon.podspec"]),
		// React-cxxreact
		RuleSpec::new(
			"prefix excluded sample module files",
			r#"\.exclude_files(\s*=\s*["'])(SampleCxxModule\.\*)(["'])"#,
			".exclude_files${1}{tag}${2}${3}",
		)
		.scoped(&["React-cxxreact.podspec"]),
		// Yoga
		RuleSpec::new(
			"prefix yoga source_files glob",
			r"\{(Yoga),(YGEnums),(YGMacros),(YGNode),(YGStyle),(YGValue)\}",
			"{{tag}${1},{tag}${2},{tag}${3},{tag}${4},{tag}${5},{tag}${6}}",
		)
		.scoped(&["Yoga.podspec"]),
		// FBReactNativeSpec
		RuleSpec::new(
			"prefix libraries header search path",
			r"(/Libraries/)(FBReactNativeSpec)",
			"${1}{tag}${2}",
		)
		.scoped(&["FBReactNativeSpec.podspec"]),
		RuleSpec::new(
			"disable codegen build phase script",
			r"(use_react_native_codegen!)",
			"# ${1}",
		)
		.scoped(&["FBReactNativeSpec.podspec"]),
	]
}
