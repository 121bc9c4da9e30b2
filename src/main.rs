use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use podshift::batch::{collect_podspecs, process_file};
use podshift::config::load_extra_rules;
use podshift::rules::{Pipeline, RuleSpec, Scope, builtin_rules};

/// Tag used when validating the rule table without a caller-supplied tag.
/// Validation only needs *some* literal to bind; the value never matters.
const PLACEHOLDER_TAG: &str = "ABI0_0_0";

#[derive(Parser)]
#[command(name = "podshift")]
#[command(
	author,
	version,
	about = "Rewrites podspec manifests into versioned parallel copies"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Version tag to interpolate into the rewrite rules
	#[arg(long, value_name = "TAG", global = true)]
	tag: Option<String>,

	/// Extra rules file (default: .podshift.toml in the current or home directory)
	#[arg(long, value_name = "FILE", global = true)]
	rules: Option<PathBuf>,

	/// Write rewritten copies into this directory
	#[arg(long, value_name = "DIR", conflicts_with_all = ["in_place", "dry_run"])]
	out_dir: Option<PathBuf>,

	/// Overwrite the input files
	#[arg(long, conflicts_with = "dry_run")]
	in_place: bool,

	/// Report which files would change without writing anything
	#[arg(long)]
	dry_run: bool,

	/// Podspec files or directories to process (default: current directory)
	#[arg(value_name = "PATH")]
	paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Rule table inspection commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// Display the effective rule table
	Show,
	/// Compile the effective rule table and report any errors
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let mut cli = Cli::parse();

	if let Some(command) = cli.command.take() {
		return match command {
			Commands::Rules { action } => match action {
				RulesAction::Show => handle_rules_show(cli.rules.as_deref()),
				RulesAction::Validate => {
					handle_rules_validate(cli.rules.as_deref(), cli.tag.as_deref())
				}
			},
		};
	}

	handle_process(cli)
}

/// Built-in rules plus any configured extras, in application order.
fn effective_rules(explicit_config: Option<&std::path::Path>) -> Result<Vec<RuleSpec>> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let extra =
		load_extra_rules(explicit_config, &cwd).context("Failed to load extra rules")?;

	let mut specs = builtin_rules();
	specs.extend(extra);
	Ok(specs)
}

fn handle_rules_show(config: Option<&std::path::Path>) -> Result<ExitCode> {
	let specs = effective_rules(config)?;

	println!("Effective rule table ({} rules):\n", specs.len());
	for (index, spec) in specs.iter().enumerate() {
		println!("Rule {}: {}", index, spec.intent);
		println!("  pattern:  {}", spec.pattern);
		println!("  template: {}", spec.template);
		match &spec.scope {
			Scope::All => println!("  scope:    all files"),
			Scope::Files(names) => println!("  scope:    {}", names.join(", ")),
		}
		if let Some(ref guard) = spec.unless_followed_by {
			println!(
				"  unless group {} followed by: {}",
				guard.group,
				guard.suffixes.join(", ")
			);
		}
		if let Some(group) = spec.skip_tagged_group {
			println!("  skipped when group {} already carries the tag", group);
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_validate(
	config: Option<&std::path::Path>,
	tag: Option<&str>,
) -> Result<ExitCode> {
	let specs = effective_rules(config)?;
	let count = specs.len();

	match Pipeline::with_rules(tag.unwrap_or(PLACEHOLDER_TAG), specs) {
		Ok(_) => {
			println!("Rule table OK ({} rules)", count);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Rule table error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_process(cli: Cli) -> Result<ExitCode> {
	let tag = cli
		.tag
		.ok_or_else(|| anyhow::anyhow!("--tag is required to process files"))?;

	if cli.out_dir.is_none() && !cli.in_place && !cli.dry_run {
		anyhow::bail!("Choose an output mode: --out-dir, --in-place, or --dry-run");
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let specs = effective_rules(cli.rules.as_deref())?;
	let pipeline =
		Pipeline::with_rules(&tag, specs).context("Failed to compile rule table")?;

	let paths = if cli.paths.is_empty() {
		vec![cwd]
	} else {
		cli.paths
	};
	let files = collect_podspecs(&paths).context("Failed to enumerate podspec files")?;

	if files.is_empty() {
		println!("No podspec files found.");
		return Ok(ExitCode::SUCCESS);
	}

	if let Some(ref out_dir) = cli.out_dir {
		std::fs::create_dir_all(out_dir)
			.with_context(|| format!("Failed to create {}", out_dir.display()))?;
	}

	let mut changed = 0usize;
	let mut failed = 0usize;

	for src in &files {
		let dest = if cli.dry_run {
			None
		} else if cli.in_place {
			Some(src.clone())
		} else {
			// out_dir is guaranteed set by the mode check above
			let out_dir = cli.out_dir.as_ref().unwrap();
			let file_name = src
				.file_name()
				.ok_or_else(|| anyhow::anyhow!("Path has no file name: {}", src.display()))?;
			Some(out_dir.join(file_name))
		};

		// Per-file errors are reported but don't abort the batch
		match process_file(&pipeline, src, dest.as_deref()) {
			Ok(outcome) => {
				let verb = match (cli.dry_run, outcome.changed) {
					(true, true) => "would rewrite",
					(false, true) => "rewrote",
					(_, false) => "unchanged",
				};
				println!("{} {}", verb, src.display());
				if outcome.changed {
					changed += 1;
				}
			}
			Err(e) => {
				eprintln!("error: {}: {}", src.display(), e);
				failed += 1;
			}
		}
	}

	println!(
		"{} file(s) processed, {} changed, {} failed",
		files.len(),
		changed,
		failed
	);

	if failed > 0 {
		Ok(ExitCode::FAILURE)
	} else {
		Ok(ExitCode::SUCCESS)
	}
}
