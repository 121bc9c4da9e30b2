//! File plumbing around the rewrite engine.
//!
//! This module handles:
//! - Enumerating candidate podspec files from CLI paths
//! - Reading a manifest, running the pipeline, writing the result
//!
//! The engine itself performs no I/O; everything filesystem-shaped lives
//! here so `Pipeline::transform` stays a pure function.

use crate::error::{PodshiftError, Result};
use crate::rules::Pipeline;
use std::path::{Path, PathBuf};

/// File extension identifying a manifest candidate.
pub const PODSPEC_EXTENSION: &str = "podspec";

/// Expand CLI paths into the list of podspec files to process.
///
/// A directory contributes its immediate `*.podspec` children in sorted
/// order; a file path is taken as-is regardless of extension. A missing
/// path is an error.
pub fn collect_podspecs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for path in paths {
		if path.is_dir() {
			let entries =
				std::fs::read_dir(path).map_err(|source| PodshiftError::DirReadError {
					path: path.clone(),
					source,
				})?;

			let mut children = Vec::new();
			for entry in entries {
				let entry = entry.map_err(|source| PodshiftError::DirReadError {
					path: path.clone(),
					source,
				})?;
				let child = entry.path();
				if child.is_file()
					&& child.extension().and_then(|e| e.to_str()) == Some(PODSPEC_EXTENSION)
				{
					children.push(child);
				}
			}
			children.sort();
			files.extend(children);
		} else if path.is_file() {
			files.push(path.clone());
		} else {
			return Err(PodshiftError::TargetNotFound { path: path.clone() });
		}
	}

	Ok(files)
}

/// Result of processing one manifest.
#[derive(Debug)]
pub struct FileOutcome {
	/// The source file that was read.
	pub path: PathBuf,

	/// Whether the rewritten content differs from the input.
	pub changed: bool,
}

/// Read one manifest, run the pipeline over it, and write the result.
///
/// `dest` of `None` is a dry run: the transform still executes so `changed`
/// is accurate, but nothing is written. The file name fed to the pipeline's
/// scope check is the source file's final path component.
pub fn process_file(pipeline: &Pipeline, src: &Path, dest: Option<&Path>) -> Result<FileOutcome> {
	let content = std::fs::read_to_string(src).map_err(|source| PodshiftError::FileReadError {
		path: src.to_path_buf(),
		source,
	})?;

	let file_name = src
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_default();

	let rewritten = pipeline.transform(&file_name, &content);
	let changed = rewritten != content;

	if let Some(dest) = dest {
		std::fs::write(dest, &rewritten).map_err(|source| PodshiftError::FileWriteError {
			path: dest.to_path_buf(),
			source,
		})?;
	}

	Ok(FileOutcome {
		path: src.to_path_buf(),
		changed,
	})
}
