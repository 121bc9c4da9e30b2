//! Podshift - CLI tool for rewriting podspec manifests into versioned
//! parallel copies.
//!
//! This library provides the core functionality for podshift, including:
//! - A rule-driven text-rewriting pipeline with file scoping
//! - Construction-time validation of patterns and capture-group references
//! - Extra-rule configuration via `.podshift.toml`
//! - File enumeration and read/transform/write plumbing
//!
//! # Example
//!
//! ```
//! use podshift::rules::Pipeline;
//!
//! let pipeline = Pipeline::new("ABI50_0_0").unwrap();
//! let rewritten = pipeline.transform(
//!     "React-Core.podspec",
//!     ".name = \"React-Core\"\n",
//! );
//! assert_eq!(rewritten, ".name = \"ABI50_0_0React-Core\"\n");
//! ```
//!
//! The pipeline is bound to one version tag at construction and is read-only
//! afterwards: applying it to one file never affects the result for another,
//! so a single instance can be shared across threads.

pub mod batch;
pub mod config;
pub mod error;
pub mod rules;

pub use error::{PodshiftError, Result};
