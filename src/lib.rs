//! Game asset extractor library.
//!
//! This crate resolves a game version against the public version manifest,
//! extracts the `assets` entries of its client archive, and downloads every
//! content-addressed object listed in its asset index into one directory
//! tree. It backs the `mcasset-extractor` CLI binary and can be driven
//! programmatically with stub transports for testing.
//!
//! # Modules
//!
//! - [`asset_index`] - Asset index model and validated content hashes
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Fixed endpoints, layout constants, and failure policy
//! - [`download`] - Content-addressed bulk object download
//! - [`error`] - Fatal error types
//! - [`extraction`] - Streaming client archive extraction
//! - [`fetch`] - HTTP transport abstraction and stream copying
//! - [`manifest`] - Version manifest model and label resolution
//! - [`output`] - Status and failure line output
//! - [`pipeline`] - Phase orchestration and run summary
//! - [`version_info`] - Per-version info document model

pub mod asset_index;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod version_info;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
