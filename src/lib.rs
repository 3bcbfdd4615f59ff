//! # orcid-works
//!
//! ORCID publication harvester: fetches researcher profiles, normalizes them
//! into a small canonical schema and renders CSV, JSON, JSONL and HTML.
//!
//! ## Modules
//!
//! - [`orcid`] - Registry client and batch lookup
//! - [`normalize`] - Raw profile to [`model::PersonRecord`]
//! - [`extract`] - Identity, affiliation and publication extractors
//! - [`json_path`] - Null-safe navigation into registry JSON
//! - [`dedup`] - Canonical deduplication
//! - [`flatten`] - One row per publication
//! - [`render`] - Output formats
//! - [`artifacts`] - Rendering and saving all outputs
//! - [`identifiers`] - Identifier list loading
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orcid_works::orcid::{fetch_all, BatchOptions, ClientConfig, OrcidClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OrcidClient::new(&ClientConfig::default())?;
//!     let ids = vec!["0000-0002-1825-0097".to_string()];
//!     let report = fetch_all(&client, &ids, &BatchOptions::default()).await?;
//!     println!("{}", orcid_works::render::render_jsonl(&report.records)?);
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod identifiers;
pub mod json_path;
pub mod model;
pub mod normalize;
pub mod orcid;
pub mod render;

pub use error::{OrcidError, Result};
pub use model::{Affiliation, FlatRow, IdentityInfo, PersonRecord, Publication};
