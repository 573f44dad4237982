//! # Clinbridge Core
//!
//! Turns tabular clinical extracts into FHIR R4 resources and exchanges them with a
//! FHIR repository.
//!
//! This crate contains:
//! - Typed source rows and the CSV table loader
//! - Record builders (one row in, FHIR resources out)
//! - Bundle assembly across all tables, with a per-row failure policy
//! - An HTTP client for creating and reading resources on a repository
//! - Plain-text summaries of sent and stored resources
//!
//! **No process concerns**: argument parsing, environment loading and the tracing
//! subscriber belong to the binaries (`clinbridge-cli` and the root demo runner).

pub mod builders;
pub mod bundle;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod report;
pub mod rows;
pub mod tables;

pub use bundle::{build_bundle, AssembledBundle, BundleAssembler, RowPolicy, SkippedRow};
pub use client::RepositoryClient;
pub use config::{resolve_base_url, CoreConfig};
pub use error::{CoreError, CoreResult};
pub use report::{render_comparison, render_resource, summarise, SummaryField};
pub use tables::{LoadedTables, SourceTables};
