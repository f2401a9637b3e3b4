//! # MAGMA scraper
//!
//! Turns the public volcanic-activity pages of MAGMA Indonesia into typed
//! records, and joins the activity-level listing with per-mountain reports
//! and a geocoded registry into a map aggregate.
//!
//! ## Pipeline
//!
//! ```text
//! DocumentFetcher -> scraper::Html -> extractor -> [enrichment] -> record
//! ```
//!
//! The aggregate adds one status-table fetch, one registry read and a bounded
//! fan-out of detail fetches.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use magma::{HttpFetcher, Magma, MemoryRegistry, SourceConfig};
//!
//! let magma = Magma::new(
//!     Arc::new(HttpFetcher::new(Duration::from_secs(30))?),
//!     Arc::new(MemoryRegistry::new()),
//!     SourceConfig::default(),
//! );
//! let levels = magma.activity_levels().await?;
//! let map = magma.aggregate().await?;
//! ```
//!
//! ## Modules
//!
//! - [`extractors`] - one stateless transform per page layout
//! - [`traits`] - fetcher and registry seams
//! - [`fetchers`], [`registry`] - their implementations
//! - [`testing`] - mocks and fixtures

pub mod aggregate;
pub mod client;
pub mod config;
pub mod dom;
pub mod enrichment;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod normalize;
pub mod registry;
pub mod testing;
pub mod traits;
pub mod types;

pub use client::Magma;
pub use config::{AggregateConfig, FailurePolicy, SourceConfig, DEFAULT_BASE_URL};
pub use error::{FetchError, ParseError, RegistryError, Result, ScrapeError, SourceError};
pub use extractors::{extract, DocumentShape, Extracted};
pub use fetchers::{HttpFetcher, MockFetcher};
pub use registry::MemoryRegistry;
#[cfg(feature = "postgres")]
pub use registry::PostgresRegistry;
pub use traits::{DocumentFetcher, MountainRegistry};
pub use types::*;
