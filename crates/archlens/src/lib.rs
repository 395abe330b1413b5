//! Archlens - repository-partitioned file dependency graphs.
//!
//! Static-analysis results arrive as batches of file-to-file dependency
//! edges, one repository at a time. Archlens keeps one directed graph per
//! repository in memory and answers architectural queries over it:
//!
//! - edge listing
//! - change impact (files reachable within a bounded depth)
//! - circular dependency detection
//! - hotspot ranking by dependency degree
//!
//! All access goes through [`QueryFacade`], which serializes writes per
//! repository while letting reads run concurrently.
//!
//! # Example
//!
//! ```no_run
//! use archlens::QueryFacade;
//! use archlens::domain::{DependencyBatch, EdgeDescriptor};
//!
//! # async fn demo() -> archlens::Result<()> {
//! let facade = QueryFacade::new();
//! facade
//!     .ingest(DependencyBatch::new(
//!         "my-repo",
//!         "run-1",
//!         vec![EdgeDescriptor::new("src/a.ts", "src/b.ts", "import")],
//!     ))
//!     .await?;
//!
//! let impact = facade.impact("my-repo", "src/a.ts", Some(2)).await;
//! assert_eq!(impact.total_impact, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod facade;
pub mod ingest;
pub mod store;
pub mod traversal;

pub use error::{Error, Result};
pub use facade::QueryFacade;
