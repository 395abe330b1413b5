//! MCP server for the archlens dependency graph.
//!
//! This crate exposes an in-memory [`archlens::QueryFacade`] to MCP clients
//! over stdio. Graph state lives for the lifetime of the server process.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling. Tool calls
//! are forwarded to a shared facade, which owns the per-repository locks.
//!
//! # Tools
//!
//! ## Ingestion
//! - `ingest` - Upsert a batch of dependency edges into a repository
//!
//! ## Queries
//! - `list_edges` - List a repository's edges
//! - `impact` - Files downstream of a file, by hop distance
//! - `cycles` - Circular dependencies
//! - `hotspots` - Most connected files
//!
//! ## Service
//! - `health` - Liveness and repository count

pub mod error;
pub mod models;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::ArchlensMcpServer;
