//! MCP tool implementations.
//!
//! Each tool is a thin call into the shared [`QueryFacade`]; locking and
//! result caps are applied there.

use crate::error::Result;
use crate::models::{HealthResponse, ImpactParams, IngestParams, SERVICE_NAME};
use archlens::QueryFacade;
use archlens::domain::{CycleReport, EdgeListing, HotspotReport, ImpactReport, IngestReport};
use chrono::Utc;
use std::sync::Arc;

/// Tool implementations for the archlens MCP server.
#[derive(Debug, Clone)]
pub struct Tools {
    facade: Arc<QueryFacade>,
}

impl Tools {
    /// Create a new Tools instance over the given facade.
    pub fn new(facade: Arc<QueryFacade>) -> Self {
        Self { facade }
    }

    /// The shared facade.
    #[must_use]
    pub fn facade(&self) -> &Arc<QueryFacade> {
        &self.facade
    }

    /// Upsert a batch of edges into one repository.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any descriptor is malformed; nothing is
    /// written in that case.
    pub async fn ingest(&self, params: IngestParams) -> Result<IngestReport> {
        Ok(self.facade.ingest(params.into()).await?)
    }

    /// List a repository's edges.
    pub async fn list_edges(&self, repo_id: &str) -> EdgeListing {
        self.facade.list_edges(repo_id).await
    }

    /// Files downstream of a file.
    pub async fn impact(&self, params: &ImpactParams) -> ImpactReport {
        self.facade
            .impact(&params.repo_id, &params.file_path, params.depth)
            .await
    }

    /// Circular dependencies in a repository.
    pub async fn cycles(&self, repo_id: &str) -> CycleReport {
        self.facade.cycles(repo_id).await
    }

    /// Most connected files in a repository.
    pub async fn hotspots(&self, repo_id: &str) -> HotspotReport {
        self.facade.hotspots(repo_id).await
    }

    /// Liveness report.
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            repositories: self.facade.repository_count(),
        }
    }
}
