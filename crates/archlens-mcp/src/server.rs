//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp.

use crate::error::Error;
use crate::models::{ImpactParams, IngestParams, RepoParams, SERVICE_NAME};
use crate::tools::Tools;
use archlens::QueryFacade;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::{
    ErrorData as McpError, ServiceExt, handler::server::ServerHandler, tool, tool_handler,
    tool_router,
};
use std::sync::Arc;

/// The archlens MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct ArchlensMcpServer {
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ArchlensMcpServer {
    /// Upsert a batch of dependency edges.
    #[tool(
        description = "Upsert a batch of file dependency edges into a repository. Edges are keyed by (sourcePath, targetPath, depType); the whole batch is rejected if any edge is malformed."
    )]
    async fn ingest(
        &self,
        Parameters(params): Parameters<IngestParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.tools.ingest(params).await?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    /// List dependency edges.
    #[tool(description = "List a repository's dependency edges (at most 1000).")]
    async fn list_edges(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self.tools.list_edges(&params.repo_id).await;
        Ok(CallToolResult::success(vec![Content::json(listing)?]))
    }

    /// Downstream impact of a file.
    #[tool(
        description = "Find files reachable from a file by following dependencies, with their shortest hop distance. Depth defaults to 3 and is clamped to 1..5."
    )]
    async fn impact(
        &self,
        Parameters(params): Parameters<ImpactParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.tools.impact(&params).await;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    /// Circular dependencies.
    #[tool(
        description = "Detect circular dependencies of 2 to 6 files in a repository (at most 50 cycles)."
    )]
    async fn cycles(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.tools.cycles(&params.repo_id).await;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    /// Architectural hotspots.
    #[tool(
        description = "Rank a repository's files by number of distinct dependencies plus dependents (top 20)."
    )]
    async fn hotspots(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.tools.hotspots(&params.repo_id).await;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    /// Liveness check.
    #[tool(description = "Report server liveness and the number of loaded repositories.")]
    async fn health(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::json(
            self.tools.health(),
        )?]))
    }
}

impl ArchlensMcpServer {
    /// Create a server over the given facade.
    #[must_use]
    pub fn new(facade: Arc<QueryFacade>) -> Self {
        Self {
            tools: Arc::new(Tools::new(facade)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the tools.
    #[must_use]
    pub fn tools(&self) -> &Arc<Tools> {
        &self.tools
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns `Error::Mcp` if the handshake fails or the service task
    /// terminates abnormally.
    pub async fn run(self) -> crate::Result<()> {
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        tracing::info!(?reason, "MCP session ended");

        Ok(())
    }
}

impl Default for ArchlensMcpServer {
    fn default() -> Self {
        Self::new(Arc::new(QueryFacade::new()))
    }
}

#[tool_handler]
impl ServerHandler for ArchlensMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVICE_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Archlens dependency graph server. Ingest edges per repository, then query impact, cycles, and hotspots."
                    .into(),
            ),
        }
    }
}
