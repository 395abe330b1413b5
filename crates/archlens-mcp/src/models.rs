//! MCP request and response models.
//!
//! Tool parameters use the same camelCase field names as the archlens batch
//! format, so a batch file can be passed to `ingest` unchanged. Query
//! responses are the archlens report types themselves.

use archlens::domain::{DependencyBatch, EdgeDescriptor};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Service name reported by `health` and the server info.
pub const SERVICE_NAME: &str = "archlens-mcp";

/// One dependency edge in an `ingest` request.
///
/// Fields are optional in the schema so that a missing field is reported
/// against its descriptor index rather than as a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeParams {
    /// Path of the depending file.
    pub source_path: Option<String>,

    /// Path of the file depended upon.
    pub target_path: Option<String>,

    /// Dependency type, e.g. "import" or "call".
    pub dep_type: Option<String>,

    /// Edge weight (defaults to 1.0).
    pub weight: Option<f64>,
}

impl From<EdgeParams> for EdgeDescriptor {
    fn from(edge: EdgeParams) -> Self {
        Self {
            source_path: edge.source_path,
            target_path: edge.target_path,
            dep_type: edge.dep_type,
            weight: edge.weight,
        }
    }
}

/// Parameters for the `ingest` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestParams {
    /// Repository the edges belong to.
    pub repo_id: String,

    /// Identifier of the analysis run that produced the edges.
    pub analysis_id: String,

    /// Edges to upsert, applied all-or-nothing.
    #[serde(default)]
    pub edges: Vec<EdgeParams>,
}

impl From<IngestParams> for DependencyBatch {
    fn from(params: IngestParams) -> Self {
        Self::new(
            params.repo_id,
            params.analysis_id,
            params.edges.into_iter().map(Into::into).collect(),
        )
    }
}

/// Parameters for the repository-scoped query tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepoParams {
    /// Repository to query.
    pub repo_id: String,
}

/// Parameters for the `impact` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactParams {
    /// Repository to query.
    pub repo_id: String,

    /// File whose downstream files are wanted.
    pub file_path: String,

    /// Maximum hop count, clamped to 1..=5 (defaults to 3).
    pub depth: Option<i64>,
}

/// Response from the `health` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "healthy" while the server answers.
    pub status: String,

    /// Service name.
    pub service: String,

    /// Time of the check (RFC 3339).
    pub timestamp: String,

    /// Number of repositories holding data.
    pub repositories: usize,
}
