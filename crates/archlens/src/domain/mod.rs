//! Domain types for the dependency graph.
//!
//! Input types ([`DependencyBatch`], [`EdgeDescriptor`]) use the wire names
//! emitted by analysis pipelines (`repoId`, `sourcePath`, `depType`, ...).
//! Result types mirror the response shapes of the five graph operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight assigned to an edge when the descriptor does not carry one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Identifier of a repository partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoId(pub String);

impl RepoId {
    /// Create a new repository ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RepoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One dependency edge as submitted by an analysis run.
///
/// Every field is optional on the wire so that a malformed descriptor can be
/// reported by position instead of failing deserialization of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeDescriptor {
    /// Path of the depending file
    pub source_path: Option<String>,

    /// Path of the file depended upon
    pub target_path: Option<String>,

    /// Dependency type (e.g. "import"); part of the edge identity
    pub dep_type: Option<String>,

    /// Edge weight, [`DEFAULT_EDGE_WEIGHT`] when absent
    pub weight: Option<f64>,
}

impl EdgeDescriptor {
    /// Create a descriptor with all required fields and the default weight.
    pub fn new(
        source_path: impl Into<String>,
        target_path: impl Into<String>,
        dep_type: impl Into<String>,
    ) -> Self {
        Self {
            source_path: Some(source_path.into()),
            target_path: Some(target_path.into()),
            dep_type: Some(dep_type.into()),
            weight: None,
        }
    }

    /// Set an explicit weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// A batch of edges produced by one analysis run against one repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyBatch {
    /// Repository the edges belong to
    pub repo_id: String,

    /// Analysis run that produced the edges
    pub analysis_id: String,

    /// Edges, applied in order
    pub edges: Vec<EdgeDescriptor>,
}

impl DependencyBatch {
    /// Create a batch.
    pub fn new(
        repo_id: impl Into<String>,
        analysis_id: impl Into<String>,
        edges: Vec<EdgeDescriptor>,
    ) -> Self {
        Self {
            repo_id: repo_id.into(),
            analysis_id: analysis_id.into(),
            edges,
        }
    }
}

/// A stored `DEPENDS_ON` edge with its endpoints and attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Depending file
    pub source: String,

    /// File depended upon
    pub target: String,

    /// Dependency type
    #[serde(rename = "type")]
    pub dep_type: String,

    /// Edge weight
    pub weight: f64,

    /// Analysis run that last wrote this edge
    pub analysis_id: String,

    /// Time of the last write
    pub updated_at: DateTime<Utc>,
}

/// Result of an ingestion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Status message
    pub message: String,

    /// Number of edge descriptors processed
    pub count: usize,
}

/// Edge as returned by the edge listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSummary {
    /// Depending file
    pub source: String,

    /// File depended upon
    pub target: String,

    /// Dependency type
    #[serde(rename = "type")]
    pub dep_type: String,

    /// Edge weight
    pub weight: f64,
}

impl From<Edge> for EdgeSummary {
    fn from(edge: Edge) -> Self {
        Self {
            source: edge.source,
            target: edge.target,
            dep_type: edge.dep_type,
            weight: edge.weight,
        }
    }
}

/// All edges of a repository, capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeListing {
    /// Edges in insertion order
    pub edges: Vec<EdgeSummary>,

    /// Number of edges returned
    pub total: usize,
}

/// A file reached by impact analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedFile {
    /// File path
    pub path: String,

    /// Shortest hop count from the source file
    pub distance: usize,
}

/// Result of impact analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// The file the analysis started from
    pub source: String,

    /// Distinct affected files ordered by ascending distance, then path
    pub affected_files: Vec<AffectedFile>,

    /// Number of affected files
    pub total_impact: usize,

    /// Effective traversal depth after clamping
    pub max_depth: usize,
}

/// Result of circular dependency detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    /// Each cycle as a node path list whose first and last element are equal
    pub cycles: Vec<Vec<String>>,

    /// Number of cycles returned
    pub total: usize,
}

/// Degree statistics for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// File path
    pub path: String,

    /// Distinct files this file depends on
    pub out_degree: usize,

    /// Distinct files depending on this file
    pub in_degree: usize,

    /// `out_degree + in_degree`
    pub total_degree: usize,
}

/// Result of hotspot ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotReport {
    /// Highest-degree files, descending by total degree then ascending by path
    pub hotspots: Vec<Hotspot>,
}
