//! Batch ingestion with merge semantics.
//!
//! Ingestion runs in two phases, so a rejected batch never touches the
//! graph:
//!
//! 1. [`validate`] checks every descriptor without holding any lock and
//!    produces a [`ValidatedBatch`], or reports the first offending
//!    descriptor.
//! 2. [`ValidatedBatch::apply`] upserts each edge in order into the
//!    repository partition. It cannot fail.

use crate::domain::{DEFAULT_EDGE_WEIGHT, DependencyBatch, EdgeDescriptor, RepoId};
use crate::error::{Error, Result};
use crate::store::{EdgeWrite, RepoGraph, UpsertOutcome};
use chrono::Utc;

/// An edge whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEdge {
    /// Depending file
    pub source: String,
    /// File depended upon
    pub target: String,
    /// Dependency type
    pub dep_type: String,
    /// Edge weight
    pub weight: f64,
}

/// A batch that passed validation and can be applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch {
    /// Target repository
    pub repo_id: RepoId,
    /// Analysis run attributed to every written edge
    pub analysis_id: String,
    /// Edges in submission order
    pub edges: Vec<ValidatedEdge>,
}

/// Counts produced by applying a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Descriptors processed
    pub processed: usize,
    /// Edges that did not exist before
    pub inserted: usize,
    /// Existing edges whose attributes were overwritten
    pub updated: usize,
}

/// Validate a batch without mutating anything.
///
/// # Errors
///
/// - `Error::InvalidBatch` if the repository or analysis ID is blank
/// - `Error::InvalidDescriptor` for the first descriptor missing a source
///   path, target path, or dependency type, or carrying a non-finite weight
pub fn validate(batch: DependencyBatch) -> Result<ValidatedBatch> {
    if is_blank(&batch.repo_id) {
        return Err(Error::InvalidBatch {
            reason: "repoId is required".to_string(),
        });
    }
    if is_blank(&batch.analysis_id) {
        return Err(Error::InvalidBatch {
            reason: "analysisId is required".to_string(),
        });
    }

    let edges = batch
        .edges
        .into_iter()
        .enumerate()
        .map(|(index, descriptor)| validate_descriptor(index, descriptor))
        .collect::<Result<Vec<_>>>()?;

    Ok(ValidatedBatch {
        repo_id: RepoId::new(batch.repo_id),
        analysis_id: batch.analysis_id,
        edges,
    })
}

fn validate_descriptor(index: usize, descriptor: EdgeDescriptor) -> Result<ValidatedEdge> {
    let required = |value: Option<String>, field: &'static str| {
        value
            .filter(|v| !is_blank(v))
            .ok_or(Error::InvalidDescriptor { index, field })
    };

    let source = required(descriptor.source_path, "sourcePath")?;
    let target = required(descriptor.target_path, "targetPath")?;
    let dep_type = required(descriptor.dep_type, "depType")?;

    let weight = descriptor.weight.unwrap_or(DEFAULT_EDGE_WEIGHT);
    if !weight.is_finite() {
        return Err(Error::InvalidDescriptor {
            index,
            field: "weight",
        });
    }

    Ok(ValidatedEdge {
        source,
        target,
        dep_type,
        weight,
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ValidatedBatch {
    /// Number of edges in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the batch carries no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Upsert every edge into `graph`, in order.
    ///
    /// All edges of one batch share a single write timestamp.
    pub fn apply(&self, graph: &mut RepoGraph) -> ApplyStats {
        let now = Utc::now();
        let mut stats = ApplyStats::default();

        for edge in &self.edges {
            let outcome = graph.upsert_edge(
                EdgeWrite {
                    source: &edge.source,
                    target: &edge.target,
                    dep_type: &edge.dep_type,
                    weight: edge.weight,
                    analysis_id: &self.analysis_id,
                },
                now,
            );
            stats.processed += 1;
            match outcome {
                UpsertOutcome::Inserted(_) => stats.inserted += 1,
                UpsertOutcome::Updated(_) => stats.updated += 1,
            }
        }

        stats
    }
}
