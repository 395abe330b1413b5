//! The query facade: the one entry point that takes partition locks.
//!
//! # Locking
//!
//! Each repository partition is a `tokio::sync::RwLock`. Ingestion takes the
//! write lock of its partition for the duration of the batch; the four
//! queries take the read lock. Any number of queries on one repository run
//! together, a batch excludes everything else on that repository, and
//! tokio's write-preferring fairness keeps new readers from starting while a
//! batch is waiting. Operations on different repositories never contend.
//!
//! Validation happens before the write lock is taken, so a rejected batch
//! neither blocks readers nor mutates anything. A batch for a new repository
//! creates its partition already write-locked, so abandoning an ingest never
//! leaves an empty repository behind.
//!
//! Queries never fail: an unknown repository or file yields an empty result
//! without creating a partition. Caller-side timeouts can be layered on with
//! `tokio::time::timeout`; dropping a pending call abandons the lock wait.

use crate::config::{CYCLE_HOPS, QueryLimits};
use crate::domain::{
    CycleReport, DependencyBatch, EdgeListing, HotspotReport, ImpactReport, IngestReport, RepoId,
};
use crate::error::Result;
use crate::ingest;
use crate::store::{GraphStore, Partition};
use crate::traversal;
use tracing::{debug, info, warn};

/// Message returned by a successful ingestion.
pub const INGESTED_MESSAGE: &str = "dependencies ingested";

/// Shared entry point for ingestion and graph queries.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct QueryFacade {
    store: GraphStore,
    limits: QueryLimits,
}

impl QueryFacade {
    /// Create a facade over an empty store with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a facade over an empty store with custom limits.
    #[must_use]
    pub fn with_limits(limits: QueryLimits) -> Self {
        Self {
            store: GraphStore::new(),
            limits,
        }
    }

    /// The limits applied to queries.
    #[must_use]
    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Apply a batch of edge upserts to one repository, atomically.
    ///
    /// Returns the number of descriptors processed. An empty batch is valid
    /// and does not create a partition.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`Error::InvalidBatch` or
    /// `Error::InvalidDescriptor`) if any descriptor is malformed; the graph
    /// is left untouched.
    pub async fn ingest(&self, batch: DependencyBatch) -> Result<IngestReport> {
        let validated = ingest::validate(batch).inspect_err(|e| {
            warn!(error = %e, "Rejected dependency batch");
        })?;

        if !validated.is_empty() {
            let mut graph = self.store.write_partition(&validated.repo_id).await;
            let stats = validated.apply(&mut graph);

            info!(
                repo = %validated.repo_id,
                analysis_id = %validated.analysis_id,
                edges = stats.processed,
                inserted = stats.inserted,
                updated = stats.updated,
                "Ingested dependency batch"
            );
        }

        Ok(IngestReport {
            message: INGESTED_MESSAGE.to_string(),
            count: validated.len(),
        })
    }

    /// List a repository's edges in insertion order, capped.
    pub async fn list_edges(&self, repo_id: &str) -> EdgeListing {
        let Some(partition) = self.partition(repo_id) else {
            return EdgeListing::default();
        };
        let graph = partition.read().await;

        let edges = traversal::list_edges(&graph, self.limits.max_listed_edges);
        debug!(
            repo = repo_id,
            returned = edges.len(),
            stored = graph.edge_count(),
            "Listed edges"
        );

        EdgeListing {
            total: edges.len(),
            edges,
        }
    }

    /// Files downstream of `file_path`, within a clamped depth.
    ///
    /// `depth` defaults to the configured default and is clamped to
    /// `1..=max_impact_depth`.
    pub async fn impact(&self, repo_id: &str, file_path: &str, depth: Option<i64>) -> ImpactReport {
        let max_depth = self.limits.clamp_depth(depth);

        let affected_files = match self.partition(repo_id) {
            Some(partition) => {
                let graph = partition.read().await;
                traversal::affected_files(&graph, file_path, max_depth)
            }
            None => Vec::new(),
        };
        debug!(
            repo = repo_id,
            source = file_path,
            depth = max_depth,
            affected = affected_files.len(),
            "Computed impact"
        );

        ImpactReport {
            source: file_path.to_string(),
            total_impact: affected_files.len(),
            affected_files,
            max_depth,
        }
    }

    /// Circular dependencies of 2 to 6 hops, capped.
    pub async fn cycles(&self, repo_id: &str) -> CycleReport {
        let Some(partition) = self.partition(repo_id) else {
            return CycleReport::default();
        };
        let graph = partition.read().await;

        let cycles = traversal::find_cycles(&graph, CYCLE_HOPS, self.limits.max_cycles);
        debug!(repo = repo_id, cycles = cycles.len(), "Detected cycles");

        CycleReport {
            total: cycles.len(),
            cycles,
        }
    }

    /// Files ranked by distinct in+out degree, top N.
    pub async fn hotspots(&self, repo_id: &str) -> HotspotReport {
        let Some(partition) = self.partition(repo_id) else {
            return HotspotReport::default();
        };
        let graph = partition.read().await;

        let hotspots = traversal::rank_hotspots(&graph, self.limits.max_hotspots);
        debug!(repo = repo_id, hotspots = hotspots.len(), "Ranked hotspots");

        HotspotReport { hotspots }
    }

    /// Number of repositories holding data.
    #[must_use]
    pub fn repository_count(&self) -> usize {
        self.store.partition_count()
    }

    fn partition(&self, repo_id: &str) -> Option<Partition> {
        self.store.partition(&RepoId::from(repo_id))
    }
}
