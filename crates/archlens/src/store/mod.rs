//! Repository-partitioned graph storage.
//!
//! All data is held in RAM and **lost when the process exits**. The store is
//! owned by whoever constructs it (normally a [`crate::QueryFacade`]); there
//! is no process-global instance, so each test can build a fresh one.
//!
//! # Architecture
//!
//! - [`RepoGraph`]: one repository's directed multigraph (`petgraph::DiGraph`
//!   plus path and edge-key indexes)
//! - [`Partition`]: a `RepoGraph` behind `Arc<tokio::sync::RwLock<>>`, the
//!   unit of locking
//! - [`GraphStore`]: the registry mapping repository IDs to partitions
//!
//! # Thread Safety
//!
//! The registry lock is a short-lived `std::sync::RwLock` that is only held
//! while looking up or inserting a partition handle, never across an await
//! point. Callers clone the [`Partition`] out of the registry and then lock
//! the partition itself, so work on different repositories never serializes.
//! Partitions are created on first write, already holding the writer's
//! lock, and never removed.

mod partition;

pub use partition::{DependsOn, EdgeWrite, RepoGraph, UpsertOutcome};

use crate::domain::RepoId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

/// A shared, lockable repository partition.
pub type Partition = Arc<RwLock<RepoGraph>>;

/// Registry of repository partitions.
#[derive(Debug, Default)]
pub struct GraphStore {
    partitions: std::sync::RwLock<HashMap<RepoId, Partition>>,
}

impl GraphStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the partition for a repository, if any edge was ever written to it.
    #[must_use]
    pub fn partition(&self, repo: &RepoId) -> Option<Partition> {
        self.partitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(repo)
            .cloned()
    }

    /// Write-lock a repository's partition, creating it if needed.
    ///
    /// A new partition is inserted into the registry already write-locked by
    /// the caller, so nothing can observe it empty. Dropping the returned
    /// future before it resolves never leaves an empty partition behind: the
    /// only suspension point is waiting on a partition that already exists.
    pub async fn write_partition(&self, repo: &RepoId) -> OwnedRwLockWriteGuard<RepoGraph> {
        if let Some(partition) = self.partition(repo) {
            return partition.write_owned().await;
        }

        let partition = {
            let mut partitions = self
                .partitions
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            // Another writer may have created it between the two lock acquisitions
            match partitions.entry(repo.clone()) {
                Entry::Occupied(entry) => Arc::clone(entry.get()),
                Entry::Vacant(entry) => {
                    let partition = Arc::new(RwLock::new(RepoGraph::new()));
                    // Unshared until inserted, so the lock is free
                    if let Ok(guard) = Arc::clone(&partition).try_write_owned() {
                        debug!(repo = %repo, "Creating repository partition");
                        entry.insert(partition);
                        return guard;
                    }
                    Arc::clone(entry.insert(partition))
                }
            }
        };

        partition.write_owned().await
    }

    /// Number of partitions.
    #[must_use]
    pub fn partition_count(&self) -> usize {
        self.partitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
