//! Command execution.

use super::{Cli, Commands, display};
use crate::config::ArchlensConfig;
use crate::domain::{
    CycleReport, DependencyBatch, EdgeListing, HotspotReport, ImpactReport, IngestReport,
};
use crate::facade::QueryFacade;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Result of one CLI command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    /// Per-batch ingestion results, keyed by repository
    Ingest(Vec<(String, IngestReport)>),
    /// Edge listing
    Edges(EdgeListing),
    /// Impact analysis
    Impact(ImpactReport),
    /// Cycle detection
    Cycles(CycleReport),
    /// Hotspot ranking
    Hotspots(HotspotReport),
}

impl Cli {
    /// Execute the parsed command, printing its result.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or a batch file cannot be loaded,
    /// or if a batch is rejected.
    pub async fn execute(&self) -> Result<ExitCode> {
        let config = ArchlensConfig::load_or_default(self.config.as_deref())
            .await
            .context("Failed to load configuration")?;
        let facade = QueryFacade::with_limits(config.limits);

        let ingested = load_facade(&facade, &self.batches).await?;
        let output = run_command(&facade, &self.command, ingested).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            display::print_output(&output);
        }

        let failed = matches!(
            (&self.command, &output),
            (Commands::Cycles { fail_on_cycles: true, .. }, QueryOutput::Cycles(report))
                if report.total > 0
        );
        Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }
}

/// Load and ingest each batch file, in order.
///
/// # Errors
///
/// Fails on the first file that cannot be read, decoded, or ingested.
/// Batches before it stay applied.
pub async fn load_facade(
    facade: &QueryFacade,
    batches: &[impl AsRef<Path>],
) -> Result<Vec<(String, IngestReport)>> {
    let mut reports = Vec::with_capacity(batches.len());

    for path in batches {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read batch file {}", path.display()))?;
        let batch: DependencyBatch = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse batch file {}", path.display()))?;

        let repo_id = batch.repo_id.clone();
        let report = facade
            .ingest(batch)
            .await
            .with_context(|| format!("Batch {} was rejected", path.display()))?;
        reports.push((repo_id, report));
    }

    Ok(reports)
}

/// Run a command against a loaded facade.
///
/// `ingested` holds the reports from [`load_facade`]; `Commands::Ingest`
/// returns them as its output and runs no query.
pub async fn run_command(
    facade: &QueryFacade,
    command: &Commands,
    ingested: Vec<(String, IngestReport)>,
) -> QueryOutput {
    match command {
        Commands::Ingest => QueryOutput::Ingest(ingested),
        Commands::Edges { repo } => QueryOutput::Edges(facade.list_edges(repo).await),
        Commands::Impact { repo, file, depth } => {
            QueryOutput::Impact(facade.impact(repo, file, *depth).await)
        }
        Commands::Cycles { repo, .. } => QueryOutput::Cycles(facade.cycles(repo).await),
        Commands::Hotspots { repo } => QueryOutput::Hotspots(facade.hotspots(repo).await),
    }
}
