//! Configuration management for archlens.
//!
//! Query caps have built-in defaults. A YAML file can override them:
//!
//! ```yaml
//! limits:
//!   max_listed_edges: 1000
//!   max_cycles: 50
//!   max_hotspots: 20
//!   default_impact_depth: 3
//!   max_impact_depth: 5
//! ```
//!
//! The cycle hop range is not configurable; see [`CYCLE_HOPS`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Edge-hop lengths searched by cycle detection. Self-loops are excluded.
pub const CYCLE_HOPS: RangeInclusive<usize> = 2..=6;

/// Default cap on the edge listing.
pub const DEFAULT_MAX_LISTED_EDGES: usize = 1000;

/// Default cap on reported cycles.
pub const DEFAULT_MAX_CYCLES: usize = 50;

/// Default number of hotspots returned.
pub const DEFAULT_MAX_HOTSPOTS: usize = 20;

/// Impact depth used when the caller does not pass one.
pub const DEFAULT_IMPACT_DEPTH: usize = 3;

/// Ceiling for impact depth.
pub const DEFAULT_MAX_IMPACT_DEPTH: usize = 5;

/// Result caps and depth bounds applied by the query facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Maximum number of edges returned by the edge listing
    pub max_listed_edges: usize,

    /// Maximum number of cycles reported per repository
    pub max_cycles: usize,

    /// Number of hotspots returned
    pub max_hotspots: usize,

    /// Impact depth when none is requested
    pub default_impact_depth: usize,

    /// Impact depth ceiling
    pub max_impact_depth: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_listed_edges: DEFAULT_MAX_LISTED_EDGES,
            max_cycles: DEFAULT_MAX_CYCLES,
            max_hotspots: DEFAULT_MAX_HOTSPOTS,
            default_impact_depth: DEFAULT_IMPACT_DEPTH,
            max_impact_depth: DEFAULT_MAX_IMPACT_DEPTH,
        }
    }
}

impl QueryLimits {
    /// Check that every cap is usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a cap is zero or the default impact depth
    /// exceeds the ceiling.
    pub fn validate(&self) -> Result<()> {
        let caps = [
            ("max_listed_edges", self.max_listed_edges),
            ("max_cycles", self.max_cycles),
            ("max_hotspots", self.max_hotspots),
            ("default_impact_depth", self.default_impact_depth),
            ("max_impact_depth", self.max_impact_depth),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, value)| *value == 0) {
            return Err(Error::Config(format!("{name} must be at least 1")));
        }

        if self.default_impact_depth > self.max_impact_depth {
            return Err(Error::Config(format!(
                "default_impact_depth ({}) exceeds max_impact_depth ({})",
                self.default_impact_depth, self.max_impact_depth
            )));
        }

        Ok(())
    }

    /// Resolve a requested impact depth to the effective traversal depth.
    ///
    /// `None` selects the default depth. The result always lies in
    /// `1..=max_impact_depth`, whatever the caller asked for.
    #[must_use]
    pub fn clamp_depth(&self, requested: Option<i64>) -> usize {
        let ceiling = self.max_impact_depth.max(1);
        match requested {
            None => self.default_impact_depth.clamp(1, ceiling),
            Some(depth) if depth < 1 => 1,
            Some(depth) => usize::try_from(depth).map_or(ceiling, |d| d.min(ceiling)),
        }
    }
}

/// Archlens configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchlensConfig {
    /// Query caps
    pub limits: QueryLimits,
}

impl ArchlensConfig {
    /// Parse and validate configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the YAML is malformed or the limits are invalid.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.limits.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or `Error::Config` if
    /// it cannot be parsed or validated.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`ArchlensConfig::load`].
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::default()),
        }
    }
}
