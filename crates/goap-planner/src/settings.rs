//! Planner limits and tuning, loadable from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Limits for a single planning call.
///
/// Searches are bounded only by these limits; there is no wall-clock timeout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Nodes popped from the open queue before giving up.
    ///
    /// Too low misses longer plans; too high wastes time when no plan exists.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Branches whose heuristic distance exceeds this are not explored.
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,

    /// Maximum number of actions in a plan. `None` is unbounded.
    pub max_actions: Option<usize>,

    /// Maximum accumulated action cost of a plan. `None` is unbounded.
    pub max_cost: Option<f64>,

    /// Heuristic charge for each unmet objective without a custom distance function.
    #[serde(default = "default_unmet_penalty")]
    pub unmet_penalty: f64,
}

fn default_max_iterations() -> usize {
    1000
}
fn default_max_distance() -> f64 {
    10.0
}
fn default_unmet_penalty() -> f64 {
    2.0
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            max_distance: default_max_distance(),
            max_actions: None,
            max_cost: None,
            unmet_penalty: default_unmet_penalty(),
        }
    }
}

impl PlanSettings {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = Some(max_actions);
        self
    }

    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    pub fn with_unmet_penalty(mut self, unmet_penalty: f64) -> Self {
        self.unmet_penalty = unmet_penalty;
        self
    }

    pub(crate) fn allows_depth(&self, depth: usize) -> bool {
        self.max_actions.map_or(true, |max| depth < max)
    }

    pub(crate) fn exceeds_cost(&self, cost: f64) -> bool {
        self.max_cost.is_some_and(|max| cost > max)
    }

    /// Parse settings from a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse planner settings")
    }

    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read planner settings from {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse planner settings from {}", path.display()))
    }
}
