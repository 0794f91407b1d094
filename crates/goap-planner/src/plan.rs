use goap_core::{Action, Goal, StateKey, WorldState};
use serde::Serialize;

/// Counters describing one planning call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped and examined.
    pub iterations: usize,
    /// Child nodes built from valid actions.
    pub generated: usize,
    /// Children pushed onto the open queue.
    pub enqueued: usize,
    /// Children dropped because their snapshot was already reached as cheaply.
    pub pruned_duplicates: usize,
    /// Children dropped by the cost or distance cutoffs.
    pub pruned_limits: usize,
    /// Queue entries skipped because a cheaper path to their snapshot was found later.
    pub stale: usize,
}

/// An ordered action sequence and the state it is predicted to produce.
///
/// Plans are produced once per planning call and never modified.
#[derive(Debug, Clone)]
pub struct Plan<K: StateKey> {
    pub(crate) agent: String,
    pub(crate) goal: Goal<K>,
    pub(crate) actions: Vec<Action<K>>,
    pub(crate) predicted: WorldState<K>,
    pub(crate) cost: f64,
    pub(crate) is_best_effort: bool,
    pub(crate) stats: SearchStats,
}

impl<K: StateKey> Plan<K> {
    /// Name of the agent the plan was made for.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn goal(&self) -> &Goal<K> {
        &self.goal
    }

    pub fn actions(&self) -> &[Action<K>] {
        &self.actions
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(Action::name).collect()
    }

    pub fn predicted_states(&self) -> &WorldState<K> {
        &self.predicted
    }

    /// Accumulated action cost along the plan.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The plan only moves toward the goal without reaching it.
    pub fn is_best_effort(&self) -> bool {
        self.is_best_effort
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
