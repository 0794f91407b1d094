//! Search nodes and the arena that owns them.

use goap_core::{Goal, Result, StateKey, WorldState};

/// Handle to a [`Step`] inside a [`StepArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(usize);

impl StepId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the search tree: a predicted state and how it was reached.
#[derive(Debug, Clone)]
pub struct Step<K: StateKey> {
    pub previous: Option<StepId>,
    /// Index into the agent's action list; `None` for the root.
    pub action: Option<usize>,
    /// Full predicted state (not a diff), so it can be hashed for duplicate pruning.
    pub predicted: WorldState<K>,
    pub cost: f64,
    pub depth: usize,
}

impl<K: StateKey> Step<K> {
    pub fn root(state: WorldState<K>) -> Self {
        Self {
            previous: None,
            action: None,
            predicted: state,
            cost: 0.0,
            depth: 0,
        }
    }

    /// Heuristic distance from this step's predicted state to `goal`.
    ///
    /// Objectives with a custom distance contribute `|distance(value, target)|`; the others
    /// contribute `0` when met and `unmet_penalty` otherwise. Not guaranteed admissible.
    pub fn estimate_distance(&self, goal: &Goal<K>, unmet_penalty: f64) -> Result<f64> {
        let mut distance = 0.0;
        for objective in goal.objectives() {
            distance += match &objective.distance {
                Some(estimate) => {
                    let target = objective.target(&self.predicted)?;
                    estimate(self.predicted.get(&objective.key), &target).abs()
                }
                None if objective.is_met(&self.predicted)? => 0.0,
                None => unmet_penalty,
            };
        }
        Ok(distance)
    }
}

/// Append-only storage for steps; parents are referenced by index so the ancestry chain has no
/// ownership cycles. Cleared and reused between planning calls.
#[derive(Debug)]
pub struct StepArena<K: StateKey> {
    steps: Vec<Step<K>>,
}

impl<K: StateKey> Default for StepArena<K> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<K: StateKey> StepArena<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all steps, keeping the allocation.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn push(&mut self, step: Step<K>) -> StepId {
        let id = StepId(self.steps.len());
        self.steps.push(step);
        id
    }

    pub fn get(&self, id: StepId) -> &Step<K> {
        &self.steps[id.index()]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Action indices from the root to `id`, in execution order.
    pub fn action_path(&self, id: StepId) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.get(id).depth);
        let mut current = Some(id);
        while let Some(step_id) = current {
            let step = self.get(step_id);
            if let Some(action) = step.action {
                path.push(action);
            }
            current = step.previous;
        }
        path.reverse();
        path
    }
}
