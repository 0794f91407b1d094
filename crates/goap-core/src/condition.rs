use core::fmt;
use std::sync::Arc;

use crate::{Comparison, Result, StateKey, Value, ValueExpr, WorldState};

/// Returns a smaller number the closer `value` is to `target`.
pub type DistanceFn = Arc<dyn Fn(&Value, &Value) -> f64 + Send + Sync>;

/// A test of one state value against a target expression.
///
/// Used both as an action requirement and as a goal objective.
#[derive(Clone)]
pub struct Condition<K: StateKey> {
    pub key: K,
    pub comparison: Comparison,
    pub value: ValueExpr<K>,
    /// Accept states that move toward the target without reaching it. Values must be numeric
    /// for equality comparisons.
    pub best_effort: bool,
    /// Heuristic distance override. Without it the planner charges a fixed penalty while unmet.
    pub distance: Option<DistanceFn>,
}

impl<K: StateKey> Condition<K> {
    pub fn new(key: K, comparison: Comparison, value: impl Into<ValueExpr<K>>) -> Self {
        Self {
            key,
            comparison,
            value: value.into(),
            best_effort: false,
            distance: None,
        }
    }

    pub fn best_effort(mut self) -> Self {
        self.best_effort = true;
        self
    }

    pub fn with_distance(
        mut self,
        distance: impl Fn(&Value, &Value) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.distance = Some(Arc::new(distance));
        self
    }

    /// Evaluate the target expression against `state`.
    pub fn target(&self, state: &WorldState<K>) -> Result<Value> {
        self.value.evaluate(state)
    }

    pub fn is_met(&self, state: &WorldState<K>) -> Result<bool> {
        let target = self.target(state)?;
        self.comparison.is_met(state.get(&self.key), &target)
    }

    /// Met by `state`, or (for best-effort conditions) strictly closer than `previous`.
    ///
    /// The target is evaluated against `state`, so self-referential targets compare the new
    /// value with itself.
    pub fn is_met_or_closer(
        &self,
        state: &WorldState<K>,
        previous: &WorldState<K>,
    ) -> Result<bool> {
        if !self.best_effort {
            return self.is_met(state);
        }
        let target = self.target(state)?;
        self.comparison
            .is_met_or_closer(&target, state.get(&self.key), previous.get(&self.key))
    }
}

impl<K: StateKey> fmt::Debug for Condition<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("key", &self.key)
            .field("comparison", &self.comparison)
            .field("value", &self.value)
            .field("best_effort", &self.best_effort)
            .field("distance", &self.distance.as_ref().map(|_| ".."))
            .finish()
    }
}
