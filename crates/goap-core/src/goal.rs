use core::fmt;
use std::sync::Arc;

use crate::{Agent, AgentFn, Condition, Result, StateKey, Validity, WorldState};

/// A conjunction of objectives an agent wants satisfied.
#[derive(Clone)]
pub struct Goal<K: StateKey> {
    name: String,
    objectives: Vec<Condition<K>>,
    priority: AgentFn<K, f64>,
    validity: AgentFn<K, Validity>,
}

impl<K: StateKey> Goal<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objectives: Vec::new(),
            priority: Arc::new(|_: &Agent<K>| 1.0),
            validity: Arc::new(|_: &Agent<K>| Validity::Deferred),
        }
    }

    pub fn with_objective(mut self, objective: Condition<K>) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_objectives(mut self, objectives: impl IntoIterator<Item = Condition<K>>) -> Self {
        self.objectives.extend(objectives);
        self
    }

    pub fn with_priority(self, priority: f64) -> Self {
        self.with_priority_fn(move |_| priority)
    }

    pub fn with_priority_fn(
        mut self,
        priority: impl Fn(&Agent<K>) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.priority = Arc::new(priority);
        self
    }

    pub fn with_validity(
        mut self,
        validity: impl Fn(&Agent<K>) -> Validity + Send + Sync + 'static,
    ) -> Self {
        self.validity = Arc::new(validity);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objectives(&self) -> &[Condition<K>] {
        &self.objectives
    }

    pub fn priority(&self, agent: &Agent<K>) -> f64 {
        (self.priority)(agent)
    }

    pub fn validity(&self, agent: &Agent<K>) -> Validity {
        (self.validity)(agent)
    }

    /// All objectives met. A goal without objectives is always reached.
    pub fn is_reached(&self, state: &WorldState<K>) -> Result<bool> {
        for objective in &self.objectives {
            if !objective.is_met(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// All objectives met by `state`, or (best-effort ones) closer than in `previous`.
    pub fn is_reached_with_best_effort(
        &self,
        state: &WorldState<K>,
        previous: &WorldState<K>,
    ) -> Result<bool> {
        for objective in &self.objectives {
            if !objective.is_met_or_closer(state, previous)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<K: StateKey> fmt::Debug for Goal<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("name", &self.name)
            .field("objectives", &self.objectives)
            .finish_non_exhaustive()
    }
}
