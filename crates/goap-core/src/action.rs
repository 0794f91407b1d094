use core::fmt;
use std::sync::Arc;

use crate::{Agent, Condition, Effect, Result, StateKey, Validity, WorldState};

/// A strategy evaluated against the owning agent (cost, priority, validity).
pub type AgentFn<K, T> = Arc<dyn Fn(&Agent<K>) -> T + Send + Sync>;

/// A named, preconditioned, costed transformation of world state.
///
/// Actions are templates: cloning is cheap and the planner hands clones back inside a `Plan`.
#[derive(Clone)]
pub struct Action<K: StateKey> {
    name: String,
    effects: Vec<Effect<K>>,
    requirements: Vec<Condition<K>>,
    cost: AgentFn<K, f64>,
    validity: AgentFn<K, Validity>,
}

impl<K: StateKey> Action<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
            requirements: Vec::new(),
            cost: Arc::new(|_: &Agent<K>| 1.0),
            validity: Arc::new(|_: &Agent<K>| Validity::Deferred),
        }
    }

    pub fn with_effect(mut self, effect: Effect<K>) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect<K>>) -> Self {
        self.effects.extend(effects);
        self
    }

    pub fn with_requirement(mut self, requirement: Condition<K>) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_requirements(
        mut self,
        requirements: impl IntoIterator<Item = Condition<K>>,
    ) -> Self {
        self.requirements.extend(requirements);
        self
    }

    pub fn with_cost(self, cost: f64) -> Self {
        self.with_cost_fn(move |_| cost)
    }

    pub fn with_cost_fn(mut self, cost: impl Fn(&Agent<K>) -> f64 + Send + Sync + 'static) -> Self {
        self.cost = Arc::new(cost);
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

    pub fn effects(&self) -> &[Effect<K>] {
        &self.effects
    }

    pub fn requirements(&self) -> &[Condition<K>] {
        &self.requirements
    }

    /// Cost of performing the action; never negative.
    pub fn cost(&self, agent: &Agent<K>) -> f64 {
        let cost = (self.cost)(agent);
        if cost.is_nan() {
            0.0
        } else {
            cost.max(0.0)
        }
    }

    pub fn validity(&self, agent: &Agent<K>) -> Validity {
        (self.validity)(agent)
    }

    pub fn requirements_met(&self, state: &WorldState<K>) -> Result<bool> {
        for requirement in &self.requirements {
            if !requirement.is_met(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// State after performing the action. Effects apply in order; each sees its predecessors.
    pub fn predict_states(&self, state: &WorldState<K>) -> Result<WorldState<K>> {
        let mut predicted = state.clone();
        for effect in &self.effects {
            effect.apply(&mut predicted)?;
        }
        Ok(predicted)
    }
}

impl<K: StateKey> fmt::Debug for Action<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("effects", &self.effects)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}
