//! Running a plan against an agent's live state.
//!
//! The planner does not execute anything itself. This module encodes the contract an executor
//! must follow: re-validate each action against the live state, optionally abort when the
//! agent's top goal changes, apply the action's effects after it succeeds.

use goap_core::{Action, Agent, Result, StateKey};

use crate::Plan;

/// Performs one action in the world. Returns `false` if the action failed.
pub trait ActionRunner<K: StateKey> {
    fn run(&mut self, agent: &Agent<K>, action: &Action<K>) -> bool;
}

impl<K, F> ActionRunner<K> for F
where
    K: StateKey,
    F: FnMut(&Agent<K>, &Action<K>) -> bool,
{
    fn run(&mut self, agent: &Agent<K>, action: &Action<K>) -> bool {
        self(agent, action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Stop when the agent's highest-priority goal is no longer the plan's goal.
    pub cancel_on_goal_change: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            cancel_on_goal_change: true,
        }
    }
}

/// How far a plan got. `index` is the position of the action that stopped execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Completed,
    GoalChanged { index: usize },
    ActionInvalid { index: usize },
    ActionFailed { index: usize },
}

impl ExecutionOutcome {
    pub fn is_completed(self) -> bool {
        matches!(self, ExecutionOutcome::Completed)
    }
}

impl<K: StateKey> Plan<K> {
    /// Execute the plan's actions in order against `agent`'s live state.
    ///
    /// Sensors run once before each action; the goal check and the re-validation share that
    /// snapshot. A final refresh follows the last action.
    pub fn execute(
        &self,
        agent: &Agent<K>,
        options: ExecuteOptions,
        mut runner: impl ActionRunner<K>,
    ) -> Result<ExecutionOutcome> {
        for (index, action) in self.actions.iter().enumerate() {
            let state = agent.sensed_snapshot()?;

            if options.cancel_on_goal_change {
                let goals = agent.choose_goals_for(&state)?;
                let top = goals.first().map(|goal| goal.name());
                if top != Some(self.goal.name()) {
                    tracing::debug!(
                        agent = %agent.name(),
                        goal = %self.goal.name(),
                        index,
                        "plan cancelled: goal changed"
                    );
                    return Ok(ExecutionOutcome::GoalChanged { index });
                }
            }

            if !agent.is_action_valid(action, &state)? {
                tracing::debug!(action = action.name(), index, "plan cancelled: action invalid");
                return Ok(ExecutionOutcome::ActionInvalid { index });
            }

            if !runner.run(agent, action) {
                tracing::debug!(action = action.name(), index, "plan cancelled: action failed");
                return Ok(ExecutionOutcome::ActionFailed { index });
            }

            agent.apply_effects(action)?;
        }
        agent.sense_states()?;
        Ok(ExecutionOutcome::Completed)
    }
}
