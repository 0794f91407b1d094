use core::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use goap_core::{Agent, Goal, Result, StateKey, WorldState};

use crate::{Plan, PlanSettings, SearchStats, Step, StepArena, StepId};

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f64,
    tie: u64,
    step: StepId,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap; FIFO among equal `f`.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Best-first (A*) planner over an agent's actions.
///
/// Holds its settings and a step arena that is reused across calls, so keep one planner per
/// agent/thread rather than building one per query.
#[derive(Debug)]
pub struct GoapPlanner<K: StateKey> {
    settings: PlanSettings,
    arena: StepArena<K>,
}

impl<K: StateKey> Default for GoapPlanner<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> GoapPlanner<K> {
    pub fn new() -> Self {
        Self {
            settings: PlanSettings::default(),
            arena: StepArena::new(),
        }
    }

    pub fn with_settings(mut self, settings: PlanSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PlanSettings {
        &mut self.settings
    }

    /// Plan for the highest-priority valid goal that admits a plan.
    pub fn find_any(&mut self, agent: &Agent<K>) -> Result<Option<Plan<K>>> {
        for goal in agent.choose_goals()? {
            if let Some(plan) = self.find(agent, goal)? {
                return Ok(Some(plan));
            }
        }
        tracing::debug!(agent = %agent.name(), "no plan for any goal");
        Ok(None)
    }

    /// Search for an action sequence from the agent's current state to `goal`.
    ///
    /// Refreshes the agent's sensors once, then works only on private snapshots. Returns
    /// `Ok(None)` when no plan reaches or approaches the goal within the configured limits;
    /// evaluation errors abort the search.
    pub fn find(&mut self, agent: &Agent<K>, goal: &Goal<K>) -> Result<Option<Plan<K>>> {
        let settings = self.settings;
        agent.sense_states()?;
        self.arena.clear();

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut best_f: HashMap<WorldState<K>, f64> = HashMap::new();
        let mut stats = SearchStats::default();
        let mut tie: u64 = 0;

        let root_step = Step::root(agent.snapshot());
        let root_h = root_step.estimate_distance(goal, settings.unmet_penalty)?;
        best_f.insert(root_step.predicted.clone(), root_h);
        let root = self.arena.push(root_step);
        open.push(OpenNode {
            f: root_h,
            tie,
            step: root,
        });
        tie += 1;

        let mut best = root;
        let mut children: Vec<(Step<K>, f64)> = Vec::new();

        while stats.iterations < settings.max_iterations {
            let Some(node) = open.pop() else {
                break;
            };
            let step = self.arena.get(node.step);

            if best_f
                .get(&step.predicted)
                .is_some_and(|&known| known < node.f)
            {
                stats.stale += 1;
                continue; // stale heap entry
            }
            stats.iterations += 1;

            if goal.is_reached(&step.predicted)? {
                tracing::debug!(
                    agent = %agent.name(),
                    goal = %goal.name(),
                    iterations = stats.iterations,
                    cost = step.cost,
                    steps = step.depth,
                    "plan found"
                );
                return Ok(Some(self.build_plan(agent, goal, node.step, false, stats)));
            }

            if node.step != best
                && goal.is_reached_with_best_effort(
                    &step.predicted,
                    &self.arena.get(best).predicted,
                )?
            {
                best = node.step;
            }

            if !settings.allows_depth(step.depth) {
                continue;
            }

            for (index, action) in agent.actions().iter().enumerate() {
                if !agent.is_action_valid(action, &step.predicted)? {
                    continue;
                }
                let child = Step {
                    previous: Some(node.step),
                    action: Some(index),
                    predicted: action.predict_states(&step.predicted)?,
                    cost: step.cost + action.cost(agent),
                    depth: step.depth + 1,
                };
                stats.generated += 1;

                if settings.exceeds_cost(child.cost) {
                    stats.pruned_limits += 1;
                    continue;
                }
                let h = child.estimate_distance(goal, settings.unmet_penalty)?;
                if h > settings.max_distance {
                    stats.pruned_limits += 1;
                    continue;
                }

                let f = child.cost + h;
                if best_f
                    .get(&child.predicted)
                    .is_some_and(|&known| known <= f)
                {
                    stats.pruned_duplicates += 1;
                    continue;
                }
                best_f.insert(child.predicted.clone(), f);
                tracing::trace!(action = action.name(), g = child.cost, h, "enqueue");
                children.push((child, f));
            }

            for (child, f) in children.drain(..) {
                let step = self.arena.push(child);
                open.push(OpenNode { f, tie, step });
                tie += 1;
                stats.enqueued += 1;
            }
        }

        if best != root
            && goal.is_reached_with_best_effort(
                &self.arena.get(best).predicted,
                &self.arena.get(root).predicted,
            )?
        {
            tracing::debug!(
                agent = %agent.name(),
                goal = %goal.name(),
                iterations = stats.iterations,
                cost = self.arena.get(best).cost,
                "best-effort plan"
            );
            return Ok(Some(self.build_plan(agent, goal, best, true, stats)));
        }

        tracing::debug!(
            agent = %agent.name(),
            goal = %goal.name(),
            iterations = stats.iterations,
            "no plan found"
        );
        Ok(None)
    }

    fn build_plan(
        &self,
        agent: &Agent<K>,
        goal: &Goal<K>,
        end: StepId,
        is_best_effort: bool,
        stats: SearchStats,
    ) -> Plan<K> {
        let step = self.arena.get(end);
        let actions = self
            .arena
            .action_path(end)
            .into_iter()
            .map(|index| agent.actions()[index].clone())
            .collect();
        Plan {
            agent: agent.name().to_string(),
            goal: goal.clone(),
            actions,
            predicted: step.predicted.clone(),
            cost: step.cost,
            is_best_effort,
            stats,
        }
    }
}

/// Plan for `goal` with a one-off planner.
pub fn find_plan<K: StateKey>(
    agent: &Agent<K>,
    goal: &Goal<K>,
    settings: PlanSettings,
) -> Result<Option<Plan<K>>> {
    GoapPlanner::new().with_settings(settings).find(agent, goal)
}

/// Plan for the agent's goals in descending priority with a one-off planner.
pub fn find_any_plan<K: StateKey>(
    agent: &Agent<K>,
    settings: PlanSettings,
) -> Result<Option<Plan<K>>> {
    GoapPlanner::new().with_settings(settings).find_any(agent)
}
