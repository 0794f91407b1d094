use core::fmt;

use crate::{Action, Goal, LiveState, Result, Sensor, StateKey, Value, WorldState};

/// A being that plans actions to move its state toward its goals.
///
/// The live state is a concurrent map, so an `Agent` can be shared behind an `Arc` between a
/// query thread and an executor. Goals, actions and sensors need `&mut self` to change and are
/// expected to stay fixed between planning calls.
pub struct Agent<K: StateKey> {
    name: String,
    states: LiveState<K>,
    goals: Vec<Goal<K>>,
    actions: Vec<Action<K>>,
    sensors: Vec<Sensor<K>>,
}

impl<K: StateKey> Agent<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: LiveState::new(),
            goals: Vec::new(),
            actions: Vec::new(),
            sensors: Vec::new(),
        }
    }

    pub fn with_state(self, key: K, value: impl Into<Value>) -> Self {
        self.states.set(key, value);
        self
    }

    pub fn with_states<V: Into<Value>>(self, states: impl IntoIterator<Item = (K, V)>) -> Self {
        for (key, value) in states {
            self.states.set(key, value);
        }
        self
    }

    pub fn with_goal(mut self, goal: Goal<K>) -> Self {
        self.goals.push(goal);
        self
    }

    pub fn with_action(mut self, action: Action<K>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_sensor(mut self, sensor: Sensor<K>) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &LiveState<K> {
        &self.states
    }

    pub fn goals(&self) -> &[Goal<K>] {
        &self.goals
    }

    pub fn goals_mut(&mut self) -> &mut Vec<Goal<K>> {
        &mut self.goals
    }

    pub fn actions(&self) -> &[Action<K>] {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut Vec<Action<K>> {
        &mut self.actions
    }

    pub fn sensors(&self) -> &[Sensor<K>] {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut Vec<Sensor<K>> {
        &mut self.sensors
    }

    pub fn get_state(&self, key: &K) -> Value {
        self.states.get(key)
    }

    pub fn set_state(&self, key: K, value: impl Into<Value>) {
        self.states.set(key, value);
    }

    /// Copy of the live state, without running sensors.
    pub fn snapshot(&self) -> WorldState<K> {
        self.states.snapshot()
    }

    /// Run every sensor in order and write its value into the live state.
    ///
    /// Later sensors observe the writes of earlier ones.
    pub fn sense_states(&self) -> Result<()> {
        if self.sensors.is_empty() {
            return Ok(());
        }
        let mut snapshot = self.snapshot();
        for sensor in &self.sensors {
            let value = sensor.sense(&snapshot)?;
            tracing::trace!(agent = %self.name, key = ?sensor.key, %value, "sensed");
            snapshot.set(sensor.key.clone(), value.clone());
            self.states.set(sensor.key.clone(), value);
        }
        Ok(())
    }

    /// Refresh via sensors, then snapshot.
    pub fn sensed_snapshot(&self) -> Result<WorldState<K>> {
        self.sense_states()?;
        Ok(self.snapshot())
    }

    pub fn is_goal_valid(&self, goal: &Goal<K>, state: &WorldState<K>) -> Result<bool> {
        goal.validity(self)
            .resolve(|| goal.is_reached(state).map(|reached| !reached))
    }

    pub fn is_action_valid(&self, action: &Action<K>, state: &WorldState<K>) -> Result<bool> {
        action
            .validity(self)
            .resolve(|| action.requirements_met(state))
    }

    /// Goals worth pursuing right now, in declaration order.
    pub fn valid_goals(&self) -> Result<Vec<&Goal<K>>> {
        let state = self.sensed_snapshot()?;
        self.valid_goals_for(&state)
    }

    pub fn valid_goals_for(&self, state: &WorldState<K>) -> Result<Vec<&Goal<K>>> {
        let mut valid = Vec::with_capacity(self.goals.len());
        for goal in &self.goals {
            if self.is_goal_valid(goal, state)? {
                valid.push(goal);
            }
        }
        Ok(valid)
    }

    /// Valid goals, highest priority first. Equal priorities keep declaration order.
    pub fn choose_goals(&self) -> Result<Vec<&Goal<K>>> {
        let state = self.sensed_snapshot()?;
        self.choose_goals_for(&state)
    }

    /// Goals valid in `state`, highest priority first. Does not run sensors.
    pub fn choose_goals_for(&self, state: &WorldState<K>) -> Result<Vec<&Goal<K>>> {
        let mut goals: Vec<(f64, &Goal<K>)> = self
            .valid_goals_for(state)?
            .into_iter()
            .map(|goal| (goal.priority(self), goal))
            .collect();
        goals.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        Ok(goals.into_iter().map(|(_, goal)| goal).collect())
    }

    /// Actions currently performable, after a sensor refresh.
    pub fn valid_actions(&self) -> Result<Vec<&Action<K>>> {
        let state = self.sensed_snapshot()?;
        self.valid_actions_for(&state)
    }

    /// Actions performable in `state`. Does not run sensors.
    pub fn valid_actions_for(&self, state: &WorldState<K>) -> Result<Vec<&Action<K>>> {
        let mut valid = Vec::with_capacity(self.actions.len());
        for action in &self.actions {
            if self.is_action_valid(action, state)? {
                valid.push(action);
            }
        }
        Ok(valid)
    }

    /// Write an action's predicted effects into the live state.
    ///
    /// Only keys named by the action's effects are written.
    pub fn apply_effects(&self, action: &Action<K>) -> Result<()> {
        let mut snapshot = self.snapshot();
        for effect in action.effects() {
            let value = effect.predict(&snapshot)?;
            snapshot.set(effect.key.clone(), value.clone());
            self.states.set(effect.key.clone(), value);
        }
        Ok(())
    }
}

impl<K: StateKey> fmt::Debug for Agent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("states", &self.states)
            .field("goals", &self.goals)
            .field("actions", &self.actions)
            .field("sensors", &self.sensors)
            .finish()
    }
}
