//! Declarative YAML scenarios.
//!
//! A scenario describes one agent: its starting states, sensors, goals and actions, plus
//! optional planner settings. Only constant values and state references can be declared;
//! callbacks belong to library users.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use goap_core::{
    Action, Agent, Comparison, Condition, Effect, Goal, Operation, Sensor, Validity, Value,
    ValueExpr,
};
use goap_planner::PlanSettings;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub agent: String,
    #[serde(default)]
    pub states: BTreeMap<String, Value>,
    #[serde(default)]
    pub sensors: Vec<SensorDecl>,
    #[serde(default)]
    pub goals: Vec<GoalDecl>,
    #[serde(default)]
    pub actions: Vec<ActionDecl>,
    #[serde(default)]
    pub settings: Option<PlanSettings>,
}

/// A constant, `{ state: key }`, or `{ state: key, operation: op, operand: expr }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExprDecl {
    State(StateRef),
    Constant(Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateRef {
    pub state: String,
    #[serde(default)]
    pub operation: Option<Operation>,
    #[serde(default)]
    pub operand: Option<Box<ExprDecl>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionDecl {
    pub key: String,
    pub comparison: Comparison,
    pub value: ExprDecl,
    #[serde(default)]
    pub best_effort: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectDecl {
    pub key: String,
    pub operation: Operation,
    pub value: ExprDecl,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorDecl {
    pub key: String,
    pub value: ExprDecl,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalDecl {
    pub name: String,
    #[serde(default)]
    pub objectives: Vec<ConditionDecl>,
    #[serde(default = "default_weight")]
    pub priority: f64,
    #[serde(default)]
    pub validity: Validity,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDecl {
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<ConditionDecl>,
    #[serde(default)]
    pub effects: Vec<EffectDecl>,
    #[serde(default = "default_weight")]
    pub cost: f64,
    #[serde(default)]
    pub validity: Validity,
}

fn default_weight() -> f64 {
    1.0
}

impl ExprDecl {
    fn build(&self) -> Result<ValueExpr<String>> {
        match self {
            ExprDecl::Constant(value) => Ok(ValueExpr::Constant(value.clone())),
            ExprDecl::State(StateRef {
                state,
                operation: None,
                operand: None,
            }) => Ok(ValueExpr::state(state.clone())),
            ExprDecl::State(StateRef {
                state,
                operation: Some(operation),
                operand: Some(operand),
            }) => Ok(ValueExpr::state_op(state.clone(), *operation, operand.build()?)),
            ExprDecl::State(StateRef { state, .. }) => {
                bail!("expression on `{state}` needs both `operation` and `operand`")
            }
        }
    }
}

impl ConditionDecl {
    fn build(&self) -> Result<Condition<String>> {
        let condition = Condition::new(self.key.clone(), self.comparison, self.value.build()?);
        Ok(if self.best_effort {
            condition.best_effort()
        } else {
            condition
        })
    }
}

impl Scenario {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    /// Settings declared by the scenario, or the planner defaults.
    pub fn settings(&self) -> PlanSettings {
        self.settings.unwrap_or_default()
    }

    pub fn build_agent(&self) -> Result<Agent<String>> {
        let mut agent = Agent::new(self.agent.clone()).with_states(self.states.clone());

        for sensor in &self.sensors {
            let value = sensor
                .value
                .build()
                .with_context(|| format!("sensor `{}`", sensor.key))?;
            agent = agent.with_sensor(Sensor::new(sensor.key.clone(), value));
        }

        for decl in &self.goals {
            let objectives = decl
                .objectives
                .iter()
                .map(ConditionDecl::build)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("goal `{}`", decl.name))?;
            let validity = decl.validity;
            agent = agent.with_goal(
                Goal::new(decl.name.clone())
                    .with_objectives(objectives)
                    .with_priority(decl.priority)
                    .with_validity(move |_| validity),
            );
        }

        for decl in &self.actions {
            let requirements = decl
                .requirements
                .iter()
                .map(ConditionDecl::build)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("action `{}`", decl.name))?;
            let effects = decl
                .effects
                .iter()
                .map(|effect| -> Result<Effect<String>> {
                    Ok(Effect::new(
                        effect.key.clone(),
                        effect.operation,
                        effect.value.build()?,
                    ))
                })
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("action `{}`", decl.name))?;
            let validity = decl.validity;
            agent = agent.with_action(
                Action::new(decl.name.clone())
                    .with_requirements(requirements)
                    .with_effects(effects)
                    .with_cost(decl.cost)
                    .with_validity(move |_| validity),
            );
        }

        tracing::debug!(
            agent = %self.agent,
            goals = self.goals.len(),
            actions = self.actions.len(),
            sensors = self.sensors.len(),
            "scenario loaded"
        );
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goap_planner::{find_plan, GoapPlanner};

    const FARMER: &str = r#"
agent: farmer
states:
  energy: 100
  crop_health: 0
goals:
  - name: grow
    objectives:
      - { key: crop_health, comparison: ">=", value: 100, best_effort: true }
actions:
  - name: farm
    requirements:
      - { key: energy, comparison: greater_than_or_equal_to, value: 30 }
    effects:
      - { key: crop_health, operation: IncreaseBy, value: 20 }
      - { key: energy, operation: "-=", value: 30 }
  - name: sleep
    effects:
      - { key: energy, operation: "+=", value: 5 }
settings:
  max_iterations: 500
"#;

    #[test]
    fn farmer_scenario_plans() {
        let scenario = Scenario::from_yaml(FARMER).unwrap();
        assert_eq!(scenario.settings().max_iterations, 500);

        let agent = scenario.build_agent().unwrap();
        let goal = agent.goals()[0].clone();
        let plan = find_plan(&agent, &goal, scenario.settings())
            .unwrap()
            .expect("plan");

        let farms = plan.action_names().iter().filter(|&&name| name == "farm").count();
        assert_eq!(farms, 5);
        assert_eq!(
            plan.predicted_states().get(&"crop_health".to_string()),
            &Value::Int(100)
        );
    }

    #[test]
    fn bundled_scenarios_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");

        for name in ["farmer.yaml", "shopkeeper.yaml"] {
            let scenario = Scenario::load(&dir.join(name)).unwrap();
            let agent = scenario.build_agent().unwrap();
            let plan = GoapPlanner::new()
                .with_settings(scenario.settings())
                .find_any(&agent)
                .unwrap();
            assert!(plan.is_some_and(|plan| !plan.is_empty()), "{name}");
        }

        let settings = PlanSettings::load(&dir.join("settings.yaml")).unwrap();
        assert_eq!(settings.max_actions, Some(20));
    }

    #[test]
    fn state_expressions_resolve() {
        let yaml = r#"
agent: shopkeeper
states: { displayed: 0, stored: 5 }
sensors:
  - { key: capacity, value: { state: stored, operation: "*=", operand: 2 } }
actions:
  - name: restock
    effects:
      - { key: displayed, operation: "+=", value: { state: stored } }
      - { key: stored, operation: SetTo, value: 0 }
"#;
        let agent = Scenario::from_yaml(yaml).unwrap().build_agent().unwrap();

        agent.sense_states().unwrap();
        assert_eq!(agent.get_state(&"capacity".to_string()), Value::Int(10));

        let restock = agent.actions()[0].clone();
        agent.apply_effects(&restock).unwrap();
        assert_eq!(agent.get_state(&"displayed".to_string()), Value::Int(5));
        assert_eq!(agent.get_state(&"stored".to_string()), Value::Int(0));
    }

    #[test]
    fn scalar_values_keep_their_types() {
        let yaml = r#"
agent: mixed
states: { flag: true, count: 3, ratio: 0.5, price: "1.25", name: bob, nothing: ~ }
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();

        assert_eq!(scenario.states["flag"], Value::Bool(true));
        assert_eq!(scenario.states["count"], Value::Int(3));
        assert_eq!(scenario.states["ratio"], Value::Float(0.5));
        assert_eq!(
            scenario.states["price"],
            Value::Decimal(goap_core::Decimal::new(125, 2))
        );
        assert_eq!(scenario.states["name"], Value::from("bob"));
        assert_eq!(scenario.states["nothing"], Value::Absent);
    }

    #[test]
    fn declared_validity_overrides_requirements() {
        let yaml = r#"
agent: guard
actions:
  - name: patrol
    validity: invalid
  - name: rest
    requirements:
      - { key: tired, comparison: "==", value: true }
    validity: valid
"#;
        let agent = Scenario::from_yaml(yaml).unwrap().build_agent().unwrap();

        let names: Vec<&str> = agent
            .valid_actions()
            .unwrap()
            .into_iter()
            .map(Action::name)
            .collect();
        assert_eq!(names, ["rest"]);
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let yaml = r#"
agent: broken
goals:
  - name: vague
    objectives:
      - { key: x, comparison: approximately, value: 1 }
"#;
        let err = Scenario::from_yaml(yaml).unwrap_err();

        assert!(format!("{err:#}").contains("unsupported comparison: approximately"));
    }

    #[test]
    fn operation_without_operand_is_rejected() {
        let yaml = r#"
agent: broken
sensors:
  - { key: y, value: { state: x, operation: "+=" } }
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();

        assert!(scenario.build_agent().is_err());
    }
}
