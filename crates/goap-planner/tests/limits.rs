use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use goap_core::{
    Action, Agent, Comparison, Condition, Decimal, Effect, GoapError, Goal, Sensor, Value,
};
use goap_planner::{find_any_plan, find_plan, GoapPlanner, PlanSettings};

fn camper() -> Agent<&'static str> {
    Agent::new("camper")
        .with_state("heat", 0)
        .with_action(Action::new("add_log").with_effect(Effect::increase("heat", 1)))
}

fn warm(heat: i64) -> Goal<&'static str> {
    Goal::new("warm").with_objective(Condition::new("heat", Comparison::GreaterThanOrEqualTo, heat))
}

fn roughly_warm(heat: i64) -> Goal<&'static str> {
    Goal::new("roughly_warm").with_objective(
        Condition::new("heat", Comparison::GreaterThanOrEqualTo, heat).best_effort(),
    )
}

#[test]
fn reached_goal_yields_empty_plan() {
    let agent = camper().with_state("heat", 5);

    let plan = find_plan(&agent, &warm(3), PlanSettings::default())
        .unwrap()
        .expect("plan");

    assert!(plan.is_empty());
    assert_eq!(plan.cost(), 0.0);
    assert!(!plan.is_best_effort());
    assert_eq!(plan.stats().iterations, 1);
}

#[test]
fn max_actions_bounds_plan_length() {
    let agent = camper();
    let settings = PlanSettings::default().with_max_actions(2);

    assert!(find_plan(&agent, &warm(3), settings).unwrap().is_none());

    let plan = find_plan(&agent, &warm(2), settings).unwrap().expect("plan");
    assert_eq!(plan.len(), 2);
}

#[test]
fn max_actions_still_allows_best_effort_progress() {
    let agent = camper();
    let settings = PlanSettings::default().with_max_actions(2);

    let plan = find_plan(&agent, &roughly_warm(3), settings)
        .unwrap()
        .expect("plan");

    assert!(plan.is_best_effort());
    assert_eq!(plan.action_names(), ["add_log", "add_log"]);
    assert_eq!(plan.predicted_states().get(&"heat"), &Value::Int(2));
}

#[test]
fn max_cost_prunes_expensive_branches() {
    let agent = camper();

    let settings = PlanSettings::default().with_max_cost(2.5);
    assert!(find_plan(&agent, &warm(3), settings).unwrap().is_none());

    let settings = PlanSettings::default().with_max_cost(3.0);
    let plan = find_plan(&agent, &warm(3), settings).unwrap().expect("plan");
    assert_eq!(plan.cost(), 3.0);
}

#[test]
fn max_distance_prunes_far_branches() {
    let agent = camper();
    let settings = PlanSettings::default().with_max_distance(1.0);

    // Every unmet child costs the default penalty of 2.
    assert!(find_plan(&agent, &warm(2), settings).unwrap().is_none());
    assert_eq!(
        find_plan(&agent, &warm(1), settings)
            .unwrap()
            .expect("plan")
            .len(),
        1
    );
}

#[test]
fn zero_iterations_never_plans() {
    let agent = camper().with_state("heat", 5);
    let settings = PlanSettings::default().with_max_iterations(0);

    assert!(find_plan(&agent, &warm(3), settings).unwrap().is_none());
}

#[test]
fn iteration_budget_is_respected() {
    let agent = camper();
    let goal = Goal::new("freeze").with_objective(Condition::new("heat", Comparison::LessThan, 0));
    let settings = PlanSettings::default().with_max_iterations(25);

    assert!(find_plan(&agent, &goal, settings).unwrap().is_none());
}

#[test]
fn custom_distance_guides_the_search() {
    let agent = camper().with_action(
        Action::new("add_big_log")
            .with_effect(Effect::increase("heat", 5))
            .with_cost(2.0),
    );
    let goal = Goal::new("warm").with_objective(
        Condition::new("heat", Comparison::GreaterThanOrEqualTo, 10).with_distance(
            |value, target| {
                let value = value.as_f64().unwrap_or(0.0);
                let target = target.as_f64().unwrap_or(0.0);
                (target - value).max(0.0) / 5.0
            },
        ),
    );
    let settings = PlanSettings::default().with_max_distance(f64::INFINITY);

    let plan = find_plan(&agent, &goal, settings).unwrap().expect("plan");

    assert_eq!(plan.action_names(), ["add_big_log", "add_big_log"]);
    assert_eq!(plan.cost(), 4.0);
}

#[test]
fn cheaper_path_to_a_known_state_wins() {
    let agent = Agent::new("walker")
        .with_state("position", 0)
        .with_action(
            Action::new("leap")
                .with_effect(Effect::increase("position", 2))
                .with_cost(5.0),
        )
        .with_action(Action::new("step").with_effect(Effect::increase("position", 1)));
    let goal = Goal::new("arrive")
        .with_objective(Condition::new("position", Comparison::EqualTo, 2));

    let plan = find_plan(&agent, &goal, PlanSettings::default())
        .unwrap()
        .expect("plan");

    assert_eq!(plan.action_names(), ["step", "step"]);
    assert_eq!(plan.cost(), 2.0);
}

#[test]
fn unreachable_decimal_target_still_yields_progress() {
    let agent = Agent::new("investor")
        .with_state("money", Decimal::ZERO)
        .with_goal(
            Goal::new("be_rich").with_objective(
                Condition::new("money", Comparison::EqualTo, Decimal::MAX).best_effort(),
            ),
        )
        .with_action(Action::new("capitalize").with_effect(Effect::increase("money", 100)));
    let goal = agent.goals()[0].clone();

    let plan = find_plan(&agent, &goal, PlanSettings::default())
        .unwrap()
        .expect("plan");
    assert!(plan.is_best_effort());
    assert_eq!(plan.actions()[0].name(), "capitalize");
    assert!(matches!(
        plan.predicted_states().get(&"money"),
        Value::Decimal(money) if *money > Decimal::ZERO
    ));

    let plan = find_any_plan(&agent, PlanSettings::default())
        .unwrap()
        .expect("plan");
    assert!(plan.is_best_effort());
    assert!(!plan.is_empty());
}

#[test]
fn sensors_run_once_per_search() {
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&reads);
    let agent = camper().with_sensor(Sensor::from_fn("heat", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::Int(2)
    }));

    let plan = find_plan(&agent, &warm(3), PlanSettings::default())
        .unwrap()
        .expect("plan");

    assert_eq!(reads.load(Ordering::SeqCst), 1);
    assert_eq!(plan.len(), 1);
    assert_eq!(agent.get_state(&"heat"), Value::Int(2));
}

#[test]
fn evaluation_errors_abort_the_search() {
    let agent = camper()
        .with_state("heat", "cold")
        .with_action(
            Action::new("blow")
                .with_requirement(Condition::new("heat", Comparison::GreaterThan, 0))
                .with_effect(Effect::increase("heat", 1)),
        );

    let result = GoapPlanner::new().find(&agent, &warm(3));

    assert!(matches!(result, Err(GoapError::TypeMismatch { .. })));
}

#[test]
fn settings_load_from_yaml_with_defaults() {
    let settings = PlanSettings::from_yaml("max_iterations: 50\nmax_actions: 4\n").unwrap();

    assert_eq!(settings.max_iterations, 50);
    assert_eq!(settings.max_actions, Some(4));
    assert_eq!(settings.max_cost, None);
    assert_eq!(settings.max_distance, 10.0);
    assert_eq!(settings.unmet_penalty, 2.0);

    assert!(PlanSettings::from_yaml("max_iterations: lots").is_err());
}
