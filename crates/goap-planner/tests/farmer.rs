use goap_core::{Action, Agent, Comparison, Condition, Effect, Goal, Value};
use goap_planner::{find_plan, GoapPlanner, PlanSettings};

fn farm() -> Action<&'static str> {
    Action::new("farm")
        .with_requirement(Condition::new("energy", Comparison::GreaterThanOrEqualTo, 30))
        .with_effect(Effect::increase("crop_health", 20))
        .with_effect(Effect::decrease("energy", 30))
}

fn sleep() -> Action<&'static str> {
    Action::new("sleep").with_effect(Effect::increase("energy", 5))
}

fn grow() -> Goal<&'static str> {
    Goal::new("grow").with_objective(
        Condition::new("crop_health", Comparison::GreaterThanOrEqualTo, 100).best_effort(),
    )
}

fn farmer() -> Agent<&'static str> {
    Agent::new("farmer")
        .with_state("energy", 100)
        .with_state("crop_health", 0)
        .with_action(farm())
        .with_action(sleep())
        .with_goal(grow())
}

#[test]
fn farmer_reaches_full_crop_health() {
    let agent = farmer();

    let plan = find_plan(&agent, &grow(), PlanSettings::default())
        .unwrap()
        .expect("plan");

    let farms = plan.action_names().iter().filter(|&&name| name == "farm").count();
    let sleeps = plan.action_names().iter().filter(|&&name| name == "sleep").count();
    assert_eq!(farms, 5);
    // 100 starting energy covers three farms; the other two need 50 more.
    assert_eq!(sleeps, 10);
    assert_eq!(plan.cost(), 15.0);
    assert_eq!(plan.predicted_states().get(&"crop_health"), &Value::Int(100));
    assert!(!plan.is_best_effort());
    assert_eq!(plan.agent(), "farmer");
    assert_eq!(plan.goal().name(), "grow");
}

#[test]
fn planning_does_not_touch_live_state() {
    let agent = farmer();

    find_plan(&agent, &grow(), PlanSettings::default()).unwrap();

    assert_eq!(agent.get_state(&"energy"), Value::Int(100));
    assert_eq!(agent.get_state(&"crop_health"), Value::Int(0));
}

#[test]
fn tireless_farmer_needs_five_farms() {
    let farm = Action::new("farm")
        .with_requirement(Condition::new("energy", Comparison::GreaterThanOrEqualTo, 10))
        .with_effect(Effect::increase("crop_health", 20));
    let agent = Agent::new("farmer")
        .with_state("energy", 100)
        .with_state("crop_health", 0)
        .with_action(farm)
        .with_action(sleep());

    let plan = find_plan(&agent, &grow(), PlanSettings::default())
        .unwrap()
        .expect("plan");

    assert_eq!(plan.action_names(), ["farm"; 5]);
    assert_eq!(plan.cost(), 5.0);
    assert_eq!(plan.predicted_states().get(&"crop_health"), &Value::Int(100));
    assert!(!plan.is_best_effort());
}

#[test]
fn impossible_goal_yields_no_plan() {
    let agent = farmer();
    let goal = Goal::new("blight")
        .with_objective(Condition::new("crop_health", Comparison::EqualTo, -10));

    let plan = find_plan(&agent, &goal, PlanSettings::default()).unwrap();

    assert!(plan.is_none());
}

#[test]
fn repeated_searches_return_identical_plans() {
    let agent = farmer();
    let mut planner = GoapPlanner::new();

    let first = planner.find(&agent, &grow()).unwrap().expect("plan");
    let second = planner.find(&agent, &grow()).unwrap().expect("plan");

    assert_eq!(first.action_names(), second.action_names());
    assert_eq!(first.cost(), second.cost());
    assert_eq!(first.predicted_states(), second.predicted_states());
    assert_eq!(first.stats(), second.stats());
}

#[test]
fn find_any_picks_highest_priority_goal() {
    let rest = Goal::new("rest")
        .with_objective(Condition::new("energy", Comparison::GreaterThanOrEqualTo, 110))
        .with_priority(3.0);
    let agent = farmer().with_goal(rest);

    let plan = GoapPlanner::new().find_any(&agent).unwrap().expect("plan");

    assert_eq!(plan.goal().name(), "rest");
    assert_eq!(plan.action_names(), ["sleep", "sleep"]);
}

#[test]
fn find_any_falls_back_when_top_goal_has_no_plan() {
    let blight = Goal::new("blight")
        .with_objective(Condition::new("crop_health", Comparison::EqualTo, -10))
        .with_priority(10.0);
    let agent = farmer().with_goal(blight);

    let plan = GoapPlanner::new()
        .with_settings(PlanSettings::default().with_max_iterations(200))
        .find_any(&agent)
        .unwrap()
        .expect("plan");

    assert_eq!(plan.goal().name(), "grow");
}
