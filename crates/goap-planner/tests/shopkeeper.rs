use goap_core::{Action, Agent, Comparison, Condition, Effect, Goal, Value, ValueExpr};
use goap_planner::{find_plan, PlanSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Shop {
    DisplayedStock,
    StoredStock,
}

fn shopkeeper() -> Agent<Shop> {
    Agent::new("shopkeeper")
        .with_state(Shop::DisplayedStock, 0)
        .with_state(Shop::StoredStock, 5)
        .with_action(
            Action::new("restock")
                .with_effect(Effect::increase(
                    Shop::DisplayedStock,
                    ValueExpr::state(Shop::StoredStock),
                ))
                .with_effect(Effect::set(Shop::StoredStock, 0)),
        )
}

#[test]
fn self_referential_goal_settles_for_progress() {
    let agent = shopkeeper();
    let goal = Goal::new("display_more").with_objective(
        Condition::new(
            Shop::DisplayedStock,
            Comparison::GreaterThan,
            ValueExpr::state(Shop::DisplayedStock),
        )
        .best_effort(),
    );

    let plan = find_plan(&agent, &goal, PlanSettings::default())
        .unwrap()
        .expect("plan");

    assert_eq!(plan.action_names(), ["restock"]);
    assert!(plan.is_best_effort());
    assert_eq!(plan.predicted_states().get(&Shop::DisplayedStock), &Value::Int(5));
    assert_eq!(plan.predicted_states().get(&Shop::StoredStock), &Value::Int(0));
    // Restocking an empty store reproduces the same snapshot.
    assert_eq!(plan.stats().pruned_duplicates, 1);
}

#[test]
fn strict_self_referential_goal_has_no_plan() {
    let agent = shopkeeper();
    let goal = Goal::new("display_more").with_objective(Condition::new(
        Shop::DisplayedStock,
        Comparison::GreaterThan,
        ValueExpr::state(Shop::DisplayedStock),
    ));

    assert!(find_plan(&agent, &goal, PlanSettings::default())
        .unwrap()
        .is_none());
}

#[test]
fn target_may_combine_state_with_an_operand() {
    let agent = shopkeeper();
    let goal = Goal::new("everything_out").with_objective(Condition::new(
        Shop::DisplayedStock,
        Comparison::GreaterThanOrEqualTo,
        ValueExpr::state_op(Shop::StoredStock, goap_core::Operation::IncreaseBy, 5),
    ));

    let plan = find_plan(&agent, &goal, PlanSettings::default())
        .unwrap()
        .expect("plan");

    assert_eq!(plan.action_names(), ["restock"]);
    assert!(!plan.is_best_effort());
}
