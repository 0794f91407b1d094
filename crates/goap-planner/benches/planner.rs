use criterion::{black_box, criterion_group, criterion_main, Criterion};
use goap_core::{Action, Agent, Comparison, Condition, Effect, Goal};
use goap_planner::GoapPlanner;

fn farmer() -> Agent<&'static str> {
    Agent::new("farmer")
        .with_state("energy", 100)
        .with_state("crop_health", 0)
        .with_action(
            Action::new("farm")
                .with_requirement(Condition::new("energy", Comparison::GreaterThanOrEqualTo, 30))
                .with_effect(Effect::increase("crop_health", 20))
                .with_effect(Effect::decrease("energy", 30)),
        )
        .with_action(Action::new("sleep").with_effect(Effect::increase("energy", 5)))
}

fn bench_goap_planner(c: &mut Criterion) {
    let agent = farmer();
    let grow = Goal::new("grow")
        .with_objective(Condition::new("crop_health", Comparison::GreaterThanOrEqualTo, 100));
    let blight =
        Goal::new("blight").with_objective(Condition::new("crop_health", Comparison::EqualTo, -10));
    let mut planner = GoapPlanner::new();

    c.bench_function("goap-planner/find(farmer)", |b| {
        b.iter(|| {
            let plan = planner.find(&agent, &grow).expect("search").expect("plan");
            black_box(plan.len());
        })
    });

    c.bench_function("goap-planner/find(impossible)", |b| {
        b.iter(|| {
            let plan = planner.find(&agent, &blight).expect("search");
            black_box(plan.is_none());
        })
    });
}

criterion_group!(benches, bench_goap_planner);
criterion_main!(benches);
