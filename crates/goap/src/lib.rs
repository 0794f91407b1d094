//! Umbrella crate that re-exports the `goap-*` building blocks.
//!
//! ```
//! use goap::core::{Action, Agent, Comparison, Condition, Effect, Goal};
//! use goap::planner::{find_plan, PlanSettings};
//!
//! let goal = Goal::new("warm")
//!     .with_objective(Condition::new("heat", Comparison::GreaterThanOrEqualTo, 3));
//! let agent = Agent::new("camper")
//!     .with_state("heat", 0)
//!     .with_action(Action::new("add_log").with_effect(Effect::increase("heat", 1)))
//!     .with_goal(goal.clone());
//!
//! let plan = find_plan(&agent, &goal, PlanSettings::default()).unwrap().unwrap();
//! assert_eq!(plan.action_names(), ["add_log", "add_log", "add_log"]);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use goap_core as core;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use goap_planner as planner;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub mod prelude {
    pub use goap_core::{
        Action, Agent, Comparison, Condition, Effect, Goal, Operation, Sensor, Validity, Value,
        ValueExpr, WorldState,
    };
    pub use goap_planner::{
        find_any_plan, find_plan, ExecuteOptions, ExecutionOutcome, GoapPlanner, Plan,
        PlanSettings,
    };
}
