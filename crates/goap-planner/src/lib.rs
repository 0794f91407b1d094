//! Deterministic best-first GOAP planner over `goap-core` agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod executor;
pub mod plan;
pub mod planner;
pub mod settings;
pub mod step;

pub use executor::{ActionRunner, ExecuteOptions, ExecutionOutcome};
pub use plan::{Plan, SearchStats};
pub use planner::{find_any_plan, find_plan, GoapPlanner};
pub use settings::PlanSettings;
pub use step::{Step, StepArena, StepId};
