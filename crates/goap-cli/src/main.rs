//! goap-plan - run the GOAP planner over declarative scenarios.
//!
//! - `goap-plan plan <scenario>` - search for a plan and print it
//! - `goap-plan check <scenario>` - validate a scenario and list what is currently valid

mod scenario;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use goap_core::{Action, Goal, Value};
use goap_planner::{GoapPlanner, Plan, PlanSettings, SearchStats};

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "goap-plan")]
#[command(about = "Goal-oriented action planning for declarative scenarios", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan for a scenario's agent
    Plan {
        /// Scenario YAML file
        scenario: PathBuf,

        /// Plan for this goal instead of the highest-priority one
        #[arg(long)]
        goal: Option<String>,

        /// Planner settings YAML, overriding the scenario's own
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a scenario
    Check {
        /// Scenario YAML file
        scenario: PathBuf,
    },
}

#[derive(Serialize)]
struct PlanReport<'a> {
    agent: &'a str,
    goal: &'a str,
    actions: Vec<&'a str>,
    cost: f64,
    best_effort: bool,
    predicted: BTreeMap<&'a str, &'a Value>,
    stats: SearchStats,
}

impl<'a> PlanReport<'a> {
    fn new(plan: &'a Plan<String>) -> Self {
        Self {
            agent: plan.agent(),
            goal: plan.goal().name(),
            actions: plan.action_names(),
            cost: plan.cost(),
            best_effort: plan.is_best_effort(),
            predicted: plan
                .predicted_states()
                .iter()
                .map(|(key, value)| (key.as_str(), value))
                .collect(),
            stats: plan.stats(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan {
            scenario,
            goal,
            settings,
            json,
        } => run_plan(&scenario, goal.as_deref(), settings.as_deref(), json),
        Commands::Check { scenario } => check_scenario(&scenario),
    }
}

fn run_plan(path: &Path, goal: Option<&str>, settings: Option<&Path>, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let settings = match settings {
        Some(path) => PlanSettings::load(path)?,
        None => scenario.settings(),
    };
    let agent = scenario.build_agent()?;
    tracing::info!(agent = %agent.name(), scenario = %path.display(), "Planning");

    let mut planner = GoapPlanner::new().with_settings(settings);
    let plan = match goal {
        Some(name) => {
            let Some(goal) = agent.goals().iter().find(|goal| goal.name() == name) else {
                bail!("scenario has no goal named `{name}`");
            };
            planner.find(&agent, goal)?
        }
        None => planner.find_any(&agent)?,
    };

    let Some(plan) = plan else {
        bail!("no plan found for agent `{}`", agent.name());
    };

    if json {
        let report = serde_json::to_string_pretty(&PlanReport::new(&plan))
            .context("Failed to serialize plan")?;
        println!("{report}");
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn print_plan(plan: &Plan<String>) {
    let kind = if plan.is_best_effort() {
        " (best effort)"
    } else {
        ""
    };
    println!("Plan for {} -> {}{kind}", plan.agent(), plan.goal().name());
    for (index, name) in plan.action_names().iter().enumerate() {
        println!("  {:>3}. {name}", index + 1);
    }
    println!();
    println!("Cost:       {}", plan.cost());
    println!("Iterations: {}", plan.stats().iterations);
    println!("Predicted:");
    for (key, value) in plan.predicted_states() {
        println!("  {key} = {value}");
    }
}

fn check_scenario(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let agent = scenario.build_agent()?;
    let settings = scenario.settings();

    let goals: Vec<&str> = agent.choose_goals()?.into_iter().map(Goal::name).collect();
    let actions: Vec<&str> = agent
        .valid_actions()?
        .into_iter()
        .map(Action::name)
        .collect();

    println!("Agent:   {}", agent.name());
    println!("States:  {}", agent.states().len());
    println!("Sensors: {}", agent.sensors().len());
    println!(
        "Goals:   {} ({} valid: {})",
        agent.goals().len(),
        goals.len(),
        goals.join(", ")
    );
    println!(
        "Actions: {} ({} valid: {})",
        agent.actions().len(),
        actions.len(),
        actions.join(", ")
    );
    println!(
        "Limits:  {} iterations, distance {}",
        settings.max_iterations, settings.max_distance
    );
    Ok(())
}
