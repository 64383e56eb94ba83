// ============================================================================
// Cognate - Main Entry Point
// File: main.rs
//
// Description:
//   Bootstraps logging, parses CLI arguments, wires up the built-in
//   trigger maze fixture, and dispatches either a `plan` or a `scenario`
//   subcommand against it.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

use cognate::cli::{Cli, Command};
use cognate::knowledge::{atom, Fact, Functor};
use cognate::scenario::trigger_maze;

#[derive(Serialize)]
struct FactView {
    functor: String,
    arguments: Vec<String>,
}

impl From<&Fact> for FactView {
    fn from(fact: &Fact) -> Self {
        FactView {
            functor: fact.functor.to_string(),
            arguments: fact.arguments.iter().map(|a| a.to_string()).collect(),
        }
    }
}

fn parse_functor(name: &str) -> anyhow::Result<Functor> {
    match name {
        "Path" => Ok(Functor::Path),
        "Drop" => Ok(Functor::Drop),
        "Teleportable" => Ok(Functor::Teleportable),
        "Downstairs" => Ok(Functor::Downstairs),
        "Upstairs" => Ok(Functor::Upstairs),
        "OpenGate" => Ok(Functor::OpenGate),
        "ClosedGate" => Ok(Functor::ClosedGate),
        "At" => Ok(Functor::At),
        "Trigger" => Ok(Functor::Trigger),
        other => bail!("unknown goal functor {other:?}, expected one of: Path, Drop, \
            Teleportable, Downstairs, Upstairs, OpenGate, ClosedGate, At, Trigger"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            agent,
            goal_functor,
            goal_args,
            max_depth,
        } => run_plan(&agent, &goal_functor, &goal_args, max_depth),
        Command::Scenario { json } => run_scenario(json),
    }
}

fn run_plan(agent: &str, goal_functor: &str, goal_args: &str, max_depth: Option<usize>) -> anyhow::Result<()> {
    let functor = parse_functor(goal_functor)?;
    let arguments: Vec<_> = goal_args
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(atom)
        .collect();
    if arguments.is_empty() {
        bail!("--goal-args must name at least one argument");
    }
    let goal = Fact::new(functor, arguments);

    let maze = trigger_maze();
    if !maze.agents.iter().any(|(name, _)| name == agent) {
        bail!("no such agent {agent:?} registered in the trigger maze fixture");
    }

    let mut central = maze.into_planner();
    if let Some(depth) = max_depth {
        central = central.with_max_depth(depth);
    }

    log::info!("dispatching goal {goal} to agent {agent}");
    let dispatched = central.plan(agent, goal);
    if !dispatched {
        bail!("central planner rejected the dispatch for agent {agent:?}");
    }
    central.admit_plans();
    Ok(())
}

fn run_scenario(json: bool) -> anyhow::Result<()> {
    let maze = trigger_maze();
    let facts = maze.base_facts();

    if json {
        let views: Vec<FactView> = facts.iter().map(FactView::from).collect();
        let rendered = serde_json::to_string_pretty(&views).context("serializing scenario facts")?;
        println!("{rendered}");
    } else {
        for fact in &facts {
            println!("{fact}");
        }
    }
    Ok(())
}
