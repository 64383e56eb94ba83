// ============================================================================
// Cognate - Command Line Interface
// File: cli.rs
//
// Description:
//   clap argument definitions for the cognate binary. The CLI is the
//   outer, fallible-I/O-ish shell around the planner core: argument
//   parsing and lookup failures surface as anyhow::Error here, while the
//   core crates stay sentinel-returning and panic-free.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cognate", about = "Multi-agent symbolic planner for a turn-based maze world")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run CentralPlanner::plan for one agent against the built-in fixture
    /// and print its committed action plan.
    Plan {
        /// Name of the registered agent to dispatch the goal to.
        #[arg(long)]
        agent: String,
        /// Functor of the goal fact, e.g. "At".
        #[arg(long = "goal-functor")]
        goal_functor: String,
        /// Comma-separated goal arguments, e.g. "bandit_a,end".
        #[arg(long = "goal-args")]
        goal_args: String,
        /// Overrides the relaxed planning graph's default search depth cap.
        #[arg(long = "max-depth")]
        max_depth: Option<usize>,
    },
    /// Print the built-in fixture's base facts.
    Scenario {
        /// Emit the facts as JSON instead of plain predicate notation.
        #[arg(long)]
        json: bool,
    },
}
