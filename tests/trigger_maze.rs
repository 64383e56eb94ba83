// ============================================================================
// Cognate - End-to-End Scenario Tests
// File: tests/trigger_maze.rs
//
// Description:
//   Exercises the built-in trigger maze fixture through CentralPlanner,
//   covering the bandit gate puzzle, a miniboss contracting a bandit to
//   clear its path, and the infeasible case where every trigger has
//   been removed from the world.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate::knowledge::at;
use cognate::scenario::{trigger_maze, trigger_maze_without_triggers};

#[test]
fn bandit_solves_the_gate_puzzle_to_reach_the_end() {
    let maze = trigger_maze();
    let mut central = maze.into_planner();

    let dispatched = central.plan("bandit_a", at("bandit_a", "end"));
    assert!(dispatched);

    let (_, bandit) = &central.agents()[0];
    let plan = bandit.action_plan();
    assert!(!plan.is_empty(), "a route to end exists once triggers are available");
    assert!(
        plan.len() <= 20,
        "plan length {} exceeds the domain-calibrated upper bound",
        plan.len()
    );
    assert!(
        plan.last().unwrap().to_string().contains("to end"),
        "the final committed action should land the bandit at end"
    );
}

#[test]
fn miniboss_contracts_the_bandit_to_clear_a_gate() {
    let maze = trigger_maze();
    let mut central = maze.into_planner();

    let dispatched = central.plan("miniboss", at("miniboss", "end"));
    assert!(dispatched);

    let miniboss_plan = central
        .agents()
        .iter()
        .find(|(name, _)| name == "miniboss")
        .unwrap()
        .1
        .action_plan();
    let bandit_plan = central
        .agents()
        .iter()
        .find(|(name, _)| name == "bandit_a")
        .unwrap()
        .1
        .action_plan();

    assert!(
        !bandit_plan.is_empty(),
        "the bandit should have been contracted to open at least one gate"
    );
    if let Some(last) = miniboss_plan.last() {
        assert!(last.to_string().contains("to end") || last.to_string().contains("required"));
    }
}

#[test]
fn bandit_cannot_reach_the_end_once_every_trigger_is_gone() {
    let maze = trigger_maze_without_triggers();
    let mut central = maze.into_planner();

    let dispatched = central.plan("bandit_a", at("bandit_a", "end"));
    assert!(dispatched, "dispatch itself still succeeds for a known agent");

    let (_, bandit) = &central.agents()[0];
    assert!(
        bandit.action_plan().is_empty(),
        "no gate can ever be opened, so nothing toward end should commit"
    );
}
