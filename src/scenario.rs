// ============================================================================
// Cognate - Trigger Maze Fixture
// File: scenario.rs
//
// Description:
//   Builds the "trigger maze" example world in memory: a dozen locations,
//   two-way paths, three trigger-gated shortcuts, and a Bandit/Miniboss
//   pair registered with a shared CentralPlanner. This is example wiring
//   for the CLI, not a mandated scenario format -- a collaborator
//   embedding these crates is free to build a KnowledgeStack any other
//   way.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_agents::{Bandit, CentralPlanner, Miniboss, PlanningAgent};
use cognate_knowledge::{at, closed_gate, path, trigger, BaseKnowledge, Fact, KnowledgeStack};

/// Every two-way connection in the maze, as (a, b) pairs. Both directions
/// are inserted as separate `Path` facts.
const CORRIDORS: &[(&str, &str)] = &[
    ("start", "junction"),
    ("junction", "path_a"),
    ("junction", "path_b"),
    ("junction", "path_c"),
    ("path_a", "trigger_a"),
    ("trigger_a", "trigger_b"),
    ("path_b", "path_b1"),
    ("path_b1", "path_b2"),
    ("path_b2", "trigger_c"),
    ("trigger_c", "path_b3"),
    ("path_b3", "end"),
];

/// Corridors that start out gated closed. Opening one requires tripping
/// the trigger named alongside it.
const GATES: &[(&str, &str)] = &[("path_a", "trigger_a"), ("path_b1", "path_b2"), ("path_b3", "end")];

/// (gate1, gate2, trigger_location) triples: standing at `trigger_location`
/// and triggering toggles the (gate1, gate2) pair, in both directions.
const TRIGGERS: &[(&str, &str, &str)] = &[
    ("path_a", "trigger_a", "junction"),
    ("path_b1", "path_b2", "trigger_b"),
    ("path_b3", "end", "trigger_c"),
];

/// A built fixture: the shared knowledge base plus the two agents
/// registered against it, ready to hand to a `CentralPlanner`.
pub struct TriggerMaze {
    pub knowledge: KnowledgeStack,
    pub agents: Vec<(String, PlanningAgent)>,
}

/// Builds the trigger maze fixture described by the specification's S1-S4
/// scenarios: a bandit and a miniboss both starting at `start`, with every
/// corridor, gate, and trigger from `spec.md` section 8 wired up.
pub fn trigger_maze() -> TriggerMaze {
    build_maze(true)
}

/// The same maze with every `Trigger` fact omitted, so every gate stays
/// permanently closed to a hard-mode mover and permanently a required
/// sub-goal to a soft-mode one. Used to exercise the infeasibility path.
pub fn trigger_maze_without_triggers() -> TriggerMaze {
    build_maze(false)
}

fn build_maze(with_triggers: bool) -> TriggerMaze {
    let mut base = BaseKnowledge::new();

    for (a, b) in CORRIDORS {
        base.append(path(*a, *b));
        base.append(path(*b, *a));
    }
    for (a, b) in GATES {
        base.append(closed_gate(*a, *b));
        base.append(closed_gate(*b, *a));
    }
    if with_triggers {
        for (g1, g2, location) in TRIGGERS {
            base.append(trigger(*g1, *g2, *location));
            base.append(trigger(*g2, *g1, *location));
        }
    }

    base.append(at("bandit_a", "start"));
    base.append(at("miniboss", "start"));

    let knowledge = KnowledgeStack::new(base);

    let bandit = Bandit::new("bandit_a", knowledge.clone());
    let miniboss = Miniboss::new("miniboss", knowledge.clone());

    TriggerMaze {
        knowledge,
        agents: vec![
            ("bandit_a".to_string(), PlanningAgent::Bandit(bandit)),
            ("miniboss".to_string(), PlanningAgent::Miniboss(miniboss)),
        ],
    }
}

impl TriggerMaze {
    /// Hands the fixture's knowledge and agents to a fresh central
    /// planner.
    pub fn into_planner(self) -> CentralPlanner {
        CentralPlanner::new(self.knowledge, self.agents)
    }

    /// Every base fact in the fixture, for dump/inspection purposes.
    pub fn base_facts(&self) -> Vec<Fact> {
        let mut facts = Vec::new();
        for functor in [
            cognate_knowledge::Functor::Path,
            cognate_knowledge::Functor::ClosedGate,
            cognate_knowledge::Functor::Trigger,
            cognate_knowledge::Functor::At,
        ] {
            for tuple in self.knowledge.flatten(functor) {
                facts.push(Fact::new(functor, tuple));
            }
        }
        facts.sort();
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_places_both_agents_at_start() {
        let maze = trigger_maze();
        assert!(maze.knowledge.check_fact(&at("bandit_a", "start")));
        assert!(maze.knowledge.check_fact(&at("miniboss", "start")));
    }

    #[test]
    fn fixture_gates_start_closed() {
        let maze = trigger_maze();
        assert!(maze.knowledge.check_fact(&closed_gate("path_a", "trigger_a")));
        assert!(maze.knowledge.check_fact(&closed_gate("path_b1", "path_b2")));
        assert!(maze.knowledge.check_fact(&closed_gate("path_b3", "end")));
    }

    #[test]
    fn fixture_registers_both_agents() {
        let maze = trigger_maze();
        assert_eq!(maze.agents.len(), 2);
    }
}
