// ============================================================================
// Cognate Agents - Integration Test
// File: tests/bandit_trivial_move.rs
//
// Description:
//   A bandit with no gates in its way plans the direct route end to
//   end through a CentralPlanner with a single registered agent.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_agents::{Bandit, CentralPlanner, PlanningAgent};
use cognate_knowledge::{at, path, BaseKnowledge, KnowledgeStack};

fn ungated_corridor() -> KnowledgeStack {
    let mut base = BaseKnowledge::new();
    for (a, b) in [("start", "junction"), ("junction", "path_b"), ("path_b", "path_b1")] {
        base.append(path(a, b));
        base.append(path(b, a));
    }
    base.append(at("bandit_a", "start"));
    KnowledgeStack::new(base)
}

#[test]
fn bandit_reaches_a_goal_three_moves_away() {
    let knowledge = ungated_corridor();
    let bandit = Bandit::new("bandit_a", knowledge.clone());
    let mut central = CentralPlanner::new(knowledge, vec![("bandit_a".to_string(), PlanningAgent::Bandit(bandit))]);

    let dispatched = central.plan("bandit_a", at("bandit_a", "path_b1"));
    assert!(dispatched);

    let (_, agent) = &central.agents()[0];
    let plan = agent.action_plan();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan[0].to_string(), "t=1: Move bandit_a from start to junction");
    assert_eq!(plan[1].to_string(), "t=2: Move bandit_a from junction to path_b");
    assert_eq!(plan[2].to_string(), "t=3: Move bandit_a from path_b to path_b1");
}

#[test]
fn unknown_agent_name_is_rejected() {
    let knowledge = ungated_corridor();
    let bandit = Bandit::new("bandit_a", knowledge.clone());
    let mut central = CentralPlanner::new(knowledge, vec![("bandit_a".to_string(), PlanningAgent::Bandit(bandit))]);

    assert!(!central.plan("nobody", at("bandit_a", "path_b1")));
}
