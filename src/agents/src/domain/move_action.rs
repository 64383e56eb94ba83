// ============================================================================
// Cognate Agents - Move Action
// File: domain/move_action.rs
//
// Description:
//   Moves an agent from wherever the CanMoveRule found it feasible to
//   a destination node. Adds At(agent, destination); removes
//   At(agent, prior) for every surviving prior location the rule
//   found (ordinarily exactly one, in real, non-relaxed search).
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashSet;
use std::fmt;

use cognate_knowledge::{at, Atom, Fact, KnowledgeStack};
use cognate_planning::{hash_action, Action};

use super::can_move::CanMoveRule;
use super::gate_mode::GateMode;

#[derive(Clone, Debug)]
pub struct MoveAction {
    agent: Atom,
    destination: Atom,
    mode: GateMode,
    prior_locations: Vec<Atom>,
    dependencies: HashSet<Fact>,
    adds: HashSet<Fact>,
    removes: HashSet<Fact>,
    required_goal: Option<Fact>,
    timestamp: Option<u64>,
}

impl MoveAction {
    pub fn new(agent: impl Into<Atom>, destination: impl Into<Atom>, mode: GateMode) -> Self {
        MoveAction {
            agent: agent.into(),
            destination: destination.into(),
            mode,
            prior_locations: Vec::new(),
            dependencies: HashSet::new(),
            adds: HashSet::new(),
            removes: HashSet::new(),
            required_goal: None,
            timestamp: None,
        }
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp.unwrap_or_default();
        let prior = self
            .prior_locations
            .first()
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "?".to_string());
        write!(
            f,
            "t={timestamp}: Move {} from {prior} to {}",
            self.agent, self.destination
        )?;
        if let Some(goal) = &self.required_goal {
            write!(f, "\n\trequired: {goal}")?;
        }
        Ok(())
    }
}

impl Action for MoveAction {
    fn meets_preconditions(&mut self, knowledge: &KnowledgeStack) -> bool {
        let mut rule = CanMoveRule::new(self.agent.clone(), self.destination.clone(), self.mode);
        if !rule.test(knowledge) {
            return false;
        }
        self.prior_locations = rule.surviving_locations;
        self.dependencies = rule.dependencies;
        self.required_goal = rule.required_goal;
        true
    }

    fn generate_adds(&mut self, _knowledge: &KnowledgeStack) -> HashSet<Fact> {
        self.adds = HashSet::from([at(self.agent.clone(), self.destination.clone())]);
        self.adds.clone()
    }

    fn generate_removes(&mut self, _knowledge: &KnowledgeStack) -> HashSet<Fact> {
        self.removes = self
            .prior_locations
            .iter()
            .map(|loc| at(self.agent.clone(), loc.clone()))
            .collect();
        self.removes.clone()
    }

    fn dependencies(&self) -> &HashSet<Fact> {
        &self.dependencies
    }

    fn adds(&self) -> &HashSet<Fact> {
        &self.adds
    }

    fn removes(&self) -> &HashSet<Fact> {
        &self.removes
    }

    fn required_goal(&self) -> Option<&Fact> {
        self.required_goal.as_ref()
    }

    fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = Some(timestamp);
    }

    fn clone_box(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }

    fn identity_hash(&self) -> u64 {
        hash_action("move", &self.dependencies, &self.adds, &self.removes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cognate_knowledge::{path, BaseKnowledge};

    #[test]
    fn display_without_required_goal() {
        let mut base = BaseKnowledge::new();
        base.append(at("bandit_a", "start"));
        base.append(path("start", "junction"));
        let knowledge = KnowledgeStack::new(base);

        let mut action = MoveAction::new("bandit_a", "junction", GateMode::Hard);
        assert!(action.meets_preconditions(&knowledge));
        action.set_timestamp(3);
        assert_eq!(
            action.to_string(),
            "t=3: Move bandit_a from start to junction"
        );
    }

    #[test]
    fn display_includes_required_goal_for_soft_gate() {
        let mut base = BaseKnowledge::new();
        base.append(at("miniboss", "start"));
        base.append(path("start", "junction"));
        base.append(cognate_knowledge::closed_gate("start", "junction"));
        let knowledge = KnowledgeStack::new(base);

        let mut action = MoveAction::new("miniboss", "junction", GateMode::Soft);
        assert!(action.meets_preconditions(&knowledge));
        action.set_timestamp(1);
        assert_eq!(
            action.to_string(),
            "t=1: Move miniboss from start to junction\n\trequired: OpenGate(start, junction)"
        );
    }

    #[test]
    fn adds_and_removes_are_cached_after_generation() {
        let mut base = BaseKnowledge::new();
        base.append(at("bandit_a", "start"));
        base.append(path("start", "junction"));
        let knowledge = KnowledgeStack::new(base);

        let mut action = MoveAction::new("bandit_a", "junction", GateMode::Hard);
        action.meets_preconditions(&knowledge);
        let adds = action.generate_adds(&knowledge);
        let removes = action.generate_removes(&knowledge);
        assert_eq!(adds, HashSet::from([at("bandit_a", "junction")]));
        assert_eq!(removes, HashSet::from([at("bandit_a", "start")]));
        assert_eq!(action.adds(), &adds);
        assert_eq!(action.removes(), &removes);
    }
}
