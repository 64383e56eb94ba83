// ============================================================================
// Cognate Agents - Bandit
// File: bandit.rs
//
// Description:
//   A bandit can move and trigger, but moves under hard gate
//   semantics: a closed gate with no open counterpart blocks a
//   candidate location outright rather than merely being recorded as
//   a sub-goal. Grounded on examples/original_source/bandits.py's
//   Bandit.produce_valid_actions.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_knowledge::{g, v, Fact, Functor, KnowledgeStack, Proposal, Variable};
use cognate_planning::{Action, RelaxedAgent};

use crate::agent::AgentCore;
use crate::domain::{GateMode, MoveAction, TriggerAction};

pub struct Bandit {
    core: AgentCore,
}

impl Bandit {
    pub fn new(name: impl Into<String>, knowledge: KnowledgeStack) -> Self {
        Bandit {
            core: AgentCore::new(name, knowledge),
        }
    }

    pub fn core(&self) -> &AgentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }
}

impl RelaxedAgent for Bandit {
    fn goal(&self) -> &Fact {
        self.core.goal()
    }

    fn produce_valid_actions(&self, knowledge: &KnowledgeStack) -> Vec<Box<dyn Action>> {
        let mut actions: Vec<Box<dyn Action>> = Vec::new();

        let locations = Variable::new();
        knowledge.find_possible_solutions(&Proposal::new(
            Functor::At,
            vec![g(self.core.name()), v(&locations)],
        ));
        let locations: Vec<_> = locations.borrow().values().cloned().collect();

        for location in locations {
            let destinations = Variable::new();
            knowledge.find_possible_solutions(&Proposal::new(
                Functor::Path,
                vec![g(location.clone()), v(&destinations)],
            ));
            for destination in destinations.borrow().values().cloned().collect::<Vec<_>>() {
                let mut mv = MoveAction::new(self.core.name(), destination, GateMode::Hard);
                if mv.meets_preconditions(knowledge) {
                    actions.push(Box::new(mv));
                }
            }
        }

        let mut trigger = TriggerAction::new(self.core.name());
        if trigger.meets_preconditions(knowledge) {
            actions.push(Box::new(trigger));
        }

        actions
    }
}
