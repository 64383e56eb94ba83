// ============================================================================
// Cognate Agents - Miniboss
// File: miniboss.rs
//
// Description:
//   A miniboss can move under soft gate semantics (a closed gate never
//   blocks it, but is recorded as a required sub-goal for a bandit to
//   clear) and cannot use triggers at all. Grounded on
//   examples/original_source/miniboss.py's Miniboss.produce_valid_actions.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_knowledge::{g, v, Fact, Functor, KnowledgeStack, Proposal, Variable};
use cognate_planning::{Action, RelaxedAgent};

use crate::agent::AgentCore;
use crate::domain::{GateMode, MoveAction};

pub struct Miniboss {
    core: AgentCore,
}

impl Miniboss {
    pub fn new(name: impl Into<String>, knowledge: KnowledgeStack) -> Self {
        Miniboss {
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

impl RelaxedAgent for Miniboss {
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
                let mut mv = MoveAction::new(self.core.name(), destination, GateMode::Soft);
                if mv.meets_preconditions(knowledge) {
                    actions.push(Box::new(mv));
                }
            }
        }

        actions
    }
}
