// ============================================================================
// Cognate Agents - Trigger Feasibility Rule
// File: domain/can_trigger.rs
//
// Description:
//   Tests whether an agent standing at a triggerable location can fire
//   it, recording every (gate1, gate2, location) Trigger fact found
//   there as a dependency. A TriggerAction later re-derives the exact
//   gate pairs to flip from those dependencies.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashSet;

use cognate_knowledge::{at, g, trigger, v, Atom, Fact, Functor, KnowledgeStack, Proposal, Variable};

pub struct CanTriggerRule {
    pub agent: Atom,
    pub dependencies: HashSet<Fact>,
}

impl CanTriggerRule {
    pub fn new(agent: Atom) -> Self {
        CanTriggerRule {
            agent,
            dependencies: HashSet::new(),
        }
    }

    pub fn test(&mut self, knowledge: &KnowledgeStack) -> bool {
        let locations = Variable::new();
        knowledge.find_possible_solutions(&Proposal::new(
            Functor::At,
            vec![g(self.agent.clone()), v(&locations)],
        ));
        let locations: Vec<Atom> = locations.borrow().values().cloned().collect();

        let mut found = false;
        for location in locations {
            let gate1 = Variable::new();
            let gate2 = Variable::new();
            knowledge.find_possible_solutions(&Proposal::new(
                Functor::Trigger,
                vec![v(&gate1), v(&gate2), g(location.clone())],
            ));
            if gate1.borrow().is_empty() {
                continue;
            }

            found = true;
            self.dependencies.insert(at(self.agent.clone(), location.clone()));
            for g1 in gate1.borrow().values().cloned().collect::<Vec<_>>() {
                for g2 in gate2.borrow().values().cloned().collect::<Vec<_>>() {
                    if knowledge.check_fact(&trigger(g1.clone(), g2.clone(), location.clone())) {
                        self.dependencies
                            .insert(trigger(g1.clone(), g2.clone(), location.clone()));
                    }
                }
            }
        }

        found
    }
}
