// ============================================================================
// Cognate Agents - Movement Feasibility Rule
// File: domain/can_move.rs
//
// Description:
//   Tests whether an agent can move to a destination node, from
//   whichever current location(s) it might be at. Candidate locations
//   come from the At proposal; for each one with a Path edge to the
//   destination, gate state is consulted according to GateMode.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashSet;

use cognate_knowledge::{at, closed_gate, g, open_gate, path, v, Atom, Fact, Functor, KnowledgeStack, Proposal, Variable};

use super::gate_mode::GateMode;

pub struct CanMoveRule {
    pub agent: Atom,
    pub destination: Atom,
    pub mode: GateMode,
    pub surviving_locations: Vec<Atom>,
    pub dependencies: HashSet<Fact>,
    pub required_goal: Option<Fact>,
}

impl CanMoveRule {
    pub fn new(agent: Atom, destination: Atom, mode: GateMode) -> Self {
        CanMoveRule {
            agent,
            destination,
            mode,
            surviving_locations: Vec::new(),
            dependencies: HashSet::new(),
            required_goal: None,
        }
    }

    pub fn test(&mut self, knowledge: &KnowledgeStack) -> bool {
        let current_location = Variable::new();
        knowledge.find_possible_solutions(&Proposal::new(
            Functor::At,
            vec![g(self.agent.clone()), v(&current_location)],
        ));
        let candidates: Vec<Atom> = current_location.borrow().values().cloned().collect();
        if candidates.is_empty() {
            return false;
        }

        let mut found = false;
        for candidate in candidates {
            if !knowledge.check_fact(&path(candidate.clone(), self.destination.clone())) {
                continue;
            }

            match self.mode {
                GateMode::Hard => {
                    let gate_open =
                        knowledge.check_fact(&open_gate(candidate.clone(), self.destination.clone()));
                    let gate_closed =
                        knowledge.check_fact(&closed_gate(candidate.clone(), self.destination.clone()));
                    if gate_open {
                        self.dependencies
                            .insert(open_gate(candidate.clone(), self.destination.clone()));
                    } else if gate_closed {
                        // open-wins: without an open gate fact, a hard
                        // mover cannot use this candidate location at all.
                        continue;
                    }
                }
                GateMode::Soft => {
                    if knowledge.check_fact(&closed_gate(candidate.clone(), self.destination.clone())) {
                        self.required_goal =
                            Some(open_gate(candidate.clone(), self.destination.clone()));
                    }
                }
            }

            self.dependencies.insert(at(self.agent.clone(), candidate.clone()));
            self.dependencies
                .insert(path(candidate.clone(), self.destination.clone()));
            self.surviving_locations.push(candidate);
            found = true;
        }

        found
    }
}
