// ============================================================================
// Cognate Agents - Trigger Action
// File: domain/trigger_action.rs
//
// Description:
//   Fires whatever triggerable gate pairs exist at the agent's current
//   location. For each distinct (gate1, gate2) pair named by a Trigger
//   dependency, a closed gate opens and an open gate closes -- the
//   trigger flips the pair's state rather than forcing it one way.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashSet;
use std::fmt;

use cognate_knowledge::{closed_gate, open_gate, Atom, Fact, Functor, KnowledgeStack};
use cognate_planning::{hash_action, Action};

use super::can_trigger::CanTriggerRule;

#[derive(Clone, Debug)]
pub struct TriggerAction {
    agent: Atom,
    location: Option<Atom>,
    dependencies: HashSet<Fact>,
    adds: HashSet<Fact>,
    removes: HashSet<Fact>,
    timestamp: Option<u64>,
}

impl TriggerAction {
    pub fn new(agent: impl Into<Atom>) -> Self {
        TriggerAction {
            agent: agent.into(),
            location: None,
            dependencies: HashSet::new(),
            adds: HashSet::new(),
            removes: HashSet::new(),
            timestamp: None,
        }
    }

    fn gate_pairs(&self) -> HashSet<(Atom, Atom)> {
        self.dependencies
            .iter()
            .filter(|fact| fact.functor == Functor::Trigger)
            .map(|fact| (fact.arguments[0].clone(), fact.arguments[1].clone()))
            .collect()
    }
}

impl fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp.unwrap_or_default();
        let location = self
            .location
            .as_ref()
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "?".to_string());
        write!(f, "t={timestamp}: Trigger at {location}")
    }
}

impl Action for TriggerAction {
    fn meets_preconditions(&mut self, knowledge: &KnowledgeStack) -> bool {
        let mut rule = CanTriggerRule::new(self.agent.clone());
        if !rule.test(knowledge) {
            return false;
        }
        self.dependencies = rule.dependencies;
        self.location = self
            .dependencies
            .iter()
            .find(|fact| fact.functor == Functor::At)
            .map(|fact| fact.arguments[1].clone());
        true
    }

    fn generate_adds(&mut self, knowledge: &KnowledgeStack) -> HashSet<Fact> {
        let mut adds: HashSet<Fact> = self
            .gate_pairs()
            .into_iter()
            .filter(|(a, b)| knowledge.check_fact(&closed_gate(a.clone(), b.clone())))
            .map(|(a, b)| open_gate(a, b))
            .collect();
        adds.extend(self.gate_pairs().into_iter().filter_map(|(a, b)| {
            knowledge
                .check_fact(&open_gate(a.clone(), b.clone()))
                .then(|| closed_gate(a, b))
        }));
        self.adds = adds;
        self.adds.clone()
    }

    fn generate_removes(&mut self, knowledge: &KnowledgeStack) -> HashSet<Fact> {
        let mut removes: HashSet<Fact> = self
            .gate_pairs()
            .into_iter()
            .filter(|(a, b)| knowledge.check_fact(&closed_gate(a.clone(), b.clone())))
            .map(|(a, b)| closed_gate(a, b))
            .collect();
        removes.extend(self.gate_pairs().into_iter().filter_map(|(a, b)| {
            knowledge
                .check_fact(&open_gate(a.clone(), b.clone()))
                .then(|| open_gate(a, b))
        }));
        self.removes = removes;
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
        None
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
        hash_action("trigger", &self.dependencies, &self.adds, &self.removes)
    }
}
