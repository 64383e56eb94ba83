// ============================================================================
// Cognate Knowledge - Base Knowledge
// File: base.rs
//
// Description:
//   The append-only ground-truth fact store. This is layer zero of a
//   KnowledgeStack: nothing may ever be removed from it directly, only
//   shadowed by deletions recorded in higher layers.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::{HashMap, HashSet};

use crate::fact::{Atom, Fact, Functor};
use crate::query::Proposal;

#[derive(Debug, Clone, Default)]
pub struct BaseKnowledge {
    facts: HashMap<Functor, HashSet<Vec<Atom>>>,
}

impl BaseKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent: re-asserting an existing fact is a no-op.
    pub fn append(&mut self, fact: Fact) {
        self.facts
            .entry(fact.functor)
            .or_default()
            .insert(fact.arguments);
    }

    pub fn check_fact(&self, fact: &Fact) -> bool {
        self.facts
            .get(&fact.functor)
            .is_some_and(|tuples| tuples.contains(&fact.arguments))
    }

    pub fn tuples(&self, functor: Functor) -> impl Iterator<Item = &Vec<Atom>> {
        self.facts.get(&functor).into_iter().flatten()
    }

    pub fn find_possible_solutions(&self, proposal: &Proposal) {
        for tuple in self.tuples(proposal.functor()) {
            proposal.consider(tuple);
        }
    }
}
