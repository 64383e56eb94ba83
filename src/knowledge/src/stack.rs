// ============================================================================
// Cognate Knowledge - Knowledge Stack
// File: stack.rs
//
// Description:
//   The transactional view over BaseKnowledge an agent actually plans
//   against: a base layer plus a stack of add/delete deltas. Layer 0 is
//   the base itself and accepts only appends; layers above it record
//   adds and deletes independently and may be popped off again without
//   touching anything below.
//
//   Pushing a layer materializes whatever the central coordinator has
//   predicted for that timestamp, which is how an agent's private view
//   comes to agree with commitments made by other agents.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::{HashMap, HashSet};

use crate::base::BaseKnowledge;
use crate::fact::{Atom, Fact, Functor};
use crate::predicted::PredictedKnowledge;
use crate::query::Proposal;

#[derive(Debug, Clone, Default)]
struct Layer {
    adds: HashMap<Functor, HashSet<Vec<Atom>>>,
    deletes: HashMap<Functor, HashSet<Vec<Atom>>>,
}

impl Layer {
    fn add_count(&self) -> usize {
        self.adds.values().map(|tuples| tuples.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeStack {
    base: BaseKnowledge,
    layers: Vec<Layer>,
    predicted: PredictedKnowledge,
}

impl KnowledgeStack {
    pub fn new(base: BaseKnowledge) -> Self {
        KnowledgeStack {
            base,
            layers: Vec::new(),
            predicted: PredictedKnowledge::new(),
        }
    }

    pub fn current_layer(&self) -> usize {
        self.layers.len()
    }

    /// Layer 0 forwards straight to the base (append-only, idempotent).
    /// Above layer 0, a fact already considered true is not
    /// re-recorded: the delta only ever grows the set of *new* facts,
    /// which is what keeps the relaxed planning graph monotone.
    pub fn append(&mut self, fact: Fact) {
        if self.layers.is_empty() {
            self.base.append(fact);
            return;
        }
        if self.check_fact(&fact) {
            return;
        }
        let top = self.layers.last_mut().unwrap();
        top.adds.entry(fact.functor).or_default().insert(fact.arguments);
    }

    /// Layer 0 cannot record deletions; above it, a fact is only
    /// recorded as removed if it currently holds.
    pub fn remove(&mut self, fact: &Fact) {
        if self.layers.is_empty() {
            return;
        }
        if !self.check_fact(fact) {
            return;
        }
        let top = self.layers.last_mut().unwrap();
        top.deletes
            .entry(fact.functor)
            .or_default()
            .insert(fact.arguments.clone());
    }

    pub fn check_fact(&self, fact: &Fact) -> bool {
        self.flatten(fact.functor).contains(&fact.arguments)
    }

    /// The set of ground tuples currently true for `functor`, with the
    /// base layer and every delta above it folded in order.
    pub fn flatten(&self, functor: Functor) -> HashSet<Vec<Atom>> {
        let mut current: HashSet<Vec<Atom>> = self.base.tuples(functor).cloned().collect();
        for layer in &self.layers {
            if let Some(adds) = layer.adds.get(&functor) {
                current.extend(adds.iter().cloned());
            }
            if let Some(deletes) = layer.deletes.get(&functor) {
                for tuple in deletes {
                    current.remove(tuple);
                }
            }
        }
        current
    }

    pub fn find_possible_solutions(&self, proposal: &Proposal) {
        for tuple in self.flatten(proposal.functor()) {
            proposal.consider(&tuple);
        }
    }

    /// Number of distinct facts added at the current (topmost) layer.
    /// Used by the relaxed planning graph to detect a fixpoint.
    pub fn facts_in_current_add(&self) -> usize {
        self.layers.last().map(Layer::add_count).unwrap_or(0)
    }

    pub fn predict_add(&mut self, fact: Fact, timestamp: u64) {
        self.predicted.predict_add(fact, timestamp);
    }

    pub fn predict_remove(&mut self, fact: Fact, timestamp: u64) {
        self.predicted.predict_remove(fact, timestamp);
    }

    pub fn check_prediction(&self, fact: &Fact, removal: bool) -> Option<u64> {
        self.predicted.check_prediction(fact, removal)
    }

    /// Pushes a new empty layer, then materializes whatever additions
    /// and removals were predicted to land exactly at the new layer
    /// index, folding other agents' committed plans into this view.
    pub fn push_layer(&mut self) -> usize {
        self.layers.push(Layer::default());
        let timestamp = self.current_layer() as u64;
        let adds = self.predicted.take_predicted_adds(timestamp);
        let removes = self.predicted.take_predicted_removes(timestamp);
        log::trace!(
            "push_layer: layer={} materializing {} predicted adds, {} predicted removes",
            timestamp,
            adds.len(),
            removes.len()
        );
        for fact in adds {
            self.append(fact);
        }
        for fact in removes {
            self.remove(&fact);
        }
        self.current_layer()
    }

    /// Discards the topmost layer. Returns `None` at layer 0 instead
    /// of panicking: underflow is a normal, expected condition during
    /// search backtracking, never a programmer error.
    pub fn pop_layer(&mut self) -> Option<usize> {
        self.layers.pop()?;
        log::trace!("pop_layer: layer={}", self.current_layer());
        Some(self.current_layer())
    }

    /// Pushes layers until the current layer is at least `timestamp`.
    pub fn advance_to(&mut self, timestamp: u64) {
        while (self.current_layer() as u64) < timestamp {
            self.push_layer();
        }
    }
}
