// ============================================================================
// Cognate Knowledge - Predicted Knowledge
// File: predicted.rs
//
// Description:
//   The central coordinator's ledger of facts that committed actions
//   will add or remove at a future timestamp. Earliest prediction
//   wins: once an agent has been told a fact becomes true (or false)
//   at time t, a later, later-arriving prediction for the same fact
//   cannot push that timestamp back out.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashMap;

use crate::fact::{Atom, Fact, Functor};

#[derive(Debug, Clone, Default)]
pub struct PredictedKnowledge {
    adds: HashMap<Functor, HashMap<Vec<Atom>, u64>>,
    removes: HashMap<Functor, HashMap<Vec<Atom>, u64>>,
}

fn record(table: &mut HashMap<Functor, HashMap<Vec<Atom>, u64>>, fact: Fact, timestamp: u64) {
    let slot = table
        .entry(fact.functor)
        .or_default()
        .entry(fact.arguments)
        .or_insert(timestamp);
    if timestamp < *slot {
        *slot = timestamp;
    }
}

fn lookup(table: &HashMap<Functor, HashMap<Vec<Atom>, u64>>, fact: &Fact) -> Option<u64> {
    table.get(&fact.functor)?.get(&fact.arguments).copied()
}

fn drain_at(table: &mut HashMap<Functor, HashMap<Vec<Atom>, u64>>, timestamp: u64) -> Vec<Fact> {
    let mut out = Vec::new();
    for (functor, tuples) in table.iter_mut() {
        tuples.retain(|args, t| {
            if *t == timestamp {
                out.push(Fact::new(*functor, args.clone()));
                false
            } else {
                true
            }
        });
    }
    out
}

impl PredictedKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predict_add(&mut self, fact: Fact, timestamp: u64) {
        record(&mut self.adds, fact, timestamp);
    }

    pub fn predict_remove(&mut self, fact: Fact, timestamp: u64) {
        record(&mut self.removes, fact, timestamp);
    }

    /// Returns the predicted timestamp for `fact`, routed by whether
    /// the caller is asking about an addition or a removal prediction.
    pub fn check_prediction(&self, fact: &Fact, removal: bool) -> Option<u64> {
        if removal {
            lookup(&self.removes, fact)
        } else {
            lookup(&self.adds, fact)
        }
    }

    /// Pulls every addition predicted for exactly `timestamp` out of
    /// the ledger, consuming them.
    pub fn take_predicted_adds(&mut self, timestamp: u64) -> Vec<Fact> {
        drain_at(&mut self.adds, timestamp)
    }

    pub fn take_predicted_removes(&mut self, timestamp: u64) -> Vec<Fact> {
        drain_at(&mut self.removes, timestamp)
    }
}
