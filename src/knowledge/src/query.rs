// ============================================================================
// Cognate Knowledge - Query Primitives
// File: query.rs
//
// Description:
//   Variable and Proposal, the two primitives every feasibility rule
//   uses to ask the knowledge stack "what ground terms satisfy this
//   partially-bound fact". A Variable accumulates candidate bindings
//   across possibly several proposals; apply_and/apply_or let a rule
//   combine successive query passes.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::fact::{Atom, Functor};

/// An unbound slot accumulating the atoms it has been seen to match.
/// `cache_results` snapshots the current binding set so that a
/// subsequent round of proposals can be intersected (`apply_and`) or
/// unioned (`apply_or`) against it, rather than against whatever the
/// next round happens to produce.
#[derive(Debug, Default)]
pub struct Variable {
    possible_values: HashSet<Atom>,
    cache: Option<HashSet<Atom>>,
}

pub type SharedVar = Rc<RefCell<Variable>>;

impl Variable {
    pub fn new() -> SharedVar {
        Rc::new(RefCell::new(Variable::default()))
    }

    pub fn add_possibility(&mut self, value: Atom) {
        self.possible_values.insert(value);
    }

    pub fn values(&self) -> impl Iterator<Item = &Atom> {
        self.possible_values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.possible_values.is_empty()
    }

    pub fn cache_results(&mut self) {
        self.cache = Some(std::mem::take(&mut self.possible_values));
    }

    /// Intersect the current bindings with the cached set. A no-op
    /// when nothing has been cached yet.
    pub fn apply_and(&mut self) {
        if let Some(cache) = &self.cache {
            self.possible_values.retain(|v| cache.contains(v));
        }
    }

    /// Union the current bindings with the cached set. A no-op when
    /// nothing has been cached yet.
    pub fn apply_or(&mut self) {
        if let Some(cache) = &self.cache {
            self.possible_values.extend(cache.iter().cloned());
        }
    }
}

/// One slot of a Proposal: either a ground atom the candidate tuple
/// must match exactly, or a shared Variable that accumulates whatever
/// values appear in that position across every matching tuple.
#[derive(Clone)]
pub enum Slot {
    Ground(Atom),
    Var(SharedVar),
}

pub fn g(value: impl Into<Atom>) -> Slot {
    Slot::Ground(value.into())
}

pub fn v(var: &SharedVar) -> Slot {
    Slot::Var(var.clone())
}

/// A partially-bound fact template. `consider` is called once per
/// candidate tuple under the proposal's functor; a tuple that
/// disagrees with any ground slot is rejected outright and binds
/// nothing, matching a unification failure.
pub struct Proposal {
    functor: Functor,
    slots: Vec<Slot>,
}

impl Proposal {
    pub fn new(functor: Functor, slots: Vec<Slot>) -> Self {
        Proposal { functor, slots }
    }

    pub fn functor(&self) -> Functor {
        self.functor
    }

    pub fn consider(&self, tuple: &[Atom]) {
        if tuple.len() != self.slots.len() {
            return;
        }
        for (slot, value) in self.slots.iter().zip(tuple) {
            if let Slot::Ground(expected) = slot {
                if expected != value {
                    return;
                }
            }
        }
        for (slot, value) in self.slots.iter().zip(tuple) {
            if let Slot::Var(var) = slot {
                var.borrow_mut().add_possibility(value.clone());
            }
        }
    }
}
