// ============================================================================
// Cognate Planning - Relaxed Agent Contract
// File: relaxed_agent.rs
//
// Description:
//   The minimal surface the relaxed planning graph and the enforced
//   hill climbing search need from an agent: its current goal, and the
//   set of actions it could attempt from a given knowledge view. The
//   concrete agent types (bandit, miniboss, ...) live one crate up and
//   implement this trait; this crate never needs to know about them.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_knowledge::{Fact, KnowledgeStack};

use crate::action::Action;

pub trait RelaxedAgent {
    fn goal(&self) -> &Fact;

    fn produce_valid_actions(&self, knowledge: &KnowledgeStack) -> Vec<Box<dyn Action>>;
}
