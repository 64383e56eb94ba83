// ============================================================================
// Cognate Knowledge
// File: lib.rs
//
// Description:
//   Fact algebra, layered knowledge base and prediction store shared by
//   every planner and agent in Cognate. This crate has no notion of
//   actions, agents or search; it only answers "what is true" under a
//   given view of the world.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

pub mod base;
pub mod fact;
pub mod predicted;
pub mod query;
pub mod stack;

pub use base::BaseKnowledge;
pub use fact::{
    at, atom, closed_gate, downstairs, drop_edge, open_gate, path, teleportable, trigger,
    upstairs, Atom, Fact, Functor,
};
pub use predicted::PredictedKnowledge;
pub use query::{g, v, Proposal, SharedVar, Slot, Variable};
pub use stack::KnowledgeStack;
