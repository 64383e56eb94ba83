// ============================================================================
// Cognate Agents - Crate Root
// File: lib.rs
//
// Description:
//   Concrete agent roles (Bandit, Miniboss) and the central planner that
//   coordinates them, built on top of cognate-knowledge and
//   cognate-planning.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

pub mod agent;
pub mod bandit;
pub mod central;
pub mod domain;
pub mod miniboss;

pub use agent::{AgentCore, PlanningAgent};
pub use bandit::Bandit;
pub use central::CentralPlanner;
pub use domain::{CanMoveRule, CanTriggerRule, GateMode, MoveAction, TriggerAction};
pub use miniboss::Miniboss;
