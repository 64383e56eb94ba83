// ============================================================================
// Cognate Agents - Gate Mode
// File: domain/gate_mode.rs
//
// Description:
//   Whether a move through a gated edge is hard (the mover needs the
//   gate open and cannot itself open it) or soft (the mover can pass
//   regardless, but records opening the gate as a useful sub-goal for
//   whoever can).
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// Bandit semantics: an open gate wins and is recorded as a
    /// dependency; a closed gate rejects that candidate location.
    Hard,
    /// Miniboss semantics: a closed gate never blocks the move, but is
    /// recorded as a required sub-goal.
    Soft,
}
