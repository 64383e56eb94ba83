// ============================================================================
// Cognate Planning - Action Contract
// File: action.rs
//
// Description:
//   The shape every domain action must satisfy to take part in the
//   relaxed planning graph and the enforced hill climbing search.
//   meets_preconditions is allowed to mutate the action (recording
//   which dependencies and which required sub-goal made it feasible);
//   generate_adds/generate_removes are expected to be idempotent given
//   those cached dependencies.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashSet;
use std::fmt;

use cognate_knowledge::{Fact, KnowledgeStack};

/// Sentinel heuristic value denoting infeasibility. Propagated through
/// return values rather than raised, matching the rest of the planner.
pub const DEAD_END: u32 = 99_999;

pub trait Action: fmt::Display + fmt::Debug {
    /// Tests feasibility against `knowledge`, caching dependencies and
    /// (if the action needs something only another agent can supply)
    /// a required goal as a side effect.
    fn meets_preconditions(&mut self, knowledge: &KnowledgeStack) -> bool;

    fn generate_adds(&mut self, knowledge: &KnowledgeStack) -> HashSet<Fact>;

    fn generate_removes(&mut self, knowledge: &KnowledgeStack) -> HashSet<Fact>;

    fn dependencies(&self) -> &HashSet<Fact>;

    /// The adds/removes last computed by generate_adds/generate_removes.
    fn adds(&self) -> &HashSet<Fact>;

    fn removes(&self) -> &HashSet<Fact>;

    fn required_goal(&self) -> Option<&Fact>;

    fn timestamp(&self) -> Option<u64>;

    fn set_timestamp(&mut self, timestamp: u64);

    fn clone_box(&self) -> Box<dyn Action>;

    /// Identity derived from dependencies, effects and action kind,
    /// used to deduplicate otherwise-equivalent successor actions.
    fn identity_hash(&self) -> u64;
}

/// Shared helper for identity_hash implementations: hashes a kind tag
/// plus three fact sets in a deterministic (sorted) order.
pub fn hash_action(kind: &str, dependencies: &HashSet<Fact>, adds: &HashSet<Fact>, removes: &HashSet<Fact>) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn sorted(facts: &HashSet<Fact>) -> Vec<&Fact> {
        let mut v: Vec<&Fact> = facts.iter().collect();
        v.sort();
        v
    }

    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    sorted(dependencies).hash(&mut hasher);
    sorted(adds).hash(&mut hasher);
    sorted(removes).hash(&mut hasher);
    hasher.finish()
}
