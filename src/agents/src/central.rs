// ============================================================================
// Cognate Agents - Central Planner
// File: central.rs
//
// Description:
//   The coordinator every agent's commitments flow through: it owns
//   the shared ground knowledge stack, dispatches top-level planning
//   requests to a named agent, and contracts blocking sub-goals out to
//   whichever registered agent bids lowest. Grounded on
//   examples/original_source/central.py's CentralPlanner.
//
//   The registry is a Vec rather than a HashMap so that tie-broken
//   bids resolve by registration order deterministically, matching
//   the specification; reentrant calls (an agent's plan() needing to
//   call back into another agent's plan() through this same planner)
//   are handled by temporarily removing the agent being called into
//   from the registry, to avoid aliasing a mutable borrow of `self`
//   with a mutable borrow into `self.agents`.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_knowledge::{Fact, KnowledgeStack};
use cognate_planning::{Action, DEAD_END, DEFAULT_MAX_DEPTH};

use crate::agent::PlanningAgent;

pub struct CentralPlanner {
    knowledge: KnowledgeStack,
    agents: Vec<(String, PlanningAgent)>,
    max_depth: usize,
}

impl CentralPlanner {
    pub fn new(knowledge: KnowledgeStack, agents: Vec<(String, PlanningAgent)>) -> Self {
        CentralPlanner {
            knowledge,
            agents,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the relaxed planning graph's search depth cap every
    /// agent registered with this planner bids and plans under.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn agents(&self) -> &[(String, PlanningAgent)] {
        &self.agents
    }

    /// The ground-truth stack every agent's private view is cloned
    /// from. Used by an agent resuming after a contract to pick up
    /// facts (or predictions) recorded by whichever agent it just
    /// contracted with.
    pub(crate) fn shared_knowledge(&self) -> &KnowledgeStack {
        &self.knowledge
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.agents.iter().position(|(n, _)| n == name)
    }

    /// Dispatches a top-level planning request to `instigator_name`.
    /// Returns false if no such agent is registered; true otherwise,
    /// regardless of whether the agent's own plan ultimately succeeds
    /// (an agent that hits a dead end still reports that the request
    /// was handled, it committed zero or a partial plan).
    pub fn plan(&mut self, instigator_name: &str, goal: Fact) -> bool {
        let idx = match self.position(instigator_name) {
            Some(idx) => idx,
            None => {
                log::debug!("plan: no agent registered under name {instigator_name}");
                return false;
            }
        };

        log::debug!("plan: dispatching {goal} to {instigator_name}");
        let shared = self.knowledge.clone();
        let (name, mut agent) = self.agents.remove(idx);
        agent.set_knowledge(&shared);
        let max_depth = self.max_depth;
        let completion = agent.plan_with_max_depth(goal, self, max_depth);
        log::debug!("plan: {instigator_name} finished with completion={completion}");
        self.agents.insert(idx, (name, agent));
        true
    }

    /// Every registered agent bids on `goal` from a fresh clone of the
    /// shared knowledge; the lowest bid wins ties broken by
    /// registration order. The winner is then asked to actually plan
    /// and commit toward the goal, and its completion time (or
    /// DEAD_END) is returned to the caller.
    pub fn contract(&mut self, goal: Fact) -> u32 {
        log::debug!("contract: soliciting bids for {goal} from {} agents", self.agents.len());
        let shared = self.knowledge.clone();
        let max_depth = self.max_depth;
        let mut bids: Vec<(u32, usize)> = Vec::with_capacity(self.agents.len());
        for (idx, (name, agent)) in self.agents.iter_mut().enumerate() {
            agent.set_knowledge(&shared);
            let bid = agent.supply_bid_with_max_depth(goal.clone(), max_depth);
            log::trace!("contract: {name} bids {bid}");
            bids.push((bid, idx));
        }

        let Some(&(winning_bid, winner_idx)) = bids
            .iter()
            .min_by_key(|(bid, idx)| (*bid, *idx))
        else {
            log::debug!("contract: no agents registered, nobody can supply {goal}");
            return DEAD_END;
        };

        if winning_bid == DEAD_END {
            log::debug!("contract: every bid was DEAD_END, nobody can supply {goal}");
            return DEAD_END;
        }

        let (name, mut winner) = self.agents.remove(winner_idx);
        log::debug!("contract: {name} won the bid at {winning_bid}");
        let completion_time = winner.plan_with_max_depth(goal, self, max_depth);
        self.agents.insert(winner_idx, (name, winner));
        completion_time
    }

    /// Records the adds and removes a just-committed action will
    /// cause at its timestamp, so other agents' future knowledge
    /// clones fold them in once they reach that layer.
    pub fn add_predictions(&mut self, action: &dyn Action) {
        let timestamp = action
            .timestamp()
            .expect("a committed action always carries a timestamp");
        for fact in action.adds() {
            self.knowledge.predict_add(fact.clone(), timestamp);
        }
        for fact in action.removes() {
            self.knowledge.predict_remove(fact.clone(), timestamp);
        }
    }

    /// Prints every registered agent's committed action plan, in
    /// registration order.
    pub fn admit_plans(&self) {
        for (name, agent) in &self.agents {
            println!("-----------------");
            println!("{name}");
            for action in agent.action_plan() {
                println!("{action}");
            }
        }
    }
}
