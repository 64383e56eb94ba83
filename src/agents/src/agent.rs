// ============================================================================
// Cognate Agents - Agent Core and Dispatch
// File: agent.rs
//
// Description:
//   AgentCore holds the state every agent shares: a private knowledge
//   view, a commit clock, and a committed action plan. PlanningAgent
//   is a closed enum over the two concrete roles (Bandit, Miniboss);
//   dispatch is by match rather than a trait object, since the set of
//   roles is fixed.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use cognate_knowledge::{Fact, KnowledgeStack};
use cognate_planning::{
    Action, RelaxedAgent, RelaxedPlanningGraph, SearchPlan, DEAD_END, DEFAULT_MAX_DEPTH,
};

use crate::bandit::Bandit;
use crate::central::CentralPlanner;
use crate::miniboss::Miniboss;

#[derive(Debug)]
pub struct AgentCore {
    name: String,
    goal: Option<Fact>,
    knowledge: KnowledgeStack,
    next_available_time: u64,
    action_plan: Vec<Box<dyn Action>>,
}

impl AgentCore {
    pub fn new(name: impl Into<String>, knowledge: KnowledgeStack) -> Self {
        AgentCore {
            name: name.into(),
            goal: None,
            knowledge,
            next_available_time: 0,
            action_plan: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn knowledge(&self) -> &KnowledgeStack {
        &self.knowledge
    }

    pub fn action_plan(&self) -> &[Box<dyn Action>] {
        &self.action_plan
    }

    pub fn next_available_time(&self) -> u64 {
        self.next_available_time
    }

    /// Current goal, if any has been assigned by a bid or a plan call.
    pub fn goal(&self) -> &Fact {
        self.goal
            .as_ref()
            .expect("agent goal must be set before planning")
    }
}

pub enum PlanningAgent {
    Bandit(Bandit),
    Miniboss(Miniboss),
}

impl RelaxedAgent for PlanningAgent {
    fn goal(&self) -> &Fact {
        match self {
            PlanningAgent::Bandit(agent) => agent.goal(),
            PlanningAgent::Miniboss(agent) => agent.goal(),
        }
    }

    fn produce_valid_actions(&self, knowledge: &KnowledgeStack) -> Vec<Box<dyn Action>> {
        match self {
            PlanningAgent::Bandit(agent) => agent.produce_valid_actions(knowledge),
            PlanningAgent::Miniboss(agent) => agent.produce_valid_actions(knowledge),
        }
    }
}

impl PlanningAgent {
    pub fn name(&self) -> &str {
        self.core().name()
    }

    pub fn knowledge(&self) -> &KnowledgeStack {
        self.core().knowledge()
    }

    pub fn action_plan(&self) -> &[Box<dyn Action>] {
        self.core().action_plan()
    }

    fn core(&self) -> &AgentCore {
        match self {
            PlanningAgent::Bandit(agent) => agent.core(),
            PlanningAgent::Miniboss(agent) => agent.core(),
        }
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        match self {
            PlanningAgent::Bandit(agent) => agent.core_mut(),
            PlanningAgent::Miniboss(agent) => agent.core_mut(),
        }
    }

    /// Replaces this agent's private view with a clone of the shared
    /// view, advanced forward to this agent's own clock so any
    /// predictions already due get folded in.
    pub fn set_knowledge(&mut self, shared: &KnowledgeStack) {
        let mut cloned = shared.clone();
        cloned.advance_to(self.core().next_available_time());
        self.core_mut().knowledge = cloned;
    }

    /// Builds a relaxed planning graph against this agent's current
    /// knowledge and returns the resulting heuristic as a bid.
    pub fn supply_bid(&mut self, goal: Fact) -> u32 {
        self.supply_bid_with_max_depth(goal, DEFAULT_MAX_DEPTH)
    }

    pub fn supply_bid_with_max_depth(&mut self, goal: Fact, max_depth: usize) -> u32 {
        self.core_mut().goal = Some(goal.clone());
        let mut knowledge = self.knowledge().clone();
        let mut rpg = RelaxedPlanningGraph::new(&mut knowledge, goal).with_max_depth(max_depth);
        let (heuristic, _) = rpg.generate_heuristic(&*self);
        heuristic
    }

    /// Searches for a plan to `goal` and commits its actions one at a
    /// time, predicting their effects to `central` as they commit.
    /// The moment a committed action carries a required sub-goal, this
    /// agent stops committing and asks `central` to contract that
    /// sub-goal out to whichever agent can supply it. If the contract
    /// itself fails, this agent gives up rather than looping forever
    /// on a blocking goal nobody can satisfy, reporting failure by
    /// returning DEAD_END instead of its clock.
    pub fn plan(&mut self, goal: Fact, central: &mut CentralPlanner) -> u32 {
        self.plan_with_max_depth(goal, central, DEFAULT_MAX_DEPTH)
    }

    pub fn plan_with_max_depth(
        &mut self,
        goal: Fact,
        central: &mut CentralPlanner,
        max_depth: usize,
    ) -> u32 {
        loop {
            self.core_mut().goal = Some(goal.clone());

            let search_knowledge = self.knowledge().clone();
            let start = self.core().next_available_time();
            let search = SearchPlan::with_max_depth(search_knowledge, &*self, start, max_depth);
            let plan = match search.plan(&*self) {
                Some(plan) => plan,
                None => return DEAD_END,
            };

            let mut blocking_goal = None;
            for action in plan {
                if action.required_goal().is_some() {
                    blocking_goal = action.required_goal().cloned();
                    break;
                }
                central.add_predictions(action.as_ref());
                let core = self.core_mut();
                core.knowledge.push_layer();
                for fact in action.adds() {
                    core.knowledge.append(fact.clone());
                }
                for fact in action.removes() {
                    core.knowledge.remove(fact);
                }
                core.next_available_time += 1;
                core.action_plan.push(action);
            }

            let required = match blocking_goal {
                None => return self.core().next_available_time() as u32,
                Some(required) => required,
            };

            let resume_time = central.contract(required);
            if resume_time == DEAD_END {
                return DEAD_END;
            }
            // Re-sync from central: the agent we just contracted with may
            // have recorded new predictions (or facts) on the shared
            // stack after our own knowledge was last cloned from it.
            let shared = central.shared_knowledge().clone();
            self.set_knowledge(&shared);
            while (self.core().next_available_time() as u32) < resume_time {
                let core = self.core_mut();
                core.knowledge.push_layer();
                core.next_available_time += 1;
            }
            // loop back and retry the same goal from the advanced clock
        }
    }
}
