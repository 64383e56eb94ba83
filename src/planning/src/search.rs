// ============================================================================
// Cognate Planning - Enforced Hill Climbing Search
// File: search.rs
//
// Description:
//   State-space search over the real (non-relaxed) world, restricted
//   at each node to the helpful actions the relaxed planning graph
//   flagged for it. A state's heuristic is recomputed on construction;
//   the search keeps pushing down the first strictly-improving
//   successor it finds (front of the open list) while queuing the
//   rest for later (back of the open list), and refuses to immediately
//   undo the action that produced the current state (the taboo check).
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use cognate_knowledge::{Fact, KnowledgeStack};

use crate::action::Action;
use crate::relaxed_agent::RelaxedAgent;
use crate::rpg::{RelaxedPlanningGraph, DEFAULT_MAX_DEPTH};

/// A candidate undoes the state's producing action iff its adds are
/// exactly that action's removes and vice versa -- an exact 2-cycle.
fn mirrors(
    produced_adds: &HashSet<Fact>,
    produced_removes: &HashSet<Fact>,
    candidate_adds: &HashSet<Fact>,
    candidate_removes: &HashSet<Fact>,
) -> bool {
    produced_adds == candidate_removes && produced_removes == candidate_adds
}

pub struct State {
    knowledge: KnowledgeStack,
    action: Option<Box<dyn Action>>,
    timestamp: u64,
    heuristic: u32,
    helpful_actions: Vec<Box<dyn Action>>,
    max_depth: usize,
}

impl State {
    pub fn new(
        knowledge: KnowledgeStack,
        agent: &dyn RelaxedAgent,
        timestamp: u64,
        action: Option<Box<dyn Action>>,
    ) -> Self {
        State::with_max_depth(knowledge, agent, timestamp, action, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(
        mut knowledge: KnowledgeStack,
        agent: &dyn RelaxedAgent,
        timestamp: u64,
        action: Option<Box<dyn Action>>,
        max_depth: usize,
    ) -> Self {
        let mut rpg =
            RelaxedPlanningGraph::new(&mut knowledge, agent.goal().clone()).with_max_depth(max_depth);
        let (heuristic, mut helpful_actions) = rpg.generate_heuristic(agent);
        for helpful in helpful_actions.iter_mut() {
            helpful.set_timestamp(timestamp + 1);
        }
        State {
            knowledge,
            action,
            timestamp,
            heuristic,
            helpful_actions,
            max_depth,
        }
    }

    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    pub fn into_action(self) -> Option<Box<dyn Action>> {
        self.action
    }

    fn is_taboo(&self, adds: &HashSet<Fact>, removes: &HashSet<Fact>) -> bool {
        match &self.action {
            None => false,
            Some(produced) => mirrors(produced.adds(), produced.removes(), adds, removes),
        }
    }

    /// Expands this state by attempting every helpful action against a
    /// private, local copy of its knowledge (the original is left
    /// untouched, which lets callers share `self` behind an `Rc`).
    pub fn get_successors(&self, agent: &dyn RelaxedAgent) -> Vec<State> {
        let mut successors = Vec::new();

        for template in &self.helpful_actions {
            let mut action = template.clone_box();
            let mut knowledge = self.knowledge.clone();

            if !action.meets_preconditions(&knowledge) {
                continue;
            }
            let adds = action.generate_adds(&knowledge);
            let removes = action.generate_removes(&knowledge);
            if self.is_taboo(&adds, &removes) {
                continue;
            }

            knowledge.push_layer();
            for fact in &adds {
                knowledge.append(fact.clone());
            }
            for fact in &removes {
                knowledge.remove(fact);
            }

            successors.push(State::with_max_depth(
                knowledge,
                agent,
                self.timestamp + 1,
                Some(action),
                self.max_depth,
            ));
        }

        successors.sort_by_key(State::heuristic);
        successors
    }
}

pub struct SearchPlan {
    root: State,
}

impl SearchPlan {
    pub fn new(knowledge: KnowledgeStack, agent: &dyn RelaxedAgent, start_timestamp: u64) -> Self {
        SearchPlan {
            root: State::new(knowledge, agent, start_timestamp, None),
        }
    }

    pub fn with_max_depth(
        knowledge: KnowledgeStack,
        agent: &dyn RelaxedAgent,
        start_timestamp: u64,
        max_depth: usize,
    ) -> Self {
        SearchPlan {
            root: State::with_max_depth(knowledge, agent, start_timestamp, None, max_depth),
        }
    }

    /// Enforced hill climbing: repeatedly expand the front path's tail
    /// state. The moment a strictly better heuristic turns up among
    /// its successors, the rest of that batch is deferred to the back
    /// of the open list and the improving successor's path goes to
    /// the front, continuing depth-first. A heuristic of zero ends
    /// the search with a complete action sequence. Returns `None` if
    /// the open list empties without ever reaching the goal.
    pub fn plan(self, agent: &dyn RelaxedAgent) -> Option<Vec<Box<dyn Action>>> {
        let root = Rc::new(self.root);
        let mut best_heuristic = root.heuristic;
        let mut open_list: VecDeque<Vec<Rc<State>>> = VecDeque::new();
        open_list.push_back(vec![root]);

        while let Some(path) = open_list.pop_front() {
            let curr = path.last().expect("path is never empty").clone();
            let mut successors = curr.get_successors(agent);
            log::debug!(
                "ehc: expanding state heuristic={} successors={}",
                curr.heuristic,
                successors.len()
            );

            while !successors.is_empty() {
                let next = successors.remove(0);
                let h = next.heuristic;

                if h == 0 {
                    let mut result_path = path.clone();
                    result_path.push(Rc::new(next));
                    return Some(
                        result_path[1..]
                            .iter()
                            .map(|state| {
                                state
                                    .action
                                    .as_ref()
                                    .expect("non-root path states always carry an action")
                                    .clone_box()
                            })
                            .collect(),
                    );
                }

                if h < best_heuristic {
                    for successor in successors.drain(..) {
                        let mut new_path = path.clone();
                        new_path.push(Rc::new(successor));
                        open_list.push_back(new_path);
                    }
                    best_heuristic = h;
                }

                let mut new_path = path.clone();
                new_path.push(Rc::new(next));
                open_list.push_front(new_path);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use cognate_knowledge::{at, BaseKnowledge};

    use super::*;
    use crate::action::hash_action;

    #[derive(Clone, Debug)]
    struct StepAction {
        from: &'static str,
        to: &'static str,
        dependencies: HashSet<Fact>,
        adds: HashSet<Fact>,
        removes: HashSet<Fact>,
        timestamp: Option<u64>,
    }

    impl StepAction {
        fn new(from: &'static str, to: &'static str) -> Self {
            StepAction {
                from,
                to,
                dependencies: HashSet::new(),
                adds: HashSet::new(),
                removes: HashSet::new(),
                timestamp: None,
            }
        }
    }

    impl fmt::Display for StepAction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Step {} -> {}", self.from, self.to)
        }
    }

    impl Action for StepAction {
        fn meets_preconditions(&mut self, knowledge: &KnowledgeStack) -> bool {
            if knowledge.check_fact(&at("walker", self.from)) {
                self.dependencies = HashSet::from([at("walker", self.from)]);
                true
            } else {
                false
            }
        }

        fn generate_adds(&mut self, _knowledge: &KnowledgeStack) -> HashSet<Fact> {
            self.adds = HashSet::from([at("walker", self.to)]);
            self.adds.clone()
        }

        fn generate_removes(&mut self, _knowledge: &KnowledgeStack) -> HashSet<Fact> {
            self.removes = HashSet::from([at("walker", self.from)]);
            self.removes.clone()
        }

        fn dependencies(&self) -> &HashSet<Fact> {
            &self.dependencies
        }

        fn adds(&self) -> &HashSet<Fact> {
            &self.adds
        }

        fn removes(&self) -> &HashSet<Fact> {
            &self.removes
        }

        fn required_goal(&self) -> Option<&Fact> {
            None
        }

        fn timestamp(&self) -> Option<u64> {
            self.timestamp
        }

        fn set_timestamp(&mut self, timestamp: u64) {
            self.timestamp = Some(timestamp);
        }

        fn clone_box(&self) -> Box<dyn Action> {
            Box::new(self.clone())
        }

        fn identity_hash(&self) -> u64 {
            hash_action("step", &self.dependencies, &self.adds, &self.removes)
        }
    }

    struct Walker {
        goal: Fact,
        steps: Vec<(&'static str, &'static str)>,
    }

    impl RelaxedAgent for Walker {
        fn goal(&self) -> &Fact {
            &self.goal
        }

        fn produce_valid_actions(&self, knowledge: &KnowledgeStack) -> Vec<Box<dyn Action>> {
            self.steps
                .iter()
                .filter_map(|&(from, to)| {
                    let mut action = StepAction::new(from, to);
                    action
                        .meets_preconditions(knowledge)
                        .then_some(Box::new(action) as Box<dyn Action>)
                })
                .collect()
        }
    }

    #[test]
    fn finds_full_chain_to_goal() {
        let mut base = BaseKnowledge::new();
        base.append(at("walker", "a"));
        let knowledge = KnowledgeStack::new(base);
        let agent = Walker {
            goal: at("walker", "c"),
            steps: vec![("a", "b"), ("b", "c")],
        };

        let search = SearchPlan::new(knowledge, &agent, 0);
        let plan = search.plan(&agent).expect("a path to the goal exists");

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].to_string(), "Step a -> b");
        assert_eq!(plan[1].to_string(), "Step b -> c");
        assert_eq!(plan[0].timestamp(), Some(1));
        assert_eq!(plan[1].timestamp(), Some(2));
    }

    #[test]
    fn returns_none_when_goal_is_unreachable() {
        let mut base = BaseKnowledge::new();
        base.append(at("walker", "a"));
        let knowledge = KnowledgeStack::new(base);
        let agent = Walker {
            goal: at("walker", "z"),
            steps: vec![("a", "b")],
        };

        let search = SearchPlan::new(knowledge, &agent, 0);
        assert!(search.plan(&agent).is_none());
    }

    #[test]
    fn mirrors_detects_an_exact_undo() {
        let forward_adds = HashSet::from([at("walker", "b")]);
        let forward_removes = HashSet::from([at("walker", "a")]);
        let back_adds = HashSet::from([at("walker", "a")]);
        let back_removes = HashSet::from([at("walker", "b")]);

        assert!(mirrors(&forward_adds, &forward_removes, &back_adds, &back_removes));
        assert!(!mirrors(&forward_adds, &forward_removes, &forward_adds, &forward_removes));
    }

    #[test]
    fn backtracking_through_an_unrelated_node_is_not_helpful() {
        let mut base = BaseKnowledge::new();
        base.append(at("walker", "a"));
        let knowledge = KnowledgeStack::new(base);
        // b -> a would undo the move that reached b; the relaxed graph
        // never flags it as helpful toward a goal that lies past b.
        let agent = Walker {
            goal: at("walker", "c"),
            steps: vec![("a", "b"), ("b", "a"), ("b", "c")],
        };

        let search = SearchPlan::new(knowledge, &agent, 0);
        let plan = search.plan(&agent).expect("a path to the goal exists");
        assert!(plan.iter().all(|action| action.to_string() != "Step b -> a"));
    }
}
