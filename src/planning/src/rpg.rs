// ============================================================================
// Cognate Planning - Relaxed Planning Graph
// File: rpg.rs
//
// Description:
//   An admissible heuristic built by ignoring delete effects: layer by
//   layer, every action an agent could attempt gets to fire, and its
//   adds accumulate without ever being retracted. Once the goal is
//   satisfied (or no layer produces anything new, or max_depth is
//   exhausted) the graph is walked backward to extract, for the
//   bottom layer, the "helpful actions" worth actually trying in the
//   real (non-relaxed) search.
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::collections::HashSet;

use cognate_knowledge::{Fact, KnowledgeStack};

use crate::action::{Action, DEAD_END};
use crate::relaxed_agent::RelaxedAgent;

pub const DEFAULT_MAX_DEPTH: usize = 999;

pub struct RelaxedPlanningGraph<'a> {
    knowledge: &'a mut KnowledgeStack,
    goal: Fact,
    max_depth: usize,
}

impl<'a> RelaxedPlanningGraph<'a> {
    pub fn new(knowledge: &'a mut KnowledgeStack, goal: Fact) -> Self {
        RelaxedPlanningGraph {
            knowledge,
            goal,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns (heuristic, helpful actions for the very next layer).
    /// A DEAD_END heuristic always comes with an empty action list.
    /// Every layer this call pushes onto `knowledge` is popped back
    /// off before returning, on every code path, so a bidding agent
    /// never leaks stray layers onto its own knowledge stack.
    pub fn generate_heuristic(&mut self, agent: &dyn RelaxedAgent) -> (u32, Vec<Box<dyn Action>>) {
        let mut plan: Vec<Vec<Box<dyn Action>>> = Vec::new();
        let mut depth = 0usize;

        loop {
            if self.knowledge.check_fact(&self.goal) {
                break;
            }
            if depth >= self.max_depth {
                self.unwind(depth);
                return (DEAD_END, Vec::new());
            }

            let mut valid_actions = agent.produce_valid_actions(self.knowledge);
            if valid_actions.is_empty() {
                self.unwind(depth);
                return (DEAD_END, Vec::new());
            }

            self.knowledge.push_layer();
            for action in valid_actions.iter_mut() {
                for fact in action.generate_adds(self.knowledge) {
                    self.knowledge.append(fact);
                }
            }
            plan.push(valid_actions);

            if self.knowledge.facts_in_current_add() == 0 {
                depth += 1;
                self.unwind(depth);
                return (DEAD_END, Vec::new());
            }
            depth += 1;
        }

        self.analyze_plan(plan, depth)
    }

    fn unwind(&mut self, pushed: usize) {
        for _ in 0..pushed {
            self.knowledge.pop_layer();
        }
    }

    fn analyze_plan(
        &mut self,
        mut plan: Vec<Vec<Box<dyn Action>>>,
        depth: usize,
    ) -> (u32, Vec<Box<dyn Action>>) {
        if depth == 0 {
            return (0, Vec::new());
        }

        let mut helpful: Vec<HashSet<usize>> = (0..depth).map(|_| HashSet::new()).collect();
        let mut preconditions: Vec<HashSet<Fact>> = (0..=depth).map(|_| HashSet::new()).collect();
        preconditions[depth].insert(self.goal.clone());

        for layer in (0..depth).rev() {
            let wanted: Vec<Fact> = preconditions[layer + 1].iter().cloned().collect();
            for fact in wanted {
                let mut found_at = None;
                'search: for l in 0..=layer {
                    for (idx, action) in plan[l].iter().enumerate() {
                        if action.adds().contains(&fact) {
                            found_at = Some((l, idx));
                            break 'search;
                        }
                    }
                }
                if let Some((l, idx)) = found_at {
                    helpful[l].insert(idx);
                    preconditions[l].extend(plan[l][idx].dependencies().iter().cloned());
                }
            }
            self.knowledge.pop_layer();
        }

        let heuristic: u32 = helpful.iter().map(|set| set.len() as u32).sum();
        let layer0 = plan.remove(0);
        let helpful0 = layer0
            .into_iter()
            .enumerate()
            .filter_map(|(idx, action)| helpful[0].contains(&idx).then_some(action))
            .collect();

        (heuristic, helpful0)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use cognate_knowledge::{at, BaseKnowledge, Fact};

    use super::*;

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
            crate::action::hash_action("step", &self.dependencies, &self.adds, &self.removes)
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
    fn dead_end_when_no_valid_actions() {
        let mut base = BaseKnowledge::new();
        base.append(at("walker", "a"));
        let mut knowledge = KnowledgeStack::new(base);
        let agent = Walker {
            goal: at("walker", "z"),
            steps: vec![],
        };

        let mut rpg = RelaxedPlanningGraph::new(&mut knowledge, agent.goal().clone());
        let (heuristic, actions) = rpg.generate_heuristic(&agent);

        assert_eq!(heuristic, DEAD_END);
        assert!(actions.is_empty());
        assert_eq!(knowledge.current_layer(), 0, "dead end must not leak layers");
    }

    #[test]
    fn heuristic_counts_helpful_actions_toward_goal() {
        let mut base = BaseKnowledge::new();
        base.append(at("walker", "a"));
        let mut knowledge = KnowledgeStack::new(base);
        let agent = Walker {
            goal: at("walker", "c"),
            steps: vec![("a", "b"), ("b", "c")],
        };

        let mut rpg = RelaxedPlanningGraph::new(&mut knowledge, agent.goal().clone());
        let (heuristic, actions) = rpg.generate_heuristic(&agent);

        assert!(heuristic > 0 && heuristic < DEAD_END);
        assert_eq!(actions.len(), 1, "only the first hop is helpful right now");
        assert_eq!(knowledge.current_layer(), 0, "analyze_plan must restore the stack");
    }
}
