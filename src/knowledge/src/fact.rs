// ============================================================================
// Cognate Knowledge - Fact Algebra
// File: fact.rs
//
// Description:
//   The closed Functor enumeration and the value-typed Fact it indexes,
//   plus the small per-predicate constructor functions used everywhere
//   else in the planner. Facts are never keyed by string: equality and
//   hashing depend only on functor and arguments (see spec §3).
//
// Dual-licensed under MIT OR Apache-2.0.
// ============================================================================

use std::fmt;
use std::rc::Rc;

/// A ground atom: a ref-counted string so that cloning the knowledge
/// stack (which happens on every search-state expansion) never touches
/// the heap for the argument data itself, only the surrounding
/// collections.
pub type Atom = Rc<str>;

pub fn atom(s: impl Into<Rc<str>>) -> Atom {
    s.into()
}

/// Closed enumeration of predicate symbols. Extending the vocabulary
/// means extending this enum, never inventing a new string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Functor {
    Path,
    Drop,
    Teleportable,
    Downstairs,
    Upstairs,
    OpenGate,
    ClosedGate,
    At,
    Trigger,
}

impl Functor {
    pub fn name(self) -> &'static str {
        match self {
            Functor::Path => "Path",
            Functor::Drop => "Drop",
            Functor::Teleportable => "Teleportable",
            Functor::Downstairs => "Downstairs",
            Functor::Upstairs => "Upstairs",
            Functor::OpenGate => "OpenGate",
            Functor::ClosedGate => "ClosedGate",
            Functor::At => "At",
            Functor::Trigger => "Trigger",
        }
    }
}

impl fmt::Display for Functor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ground atomic proposition: a functor plus its argument tuple.
/// Two facts are interchangeable iff their functor and arguments are
/// equal -- there is no other notion of identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fact {
    pub functor: Functor,
    pub arguments: Vec<Atom>,
}

impl Fact {
    pub fn new(functor: Functor, arguments: Vec<Atom>) -> Self {
        Fact { functor, arguments }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.functor)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

macro_rules! fact_ctor {
    ($name:ident, $functor:expr, $($arg:ident),+) => {
        pub fn $name($($arg: impl Into<Atom>),+) -> Fact {
            Fact::new($functor, vec![$($arg.into()),+])
        }
    };
}

fact_ctor!(path, Functor::Path, a, b);
fact_ctor!(drop_edge, Functor::Drop, a, b);
fact_ctor!(teleportable, Functor::Teleportable, a, b);
fact_ctor!(downstairs, Functor::Downstairs, a, b);
fact_ctor!(upstairs, Functor::Upstairs, a, b);
fact_ctor!(open_gate, Functor::OpenGate, a, b);
fact_ctor!(closed_gate, Functor::ClosedGate, a, b);
fact_ctor!(at, Functor::At, agent, node);
fact_ctor!(trigger, Functor::Trigger, gate1, gate2, trigger_location);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_are_value_typed() {
        let a = at("bandit_a", "start");
        let b = at("bandit_a", "start");
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn distinct_arguments_are_distinct_facts() {
        assert_ne!(at("bandit_a", "start"), at("bandit_a", "junction"));
        assert_ne!(at("bandit_a", "start"), path("bandit_a", "start"));
    }

    #[test]
    fn display_matches_predicate_notation() {
        assert_eq!(at("bandit_a", "start").to_string(), "At(bandit_a, start)");
        assert_eq!(
            open_gate("path_a", "trigger_a").to_string(),
            "OpenGate(path_a, trigger_a)"
        );
    }
}
