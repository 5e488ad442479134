//! Declarative argument requirements.
//!
//! Jobs describe which arguments they need as a small combinator tree;
//! the dispatcher evaluates it against the caller's argument set before
//! anything else runs. Evaluation is total and deterministic: it never
//! fails, it only reports.

use crate::args::ArgumentSet;

/// Boolean combinator over required argument keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// A single required argument key.
    Key(String),
    /// Satisfied only when every child is satisfied.
    All(Vec<Requirement>),
    /// Satisfied when at least one child is fully satisfied.
    Any(Vec<Requirement>),
}

/// Outcome of evaluating a requirement against an argument set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub satisfied: bool,
    /// Missing leaf keys, in declaration order, deduplicated. Complete:
    /// a conjunction reports every missing key in one pass, not just the
    /// first.
    pub missing: Vec<String>,
}

impl Evaluation {
    fn satisfied() -> Self {
        Self {
            satisfied: true,
            missing: Vec::new(),
        }
    }

    fn missing(keys: Vec<String>) -> Self {
        Self {
            satisfied: false,
            missing: keys,
        }
    }
}

impl Requirement {
    /// A single required key.
    pub fn key(key: impl Into<String>) -> Self {
        Requirement::Key(key.into())
    }

    /// Conjunction of plain keys.
    pub fn conjunction<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::All(keys.into_iter().map(Requirement::key).collect())
    }

    /// Disjunction of plain keys.
    pub fn disjunction<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::Any(keys.into_iter().map(Requirement::key).collect())
    }

    /// Conjunction of arbitrary sub-requirements.
    pub fn all(children: impl IntoIterator<Item = Requirement>) -> Self {
        Requirement::All(children.into_iter().collect())
    }

    /// Disjunction of arbitrary sub-requirements.
    pub fn any(children: impl IntoIterator<Item = Requirement>) -> Self {
        Requirement::Any(children.into_iter().collect())
    }

    /// Evaluates the requirement against an argument set.
    ///
    /// Conjunctions fail closed and collect all missing keys so one
    /// error message can name everything at once; disjunctions succeed
    /// on any satisfied branch and otherwise report the missing keys of
    /// every branch.
    pub fn evaluate(&self, args: &ArgumentSet) -> Evaluation {
        match self {
            Requirement::Key(key) => {
                if args.contains(key) {
                    Evaluation::satisfied()
                } else {
                    Evaluation::missing(vec![key.clone()])
                }
            }
            Requirement::All(children) => {
                let mut missing = Vec::new();
                for child in children {
                    let result = child.evaluate(args);
                    if !result.satisfied {
                        extend_dedup(&mut missing, result.missing);
                    }
                }
                if missing.is_empty() {
                    Evaluation::satisfied()
                } else {
                    Evaluation::missing(missing)
                }
            }
            Requirement::Any(children) => {
                // An empty disjunction is vacuously satisfied, matching
                // the empty conjunction.
                if children.is_empty() {
                    return Evaluation::satisfied();
                }
                let mut missing = Vec::new();
                for child in children {
                    let result = child.evaluate(args);
                    if result.satisfied {
                        return Evaluation::satisfied();
                    }
                    extend_dedup(&mut missing, result.missing);
                }
                Evaluation::missing(missing)
            }
        }
    }
}

fn extend_dedup(into: &mut Vec<String>, keys: Vec<String>) {
    for key in keys {
        if !into.contains(&key) {
            into.push(key);
        }
    }
}
