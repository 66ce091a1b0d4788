use std::fmt;
use itertools::Itertools;

/// Propositional formula over named atoms.
///
/// Equality, ordering and hashing are structural, so formulas can be used
/// as keys of sets and maps to detect duplicates and complements.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Creates an atom with the given name
    pub fn atom(name: impl Into<String>) -> Formula {
        Formula::Atom(name.into())
    }

    pub fn not(self) -> Formula {
        Formula::Not(Box::new(self))
    }

    pub fn and(self, other: Formula) -> Formula {
        Formula::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Formula) -> Formula {
        Formula::Or(Box::new(self), Box::new(other))
    }

    pub fn implies(self, other: Formula) -> Formula {
        Formula::Implies(Box::new(self), Box::new(other))
    }

    /// Checks if the formula is an atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(inner) => matches!(**inner, Formula::Atom(_)),
            _ => false,
        }
    }

    /// Returns the complementary literal of a literal formula.
    /// For other formulas the negation is simply wrapped around.
    pub fn complement(&self) -> Formula {
        match self {
            Formula::Not(inner) if matches!(**inner, Formula::Atom(_)) => (**inner).clone(),
            _ => self.clone().not(),
        }
    }
}

/// Folds formulas into a left-leaning conjunction `((f1 ∧ f2) ∧ f3) ...`.
/// Returns `None` for an empty input.
pub fn and_all(formulas: impl IntoIterator<Item = Formula>) -> Option<Formula> {
    formulas.into_iter().fold1(Formula::and)
}

/// Folds formulas into a left-leaning disjunction `((f1 ∨ f2) ∨ f3) ...`.
/// Returns `None` for an empty input.
pub fn or_all(formulas: impl IntoIterator<Item = Formula>) -> Option<Formula> {
    formulas.into_iter().fold1(Formula::or)
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{}", name),
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Formula::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            Formula::Implies(l, r) => write!(f, "({} → {})", l, r),
        }
    }
}
