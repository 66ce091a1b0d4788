use std::convert::TryFrom;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use crate::Formula;

/// Common interface of the literal types the clause based solvers work on.
pub trait Lit: Clone + Debug + Eq + Hash + Ord {
    /// Type identifying the underlying propositional variable
    type Atom: Clone + Debug + Eq + Hash + Ord;

    fn atom(&self) -> &Self::Atom;

    /// Checks if the literal is positive
    fn sign(&self) -> bool;

    /// Creates a literal of the given atom and positivity
    fn with_sign(atom: Self::Atom, sign: bool) -> Self;

    /// Returns the complementary literal
    fn negate(&self) -> Self {
        Self::with_sign(self.atom().clone(), !self.sign())
    }
}

/// Literal over a named atom, `sign == false` means negated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub atom: String,
    pub sign: bool,
}

impl Literal {
    pub fn new(atom: impl Into<String>, sign: bool) -> Literal {
        Literal{atom: atom.into(), sign}
    }

    pub fn pos(atom: impl Into<String>) -> Literal {
        Literal::new(atom, true)
    }

    pub fn neg(atom: impl Into<String>) -> Literal {
        Literal::new(atom, false)
    }

    /// Converts the literal back into an `Atom` or `Not(Atom)` formula
    pub fn to_formula(&self) -> Formula {
        let atom = Formula::atom(self.atom.clone());
        if self.sign { atom } else { atom.not() }
    }
}

impl Lit for Literal {
    type Atom = String;

    fn atom(&self) -> &String {
        &self.atom
    }

    fn sign(&self) -> bool {
        self.sign
    }

    fn with_sign(atom: String, sign: bool) -> Literal {
        Literal{atom, sign}
    }
}

impl TryFrom<&Formula> for Literal {
    type Error = ();

    /// Succeeds only for `Atom` and `Not(Atom)`
    fn try_from(formula: &Formula) -> Result<Literal, ()> {
        match formula {
            Formula::Atom(name) => Ok(Literal::pos(name.clone())),
            Formula::Not(inner) => match &**inner {
                Formula::Atom(name) => Ok(Literal::neg(name.clone())),
                _ => Err(()),
            },
            _ => Err(()),
        }
    }
}

impl From<Literal> for Formula {
    fn from(literal: Literal) -> Formula {
        literal.to_formula()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "¬{}", self.atom)
        }
    }
}
