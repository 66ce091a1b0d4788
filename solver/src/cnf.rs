use std::fmt;
use std::iter::FromIterator;
use std::collections::BTreeSet;
use itertools::Itertools;

use crate::dimacs::{self, DimacsError};
use crate::literal::{Lit, Literal};
use crate::{or_all, Formula};

/// Type used for referencing logical variables in DIMACS form
pub type VarId = usize;

/// Representation of logical formulae in CNF form
/// (conjunction of clauses)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CNF<L = CNFVar> {
    /// Vector of inner clauses
    pub clauses: Vec<CNFClause<L>>
}

/// Representation of a clause (disjunction of literals)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CNFClause<L = CNFVar> {
    /// Vector of inner literals
    pub vars: Vec<L>
}

/// DIMACS literal: a variable index together with its sign
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct CNFVar {
    /// Identifier of a variable, starting at 1
    pub id: VarId,
    /// Variable is negated iff `sign == false`
    pub sign: bool,
}

impl<L> CNF<L> {
    /// Creates an empty CNF formula
    pub fn empty() -> CNF<L> {
        CNF{clauses: Vec::new()}
    }

    /// Creates a singleton CNF formula out of a single clause
    pub fn single(clause: CNFClause<L>) -> CNF<L> {
        CNF{clauses: vec![clause]}
    }

    /// Inserts a new clause into the formula
    pub fn push(&mut self, c: CNFClause<L>) {
        self.clauses.push(c)
    }

    /// Concatenates two formulae
    pub fn extend(&mut self, c: CNF<L>) {
        self.clauses.extend(c.clauses)
    }

    /// Returns number of clauses in the formula
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Checks if any clause has no literals left
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|clause| clause.vars.is_empty())
    }
}

impl<L: Lit> CNF<L> {
    /// Collects all atoms that appear in the formula
    pub fn atoms(&self) -> BTreeSet<L::Atom> {
        self.clauses.iter()
            .flat_map(|clause| clause.vars.iter().map(|lit| lit.atom().clone()))
            .collect()
    }

    /// Views the formula as a set of sets of literals
    pub fn as_set(&self) -> BTreeSet<BTreeSet<L>> {
        self.clauses.iter()
            .map(|clause| clause.vars.iter().cloned().collect())
            .collect()
    }
}

impl CNF<CNFVar> {
    /// Calculates the number of distinct variables (unifies negated and positive)
    pub fn num_vars(&self) -> usize {
        self.atoms().len()
    }

    /// Highest variable index used in the formula
    pub fn max_var(&self) -> VarId {
        self.clauses.iter()
            .flat_map(|clause| clause.vars.iter().map(CNFVar::id))
            .max()
            .unwrap_or(0)
    }

    /// Prints formula in DIMACS compatible form
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.max_var(), self.clauses.len());
        for clause in &self.clauses {
            for var in &clause.vars {
                out.push_str(&var.to_i32().to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parse DIMACS string into CNF structure
    pub fn from_dimacs(input: &str) -> Result<CNF, DimacsError> {
        dimacs::parse_dimacs(input)
    }
}

impl CNF<Literal> {
    /// Turns every clause into a disjunction, ready for formula based solvers.
    /// Returns `None` if some clause is empty, as there is no formula for it.
    pub fn to_formulas(&self) -> Option<Vec<Formula>> {
        self.clauses.iter()
            .map(|clause| or_all(clause.vars.iter().map(Literal::to_formula)))
            .collect()
    }
}

impl<L> FromIterator<CNFClause<L>> for CNF<L> {
    fn from_iter<I: IntoIterator<Item=CNFClause<L>>>(iter: I) -> Self {
        CNF{clauses: iter.into_iter().collect()}
    }
}

impl<L> IntoIterator for CNF<L> {
    type Item = CNFClause<L>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<L> CNFClause<L> {
    /// Creates an empty CNF clause
    pub fn new() -> CNFClause<L> {
        CNFClause{vars: vec![]}
    }

    /// Creates a CNF clause containing a single literal
    pub fn single(var: L) -> CNFClause<L> {
        CNFClause{vars: vec![var]}
    }

    /// Adds a single literal into the clause
    pub fn push(&mut self, v: L) {
        self.vars.push(v)
    }

    /// Concatenates two clauses
    pub fn extend(&mut self, c: CNFClause<L>) {
        self.vars.extend(c.vars)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<L: Lit> CNFClause<L> {
    /// Removes repeated literals, keeping the first occurrence of each
    pub fn dedup(self) -> CNFClause<L> {
        self.vars.into_iter().unique().collect()
    }
}

impl<L> Default for CNFClause<L> {
    fn default() -> Self {
        CNFClause::new()
    }
}

impl<L> FromIterator<L> for CNFClause<L> {
    fn from_iter<I: IntoIterator<Item=L>>(iter: I) -> Self {
        CNFClause{vars: iter.into_iter().collect()}
    }
}

impl<L> IntoIterator for CNFClause<L> {
    type Item = L;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl CNFVar {
    /// Creates variable with given identifier and positivity
    pub fn new(id: VarId, sign: bool) -> CNFVar {
        CNFVar{id, sign}
    }

    /// Creates a positive variable with given identifier
    pub fn pos(id: VarId) -> CNFVar {
        CNFVar{id, sign: true}
    }

    /// Creates a negative variable with given identifier
    pub fn neg(id: VarId) -> CNFVar {
        CNFVar{id, sign: false}
    }

    /// Gets the identifier of a variable
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Converts to signed integer. The absolute value indicates
    /// the identifier and sign states for positivity.
    ///
    /// **NOTE** it is not integer-overflow friendly.
    pub fn to_i32(&self) -> i32 {
        if self.sign {
            self.id as i32
        } else {
            -(self.id as i32)
        }
    }

    /// Inverse of [`CNFVar::to_i32`], `None` for zero
    pub fn from_i32(lit: i32) -> Option<CNFVar> {
        match lit {
            0 => None,
            _ => Some(CNFVar::new(lit.unsigned_abs() as VarId, lit > 0)),
        }
    }
}

impl Lit for CNFVar {
    type Atom = VarId;

    fn atom(&self) -> &VarId {
        &self.id
    }

    fn sign(&self) -> bool {
        self.sign
    }

    fn with_sign(id: VarId, sign: bool) -> CNFVar {
        CNFVar{id, sign}
    }
}

impl<L: fmt::Display> fmt::Display for CNF<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.clauses {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl<L: fmt::Display> fmt::Display for CNFClause<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.vars.iter().join(", "))
    }
}

impl fmt::Display for CNFVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
