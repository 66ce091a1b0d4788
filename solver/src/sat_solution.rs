use std::fmt;

use crate::{Formula, VarId, Valuation};
use crate::semantics::truth_value;

const MAX_LITERALS_PER_LINE: usize = 8;

/// Outcome of a solver run. Unsatisfiability is a regular answer, not an error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SATSolution<A = String> {
    /// Satisfying valuation; atoms absent from it are unconstrained
    Satisfiable(Valuation<A>),
    Unsatisfiable,
}

impl<A> SATSolution<A> {
    pub fn is_sat(&self) -> bool {
        matches!(self, SATSolution::Satisfiable(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SATSolution::Unsatisfiable)
    }

    /// Returns the witnessing valuation, if any
    pub fn valuation(&self) -> Option<&Valuation<A>> {
        match self {
            SATSolution::Satisfiable(valuation) => Some(valuation),
            SATSolution::Unsatisfiable => None,
        }
    }

    pub fn into_valuation(self) -> Option<Valuation<A>> {
        match self {
            SATSolution::Satisfiable(valuation) => Some(valuation),
            SATSolution::Unsatisfiable => None,
        }
    }
}

impl<A> From<Option<Valuation<A>>> for SATSolution<A> {
    fn from(valuation: Option<Valuation<A>>) -> Self {
        match valuation {
            Some(valuation) => SATSolution::Satisfiable(valuation),
            None => SATSolution::Unsatisfiable,
        }
    }
}

impl SATSolution {
    /// Checks that the valuation, with unconstrained atoms set to false,
    /// makes every formula true
    pub fn satisfies(&self, formulas: &[Formula]) -> bool {
        match self {
            SATSolution::Unsatisfiable => false,
            SATSolution::Satisfiable(valuation) => {
                let mut total = valuation.clone();
                for name in formulas.iter().flat_map(crate::analysis::atom_names) {
                    total.entry(name).or_insert(false);
                }
                formulas.iter().all(|formula| truth_value(formula, &total) == Some(true))
            }
        }
    }
}

impl SATSolution<VarId> {
    /// Solution lines of the DIMACS output format
    pub fn to_dimacs(&self) -> String {
        match self {
            SATSolution::Unsatisfiable => "s UNSATISFIABLE\n".to_string(),
            SATSolution::Satisfiable(valuation) => {
                let mut out = String::from("s SATISFIABLE\n");
                let literals: Vec<_> = valuation.iter().collect();
                for line in literals.chunks(MAX_LITERALS_PER_LINE) {
                    out.push('v');
                    for (id, sign) in line {
                        out.push_str(&format!(" {}{}", if **sign { "" } else { "-" }, id));
                    }
                    out.push('\n');
                }
                out.push_str("v 0\n");
                out
            }
        }
    }
}

impl<A: fmt::Display> fmt::Display for SATSolution<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SATSolution::Unsatisfiable => write!(f, "Unsatisfiable"),
            SATSolution::Satisfiable(valuation) => {
                writeln!(f, "Satisfiable:")?;
                let assignments: Vec<_> = valuation.iter().collect();
                for line in assignments.chunks(MAX_LITERALS_PER_LINE) {
                    for (atom, value) in line {
                        write!(f, "{}{} ", if **value { " " } else { "-" }, atom)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}
