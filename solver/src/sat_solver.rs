use crate::dimacs;
use crate::{CNF, Formula, Literal, SATSolution, VarId};

/// Decision procedure for a list of formulas read as their conjunction.
pub trait Solver {
    fn solve(&self, formulas: &[Formula]) -> SATSolution;

    /// Solves a clause set. The default converts every clause into a
    /// disjunction; an empty clause makes the set unsatisfiable outright.
    fn solve_clauses(&self, clauses: &CNF<Literal>) -> SATSolution {
        match clauses.to_formulas() {
            Some(formulas) => self.solve(&formulas),
            None => SATSolution::Unsatisfiable,
        }
    }

    /// Solves a DIMACS clause set. The default names every variable after
    /// its index and maps the model back.
    fn solve_dimacs(&self, clauses: &CNF) -> SATSolution<VarId> {
        let (named, lookup) = dimacs::decode(clauses);
        self.solve_clauses(&named)
            .valuation()
            .map(|valuation| lookup.encode_valuation(valuation))
            .into()
    }
}

impl<T: Solver + ?Sized> Solver for &T {
    fn solve(&self, formulas: &[Formula]) -> SATSolution {
        (**self).solve(formulas)
    }

    fn solve_clauses(&self, clauses: &CNF<Literal>) -> SATSolution {
        (**self).solve_clauses(clauses)
    }

    fn solve_dimacs(&self, clauses: &CNF) -> SATSolution<VarId> {
        (**self).solve_dimacs(clauses)
    }
}

impl<T: Solver + ?Sized> Solver for Box<T> {
    fn solve(&self, formulas: &[Formula]) -> SATSolution {
        (**self).solve(formulas)
    }

    fn solve_clauses(&self, clauses: &CNF<Literal>) -> SATSolution {
        (**self).solve_clauses(clauses)
    }

    fn solve_dimacs(&self, clauses: &CNF) -> SATSolution<VarId> {
        (**self).solve_dimacs(clauses)
    }
}
