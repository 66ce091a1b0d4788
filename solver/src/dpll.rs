use log::{debug, trace};

use crate::branching_strategy::{BranchingStrategy, TwoSmallestClauses};
use crate::cnf::{CNF, CNFClause};
use crate::literal::{Lit, Literal};
use crate::normal_form::clausal_form;
use crate::{Formula, SATSolution, Solver, Valuation, VarId};

/// DPLL search with a configurable branching heuristic
#[derive(Clone, Debug, Default)]
pub struct SatisfactionSolver<B = TwoSmallestClauses> {
    branching: B,
}

impl<B: BranchingStrategy> SatisfactionSolver<B> {
    pub fn new(branching: B) -> SatisfactionSolver<B> {
        SatisfactionSolver{branching}
    }

    /// Solves a clause set over any kind of literal, e.g. DIMACS literals
    pub fn solve_cnf<L: Lit>(&self, clauses: &CNF<L>) -> SATSolution<L::Atom> {
        dpll_with(clauses, &self.branching).into()
    }
}

impl<B: BranchingStrategy> Solver for SatisfactionSolver<B> {
    fn solve(&self, formulas: &[Formula]) -> SATSolution {
        self.solve_clauses(&clausal_form(formulas))
    }

    fn solve_clauses(&self, clauses: &CNF<Literal>) -> SATSolution {
        self.solve_cnf(clauses)
    }

    fn solve_dimacs(&self, clauses: &CNF) -> SATSolution<VarId> {
        self.solve_cnf(clauses)
    }
}

/// Runs DPLL with the default branching heuristic
pub fn dpll<L: Lit>(clauses: &CNF<L>) -> Option<Valuation<L::Atom>> {
    dpll_with(clauses, &TwoSmallestClauses)
}

/// Runs DPLL on a copy of the clause set. Atoms missing from the returned
/// valuation are unconstrained.
pub fn dpll_with<L: Lit, B: BranchingStrategy>(clauses: &CNF<L>, branching: &B) -> Option<Valuation<L::Atom>> {
    let clauses: Vec<CNFClause<L>> = clauses.clauses.iter()
        .cloned()
        .map(CNFClause::dedup)
        .collect();

    debug!("dpll: solving {} clauses", clauses.len());
    let result = search(clauses, Valuation::new(), branching);
    debug!("dpll: {}", if result.is_some() { "satisfiable" } else { "unsatisfiable" });
    result
}

fn search<L: Lit, B: BranchingStrategy>(
    mut clauses: Vec<CNFClause<L>>,
    mut valuation: Valuation<L::Atom>,
    branching: &B,
) -> Option<Valuation<L::Atom>> {
    unit_propagation(&mut clauses, &mut valuation);

    if clauses.is_empty() {
        return Some(valuation);
    }
    if clauses.iter().any(CNFClause::is_empty) {
        trace!("dpll: conflict at depth {}", valuation.len());
        return None;
    }

    let literal = branching.pick_branching_literal(&clauses)?;
    vec![literal.clone(), literal.negate()].into_iter().find_map(|assumption| {
        trace!("dpll: branching on {:?}", assumption);
        let mut branch = clauses.clone();
        branch.push(CNFClause::single(assumption));
        search(branch, valuation.clone(), branching)
    })
}

/// Assigns the literals of unit clauses until none is left.
///
/// Every clause satisfied by a unit is deleted and its complement is removed
/// from the remaining clauses, which may leave empty clauses behind. Expects
/// clauses without repeated literals.
pub fn unit_propagation<L: Lit>(clauses: &mut Vec<CNFClause<L>>, valuation: &mut Valuation<L::Atom>) {
    while let Some(unit) = clauses.iter().find(|clause| clause.len() == 1).map(|clause| clause.vars[0].clone()) {
        valuation.insert(unit.atom().clone(), unit.sign());

        let complement = unit.negate();
        clauses.retain(|clause| !clause.vars.contains(&unit));
        for clause in clauses.iter_mut() {
            clause.vars.retain(|literal| *literal != complement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::CNFVar;
    use crate::branching_strategy::{NaiveBranching, DLIS};

    fn cnf(clauses: &[&[i32]]) -> CNF {
        clauses.iter()
            .map(|clause| clause.iter().filter_map(|&lit| CNFVar::from_i32(lit)).collect())
            .collect()
    }

    #[test]
    fn propagation_reaches_fixpoint() {
        let mut clauses = cnf(&[&[1], &[-1, 2], &[-2, 3, 4], &[-3, -4]]).clauses;
        let mut valuation = Valuation::new();
        unit_propagation(&mut clauses, &mut valuation);

        assert_eq!(valuation.get(&1), Some(&true));
        assert_eq!(valuation.get(&2), Some(&true));
        assert_eq!(clauses.len(), 2);
        assert!(clauses.iter().all(|clause| clause.len() != 1));
    }

    #[test]
    fn propagation_exposes_conflict() {
        let mut clauses = cnf(&[&[1], &[-1]]).clauses;
        let mut valuation = Valuation::new();
        unit_propagation(&mut clauses, &mut valuation);
        assert_eq!(clauses, vec![CNFClause::new()]);
    }

    #[test]
    fn finds_models() {
        let formula = cnf(&[&[1, 2], &[-1]]);
        let valuation = dpll(&formula).unwrap();
        assert_eq!(valuation.get(&1), Some(&false));
        assert_eq!(valuation.get(&2), Some(&true));

        let formula = cnf(&[&[1, 2, 3], &[-1, -2], &[-2, -3], &[-1, -3], &[2, 3]]);
        let valuation = dpll_with(&formula, &NaiveBranching).unwrap();
        assert!(formula.clauses.iter().all(|clause| clause.vars.iter().any(|lit| valuation.get(&lit.id) == Some(&lit.sign))));
    }

    #[test]
    fn refutes_contradictions() {
        assert_eq!(dpll(&cnf(&[&[1], &[-1]])), None);
        assert_eq!(dpll(&cnf(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]])), None);
        assert_eq!(dpll_with(&cnf(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]), &DLIS), None);
        assert_eq!(dpll(&cnf(&[&[]])), None);
    }

    #[test]
    fn empty_clause_set_is_satisfiable() {
        assert_eq!(dpll(&cnf(&[])), Some(Valuation::new()));
    }

    #[test]
    fn solves_formulas() {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let solution = SatisfactionSolver::new(TwoSmallestClauses).solve(&[p.clone().or(q.clone()), p.clone().not()]);
        assert!(solution.satisfies(&[p.clone().or(q.clone()), p.clone().not()]));
        assert!(SatisfactionSolver::new(TwoSmallestClauses).solve(&[p.clone().and(p.not())]).is_unsat());
    }
}
