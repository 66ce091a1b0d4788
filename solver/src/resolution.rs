use std::collections::BTreeSet;

use indexmap::IndexSet;
use log::{debug, trace};

use crate::cnf::CNF;
use crate::literal::{Lit, Literal};
use crate::normal_form::clausal_form;
use crate::{Formula, SATSolution, Solver, Valuation, VarId};

/// Clause as a set of literals
pub type Clause<L> = BTreeSet<L>;

/// Saturation based resolution prover
#[derive(Clone, Copy, Debug, Default)]
pub struct Resolution;

impl Resolution {
    /// Solves a clause set over any kind of literal, e.g. DIMACS literals
    pub fn solve_cnf<L: Lit>(&self, clauses: &CNF<L>) -> SATSolution<L::Atom> {
        resolution(clauses).into()
    }
}

impl Solver for Resolution {
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

/// Saturates the clause set under resolution.
///
/// Returns `None` as soon as the empty clause is derived, otherwise a model
/// of the saturated set. Runs in exponential time in the worst case.
pub fn resolution<L: Lit>(clauses: &CNF<L>) -> Option<Valuation<L::Atom>> {
    let mut known: IndexSet<Clause<L>> = clauses.clauses.iter()
        .map(|clause| clause.vars.iter().cloned().collect())
        .collect();
    if known.iter().any(|clause| clause.is_empty()) {
        return None;
    }

    let mut round = 0;
    loop {
        round += 1;
        let mut frontier: IndexSet<Clause<L>> = IndexSet::new();

        for (i, first) in known.iter().enumerate() {
            for second in known.iter().skip(i + 1) {
                let resolvent = match resolve(first, second) {
                    Some(resolvent) => resolvent,
                    None => continue,
                };
                if resolvent.is_empty() {
                    debug!("resolution: empty clause derived in round {}", round);
                    return None;
                }
                if !known.contains(&resolvent) {
                    trace!("resolution: new resolvent {:?}", resolvent);
                    frontier.insert(resolvent);
                }
            }
        }

        if frontier.is_empty() {
            debug!("resolution: saturated with {} clauses after {} rounds", known.len(), round);
            return Some(find_interpretation(&known));
        }
        known.extend(frontier);
    }
}

/// Resolvent of two clauses clashing on exactly one pair of complementary
/// literals. Pairs with none or several clashes give `None`.
fn resolve<L: Lit>(first: &Clause<L>, second: &Clause<L>) -> Option<Clause<L>> {
    let mut clashes = first.iter().filter(|literal| second.contains(&literal.negate()));
    let pivot = clashes.next()?;
    if clashes.next().is_some() {
        return None;
    }

    let complement = pivot.negate();
    Some(first.iter()
        .filter(|literal| *literal != pivot)
        .chain(second.iter().filter(|literal| **literal != complement))
        .cloned()
        .collect())
}

/// Builds a model of a clause set that is saturated under resolution and
/// free of the empty clause.
///
/// Atoms are fixed in ascending order. An atom becomes true exactly when some
/// clause needs it: the clause holds the atom positively and all its other
/// literals are on smaller atoms and already false. Every other atom is false.
/// Tautologies hold under any valuation and take no part in the construction.
pub fn find_interpretation<'a, L, I>(clauses: I) -> Valuation<L::Atom>
where
    L: Lit + 'a,
    I: IntoIterator<Item = &'a Clause<L>>,
    I::IntoIter: Clone,
{
    let all = clauses.into_iter();
    let clauses = all.clone().filter(|clause| !is_tautology(clause));
    let atoms: BTreeSet<L::Atom> = all
        .flat_map(|clause| clause.iter().map(|literal| literal.atom().clone()))
        .collect();

    let mut valuation = Valuation::new();
    for atom in atoms {
        let needed = clauses.clone().any(|clause| {
            clause.contains(&L::with_sign(atom.clone(), true)) && clause.iter()
                .filter(|literal| *literal.atom() != atom)
                .all(|literal| *literal.atom() < atom && valuation.get(literal.atom()) == Some(&!literal.sign()))
        });
        valuation.insert(atom, needed);
    }
    valuation
}

fn is_tautology<L: Lit>(clause: &Clause<L>) -> bool {
    clause.iter().any(|literal| clause.contains(&literal.negate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::{CNFClause, CNFVar};

    fn cnf(clauses: &[&[i32]]) -> CNF {
        clauses.iter()
            .map(|clause| clause.iter().filter_map(|&lit| CNFVar::from_i32(lit)).collect::<CNFClause>())
            .collect()
    }

    fn satisfies(valuation: &Valuation<usize>, formula: &CNF) -> bool {
        formula.clauses.iter()
            .all(|clause| clause.vars.iter().any(|lit| valuation.get(&lit.id) == Some(&lit.sign)))
    }

    #[test]
    fn resolves_on_single_clash() {
        let first: Clause<CNFVar> = vec![CNFVar::pos(1), CNFVar::pos(2)].into_iter().collect();
        let second: Clause<CNFVar> = vec![CNFVar::neg(1), CNFVar::pos(3)].into_iter().collect();
        let expected: Clause<CNFVar> = vec![CNFVar::pos(2), CNFVar::pos(3)].into_iter().collect();
        assert_eq!(resolve(&first, &second), Some(expected));

        let third: Clause<CNFVar> = vec![CNFVar::neg(1), CNFVar::neg(2)].into_iter().collect();
        assert_eq!(resolve(&first, &third), None);
    }

    #[test]
    fn refutes() {
        assert_eq!(resolution(&cnf(&[&[1], &[-1]])), None);
        assert_eq!(resolution(&cnf(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]])), None);
        assert_eq!(resolution(&cnf(&[&[]])), None);
    }

    #[test]
    fn model_of_saturated_set() {
        let formula = cnf(&[&[1, 2], &[-1]]);
        let valuation = resolution(&formula).unwrap();
        assert_eq!(valuation.get(&1), Some(&false));
        assert_eq!(valuation.get(&2), Some(&true));

        // scanning literals would see both 1 and -1 here
        let formula = cnf(&[&[1, 2], &[-1, 3], &[-2, -3], &[1, -3]]);
        let valuation = resolution(&formula).unwrap();
        assert!(satisfies(&valuation, &formula));
    }

    #[test]
    fn tautologies_do_not_force_atoms() {
        let formula = cnf(&[&[1, -2], &[2, -2]]);
        let valuation = resolution(&formula).unwrap();
        assert!(satisfies(&valuation, &formula));
        assert_eq!(valuation.get(&2), Some(&false));

        let formula = cnf(&[&[3, -3], &[-1, 2], &[1, 3, -3]]);
        assert!(satisfies(&resolution(&formula).unwrap(), &formula));
    }

    #[test]
    fn model_satisfies_formula_with_tautological_clauses() {
        let a = Formula::atom("a");
        let d = Formula::atom("d");
        let formulas = [a.clone().and(a).and(d.clone()).or(d.not())];
        let solution = Resolution.solve(&formulas);
        assert!(solution.satisfies(&formulas), "{:?}", solution);
    }
}
