use std::collections::BTreeSet;
use std::convert::TryFrom;

use log::{debug, trace};

use crate::analysis::atom_names;
use crate::sat_solver::*;
use crate::semantics::truth_value;
use crate::{Formula, Literal, SATSolution, Valuation};

/// A simple solver that naively checks all possible
/// valuations in order to ensure satisfiability
pub enum Bruteforce {
    Bruteforce,
}

impl Solver for Bruteforce {
    fn solve(&self, formulas: &[Formula]) -> SATSolution {
        satisfy_all(formulas).into()
    }
}

/// Collects the literals conjoined at the top level of a formula.
///
/// Returns `None` if two of them are complementary, in which case the
/// formula cannot be satisfied.
pub fn preprocess_formula(formula: &Formula) -> Option<Valuation> {
    preprocess(std::slice::from_ref(formula))
}

fn preprocess(formulas: &[Formula]) -> Option<Valuation> {
    let mut valuation = Valuation::new();
    let mut pending: Vec<&Formula> = formulas.iter().rev().collect();

    while let Some(current) = pending.pop() {
        match current {
            Formula::And(l, r) => {
                pending.push(r);
                pending.push(l);
            }
            _ => if let Ok(Literal{atom, sign}) = Literal::try_from(current) {
                if *valuation.entry(atom).or_insert(sign) != sign {
                    return None;
                }
            },
        }
    }
    Some(valuation)
}

/// Searches for a valuation making the formula true.
///
/// Top level unit literals are fixed first, the remaining atoms are tried
/// true then false. Branches whose partial valuation already falsifies the
/// formula are cut. The returned valuation may leave atoms unassigned if
/// the formula is true regardless of them.
pub fn is_satisfiable(formula: &Formula) -> Option<Valuation> {
    satisfy_all(std::slice::from_ref(formula))
}

/// Like [`is_satisfiable`] for a list of formulas read as their conjunction.
/// An empty list is satisfied by the empty valuation.
pub fn satisfy_all(formulas: &[Formula]) -> Option<Valuation> {
    let valuation = preprocess(formulas)?;
    let remaining: Vec<String> = formulas.iter()
        .flat_map(atom_names)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .filter(|name| !valuation.contains_key(name))
        .collect();

    debug!("bruteforce: {} atoms fixed, {} left to enumerate", valuation.len(), remaining.len());
    sat(formulas, &remaining, valuation)
}

/// Kleene conjunction of the truth values of all formulas
fn conjunction_value(formulas: &[Formula], valuation: &Valuation) -> Option<bool> {
    let mut result = Some(true);
    for formula in formulas {
        match truth_value(formula, valuation) {
            Some(false) => return Some(false),
            None => result = None,
            Some(true) => (),
        }
    }
    result
}

fn sat(formulas: &[Formula], atoms: &[String], valuation: Valuation) -> Option<Valuation> {
    match conjunction_value(formulas, &valuation) {
        Some(true) => return Some(valuation),
        Some(false) => return None,
        None => (),
    }

    let (atom, rest) = atoms.split_first()?;
    [true, false].iter().find_map(|&value| {
        trace!("bruteforce: trying {} = {}", atom, value);
        let mut branch = valuation.clone();
        branch.insert(atom.clone(), value);
        sat(formulas, rest, branch)
    })
}

/// Checks if the formula is true under every valuation
pub fn is_valid(formula: &Formula) -> bool {
    is_satisfiable(&formula.clone().not()).is_none()
}

/// Checks if the conclusion is true whenever all premises are.
/// With no premises this is validity of the conclusion.
pub fn is_logical_consequence(premises: &[Formula], conclusion: &Formula) -> bool {
    let mut formulas = premises.to_vec();
    formulas.push(conclusion.clone().not());
    satisfy_all(&formulas).is_none()
}
