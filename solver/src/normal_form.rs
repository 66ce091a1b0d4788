use std::convert::TryFrom;

use crate::cnf::{CNF, CNFClause};
use crate::literal::Literal;
use crate::Formula;

/// Replaces every `a → b` by `¬a ∨ b`
pub fn remove_implication(formula: &Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula.clone(),
        Formula::Not(inner) => remove_implication(inner).not(),
        Formula::And(l, r) => remove_implication(l).and(remove_implication(r)),
        Formula::Or(l, r) => remove_implication(l).or(remove_implication(r)),
        Formula::Implies(l, r) => remove_implication(l).not().or(remove_implication(r)),
    }
}

/// Pushes negations down to the atoms with De Morgan's laws and drops
/// double negations. Expects a formula without implications.
pub fn negation_normal_form(formula: &Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula.clone(),
        Formula::And(l, r) => negation_normal_form(l).and(negation_normal_form(r)),
        Formula::Or(l, r) => negation_normal_form(l).or(negation_normal_form(r)),
        Formula::Not(inner) => match &**inner {
            Formula::Atom(_) => formula.clone(),
            Formula::Not(double) => negation_normal_form(double),
            Formula::And(l, r) => negation_normal_form(&l.clone().not())
                .or(negation_normal_form(&r.clone().not())),
            Formula::Or(l, r) => negation_normal_form(&l.clone().not())
                .and(negation_normal_form(&r.clone().not())),
            Formula::Implies(..) => panic!("implication left in negation normal form input: {}", formula),
        },
        Formula::Implies(..) => panic!("implication left in negation normal form input: {}", formula),
    }
}

/// Distributes disjunctions over conjunctions, bottom-up.
/// Expects a formula in negation normal form.
pub fn distributive(formula: &Formula) -> Formula {
    match formula {
        Formula::And(l, r) => distributive(l).and(distributive(r)),
        Formula::Or(l, r) => distribute(distributive(l), distributive(r)),
        _ => formula.clone(),
    }
}

/// `l ∨ r` for two formulas already in CNF
fn distribute(l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::And(a, b), r) => distribute(*a, r.clone()).and(distribute(*b, r)),
        (l, Formula::And(a, b)) => distribute(l.clone(), *a).and(distribute(l, *b)),
        (l, r) => l.or(r),
    }
}

/// Conjunctive normal form: implication elimination, negation normal form
/// and distribution, in this order
pub fn cnf(formula: &Formula) -> Formula {
    distributive(&negation_normal_form(&remove_implication(formula)))
}

/// Checks if the formula is a conjunction of disjunctions of literals
pub fn is_cnf(formula: &Formula) -> bool {
    match formula {
        Formula::And(l, r) => is_cnf(l) && is_cnf(r),
        _ => is_clause(formula),
    }
}

fn is_clause(formula: &Formula) -> bool {
    match formula {
        Formula::Or(l, r) => is_clause(l) && is_clause(r),
        _ => formula.is_literal(),
    }
}

/// Flattens a formula in CNF into a list of clauses.
/// Repeated literals inside a disjunction end up only once in its clause.
pub fn cnf_clausal(formula: &Formula) -> CNF<Literal> {
    match formula {
        Formula::And(l, r) => {
            let mut clauses = cnf_clausal(l);
            clauses.extend(cnf_clausal(r));
            clauses
        }
        _ => {
            let mut clause = CNFClause::new();
            collect_disjuncts(formula, &mut clause);
            CNF::single(clause.dedup())
        }
    }
}

/// Clause set of a list of formulas read as their conjunction
pub fn clausal_form(formulas: &[Formula]) -> CNF<Literal> {
    let mut clauses = CNF::empty();
    for formula in formulas {
        clauses.extend(cnf_clausal(&cnf(formula)));
    }
    clauses
}

fn collect_disjuncts(formula: &Formula, clause: &mut CNFClause<Literal>) {
    match formula {
        Formula::Or(l, r) => {
            collect_disjuncts(l, clause);
            collect_disjuncts(r, clause);
        }
        _ => match Literal::try_from(formula) {
            Ok(literal) => clause.push(literal),
            Err(()) => panic!("clausal form expects a formula in CNF, found {}", formula),
        },
    }
}
