use std::collections::BTreeSet;

use crate::Formula;

/// Set of distinct `Atom` formulas occurring in a formula
pub fn atoms(formula: &Formula) -> BTreeSet<Formula> {
    let mut result = BTreeSet::new();
    collect_atoms(formula, &mut result);
    result
}

fn collect_atoms(formula: &Formula, result: &mut BTreeSet<Formula>) {
    match formula {
        Formula::Atom(_) => {
            result.insert(formula.clone());
        }
        Formula::Not(inner) => collect_atoms(inner, result),
        Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
            collect_atoms(l, result);
            collect_atoms(r, result);
        }
    }
}

/// Names of the atoms occurring in a formula
pub fn atom_names(formula: &Formula) -> BTreeSet<String> {
    atoms(formula).into_iter()
        .filter_map(|atom| match atom {
            Formula::Atom(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Number of nodes: one per atom and one per connective
pub fn length(formula: &Formula) -> usize {
    match formula {
        Formula::Atom(_) => 1,
        Formula::Not(inner) => 1 + length(inner),
        Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => 1 + length(l) + length(r),
    }
}

/// Set of all distinct subformulas, the formula itself included.
/// Its size never exceeds `length(formula)`.
pub fn subformulas(formula: &Formula) -> BTreeSet<Formula> {
    let mut result = BTreeSet::new();
    collect_subformulas(formula, &mut result);
    result
}

fn collect_subformulas(formula: &Formula, result: &mut BTreeSet<Formula>) {
    if !result.insert(formula.clone()) {
        // already seen, and so are all of its subtrees
        return;
    }
    match formula {
        Formula::Atom(_) => (),
        Formula::Not(inner) => collect_subformulas(inner, result),
        Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
            collect_subformulas(l, result);
            collect_subformulas(r, result);
        }
    }
}

/// Replaces every occurrence of `old` in `formula` by `new`.
/// The input is left untouched, a new tree is built.
pub fn substitution(formula: &Formula, old: &Formula, new: &Formula) -> Formula {
    if formula == old {
        return new.clone();
    }
    match formula {
        Formula::Atom(_) => formula.clone(),
        Formula::Not(inner) => substitution(inner, old, new).not(),
        Formula::And(l, r) => substitution(l, old, new).and(substitution(r, old, new)),
        Formula::Or(l, r) => substitution(l, old, new).or(substitution(r, old, new)),
        Formula::Implies(l, r) => substitution(l, old, new).implies(substitution(r, old, new)),
    }
}

/// Number of atom occurrences, counting repetitions
pub fn number_of_atoms(formula: &Formula) -> usize {
    match formula {
        Formula::Atom(_) => 1,
        Formula::Not(inner) => number_of_atoms(inner),
        Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
            number_of_atoms(l) + number_of_atoms(r)
        }
    }
}

/// Number of connectives occurring in a formula
pub fn number_of_connectives(formula: &Formula) -> usize {
    length(formula) - number_of_atoms(formula)
}
