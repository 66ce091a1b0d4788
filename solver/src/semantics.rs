use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::atoms;
use crate::Formula;

/// Partial assignment of truth values to atoms.
/// A missing atom is unknown, not false.
pub type Valuation<A = String> = BTreeMap<A, bool>;

/// Evaluates a formula in Kleene's three-valued logic.
///
/// `None` stands for *unknown*: an atom missing from the valuation, or a
/// connective whose value is not decided by the known parts of its operands.
/// `And` is false as soon as one side is false, `Or` true as soon as one side
/// is true, and `Implies` true as soon as its premise is false or its
/// conclusion is true.
pub fn truth_value(formula: &Formula, valuation: &Valuation) -> Option<bool> {
    match formula {
        Formula::Atom(name) => valuation.get(name).copied(),
        Formula::Not(inner) => truth_value(inner, valuation).map(|value| !value),
        Formula::And(l, r) => {
            match (truth_value(l, valuation), truth_value(r, valuation)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            }
        }
        Formula::Or(l, r) => {
            match (truth_value(l, valuation), truth_value(r, valuation)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            }
        }
        Formula::Implies(l, r) => {
            match (truth_value(l, valuation), truth_value(r, valuation)) {
                (Some(false), _) | (_, Some(true)) => Some(true),
                (Some(true), Some(false)) => Some(false),
                _ => None,
            }
        }
    }
}

/// Enumerates every total valuation over the given atoms, `2^n` in total.
/// Atoms that are not `Atom` formulas are ignored.
pub fn valuations(atoms: &BTreeSet<Formula>) -> Vec<Valuation> {
    // WARNING: exponential in the number of atoms
    let mut result = vec![Valuation::new()];
    for atom in atoms {
        if let Formula::Atom(name) = atom {
            result = result.into_iter()
                .flat_map(|valuation| {
                    let mut positive = valuation.clone();
                    positive.insert(name.clone(), true);
                    let mut negative = valuation;
                    negative.insert(name.clone(), false);
                    vec![positive, negative]
                })
                .collect();
        }
    }
    result
}

/// Checks whether both formulas have the same truth table
pub fn is_logical_equivalence(first: &Formula, second: &Formula) -> bool {
    let mut all_atoms = atoms(first);
    all_atoms.extend(atoms(second));

    valuations(&all_atoms).iter()
        .all(|valuation| truth_value(first, valuation) == truth_value(second, valuation))
}
