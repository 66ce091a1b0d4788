use indexmap::IndexMap;

use crate::cnf::CNFClause;
use crate::literal::Lit;

pub trait BranchingStrategy {
    /// Picks the literal the next branch assumes to be true.
    /// Returns `None` if no clause has a literal left.
    fn pick_branching_literal<L: Lit>(&self, clauses: &[CNFClause<L>]) -> Option<L>;
}

/// Most frequent literal among the two smallest non-empty clauses, favouring
/// variables of short, more constraining clauses.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoSmallestClauses;

impl BranchingStrategy for TwoSmallestClauses {
    fn pick_branching_literal<L: Lit>(&self, clauses: &[CNFClause<L>]) -> Option<L> {
        let mut candidates: Vec<&CNFClause<L>> = clauses.iter()
            .filter(|clause| !clause.is_empty())
            .collect();
        candidates.sort_by_key(|clause| clause.len());

        most_frequent(candidates.into_iter().take(2).flat_map(|clause| clause.vars.iter()))
    }
}

/// First literal of the first non-empty clause
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveBranching;

impl BranchingStrategy for NaiveBranching {
    fn pick_branching_literal<L: Lit>(&self, clauses: &[CNFClause<L>]) -> Option<L> {
        clauses.iter()
            .flat_map(|clause| clause.vars.first())
            .next()
            .cloned()
    }
}

/// Dynamic largest individual sum: the literal occurring most often
#[derive(Clone, Copy, Debug, Default)]
pub struct DLIS;

impl BranchingStrategy for DLIS {
    fn pick_branching_literal<L: Lit>(&self, clauses: &[CNFClause<L>]) -> Option<L> {
        most_frequent(clauses.iter().flat_map(|clause| clause.vars.iter()))
    }
}

/// Ties go to the literal seen first
fn most_frequent<'a, L: Lit + 'a>(literals: impl Iterator<Item = &'a L>) -> Option<L> {
    let mut counts: IndexMap<&L, usize> = IndexMap::new();
    for literal in literals {
        *counts.entry(literal).or_insert(0) += 1;
    }

    let mut best: Option<(&L, usize)> = None;
    for (literal, count) in counts {
        match best {
            Some((_, max)) if count <= max => (),
            _ => best = Some((literal, count)),
        }
    }
    best.map(|(literal, _)| literal.clone())
}
