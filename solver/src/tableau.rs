use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::{Formula, SATSolution, Solver, Valuation};

/// Analytic tableau over a single mutable work-list.
///
/// Branching rules push a checkpoint and continue with one alternative. A
/// checkpoint remembers the work-list length, the length of the trail of
/// formulas marked processed since, and the deferred alternative; restoring
/// it truncates the work-list and clears exactly the flags set after it.
pub struct Tableau {
    formulas: Vec<Formula>,
    processed: Vec<bool>,
    present: FxHashSet<Formula>,
    trail: Vec<usize>,
    checkpoints: Vec<Checkpoint>,
}

struct Checkpoint {
    formulas_len: usize,
    trail_len: usize,
    alternative: Formula,
}

/// Tableau based solver
#[derive(Clone, Copy, Debug, Default)]
pub struct TableauSolver;

impl Solver for TableauSolver {
    fn solve(&self, formulas: &[Formula]) -> SATSolution {
        Tableau::new(formulas.iter().cloned()).solve().into()
    }
}

fn is_branching(formula: &Formula) -> bool {
    match formula {
        Formula::Or(..) | Formula::Implies(..) => true,
        Formula::Not(inner) => matches!(**inner, Formula::And(..)),
        _ => false,
    }
}

impl Tableau {
    /// Starts a tableau with non-branching formulas placed before branching
    /// ones. Repeated formulas are kept once.
    pub fn new(formulas: impl IntoIterator<Item = Formula>) -> Tableau {
        let (branching, linear): (Vec<Formula>, Vec<Formula>) = formulas.into_iter()
            .partition(is_branching);

        let mut tableau = Tableau {
            formulas: Vec::new(),
            processed: Vec::new(),
            present: FxHashSet::default(),
            trail: Vec::new(),
            checkpoints: Vec::new(),
        };
        for formula in linear.into_iter().chain(branching) {
            tableau.add(formula);
        }
        tableau
    }

    /// Current work-list
    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    /// Expands the tableau until every formula is processed on an open
    /// branch, returning the valuation read off its literals, or `None` if
    /// every branch closes.
    pub fn solve(mut self) -> Option<Valuation> {
        if !self.close_branches() {
            return None;
        }

        while let Some(index) = self.next_unprocessed() {
            self.expand(index);
            if !self.close_branches() {
                debug!("tableau: all branches closed");
                return None;
            }
        }

        debug!("tableau: open branch with {} formulas", self.formulas.len());
        Some(self.formulas.iter()
            .filter_map(|formula| match formula {
                Formula::Atom(name) => Some((name.clone(), true)),
                Formula::Not(inner) => match &**inner {
                    Formula::Atom(name) => Some((name.clone(), false)),
                    _ => None,
                },
                _ => None,
            })
            .collect())
    }

    /// Non-branching formulas go first
    fn next_unprocessed(&self) -> Option<usize> {
        let mut pending = (0..self.formulas.len()).filter(|&index| !self.processed[index]);
        let first = pending.next()?;
        Some(std::iter::once(first)
            .chain(pending)
            .find(|&index| !is_branching(&self.formulas[index]))
            .unwrap_or(first))
    }

    fn add(&mut self, formula: Formula) {
        if !self.present.insert(formula.clone()) {
            return;
        }
        self.processed.push(formula.is_literal());
        self.formulas.push(formula);
    }

    fn checkpoint(&mut self, alternative: Formula) {
        trace!("tableau: branching, deferring {}", alternative);
        self.checkpoints.push(Checkpoint {
            formulas_len: self.formulas.len(),
            trail_len: self.trail.len(),
            alternative,
        });
    }

    fn expand(&mut self, index: usize) {
        self.processed[index] = true;
        self.trail.push(index);

        let formula = self.formulas[index].clone();
        trace!("tableau: expanding {}", formula);
        match formula {
            Formula::Atom(_) => (),
            Formula::And(a, b) => {
                self.add(*a);
                self.add(*b);
            }
            Formula::Or(a, b) => {
                self.checkpoint(*a);
                self.add(*b);
            }
            Formula::Implies(a, b) => {
                self.checkpoint(a.not());
                self.add(*b);
            }
            Formula::Not(inner) => match *inner {
                Formula::Atom(_) => (),
                Formula::Not(a) => self.add(*a),
                Formula::Or(a, b) => {
                    self.add(a.not());
                    self.add(b.not());
                }
                Formula::Implies(a, b) => {
                    self.add(*a);
                    self.add(b.not());
                }
                Formula::And(a, b) => {
                    self.checkpoint(a.not());
                    self.add(b.not());
                }
            },
        }
    }

    /// Checks if an atom and its negation are both on the work-list
    fn has_complement(&self) -> bool {
        self.formulas.iter().any(|formula| match formula {
            Formula::Atom(_) => self.present.contains(&formula.clone().not()),
            _ => false,
        })
    }

    /// Backtracks while the current branch is closed. Returns `false` once
    /// no checkpoint is left to resume.
    fn close_branches(&mut self) -> bool {
        while self.has_complement() {
            let checkpoint = match self.checkpoints.pop() {
                Some(checkpoint) => checkpoint,
                None => return false,
            };
            trace!("tableau: branch closed, resuming with {}", checkpoint.alternative);
            self.restore(&checkpoint);
            self.add(checkpoint.alternative);
        }
        true
    }

    fn restore(&mut self, checkpoint: &Checkpoint) {
        for formula in self.formulas.drain(checkpoint.formulas_len..) {
            self.present.remove(&formula);
        }
        self.processed.truncate(checkpoint.formulas_len);

        for index in self.trail.drain(checkpoint.trail_len..) {
            if index < checkpoint.formulas_len {
                self.processed[index] = false;
            }
        }
    }
}
