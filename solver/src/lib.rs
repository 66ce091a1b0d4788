/// Propositional formulas and their constructors
pub mod formula;
/// Named literals and the literal interface shared with DIMACS variables
pub mod literal;
/// Structural measures of formulas
pub mod analysis;
/// Three-valued evaluation under partial valuations
pub mod semantics;
/// Truth table search, validity and logical consequence
pub mod bruteforce;
/// Implication elimination, negation normal form, CNF and clausal form
pub mod normal_form;
/// The CNF representation of a formula
pub mod cnf;
/// Reading and writing the DIMACS CNF format
pub mod dimacs;
/// Module that contains the DPLL solver
pub mod dpll;
/// Branching heuristics one can choose from to customize the [`SatisfactionSolver`].
pub mod branching_strategy;
/// Saturation by binary resolution
pub mod resolution;
/// Analytic tableau with backtracking
pub mod tableau;
/// Module that specifies the output of a solver
mod sat_solution;
/// The Solver trait which has to be implemented by each solver
pub mod sat_solver;

pub use formula::{and_all, or_all, Formula};
pub use literal::{Lit, Literal};
pub use cnf::{CNFClause, CNFVar, VarId, CNF};
pub use semantics::Valuation;
pub use sat_solution::SATSolution;
pub use sat_solver::Solver;
pub use bruteforce::Bruteforce;
pub use branching_strategy::{BranchingStrategy, NaiveBranching, TwoSmallestClauses, DLIS};
pub use dpll::SatisfactionSolver;
pub use resolution::Resolution;
pub use tableau::{Tableau, TableauSolver};
pub use dimacs::{DimacsError, LiteralLookup};
