use indexmap::IndexSet;
use log::debug;
use thiserror::Error;

use crate::cnf::{CNF, CNFClause, CNFVar, VarId};
use crate::literal::Literal;
use crate::Valuation;

/// Errors raised while reading DIMACS text. Lines are numbered from 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimacsError {
    #[error("missing `p cnf <atoms> <clauses>` problem line")]
    MissingHeader,

    #[error("line {line}: clause found before the `p cnf` problem line")]
    ClauseBeforeHeader { line: usize },

    #[error("line {line}: malformed problem line, expected `p cnf <atoms> <clauses>`")]
    MalformedHeader { line: usize },

    #[error("line {line}: `{token}` is not an integer literal")]
    InvalidLiteral { line: usize, token: String },

    #[error("line {line}: variable {var} exceeds the declared {max} atoms")]
    VariableOutOfRange { line: usize, var: VarId, max: usize },

    #[error("expected {expected} clauses, found only {found}")]
    MissingClauses { expected: usize, found: usize },
}

/// Reads a CNF formula in DIMACS format.
///
/// Comment lines (`c ...`) are skipped anywhere. The first other line must be
/// the problem line. After it, every non-blank line is a clause until the
/// declared number of clauses is read; a `0` token terminates a clause early.
pub fn parse_dimacs(input: &str) -> Result<CNF, DimacsError> {
    let mut lines = input.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('c'));

    let (header_line, header) = lines.next().ok_or(DimacsError::MissingHeader)?;
    if !header.starts_with('p') {
        return Err(DimacsError::ClauseBeforeHeader{line: header_line});
    }
    let (num_atoms, num_clauses) = parse_header(header_line, header)?;

    let mut cnf = CNF::empty();
    for (line_number, line) in lines.take(num_clauses) {
        cnf.push(parse_clause(line_number, line, num_atoms)?);
    }

    if cnf.len() < num_clauses {
        return Err(DimacsError::MissingClauses{expected: num_clauses, found: cnf.len()});
    }
    debug!("read {} clauses over {} atoms", cnf.len(), num_atoms);
    Ok(cnf)
}

fn parse_header(line: usize, header: &str) -> Result<(usize, usize), DimacsError> {
    let malformed = || DimacsError::MalformedHeader{line};
    let fields: Vec<&str> = header.split_whitespace().collect();

    match fields.as_slice() {
        ["p", "cnf", atoms, clauses] => Ok((
            atoms.parse().map_err(|_| malformed())?,
            clauses.parse().map_err(|_| malformed())?,
        )),
        _ => Err(malformed()),
    }
}

fn parse_clause(line: usize, text: &str, num_atoms: usize) -> Result<CNFClause, DimacsError> {
    let mut clause = CNFClause::new();
    for token in text.split_whitespace() {
        let value: i32 = token.parse()
            .map_err(|_| DimacsError::InvalidLiteral{line, token: token.to_string()})?;

        let var = match CNFVar::from_i32(value) {
            Some(var) => var,
            None => break,
        };
        if var.id > num_atoms {
            return Err(DimacsError::VariableOutOfRange{line, var: var.id, max: num_atoms});
        }
        clause.push(var);
    }
    Ok(clause)
}

/// Bijection between named literals and DIMACS literals.
///
/// An atom keeps its index for the whole lifetime of the table, so a single
/// table can be reused across several `encode` calls. A negative literal is
/// always the arithmetic negation of its atom's index.
#[derive(Clone, Debug, Default)]
pub struct LiteralLookup {
    atoms: IndexSet<String>,
}

impl LiteralLookup {
    pub fn new() -> LiteralLookup {
        LiteralLookup::default()
    }

    /// Number of atoms assigned an index so far
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Index of an atom, if it has been seen already
    pub fn index_of(&self, atom: &str) -> Option<VarId> {
        self.atoms.get_full(atom).map(|(index, _)| index + 1)
    }

    /// Name of the atom with the given index
    pub fn atom_of(&self, id: VarId) -> Option<&str> {
        id.checked_sub(1)
            .and_then(|index| self.atoms.get_index(index))
            .map(String::as_str)
    }

    /// Maps a literal to its DIMACS form. Unseen atoms take the next free
    /// index, whichever polarity they are first met in.
    pub fn encode_literal(&mut self, literal: &Literal) -> CNFVar {
        let id = match self.index_of(&literal.atom) {
            Some(id) => id,
            None => {
                self.atoms.insert(literal.atom.clone());
                self.atoms.len()
            }
        };
        CNFVar::new(id, literal.sign)
    }

    /// Maps a DIMACS literal back, `None` if its index was never assigned
    pub fn decode_literal(&self, var: &CNFVar) -> Option<Literal> {
        self.atom_of(var.id).map(|atom| Literal::new(atom, var.sign))
    }

    /// Translates a valuation over DIMACS indices to one over atom names.
    /// Unknown indices are dropped.
    pub fn decode_valuation(&self, valuation: &Valuation<VarId>) -> Valuation {
        valuation.iter()
            .filter_map(|(id, value)| self.atom_of(*id).map(|atom| (atom.to_string(), *value)))
            .collect()
    }

    /// Translates a valuation over atom names to DIMACS indices.
    /// Atoms without an index are dropped.
    pub fn encode_valuation(&self, valuation: &Valuation) -> Valuation<VarId> {
        valuation.iter()
            .filter_map(|(atom, value)| self.index_of(atom).map(|id| (id, *value)))
            .collect()
    }
}

/// Encodes a clause set, extending `lookup` with every new atom
pub fn encode(clauses: &CNF<Literal>, lookup: &mut LiteralLookup) -> CNF {
    clauses.clauses.iter()
        .map(|clause| clause.vars.iter().map(|literal| lookup.encode_literal(literal)).collect())
        .collect()
}

/// Decodes a DIMACS clause set, naming the atom of index `n` after `n`.
/// Returns the table used, which re-encodes the result to the same indices.
pub fn decode(cnf: &CNF) -> (CNF<Literal>, LiteralLookup) {
    let mut lookup = LiteralLookup::new();
    for id in 1..=cnf.max_var() {
        lookup.atoms.insert(id.to_string());
    }
    let clauses = cnf.clauses.iter()
        .map(|clause| clause.vars.iter().map(|var| Literal::new(var.id.to_string(), var.sign)).collect())
        .collect();
    (clauses, lookup)
}

/// Decodes a DIMACS clause set through an existing table.
/// Returns `None` if some index is missing from the table.
pub fn decode_with(cnf: &CNF, lookup: &LiteralLookup) -> Option<CNF<Literal>> {
    cnf.clauses.iter()
        .map(|clause| clause.vars.iter().map(|var| lookup.decode_literal(var)).collect())
        .collect()
}
