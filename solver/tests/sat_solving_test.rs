use proptest::{
    prelude::*,
    collection::vec,
    bool::weighted,
    sample::select,
};
use satisfaction::{
    Bruteforce, CNF, CNFClause, CNFVar, Formula, Literal, LiteralLookup, Resolution, SATSolution,
    SatisfactionSolver, Solver, TableauSolver, TwoSmallestClauses, Valuation, VarId, DLIS, NaiveBranching,
};
use satisfaction::analysis::atoms;
use satisfaction::dimacs;
use satisfaction::dpll::unit_propagation;
use satisfaction::normal_form::{clausal_form, cnf, is_cnf, negation_normal_form, remove_implication};
use satisfaction::semantics::{truth_value, valuations};

const ATOMS: &[&str] = &["a", "b", "c", "d"];
const MAX_NUM_VARIABLES: usize = 5;
const MAX_NUM_LITERALS: usize = 3;
const MAX_NUM_CLAUSES: usize = 6;

fn formula() -> impl Strategy<Value = Formula> {
    let leaf = select(ATOMS).prop_map(|name| Formula::atom(name));
    leaf.prop_recursive(4, 16, 2, |inner| prop_oneof![
        inner.clone().prop_map(Formula::not),
        (inner.clone(), inner.clone()).prop_map(|(l, r)| l.and(r)),
        (inner.clone(), inner.clone()).prop_map(|(l, r)| l.or(r)),
        (inner.clone(), inner).prop_map(|(l, r)| l.implies(r)),
    ])
}

fn dimacs_clauses() -> impl Strategy<Value = Vec<Vec<(usize, bool)>>> {
    vec(vec((1..=MAX_NUM_VARIABLES, weighted(0.5)), 0..=MAX_NUM_LITERALS), 0..=MAX_NUM_CLAUSES)
}

fn literal_clauses() -> impl Strategy<Value = CNF<Literal>> {
    vec(vec((select(ATOMS), weighted(0.5)), 1..=MAX_NUM_LITERALS), 1..=MAX_NUM_CLAUSES)
        .prop_map(|clauses| clauses.into_iter()
            .map(|clause| clause.into_iter()
                .map(|(atom, sign)| Literal::new(atom, sign))
                .collect::<CNFClause<Literal>>())
            .collect())
}

fn to_cnf(clauses: &[Vec<(usize, bool)>]) -> CNF {
    clauses.iter()
        .map(|clause| clause.iter().map(|&(id, sign)| CNFVar::new(id, sign)).collect::<CNFClause>())
        .collect()
}

/// Unassigned variables count as false
fn satisfies_dimacs(valuation: &Valuation<VarId>, formula: &CNF) -> bool {
    formula.clauses.iter().all(|clause| clause.vars.iter()
        .any(|lit| valuation.get(&lit.id).copied().unwrap_or(false) == lit.sign))
}

fn solvers() -> Vec<(&'static str, Box<dyn Solver>)> {
    let dpll: Box<dyn Solver> = Box::new(SatisfactionSolver::new(TwoSmallestClauses));
    let naive: Box<dyn Solver> = Box::new(SatisfactionSolver::new(NaiveBranching));
    let dlis: Box<dyn Solver> = Box::new(SatisfactionSolver::new(DLIS));
    let resolution: Box<dyn Solver> = Box::new(Resolution);
    let tableau: Box<dyn Solver> = Box::new(TableauSolver);
    vec![("dpll", dpll), ("dpll-naive", naive), ("dpll-dlis", dlis), ("resolution", resolution), ("tableau", tableau)]
}

proptest! {
    #[test]
    fn cnf_preserves_truth_values(f in formula()) {
        let normal = cnf(&f);
        prop_assert!(is_cnf(&normal));
        for valuation in valuations(&atoms(&f)) {
            prop_assert_eq!(truth_value(&f, &valuation), truth_value(&normal, &valuation));
        }
    }

    #[test]
    fn negation_normal_form_only_negates_atoms(f in formula()) {
        fn negates_only_atoms(f: &Formula) -> bool {
            match f {
                Formula::Atom(_) => true,
                Formula::Not(inner) => matches!(**inner, Formula::Atom(_)),
                Formula::And(l, r) | Formula::Or(l, r) => negates_only_atoms(l) && negates_only_atoms(r),
                Formula::Implies(..) => false,
            }
        }
        let nnf = negation_normal_form(&remove_implication(&f));
        prop_assert!(negates_only_atoms(&nnf));
        for valuation in valuations(&atoms(&f)) {
            prop_assert_eq!(truth_value(&f, &valuation), truth_value(&nnf, &valuation));
        }
    }

    #[test]
    fn clausal_form_is_equisatisfiable(f in formula()) {
        let expected = Bruteforce::Bruteforce.solve(&[f.clone()]).is_sat();
        let clauses = clausal_form(&[f]);
        prop_assert_eq!(Bruteforce::Bruteforce.solve_clauses(&clauses).is_sat(), expected);
    }

    #[test]
    fn solvers_agree(f in formula(), g in formula()) {
        let formulas = vec![f, g];
        let reference = Bruteforce::Bruteforce.solve(&formulas);
        prop_assert!(reference.is_unsat() || reference.satisfies(&formulas));

        for (name, solver) in solvers() {
            let solution = solver.solve(&formulas);
            prop_assert_eq!(solution.is_sat(), reference.is_sat(), "{} disagrees", name);
            if solution.is_sat() {
                prop_assert!(solution.satisfies(&formulas), "{} returned {:?}", name, solution);
            }
        }
    }

    #[test]
    fn dimacs_text_round_trip(clauses in dimacs_clauses()) {
        let formula = to_cnf(&clauses);
        prop_assert_eq!(CNF::<CNFVar>::from_dimacs(&formula.to_dimacs()), Ok(formula));
    }

    #[test]
    fn encode_decode_round_trip(clauses in literal_clauses(), earlier in literal_clauses()) {
        let mut fresh = LiteralLookup::new();
        let encoded = dimacs::encode(&clauses, &mut fresh);
        let parsed = CNF::<CNFVar>::from_dimacs(&encoded.to_dimacs()).unwrap();
        prop_assert_eq!(dimacs::decode_with(&parsed, &fresh).map(|cnf| cnf.as_set()), Some(clauses.as_set()));

        let mut reused = LiteralLookup::new();
        dimacs::encode(&earlier, &mut reused);
        let encoded = dimacs::encode(&clauses, &mut reused);
        let parsed = CNF::<CNFVar>::from_dimacs(&encoded.to_dimacs()).unwrap();
        prop_assert_eq!(dimacs::decode_with(&parsed, &reused).map(|cnf| cnf.as_set()), Some(clauses.as_set()));
    }

    #[test]
    fn unit_propagation_reaches_fixpoint(clauses in dimacs_clauses()) {
        let mut clauses: Vec<CNFClause> = to_cnf(&clauses).clauses.into_iter()
            .map(CNFClause::dedup)
            .collect();
        let mut valuation = Valuation::new();
        unit_propagation(&mut clauses, &mut valuation);

        prop_assert!(clauses.iter().all(|clause| clause.len() != 1));
        prop_assert!(clauses.iter()
            .flat_map(|clause| clause.vars.iter())
            .all(|literal| !valuation.contains_key(&literal.id)));
    }

    #[test]
    fn dimacs_solvers_agree(clauses in dimacs_clauses()) {
        let formula = to_cnf(&clauses);
        let (named, _) = dimacs::decode(&formula);
        let reference = Bruteforce::Bruteforce.solve_clauses(&named);

        let mut results = vec![
            ("dpll-cnf", SatisfactionSolver::new(TwoSmallestClauses).solve_cnf(&formula)),
            ("resolution-cnf", Resolution.solve_cnf(&formula)),
        ];
        for (name, solver) in solvers() {
            results.push((name, solver.solve_dimacs(&formula)));
        }
        results.push(("bruteforce", Bruteforce::Bruteforce.solve_dimacs(&formula)));

        for (name, solution) in results {
            prop_assert_eq!(solution.is_sat(), reference.is_sat(), "{} disagrees", name);
            if let SATSolution::Satisfiable(valuation) = &solution {
                prop_assert!(satisfies_dimacs(valuation, &formula), "{} returned {:?}", name, solution);
            }
        }
    }
}

#[test]
fn unique_model() {
    let p = Formula::atom("p");
    let q = Formula::atom("q");
    let formula = p.clone().or(q.clone()).and(p.not());

    let models: Vec<Valuation> = valuations(&atoms(&formula)).into_iter()
        .filter(|valuation| truth_value(&formula, valuation) == Some(true))
        .collect();
    let expected: Valuation = vec![("p".to_string(), false), ("q".to_string(), true)].into_iter().collect();
    assert_eq!(models, vec![expected.clone()]);

    let formulas = [formula];
    assert_eq!(Bruteforce::Bruteforce.solve(&formulas), SATSolution::Satisfiable(expected.clone()));
    for (name, solver) in solvers() {
        let solution = solver.solve(&formulas);
        assert!(solution.satisfies(&formulas), "{} returned {:?}", name, solution);
        for (atom, value) in solution.valuation().unwrap() {
            assert_eq!(expected.get(atom), Some(value), "{}", name);
        }
    }
}

#[test]
fn contradiction_is_unsatisfiable() {
    let p = Formula::atom("p");
    let formulas = [p.clone().and(p.not())];
    assert!(Bruteforce::Bruteforce.solve(&formulas).is_unsat());
    for (name, solver) in solvers() {
        assert!(solver.solve(&formulas).is_unsat(), "{}", name);
    }
}

#[test]
fn tautological_clauses_keep_models_sound() {
    let formula = CNF::<CNFVar>::from_dimacs("p cnf 2 2\n1 -2 0\n2 -2 0\n").unwrap();
    for (name, solver) in solvers() {
        let solution = solver.solve_dimacs(&formula);
        let valuation = solution.valuation().unwrap();
        assert!(satisfies_dimacs(valuation, &formula), "{} returned {:?}", name, solution);
    }
}

#[test]
fn dimacs_scenario() {
    let input = "p cnf 2 1\n1 -2 0\n";
    let formula = CNF::<CNFVar>::from_dimacs(input).unwrap();
    assert_eq!(formula, vec![CNFClause{vars: vec![CNFVar::pos(1), CNFVar::neg(2)]}].into_iter().collect::<CNF>());
    assert_eq!(formula.to_dimacs(), input);

    let (named, mut lookup) = dimacs::decode(&formula);
    assert_eq!(dimacs::encode(&named, &mut lookup), formula);
}
