mod config;

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::{App, Arg};
use config::Config;
use log::info;
use satisfaction::{
    dimacs,
    Bruteforce, NaiveBranching, Resolution, SatisfactionSolver, Solver, TableauSolver, TwoSmallestClauses, DLIS,
};

fn make_config() -> Config {
    let matches = App::new("satisfaction")
        .version("1.0")
        .author("Alex&Korbi&Radek inc.")
        .about("A tool to satisfy all your desires (or prove they are impossible)")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .help("Input file in DIMACS format"),
        )
        .arg(
            Arg::with_name("algorithm")
                .long("algorithm")
                .value_name("ALGORITHM")
                .help("SAT solving algorithm")
                .takes_value(true)
                .possible_values(&["bruteforce", "dpll", "resolution", "tableau"])
                .default_value("dpll"),
        )
        .arg(
            Arg::with_name("dpll-branching")
                .long("dpll-branching")
                .help("DPLL branching strategy")
                .takes_value(true)
                .possible_values(&["two-smallest", "naive", "DLIS"])
                .default_value("two-smallest"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File name for output in DIMACS format"),
        )
        .arg(
            Arg::with_name("return_code")
                .long("return-code")
                .short("r")
                .help("Will return 1 if satisfiable and 0 if not (useful for scripting)")
                .takes_value(false),
        )
        .get_matches();

    let solver: Box<dyn Solver> = match matches.value_of("algorithm") {
        Some("bruteforce") => Box::new(Bruteforce::Bruteforce),
        Some("resolution") => Box::new(Resolution),
        Some("tableau") => Box::new(TableauSolver),
        Some("dpll") => match matches.value_of("dpll-branching") {
            Some("naive") => Box::new(SatisfactionSolver::new(NaiveBranching)),
            Some("DLIS") => Box::new(SatisfactionSolver::new(DLIS)),
            _ => Box::new(SatisfactionSolver::new(TwoSmallestClauses)),
        },
        _ => unreachable!(), // already handled by clap
    };

    Config {
        input: matches.value_of("input").map(PathBuf::from),
        output: matches.value_of("output").map(PathBuf::from),
        return_code: matches.is_present("return_code"),
        solver,
    }
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn main() -> Result<()> {
    env_logger::init();
    let config = make_config();

    let input = match &config.input {
        None => {
            eprintln!("No input file specified. Reading from standard input...");
            get_input(&mut io::stdin()).context("failed to read standard input")?
        }
        Some(path) => {
            let mut file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            get_input(&mut file)
                .with_context(|| format!("failed to read {}", path.display()))?
        }
    };

    let formula = dimacs::parse_dimacs(&input).context("invalid DIMACS input")?;
    info!("solving {} clauses over {} variables", formula.len(), formula.num_vars());

    let solution = config.solver.solve_dimacs(&formula);
    let sat = solution.is_sat();

    match &config.output {
        Some(path) => std::fs::write(path, solution.to_dimacs())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", solution.to_dimacs()),
    }

    if config.return_code && sat {
        exit(1);
    }
    Ok(())
}
