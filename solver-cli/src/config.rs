use std::path::PathBuf;

use satisfaction::Solver;

pub struct Config {
    pub input:       Option<PathBuf>,
    pub output:      Option<PathBuf>,
    pub return_code: bool,
    pub solver:      Box<dyn Solver>,
}
