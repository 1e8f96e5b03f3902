use clap::{App, Arg};
use dpllsat::formula::dimacs::{parse, DimacsParseError};
use dpllsat::formula::Formula;
use dpllsat::{SatResult, Solver};
use std::fs::File;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .arg(Arg::with_name("INPUT").help("input file (in DIMACS CNF)").index(1))
        .get_matches();

    let formula = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path)
    } else {
        parse(std::io::stdin())
    };

    match formula {
        Ok(formula) => {
            let solver = Solver::new(formula);
            match solver.solve() {
                SatResult::Satisfiable(model) => {
                    println!("s SATISFIABLE");
                    let mut line = String::from("v");
                    for (index, &value) in model.values().iter().enumerate() {
                        line.push(' ');
                        if !value {
                            line.push('-');
                        }
                        line.push_str(&(index + 1).to_string());
                    }
                    line.push_str(" 0");
                    println!("{}", line);
                    std::process::exit(0);
                }
                SatResult::Unsatisfiable => {
                    println!("s UNSATISFIABLE");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    }
}

fn parse_from_file(path: &str) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}
