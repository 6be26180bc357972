//! Relex CLI
//!
//! Compiles a rule file into a lexer, then tokenizes inputs or exports an
//! automaton stage as Graphviz dot.

use clap::Parser;
use relex::{LexerBuilder, subset_construction};
use relex_tools::cli::{Cli, Commands, Stage};
use relex_tools::visualize::{dfa_dot, nfa_dot};
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lex { rules, inputs } => {
            let lexer = compile_rules(&rules)?;

            for path in inputs {
                let input = fs::read_to_string(&path)?;
                println!("Lexing file: {}", path.display());

                let result = lexer.tokenize(&input);
                for token in &result.tokens {
                    println!(
                        "{:<20} [{}]",
                        token.text,
                        lexer.kind_names(&token.kinds).join(", ")
                    );
                }
                for error in &result.errors {
                    eprintln!("{error}");
                }
                println!("-----------");
            }
        }

        Commands::Viz {
            rules,
            stage,
            output,
        } => {
            let lexer = compile_rules(&rules)?;

            let dot = match stage {
                Stage::Nfa => nfa_dot(lexer.nfa()),
                // The pre-minimization DFA is not kept on the compiled
                // lexer; rebuild it from the merged NFA.
                Stage::Dfa => {
                    let raw = subset_construction(lexer.nfa());
                    dfa_dot(&raw, |kinds| lexer.kind_names(kinds).join(","))
                }
                Stage::Min => dfa_dot(lexer.dfa(), |kinds| lexer.kind_names(kinds).join(",")),
            };

            match output {
                Some(path) => {
                    fs::write(&path, dot)?;
                    println!("Wrote graph to {}", path.display());
                }
                None => print!("{dot}"),
            }
        }
    }

    Ok(())
}

/// Load and compile a rule file, reporting per-rule problems to stderr.
/// Bad rules are skipped; compilation itself never fails.
fn compile_rules(path: &Path) -> Result<relex::CompiledLexer, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let (rules, parse_errors) = relex::parse_rules(&text);
    for error in &parse_errors {
        eprintln!("{error}");
    }

    let lexer = LexerBuilder::new().rules(rules).build();
    for error in lexer.diagnostics() {
        eprintln!("{error}");
    }
    Ok(lexer)
}
