//! CLI interface for relex-tools

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relex")]
#[command(about = "Lexer generator driven by postfix-regex rule files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize input files against a rule file
    Lex {
        /// Rule file: one `NAME POSTFIX_PATTERN` line per rule
        #[arg(short, long)]
        rules: PathBuf,

        /// Files to tokenize
        inputs: Vec<PathBuf>,
    },

    /// Export an automaton stage as a Graphviz .dot graph
    Viz {
        /// Rule file: one `NAME POSTFIX_PATTERN` line per rule
        #[arg(short, long)]
        rules: PathBuf,

        /// Pipeline stage to export
        #[arg(short, long, default_value = "min")]
        stage: Stage,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Which stage of the pipeline to visualize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// The merged NFA, ε-edges and all
    Nfa,
    /// The subset-constructed DFA, before minimization
    Dfa,
    /// The minimized, sink-completed DFA the scanner runs on
    Min,
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nfa" => Ok(Stage::Nfa),
            "dfa" => Ok(Stage::Dfa),
            "min" | "minimized" => Ok(Stage::Min),
            _ => Err(format!("Unknown stage: {s}. Supported: nfa, dfa, min")),
        }
    }
}
