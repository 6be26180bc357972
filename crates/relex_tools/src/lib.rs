//! Command-line tools for relex: rule-file driven lexing and Graphviz
//! export of the automaton pipeline's stages.

pub mod cli;
pub mod visualize;
