pub mod grammar;
pub mod bnf;
pub mod lr0;
pub mod scan;
pub mod render;
mod error;

pub use error::Error;
pub use grammar::{Grammar, Production, Symbol, SymbolKind};
pub use lr0::{Automaton, State, StateId};

pub fn build(grammar: Grammar) -> Result<Automaton, Error> {
  Automaton::build(grammar)
}
