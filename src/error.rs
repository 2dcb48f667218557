use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// A production string does not have the shape `N : (N|T)+`.
  InvalidProduction {
    source: String,
  },
  EmptyGrammar,
  EmptyBody {
    left: String,
  },
  NotNonterminal {
    name: String,
  },
  /// Sentinels cannot be written in a production body.
  ReservedSymbol {
    name: String,
  },
  /// Two distinct productions complete in the same state.
  Conflict {
    state: usize,
    first: String,
    second: String,
  },
  ShiftReduce {
    state: usize,
    reduce: String,
    shift: String,
  },
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Error::InvalidProduction { source } => {
        write!(f, "Invalid String: {}", source)
      }
      Error::EmptyGrammar => write!(f, "Grammar has no productions"),
      Error::EmptyBody { left } => {
        write!(f, "Production for {} has an empty body", left)
      }
      Error::NotNonterminal { name } => {
        write!(f, "Left side {} is not a nonterminal", name)
      }
      Error::ReservedSymbol { name } => {
        write!(f, "Reserved symbol {} in production body", name)
      }
      Error::Conflict { .. } => write!(f, "Grammar is not LR(0)"),
      Error::ShiftReduce { state, reduce, shift } => {
        write!(f,
          "Grammar is not LR(0): state I{} reduces {} and shifts {}",
          state, reduce, shift)
      }
    }
  }
}

impl std::error::Error for Error {}
