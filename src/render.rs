use std::fmt::{self, Display, Formatter};
use crate::lr0::{Automaton, Item, State};

/// Text rendering of an automaton, one block per state in depth-first order
/// from the start state.
pub struct Rendered<'a> {
  automaton: &'a Automaton,
}

pub fn render(automaton: &Automaton) -> Rendered<'_> {
  Rendered {
    automaton,
  }
}

impl Display for Rendered<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for (i, id) in self.automaton.dfs().into_iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      self.fmt_state(f, self.automaton.state(id))?;
    }
    Ok(())
  }
}

impl Rendered<'_> {
  fn fmt_state(&self, f: &mut Formatter, state: &State) -> fmt::Result {
    writeln!(f, "=====NODE I{}", state.id())?;
    match self.automaton.reduction_symbol(state.id()) {
      Some(sym) => writeln!(f, "REDUCTION: {}", sym)?,
      None => writeln!(f, "REDUCTION:")?,
    }
    writeln!(f, "INITIALS:")?;
    self.fmt_items(f, state.kernel())?;
    writeln!(f, "OBTAINED:")?;
    self.fmt_items(f, state.closure())?;

    for (sym, target) in state.transitions() {
      writeln!(f, "SYMBOL {} MOVES TO I{}", sym, target)?;
    }
    if state.is_accepting() {
      writeln!(f, "SYMBOL $ ACCEPTS")?;
    }
    Ok(())
  }

  fn fmt_items(&self, f: &mut Formatter, items: &[Item]) -> fmt::Result {
    for item in items {
      writeln!(f, "{}", item.display(self.automaton.bnf()))?;
    }
    Ok(())
  }
}
