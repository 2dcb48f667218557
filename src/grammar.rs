use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
  Term,
  Nonterm,
  /// Accept marker of the augmented start production.
  EndOfInput,
  /// Terminates every production body.
  EndOfBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
  kind: SymbolKind,
  name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
  left: Symbol,
  /// non-empty, ends with a sentinel
  body: Vec<Symbol>,
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
  start: Option<Symbol>,
  prods: Vec<Production>,
}

const SENTINEL_NAME: &str = "$";

pub fn term(
  name: impl Into<String>,
) -> Symbol {
  Symbol {
    kind: SymbolKind::Term,
    name: name.into(),
  }
}

pub fn nonterm(
  name: impl Into<String>,
) -> Symbol {
  Symbol {
    kind: SymbolKind::Nonterm,
    name: name.into(),
  }
}

impl Symbol {
  pub fn end_of_input() -> Self {
    Symbol {
      kind: SymbolKind::EndOfInput,
      name: SENTINEL_NAME.to_owned(),
    }
  }

  pub fn end_of_body() -> Self {
    Symbol {
      kind: SymbolKind::EndOfBody,
      name: SENTINEL_NAME.to_owned(),
    }
  }

  pub fn kind(&self) -> SymbolKind {
    self.kind
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_nonterm(&self) -> bool {
    self.kind == SymbolKind::Nonterm
  }

  /// Whether an item whose dot is before this symbol has completed its
  /// production.
  pub fn is_sentinel(&self) -> bool {
    matches!(self.kind, SymbolKind::EndOfInput | SymbolKind::EndOfBody)
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.name)
  }
}

impl Production {
  /// Builds `left : body $`, appending the end-of-body sentinel.
  pub fn new(left: Symbol, body: Vec<Symbol>) -> Result<Self, Error> {
    if !left.is_nonterm() {
      return Err(Error::NotNonterminal {
        name: left.name,
      });
    }
    if body.is_empty() {
      return Err(Error::EmptyBody {
        left: left.name,
      });
    }
    if let Some(sym) = body.iter().find(|sym| sym.is_sentinel()) {
      return Err(Error::ReservedSymbol {
        name: sym.name.clone(),
      });
    }

    let mut body = body;
    body.push(Symbol::end_of_body());
    Ok(Production {
      left,
      body,
    })
  }

  /// `S' : S $`, the only production whose body ends in the accept marker.
  pub(crate) fn augmented(left: Symbol, start: Symbol) -> Self {
    Production {
      left,
      body: vec![start, Symbol::end_of_input()],
    }
  }

  pub fn left(&self) -> &Symbol {
    &self.left
  }

  /// Body symbols including the trailing sentinel.
  pub fn body(&self) -> &[Symbol] {
    &self.body
  }
}

impl Display for Production {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} :", self.left)?;
    for sym in &self.body {
      write!(f, " {}", sym)?;
    }
    Ok(())
  }
}

impl Grammar {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a production. The first one added fixes the start symbol.
  pub fn add_production(&mut self, prod: Production) {
    if self.start.is_none() {
      self.start = Some(prod.left.clone());
    }
    self.prods.push(prod);
  }

  pub fn start(&self) -> Option<&Symbol> {
    self.start.as_ref()
  }

  pub fn productions(&self) -> &[Production] {
    &self.prods
  }

  pub(crate) fn into_parts(self) -> (Option<Symbol>, Vec<Production>) {
    (self.start, self.prods)
  }
}

/// Builds a grammar from `(left, body)` rules. Every name used as a left
/// side is a nonterminal, every other name is a terminal.
pub fn grammar(
  rules: &[(&str, &[&str])],
) -> Result<Grammar, Error> {
  let nonterms = rules.iter()
    .map(|&(left, _)| left)
    .collect::<HashSet<_>>();

  let mut grammar = Grammar::new();
  for &(left, body) in rules {
    let body = body.iter()
      .map(|&name| if nonterms.contains(name) {
        nonterm(name)
      } else {
        term(name)
      })
      .collect();
    grammar.add_production(Production::new(nonterm(left), body)?);
  }

  Ok(grammar)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn production_appends_end_of_body() {
    let prod = Production::new(nonterm("S"), vec![nonterm("A"), term("x")])
      .unwrap();

    assert_eq!(prod.body().len(), 3);
    assert_eq!(prod.body()[2], Symbol::end_of_body());
    assert_eq!(prod.to_string(), "S : A x $");
  }

  #[test]
  fn production_rejects_bad_shapes() {
    assert_eq!(
      Production::new(term("s"), vec![term("x")]),
      Err(Error::NotNonterminal { name: "s".to_owned() }));
    assert_eq!(
      Production::new(nonterm("S"), vec![]),
      Err(Error::EmptyBody { left: "S".to_owned() }));
    assert_eq!(
      Production::new(nonterm("S"), vec![Symbol::end_of_input()]),
      Err(Error::ReservedSymbol { name: "$".to_owned() }));
  }

  #[test]
  fn sentinels_are_distinct() {
    assert!(Symbol::end_of_input().is_sentinel());
    assert!(Symbol::end_of_body().is_sentinel());
    assert_ne!(Symbol::end_of_input(), Symbol::end_of_body());
    assert_ne!(term("A"), nonterm("A"));
  }

  #[test]
  fn first_production_sets_start() {
    let g = grammar(&[
      ("S", &["A", "B"]),
      ("A", &["X"]),
      ("B", &["Y"]),
    ]).unwrap();

    assert_eq!(g.start(), Some(&nonterm("S")));
    assert_eq!(g.productions().len(), 3);
    assert_eq!(g.productions()[0].body(),
      &[nonterm("A"), nonterm("B"), Symbol::end_of_body()][..]);
    assert_eq!(g.productions()[1].body()[0], term("X"));
  }
}
