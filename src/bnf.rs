use indexmap::IndexMap;
use crate::error::Error;
use crate::grammar::*;

/// Augmented grammar with indexed productions. Production 0 is always
/// `S' : S $`.
#[derive(Debug, Clone)]
pub struct Bnf {
  start: Symbol,
  original_start: Symbol,
  prods: Vec<Production>,
  /// nonterminal -> its productions, in declaration order
  nonterms: IndexMap<Symbol, Vec<ProdId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProdId(pub(crate) u32);

impl ProdId {
  pub const AUGMENTED: ProdId = ProdId(0);

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl TryFrom<Grammar> for Bnf {
  type Error = Error;

  fn try_from(grammar: Grammar) -> Result<Bnf, Error> {
    let (start, rest) = grammar.into_parts();
    let original_start = start.ok_or(Error::EmptyGrammar)?;

    let start = augmented_start(&original_start, &rest);
    let mut prods = Vec::with_capacity(rest.len() + 1);
    prods.push(Production::augmented(start.clone(), original_start.clone()));
    prods.extend(rest);

    let mut nonterms = IndexMap::<Symbol, Vec<ProdId>>::new();
    for (i, prod) in prods.iter().enumerate() {
      nonterms.entry(prod.left().clone())
        .or_default()
        .push(ProdId(i as u32));
    }

    Ok(Bnf {
      start,
      original_start,
      prods,
      nonterms,
    })
  }
}

/// `S'`, primed further if any symbol of the grammar already uses that name.
fn augmented_start(original: &Symbol, prods: &[Production]) -> Symbol {
  let mut name = format!("{}'", original.name());
  while prods.iter()
    .flat_map(|prod| std::iter::once(prod.left()).chain(prod.body()))
    .any(|sym| sym.name() == name)
  {
    name.push('\'');
  }
  nonterm(name)
}

impl Bnf {
  /// The augmented start symbol `S'`.
  pub fn start(&self) -> &Symbol {
    &self.start
  }

  pub fn original_start(&self) -> &Symbol {
    &self.original_start
  }

  pub fn prod(&self, id: ProdId) -> &Production {
    &self.prods[id.index()]
  }

  pub fn prods(&self) -> &[Production] {
    &self.prods
  }

  /// Productions with `sym` on the left side. Empty for terminals and
  /// undefined nonterminals.
  pub fn prods_of(&self, sym: &Symbol) -> &[ProdId] {
    self.nonterms.get(sym).map(Vec::as_slice).unwrap_or(&[])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn simple() -> Bnf {
    Bnf::try_from(grammar(&[
      ("S", &["A", "B"]),
      ("A", &["X"]),
      ("B", &["Y"]),
    ]).unwrap()).unwrap()
  }

  #[test]
  fn augment() {
    let bnf = simple();

    assert_eq!(bnf.prods().len(), 4);
    assert_eq!(bnf.start(), &nonterm("S'"));
    assert_eq!(bnf.original_start(), &nonterm("S"));

    let aug = bnf.prod(ProdId::AUGMENTED);
    assert_eq!(aug.left(), &nonterm("S'"));
    assert_eq!(aug.body(), &[nonterm("S"), Symbol::end_of_input()][..]);
    assert_eq!(bnf.prod(ProdId(1)).to_string(), "S : A B $");
  }

  #[test]
  fn prods_by_left_side() {
    let bnf = Bnf::try_from(grammar(&[
      ("E", &["E", "PLUS", "E"]),
      ("E", &["NUM"]),
    ]).unwrap()).unwrap();

    assert_eq!(bnf.prods_of(&nonterm("E")), &[ProdId(1), ProdId(2)][..]);
    assert!(bnf.prods_of(&term("NUM")).is_empty());
  }

  #[test]
  fn augmented_start_avoids_existing_names() {
    let bnf = Bnf::try_from(grammar(&[
      ("S", &["S'"]),
      ("S'", &["x"]),
    ]).unwrap()).unwrap();

    assert_eq!(bnf.start(), &nonterm("S''"));
  }

  #[test]
  fn augmented_start_avoids_body_symbols() {
    let mut g = Grammar::new();
    g.add_production(Production::new(nonterm("S"), vec![nonterm("S'")]).unwrap());
    g.add_production(Production::new(nonterm("S"), vec![term("S''")]).unwrap());
    let bnf = Bnf::try_from(g).unwrap();

    assert_eq!(bnf.start(), &nonterm("S'''"));
    assert_eq!(bnf.prods_of(bnf.start()), &[ProdId::AUGMENTED][..]);
    assert!(bnf.prods_of(&nonterm("S'")).is_empty());
  }

  #[test]
  fn empty_grammar() {
    assert_eq!(
      Bnf::try_from(Grammar::new()).unwrap_err(),
      Error::EmptyGrammar);
  }
}
