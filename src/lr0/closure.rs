use indexmap::IndexSet;
use crate::bnf::{Bnf, ProdId};
use crate::error::Error;
use crate::grammar::Symbol;
use super::item::Item;

/// Closure of a kernel and the facts derived from it.
pub(super) struct Closure {
  /// closure items only, all with the dot at 0
  pub(super) items: Vec<Item>,
  /// the first production completed by a kernel item
  pub(super) reduction: Option<ProdId>,
  /// symbols after the dot, sentinels included, in first-seen order
  pub(super) symbols: IndexSet<Symbol>,
}

/// `state` only labels the conflict error.
pub(super) fn gen_closure(
  bnf: &Bnf,
  kernel: &[Item],
  state: usize,
) -> Result<Closure, Error> {
  let mut closure = Closure {
    items: vec![],
    reduction: None,
    symbols: IndexSet::new(),
  };

  for &item in kernel {
    let sym = item.next_symbol(bnf);
    if sym.is_sentinel() {
      // completing another production of the same nonterminal is fine
      match closure.reduction {
        None => closure.reduction = Some(item.prod),
        Some(prod) if bnf.prod(prod).left() == bnf.prod(item.prod).left() => {}
        Some(prod) => {
          return Err(Error::Conflict {
            state,
            first: bnf.prod(prod).to_string(),
            second: bnf.prod(item.prod).to_string(),
          });
        }
      }
    }
    closure.expand(bnf, sym);
  }

  // closure items can't complete: every body has a real symbol before its
  // sentinel
  let mut i = 0;
  while i < closure.items.len() {
    let sym = closure.items[i].next_symbol(bnf);
    closure.expand(bnf, sym);
    i += 1;
  }

  Ok(closure)
}

impl Closure {
  fn expand(&mut self, bnf: &Bnf, sym: &Symbol) {
    if !self.symbols.insert(sym.clone()) {
      return;
    }
    if sym.is_nonterm() {
      self.items.extend(bnf.prods_of(sym).iter().map(|&prod| Item::start(prod)));
    }
  }
}
