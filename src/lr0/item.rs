use std::fmt::{self, Display, Formatter};
use crate::bnf::{Bnf, ProdId};
use crate::grammar::Symbol;

/// An LR(0) item. `dot` never passes the trailing sentinel of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
  pub(crate) prod: ProdId,
  pub(crate) dot: u32,
}

impl Item {
  pub(crate) fn start(prod: ProdId) -> Self {
    Item {
      prod,
      dot: 0,
    }
  }

  pub fn prod(&self) -> ProdId {
    self.prod
  }

  pub fn dot(&self) -> usize {
    self.dot as usize
  }

  /// The symbol right after the dot.
  pub fn next_symbol<'a>(&self, bnf: &'a Bnf) -> &'a Symbol {
    &bnf.prod(self.prod).body()[self.dot()]
  }

  pub fn is_complete(&self, bnf: &Bnf) -> bool {
    self.next_symbol(bnf).is_sentinel()
  }

  pub(crate) fn advance(self) -> Self {
    Item {
      dot: self.dot + 1,
      ..self
    }
  }

  pub fn display<'a>(&self, bnf: &'a Bnf) -> ItemDisplay<'a> {
    ItemDisplay {
      item: *self,
      bnf,
    }
  }
}

pub struct ItemDisplay<'a> {
  item: Item,
  bnf: &'a Bnf,
}

impl Display for ItemDisplay<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let prod = self.bnf.prod(self.item.prod);
    write!(f, "{} :", prod.left())?;
    for (i, sym) in prod.body().iter().enumerate() {
      if i == self.item.dot() {
        f.write_str(" .")?;
      }
      write!(f, " {}", sym)?;
    }
    Ok(())
  }
}
