use crate::bnf::{Bnf, ProdId};
use crate::error::Error;
use crate::grammar::{Grammar, Symbol};
use self::bitset::BitSet;
use self::state::Lr0Builder;

pub use self::item::{Item, ItemDisplay};
pub use self::state::{State, StateId};

mod bitset;
mod item;
mod closure;
mod state;

/// The canonical LR(0) collection of an augmented grammar.
#[derive(Debug, Clone)]
pub struct Automaton {
  bnf: Bnf,
  states: Vec<State>,
}

/// A state that completes a production and can also shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReduce {
  pub state: StateId,
  pub reduce: ProdId,
  pub shift: Symbol,
}

impl Automaton {
  /// Augments `grammar` and builds its automaton. Only states completing
  /// productions of two different nonterminals are rejected.
  pub fn build(grammar: Grammar) -> Result<Self, Error> {
    Self::from_bnf(Bnf::try_from(grammar)?)
  }

  /// Like [`Automaton::build`], but also rejects states completing two
  /// productions of one nonterminal, and shift/reduce conflicts.
  pub fn build_strict(grammar: Grammar) -> Result<Self, Error> {
    let automaton = Self::build(grammar)?;
    for state in &automaton.states {
      if let &[first, second, ..] = automaton.completed(state.id()).as_slice() {
        return Err(Error::Conflict {
          state: state.id(),
          first: automaton.bnf.prod(first).to_string(),
          second: automaton.bnf.prod(second).to_string(),
        });
      }
    }
    match automaton.shift_reduce_conflicts().into_iter().next() {
      Some(conflict) => Err(Error::ShiftReduce {
        state: conflict.state,
        reduce: automaton.bnf.prod(conflict.reduce).to_string(),
        shift: conflict.shift.to_string(),
      }),
      None => Ok(automaton),
    }
  }

  pub fn from_bnf(bnf: Bnf) -> Result<Self, Error> {
    let mut builder = Lr0Builder::new(&bnf);
    builder.resolve_state(vec![Item::start(ProdId::AUGMENTED)])?;
    let states = builder.finish();

    Ok(Automaton {
      bnf,
      states,
    })
  }

  pub fn bnf(&self) -> &Bnf {
    &self.bnf
  }

  pub fn start(&self) -> StateId {
    0
  }

  pub fn states(&self) -> &[State] {
    &self.states
  }

  pub fn state(&self, id: StateId) -> &State {
    &self.states[id]
  }

  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  pub fn accepting(&self) -> Option<StateId> {
    self.states.iter().position(State::is_accepting)
  }

  pub fn transition(&self, from: StateId, sym: &Symbol) -> Option<StateId> {
    self.states[from].transition(sym)
  }

  /// Every production completed in `id`. All share one left side.
  pub fn completed(&self, id: StateId) -> Vec<ProdId> {
    self.states[id].kernel().iter()
      .filter(|item| item.is_complete(&self.bnf))
      .map(Item::prod)
      .collect()
  }

  /// Left side of the production completed in `id`.
  pub fn reduction_symbol(&self, id: StateId) -> Option<&Symbol> {
    self.states[id].reduction().map(|prod| self.bnf.prod(prod).left())
  }

  /// States completing a production other than `S' : S $` while also having
  /// outgoing transitions, one entry per shifted symbol.
  pub fn shift_reduce_conflicts(&self) -> Vec<ShiftReduce> {
    self.states.iter()
      .filter(|state| !state.is_accepting())
      .filter_map(|state| state.reduction().map(|prod| (state, prod)))
      .flat_map(|(state, prod)| {
        state.transitions().keys().map(move |sym| ShiftReduce {
          state: state.id(),
          reduce: prod,
          shift: sym.clone(),
        })
      })
      .collect()
  }

  /// State ids in depth-first preorder from the start state, each once.
  pub fn dfs(&self) -> Vec<StateId> {
    let mut visited = BitSet::new(self.states.len());
    let mut order = Vec::with_capacity(self.states.len());
    let mut stack = vec![self.start()];

    while let Some(id) = stack.pop() {
      if !visited.insert(id) {
        continue;
      }
      order.push(id);
      stack.extend(self.states[id].transitions().values().rev()
        .filter(|&&target| !visited.contains(target)));
    }

    order
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::*;
  use pretty_assertions::assert_eq;

  fn edges(automaton: &Automaton) -> Vec<(StateId, String, StateId)> {
    automaton.states().iter()
      .flat_map(|state| state.transitions().iter()
        .map(move |(sym, &target)| (state.id(), sym.to_string(), target)))
      .collect()
  }

  fn expr() -> Grammar {
    grammar(&[
      ("S", &["E"]),
      ("E", &["E", "PLUS", "E"]),
      ("E", &["NUM"]),
    ]).unwrap()
  }

  #[test]
  fn simple_scenario() {
    let automaton = Automaton::build(grammar(&[
      ("S", &["A", "B"]),
      ("A", &["X"]),
      ("B", &["Y"]),
    ]).unwrap()).unwrap();
    let bnf = automaton.bnf();

    assert_eq!(automaton.len(), 6);
    let start = automaton.state(automaton.start());
    assert_eq!(
      start.kernel().iter().map(|item| item.display(bnf).to_string())
        .collect::<Vec<_>>(),
      vec!["S' : . S $"]);
    assert_eq!(
      start.closure().iter().map(|item| item.display(bnf).to_string())
        .collect::<Vec<_>>(),
      vec!["S : . A B $", "A : . X $"]);

    assert_eq!(edges(&automaton), vec![
      (0, "S".to_owned(), 1),
      (0, "A".to_owned(), 2),
      (0, "X".to_owned(), 5),
      (2, "B".to_owned(), 3),
      (2, "Y".to_owned(), 4),
    ]);

    assert_eq!(automaton.accepting(), Some(1));
    assert_eq!(automaton.reduction_symbol(1), Some(&nonterm("S'")));
    assert!(automaton.state(1).transitions().is_empty());
    assert_eq!(automaton.reduction_symbol(2), None);
    assert_eq!(automaton.reduction_symbol(3), Some(&nonterm("S")));
    assert_eq!(automaton.reduction_symbol(4), Some(&nonterm("B")));
    assert_eq!(automaton.reduction_symbol(5), Some(&nonterm("A")));
  }

  #[test]
  fn left_recursion_is_finite() {
    let automaton = Automaton::build(expr()).unwrap();

    assert_eq!(automaton.len(), 6);
    assert_eq!(edges(&automaton), vec![
      (0, "S".to_owned(), 1),
      (0, "E".to_owned(), 2),
      (0, "NUM".to_owned(), 5),
      (2, "PLUS".to_owned(), 3),
      (3, "E".to_owned(), 4),
      (3, "NUM".to_owned(), 5),
      (4, "PLUS".to_owned(), 3),
    ]);

    // E PLUS E PLUS ... cycles between two states
    let plus = term("PLUS");
    let e = nonterm("E");
    assert_eq!(automaton.transition(3, &e), Some(4));
    assert_eq!(automaton.transition(4, &plus), Some(3));
  }

  #[test]
  fn deterministic() {
    let a = Automaton::build(expr()).unwrap();
    let b = Automaton::build(expr()).unwrap();

    assert_eq!(a.len(), b.len());
    assert_eq!(edges(&a), edges(&b));
  }

  #[test]
  fn closure_items_are_reachable() {
    let automaton = Automaton::build(expr()).unwrap();
    let bnf = automaton.bnf();

    for state in automaton.states() {
      for item in state.closure() {
        assert_eq!(item.dot(), 0);
        let left = bnf.prod(item.prod()).left();
        assert!(state.items().iter().any(|other| other.next_symbol(bnf) == left));
      }
    }
  }

  #[test]
  fn reduce_reduce_conflict() {
    let err = Automaton::build(grammar(&[
      ("S", &["A"]),
      ("S", &["B"]),
      ("A", &["x"]),
      ("B", &["x"]),
    ]).unwrap()).unwrap_err();

    assert_eq!(err.to_string(), "Grammar is not LR(0)");
  }

  fn one_nonterminal_twice() -> Grammar {
    grammar(&[
      ("Z", &["a", "S"]),
      ("Z", &["S"]),
      ("S", &["a", "b"]),
      ("S", &["b"]),
    ]).unwrap()
  }

  #[test]
  fn productions_of_one_nonterminal_complete_together() {
    let automaton = Automaton::build(one_nonterminal_twice()).unwrap();

    assert_eq!(automaton.len(), 9);
    assert_eq!(automaton.transition(2, &term("b")), Some(4));
    assert_eq!(automaton.reduction_symbol(4), Some(&nonterm("S")));
    assert_eq!(automaton.completed(4), vec![ProdId(3), ProdId(4)]);
    assert!(automaton.state(4).transitions().is_empty());
  }

  #[test]
  fn strict_rejects_productions_of_one_nonterminal() {
    let err = Automaton::build_strict(one_nonterminal_twice()).unwrap_err();

    assert_eq!(err, Error::Conflict {
      state: 4,
      first: "S : a b $".to_owned(),
      second: "S : b $".to_owned(),
    });
  }

  #[test]
  fn shift_reduce_is_opt_in() {
    let automaton = Automaton::build(expr()).unwrap();
    assert_eq!(automaton.shift_reduce_conflicts(), vec![
      ShiftReduce { state: 2, reduce: ProdId(1), shift: term("PLUS") },
      ShiftReduce { state: 4, reduce: ProdId(2), shift: term("PLUS") },
    ]);

    let err = Automaton::build_strict(expr()).unwrap_err();
    assert_eq!(err, Error::ShiftReduce {
      state: 2,
      reduce: "S : E $".to_owned(),
      shift: "PLUS".to_owned(),
    });

    let ok = Automaton::build_strict(grammar(&[
      ("S", &["A", "B"]),
      ("A", &["X"]),
      ("B", &["Y"]),
    ]).unwrap());
    assert!(ok.is_ok());
  }

  #[test]
  fn dfs_visits_each_state_once() {
    let automaton = Automaton::build(expr()).unwrap();
    assert_eq!(automaton.dfs(), vec![0, 1, 2, 3, 4, 5]);
  }
}
