use indexmap::IndexMap;
use crate::bnf::{Bnf, ProdId};
use crate::error::Error;
use crate::grammar::Symbol;
use super::closure::gen_closure;
use super::item::Item;

pub type StateId = usize;

#[derive(Debug, Clone)]
pub struct State {
  id: StateId,
  /// kernel items first, then closure items
  items: Vec<Item>,
  kernel_len: usize,
  reduction: Option<ProdId>,
  /// symbol -> index of target state
  transitions: IndexMap<Symbol, StateId>,
}

/// LR(0) kernel items, sorted and deduplicated
type StateKey = Vec<Item>;

impl State {
  fn new(id: StateId, kernel: StateKey) -> Self {
    State {
      id,
      kernel_len: kernel.len(),
      items: kernel,
      reduction: None,
      transitions: IndexMap::new(),
    }
  }

  pub fn id(&self) -> StateId {
    self.id
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn kernel(&self) -> &[Item] {
    &self.items[..self.kernel_len]
  }

  pub fn closure(&self) -> &[Item] {
    &self.items[self.kernel_len..]
  }

  /// The production completed in this state, if any.
  pub fn reduction(&self) -> Option<ProdId> {
    self.reduction
  }

  /// Whether the state accepts on end of input, i.e. it completes `S' : S $`.
  pub fn is_accepting(&self) -> bool {
    self.reduction == Some(ProdId::AUGMENTED)
  }

  pub fn transitions(&self) -> &IndexMap<Symbol, StateId> {
    &self.transitions
  }

  pub fn transition(&self, sym: &Symbol) -> Option<StateId> {
    self.transitions.get(sym).copied()
  }
}

/// Builds the canonical LR(0) collection depth-first. States are memoized
/// on their kernel, and the index in `states` is the state id.
pub(super) struct Lr0Builder<'a> {
  bnf: &'a Bnf,
  states: IndexMap<StateKey, State>,
}

impl<'a> Lr0Builder<'a> {
  pub(super) fn new(bnf: &'a Bnf) -> Self {
    Lr0Builder {
      bnf,
      states: IndexMap::new(),
    }
  }

  pub(super) fn resolve_state(
    &mut self,
    mut kernel: StateKey,
  ) -> Result<StateId, Error> {
    kernel.sort();
    kernel.dedup();

    if let Some(id) = self.states.get_index_of(&kernel) {
      return Ok(id);
    }

    // register before following transitions, so that cycles in the grammar
    // resolve to this state instead of recursing forever
    let id = self.states.len();
    self.states.insert(kernel.clone(), State::new(id, kernel.clone()));

    let bnf = self.bnf;
    let closure = gen_closure(bnf, &kernel, id)?;
    let mut items = kernel;
    items.extend(closure.items);

    {
      let state = &mut self.states[id];
      state.items = items.clone();
      state.reduction = closure.reduction;
    }

    let mut transitions = IndexMap::new();
    for sym in closure.symbols.iter().filter(|sym| !sym.is_sentinel()) {
      let next_kernel = items.iter()
        .filter(|item| item.next_symbol(bnf) == sym)
        .map(|item| item.advance())
        .collect();
      let target = self.resolve_state(next_kernel)?;
      transitions.insert(sym.clone(), target);
    }

    self.states[id].transitions = transitions;
    Ok(id)
  }

  pub(super) fn finish(self) -> Vec<State> {
    self.states.into_iter()
      .map(|(_, state)| state)
      .collect()
  }
}
