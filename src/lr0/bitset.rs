type BitBlock = u64;

const BLOCK_NBITS: usize = std::mem::size_of::<BitBlock>() * 8;

/// Fixed-size set of state ids.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(super) struct BitSet {
  slice: Box<[BitBlock]>,
}

impl BitSet {
  pub(super) fn new(num_bits: usize) -> Self {
    let len = (num_bits + BLOCK_NBITS - 1) / BLOCK_NBITS;
    Self {
      slice: vec![0; len].into_boxed_slice(),
    }
  }

  /// Returns whether the bit was newly set.
  pub(super) fn insert(&mut self, bit: usize) -> bool {
    let block = &mut self.slice[bit / BLOCK_NBITS];
    let mask = 1 << (bit % BLOCK_NBITS);
    let fresh = *block & mask == 0;
    *block |= mask;
    fresh
  }

  pub(super) fn contains(&self, bit: usize) -> bool {
    self.slice[bit / BLOCK_NBITS] & (1 << (bit % BLOCK_NBITS)) != 0
  }
}

#[cfg(test)]
mod tests {
  use super::BitSet;

  #[test]
  fn insert() {
    let mut set = BitSet::new(130);

    assert!(set.insert(7));
    assert!(set.insert(129));
    assert!(!set.insert(7));

    assert!(set.contains(7));
    assert!(set.contains(129));
    assert!(!set.contains(64));
    assert!(!set.contains(3));
  }
}
