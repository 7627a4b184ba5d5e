use proptest::prelude::*;
use proptest::strategy::*;
use proptest::test_runner::*;

use crate::generators::from_vec;
use crate::stream::Stream;

/// The elements of a non-empty finite stream.
#[derive(Clone, Debug)]
pub struct FiniteCase { pub items: Vec<u64> }

impl FiniteCase {
  pub fn stream(&self) -> Stream<u64> {
    from_vec(self.items.clone()).expect("finite cases are never empty")
  }
}

impl ValueTree for FiniteCase {
  type Value = FiniteCase;

  fn current(&self) -> FiniteCase { self.clone() }

  fn simplify(&mut self) -> bool { false }
  fn complicate(&mut self) -> bool { false }
}

/// Finite cases with between 1 and `max_len` elements.
#[derive(Debug)]
pub struct FiniteStrategy { pub max_len: usize }

impl Strategy for FiniteStrategy {
  type Tree  = FiniteCase;
  type Value = FiniteCase;

  fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
    let rng = runner.rng();
    let len = 1 + (rng.next_u64() as usize) % self.max_len;
    let mut items = Vec::with_capacity(len);
    for _ in 0 .. len {
      items.push(rng.next_u64() % 100)
    }
    Ok(FiniteCase { items })
  }
}


/// Check that a property holds for values drawn from the strategy.
pub fn check<S, P>(strategy: S, p: P)
  where
  S: Strategy,
  P: Fn(S::Value) -> bool {
  let mut cfg: Config = <_>::default();
  cfg.failure_persistence = None;
  let mut runner = TestRunner::new(cfg);
  runner.run(&strategy, |arg| {
    if p(arg) { Ok(()) }
    else { Err(TestCaseError::Fail("property does not hold".into())) }
  }).unwrap()
}
