use std::cell::{Cell, OnceCell};
use std::fmt;
use tracing::trace;

use crate::error::{Result, StreamError};

type Code<T> = Box<dyn Fn() -> Result<T>>;

/// A deferred computation that is evaluated at most once.
///
/// The first successful `force` runs the computation, caches the result and
/// drops the computation. Every later `force` returns the cached value.
/// If the computation fails (returns an error or panics) nothing is cached
/// and the computation is kept, so forcing again retries it.
pub struct Thunk<T> {
  value: OnceCell<T>,
  code:  Cell<Option<Code<T>>>,
}

impl<T> Thunk<T> {

  /// A deferred cell for an infallible computation.
  pub fn new<F>(f: F) -> Self
    where F: Fn() -> T + 'static {
    Self::fallible(move || Ok(f()))
  }

  /// A deferred cell for a computation that may fail.
  pub fn fallible<F>(f: F) -> Self
    where F: Fn() -> Result<T> + 'static {
    Thunk { value: OnceCell::new(), code: Cell::new(Some(Box::new(f))) }
  }

  /// A cell that is already evaluated.
  pub fn ready(value: T) -> Self {
    Thunk { value: OnceCell::from(value), code: Cell::new(None) }
  }

  /// Has the computation run to completion?
  pub fn is_forced(&self) -> bool { self.value.get().is_some() }

  /// The cached value, without forcing.
  pub fn get(&self) -> Option<&T> { self.value.get() }

  /// Evaluate the cell, or return the cached value if it was already
  /// evaluated.
  pub fn force(&self) -> Result<&T> {
    if let Some(value) = self.value.get() { return Ok(value) }

    // While the computation runs its slot is empty, so forcing this cell
    // again from inside the computation is reported as `Reentrant`.
    let pending = Pending { slot: &self.code, code: self.code.take() };
    let value = pending.run()?;
    pending.finish();
    Ok(self.value.get_or_init(|| value))
  }

  /// Take the cached value out, leaving the cell unevaluated and without
  /// a computation. Used to unlink stream chains without recursion.
  pub(crate) fn take(&mut self) -> Option<T> {
    self.code.set(None);
    self.value.take()
  }

  pub fn into_inner(self) -> Option<T> { self.value.into_inner() }
}


/// A computation that has been taken out of its cell while it runs.
/// Unless `finish` is called, dropping puts the computation back.
struct Pending<'a, T> {
  slot: &'a Cell<Option<Code<T>>>,
  code: Option<Code<T>>,
}

impl<'a, T> Pending<'a, T> {
  fn run(&self) -> Result<T> {
    match &self.code {
      None => Err(StreamError::Reentrant),
      Some(code) => {
        trace!(event = "force");
        let result = code();
        if result.is_err() { trace!(event = "force_failed", retry = true) }
        result
      }
    }
  }

  /// The computation succeeded, drop it.
  fn finish(mut self) { self.code = None }
}

impl<'a, T> Drop for Pending<'a, T> {
  fn drop(&mut self) {
    if let Some(code) = self.code.take() {
      self.slot.set(Some(code))
    }
  }
}


impl<T: fmt::Debug> fmt::Debug for Thunk<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.value.get() {
      Some(value) => f.debug_tuple("Thunk").field(value).finish(),
      None        => f.write_str("Thunk(<pending>)")
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;
  use std::panic::{catch_unwind, AssertUnwindSafe};
  use std::rc::Rc;

  fn counting(count: &Rc<Cell<usize>>) -> Thunk<usize> {
    let count = count.clone();
    Thunk::new(move || { count.set(count.get() + 1); 42 })
  }

  #[test]
  fn test_force_runs_once() {
    let count = Rc::new(Cell::new(0));
    let t = counting(&count);
    assert!(!t.is_forced());
    assert_eq!(count.get(), 0);
    assert_eq!(t.force(), Ok(&42));
    assert_eq!(t.force(), Ok(&42));
    assert_eq!(t.force(), Ok(&42));
    assert_eq!(count.get(), 1);
    assert!(t.is_forced());
  }

  #[test]
  fn test_computation_dropped_after_force() {
    let captured = Rc::new(7_u32);
    let inner = captured.clone();
    let t = Thunk::new(move || *inner + 1);
    assert_eq!(Rc::strong_count(&captured), 2);
    assert_eq!(t.force(), Ok(&8));
    assert_eq!(Rc::strong_count(&captured), 1);
  }

  #[test]
  fn test_ready() {
    let t = Thunk::ready("done");
    assert!(t.is_forced());
    assert_eq!(t.get(), Some(&"done"));
    assert_eq!(t.force(), Ok(&"done"));
  }

  #[test]
  fn test_failure_is_not_cached() {
    let attempts = Rc::new(Cell::new(0));
    let seen = attempts.clone();
    let t = Thunk::fallible(move || {
      seen.set(seen.get() + 1);
      if seen.get() < 3 { Err(StreamError::EmptyInput) } else { Ok(seen.get()) }
    });
    assert_eq!(t.force(), Err(StreamError::EmptyInput));
    assert!(!t.is_forced());
    assert_eq!(t.force(), Err(StreamError::EmptyInput));
    assert_eq!(t.force(), Ok(&3));
    assert_eq!(t.force(), Ok(&3));
    assert_eq!(attempts.get(), 3);
  }

  #[test]
  fn test_panic_is_not_cached() {
    let attempts = Rc::new(Cell::new(0));
    let seen = attempts.clone();
    let t = Thunk::new(move || {
      seen.set(seen.get() + 1);
      if seen.get() == 1 { panic!("first attempt fails") }
      "ok"
    });
    let first = catch_unwind(AssertUnwindSafe(|| { let _ = t.force(); }));
    assert!(first.is_err());
    assert!(!t.is_forced());
    assert_eq!(t.force(), Ok(&"ok"));
    assert_eq!(attempts.get(), 2);
  }

  #[test]
  fn test_reentrant_force() {
    let slot: Rc<RefCell<Option<Rc<Thunk<u32>>>>> = Rc::new(RefCell::new(None));
    let me = slot.clone();
    let t = Rc::new(Thunk::fallible(move || {
      let this = me.borrow().clone().expect("cell installed");
      let next = this.force().map(|x| x + 1);
      next
    }));
    *slot.borrow_mut() = Some(t.clone());

    assert_eq!(t.force(), Err(StreamError::Reentrant));
    assert!(!t.is_forced());
    slot.borrow_mut().take();
  }

  #[test]
  fn test_debug() {
    let t = Thunk::new(|| 5);
    assert_eq!(format!("{:?}", t), "Thunk(<pending>)");
    let _ = t.force();
    assert_eq!(format!("{:?}", t), "Thunk(5)");
  }
}
