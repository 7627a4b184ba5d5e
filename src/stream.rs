use std::fmt;
use std::rc::Rc;

use crate::error::{Result, StreamError};
use crate::thunk::Thunk;

/// A lazy, possibly infinite sequence.
///
/// A stream is a shared handle to a cons cell: a head value and a deferred
/// tail. The tail is computed the first time it is demanded and cached, so
/// every holder of the same cell observes the same successor.
/// A tail that evaluates to `None` marks the end of a finite stream.
pub struct Stream<T>(Rc<Node<T>>);

struct Node<T> {
  head: Thunk<T>,
  tail: Thunk<Option<Stream<T>>>,
}

impl<T> Clone for Stream<T> {
  fn clone(&self) -> Self { Stream(self.0.clone()) }
}


/* Construction */

impl<T: 'static> Stream<T> {

  /// A cell with the given head whose (infinite) tail is computed by `tail`.
  pub fn cons<F>(head: T, tail: F) -> Self
    where F: Fn() -> Stream<T> + 'static {
    Self::cons_with(head, move || Ok(Some(tail())))
  }

  /// Like `cons`, but the tail computation may fail, or end the stream
  /// by returning `None`.
  pub fn cons_with<F>(head: T, tail: F) -> Self
    where F: Fn() -> Result<Option<Stream<T>>> + 'static {
    Stream(Rc::new(Node { head: Thunk::ready(head), tail: Thunk::fallible(tail) }))
  }

  /// A stream with exactly one element.
  pub fn singleton(head: T) -> Self {
    Stream(Rc::new(Node { head: Thunk::ready(head), tail: Thunk::ready(None) }))
  }

  /// A cell whose head is also deferred.
  pub(crate) fn lazy_cons<H, F>(head: H, tail: F) -> Self
    where
    H: Fn() -> Result<T> + 'static,
    F: Fn() -> Result<Option<Stream<T>>> + 'static {
    Stream(Rc::new(Node { head: Thunk::fallible(head), tail: Thunk::fallible(tail) }))
  }
}


/* Access */

impl<T> Stream<T> {

  /// The first element of the stream.
  ///
  /// # Panics
  /// If the head is deferred and forcing it re-enters its own evaluation.
  /// Use `try_head` to get the error instead.
  pub fn head(&self) -> &T {
    match self.try_head() {
      Ok(value) => value,
      Err(err)  => panic!("{}", err)
    }
  }

  /// The first element of the stream.
  pub fn try_head(&self) -> Result<&T> { self.0.head.force() }

  /// Force the tail. `None` means that this was the last element.
  pub fn next(&self) -> Result<Option<Stream<T>>> {
    self.0.tail.force().cloned()
  }

  /// The rest of the stream.
  /// Fails with `Exhausted` if this was the last element.
  pub fn tail(&self) -> Result<Stream<T>> {
    self.next()?.ok_or(StreamError::exhausted("tail", 2, 1))
  }

  /// Has the tail of this cell been computed already?
  pub fn is_tail_forced(&self) -> bool { self.0.tail.is_forced() }

  /// Has the head of this cell been computed already?
  /// Always true for cells built with `cons`.
  pub fn is_head_forced(&self) -> bool { self.0.head.is_forced() }

  /// Are these two handles to the same cell?
  pub fn ptr_eq(a: &Self, b: &Self) -> bool { Rc::ptr_eq(&a.0, &b.0) }
}


// Dropping the first cell of a long evaluated chain would otherwise recurse
// once per cell. Unlink the successors one at a time instead, stopping at the
// first cell that is still shared.
impl<T> Drop for Node<T> {
  fn drop(&mut self) {
    let mut next = self.tail.take().flatten();
    while let Some(Stream(cell)) = next {
      next = match Rc::try_unwrap(cell) {
        Ok(mut node) => node.tail.take().flatten(),
        Err(_)       => None
      }
    }
  }
}


/// Shows the evaluated prefix, without forcing anything.
impl<T: fmt::Debug> fmt::Debug for Stream<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("[")?;
    let mut cur = self;
    loop {
      match cur.0.head.get() {
        Some(x) => write!(f, "{:?}", x)?,
        None    => f.write_str("<pending>")?
      }
      match cur.0.tail.get() {
        Some(Some(next)) => { f.write_str(", ")?; cur = next }
        Some(None)       => break,
        None             => { f.write_str(", ..")?; break }
      }
    }
    f.write_str("]")
  }
}
