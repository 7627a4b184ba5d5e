//! Functions that build streams from a seed by deferring the construction
//! of each next cell.

use std::ops::Add;
use std::rc::Rc;
use num::One;
use tracing::debug;

use crate::error::{Result, StreamError};
use crate::stream::Stream;

/// `x, x, x, ...`
pub fn repeat<T: Clone + 'static>(x: T) -> Stream<T> {
  let next = x.clone();
  Stream::cons(x, move || repeat(next.clone()))
}

/// `x, f(x), f(f(x)), ...`
/// `f` is applied when the tail is forced, not before.
pub fn iterate<T, F>(f: F, x: T) -> Stream<T>
  where
  T: Clone + 'static,
  F: Fn(&T) -> T + 'static {
  iterate_rc(Rc::new(f), x)
}

fn iterate_rc<T: Clone + 'static>(f: Rc<dyn Fn(&T) -> T>, x: T) -> Stream<T> {
  let seed = x.clone();
  Stream::cons(x, move || iterate_rc(f.clone(), f(&seed)))
}

/// `x, x+1, x+2, ...`
pub fn count_from<T>(x: T) -> Stream<T>
  where T: Clone + Add<Output = T> + One + 'static {
  count_from_step(x, T::one())
}

/// `x, x+d, x+2d, ...`
pub fn count_from_step<T>(x: T, d: T) -> Stream<T>
  where T: Clone + Add<Output = T> + 'static {
  let seed = x.clone();
  Stream::cons(x, move || count_from_step(seed.clone() + d.clone(), d.clone()))
}

/// Repeat a finite sequence forever: `a0, .., an, a0, .., an, a0, ..`
///
/// The input is read once, into a buffer owned by the returned stream.
/// Fails with `EmptyInput` if there is nothing to repeat.
pub fn cycle<I>(items: I) -> Result<Stream<I::Item>>
  where
  I: IntoIterator,
  I::Item: Clone + 'static {
  let period: Rc<[I::Item]> = items.into_iter().collect();
  if period.is_empty() { return Err(StreamError::EmptyInput) }
  debug!(event = "cycle", period = period.len());
  Ok(cycle_at(period, 0))
}

fn cycle_at<T: Clone + 'static>(period: Rc<[T]>, i: usize) -> Stream<T> {
  let next = (i + 1) % period.len();
  Stream::cons(period[i].clone(), move || cycle_at(period.clone(), next))
}

/// Build a stream by repeatedly stepping a seed.
/// `f` produces the next element and the next seed, or `None` to end the
/// stream. The result is `None` if the first step already ends.
pub fn unfold<S, T, F>(seed: S, f: F) -> Option<Stream<T>>
  where
  S: 'static,
  T: 'static,
  F: Fn(&S) -> Option<(T, S)> + 'static {
  unfold_rc(Rc::new(f), &seed)
}

fn unfold_rc<S: 'static, T: 'static>
  (f: Rc<dyn Fn(&S) -> Option<(T, S)>>, seed: &S) -> Option<Stream<T>> {
  let (head, next) = f(seed)?;
  Some(Stream::cons_with(head, move || Ok(unfold_rc(f.clone(), &next))))
}

/// A finite stream over the elements of a vector.
/// `None` if the vector is empty.
pub fn from_vec<T: Clone + 'static>(items: Vec<T>) -> Option<Stream<T>> {
  from_slice_at(items.into(), 0)
}

fn from_slice_at<T: Clone + 'static>(items: Rc<[T]>, i: usize) -> Option<Stream<T>> {
  let head = items.get(i)?.clone();
  Some(Stream::cons_with(head, move || Ok(from_slice_at(items.clone(), i + 1))))
}
