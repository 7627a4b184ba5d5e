use std::rc::Rc;
use tracing::debug;

use crate::error::{Result, StreamError};
use crate::stream::Stream;

impl<T: 'static> Stream<T> {

  /// Apply a function to every element.
  /// `f` is not called for a position until its head is demanded.
  pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
    U: 'static,
    F: Fn(&T) -> U + 'static {
    map_rc(self.clone(), Rc::new(f))
  }

  /// Keep only the elements satisfying the predicate.
  ///
  /// Leading elements that fail `p` are skipped before the first cell is
  /// built, so this does not terminate on an infinite stream without a
  /// matching element. A finite stream without a match is `Exhausted`.
  /// The filtered stream of a finite stream ends where the source ends.
  pub fn filter<P>(&self, p: P) -> Result<Stream<T>>
    where
    T: Clone,
    P: Fn(&T) -> bool + 'static {
    filter_rc(self.clone(), Rc::new(p))?
      .ok_or(StreamError::exhausted("filter", 1, 0))
  }

  /// Combine two streams element-wise.
  /// The result ends as soon as either input ends.
  pub fn zip_with<U, R, F>(&self, other: &Stream<U>, f: F) -> Stream<R>
    where
    U: 'static,
    R: 'static,
    F: Fn(&T, &U) -> R + 'static {
    zip_rc(self.clone(), other.clone(), Rc::new(f))
  }
}


impl<T> Stream<T> {

  /// Right-associative fold: `f(x1, f(x2, f(x3, ...)))`.
  ///
  /// The folded rest is passed to `f` as a deferred `FoldRest`, so `f`
  /// chooses whether to demand it. This is what lets a fold stop early on
  /// an infinite stream.
  ///
  /// # Panics
  /// Under the same conditions as `head`.
  pub fn foldr<R, F>(&self, f: F) -> R
    where F: for<'a> Fn(&T, FoldRest<'a, T, R>) -> R {
    fold_from(self, &f, 1)
  }

  /// The first `n` elements, in order.
  ///
  /// Forces exactly `n - 1` tails. If the stream is finite and shorter than
  /// `n` the result is `Exhausted`, reporting how many elements there were.
  pub fn take(&self, n: usize) -> Result<Vec<T>>
    where T: Clone {
    let mut result = Vec::with_capacity(n.min(4096));
    if n == 0 { return Ok(result) }

    let mut cur = self.clone();
    loop {
      result.push(cur.try_head()?.clone());
      if result.len() == n { return Ok(result) }
      cur = match cur.next()? {
              Some(next) => next,
              None => return Err(StreamError::exhausted("take", n, result.len()))
            };
    }
  }

  /// Skip the first `n` elements.
  ///
  /// Forces exactly `n` tails. `drop(0)` is the same cell.
  pub fn drop(&self, n: usize) -> Result<Stream<T>> {
    let mut cur = self.clone();
    for i in 0 .. n {
      cur = cur.next()?
               .ok_or(StreamError::exhausted("drop", n.saturating_add(1), i + 1))?;
    }
    Ok(cur)
  }

  /// Iterate over the elements.
  /// A tail is forced only when the element after it is requested.
  pub fn iter(&self) -> Iter<T> {
    Iter { cur: Some(self.clone()), advance: false }
  }
}


// -----------------------------------------------------------------------------

fn map_rc<T: 'static, U: 'static>
  (s: Stream<T>, f: Rc<dyn Fn(&T) -> U>) -> Stream<U> {
  let (src, g) = (s.clone(), f.clone());
  Stream::lazy_cons(
    move || Ok(g(src.try_head()?)),
    move || Ok(s.next()?.map(|rest| map_rc(rest, f.clone()))))
}

// `None` means the source ended before an element matched. Errors from the
// source are passed on unchanged, so the cell forcing this stays unevaluated.
fn filter_rc<T: Clone + 'static>
  (s: Stream<T>, p: Rc<dyn Fn(&T) -> bool>) -> Result<Option<Stream<T>>> {
  let mut cur = s;
  let mut skipped = 0_usize;
  while !p(cur.try_head()?) {
    skipped += 1;
    match cur.next()? {
      Some(next) => cur = next,
      None => {
        debug!(event = "filter_exhausted", skipped = skipped);
        return Ok(None)
      }
    }
  }

  let head = cur.try_head()?.clone();
  Ok(Some(Stream::cons_with(head, move || {
    match cur.next()? {
      Some(rest) => filter_rc(rest, p.clone()),
      None       => Ok(None)
    }
  })))
}

fn zip_rc<T: 'static, U: 'static, R: 'static>
  (xs: Stream<T>, ys: Stream<U>, f: Rc<dyn Fn(&T, &U) -> R>) -> Stream<R> {
  let (x, y, g) = (xs.clone(), ys.clone(), f.clone());
  Stream::lazy_cons(
    move || Ok(g(x.try_head()?, y.try_head()?)),
    move || {
      let Some(xs) = xs.next()? else { return Ok(None) };
      let Some(ys) = ys.next()? else { return Ok(None) };
      Ok(Some(zip_rc(xs, ys, f.clone())))
    })
}


/// The not yet computed right fold of the rest of a stream.
pub struct FoldRest<'a, T, R> {
  cell:  Stream<T>,
  depth: usize,
  f:     &'a dyn Fn(&T, FoldRest<'a, T, R>) -> R,
}

impl<'a, T, R> FoldRest<'a, T, R> {

  /// Fold the rest of the stream.
  /// Fails with `Exhausted` when there is no rest (end of a finite stream).
  pub fn force(self) -> Result<R> {
    match self.cell.next()? {
      Some(next) => Ok(fold_from(&next, self.f, self.depth + 1)),
      None => Err(StreamError::exhausted("foldr", self.depth + 1, self.depth))
    }
  }
}

fn fold_from<'a, T, R>
  (s: &Stream<T>, f: &'a dyn Fn(&T, FoldRest<'a, T, R>) -> R, depth: usize) -> R {
  f(s.head(), FoldRest { cell: s.clone(), depth, f })
}


/// Iterator over the elements of a stream, see `Stream::iter`.
/// Iteration stops after the first error.
pub struct Iter<T> {
  cur:     Option<Stream<T>>,
  advance: bool,
}

impl<T: Clone> Iterator for Iter<T> {
  type Item = Result<T>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.advance {
      let cur = self.cur.take()?;
      match cur.next() {
        Ok(next) => self.cur = next,
        Err(err) => return Some(Err(err))
      }
    }
    self.advance = true;
    let head = self.cur.as_ref()?.try_head().cloned();
    if head.is_err() { self.cur = None }
    Some(head)
  }
}
