use num::{Integer, One, Zero};

use crate::generators::count_from;
use crate::stream::Stream;

/// `0, 1, 1, 2, 3, 5, 8, ...`
///
/// Forcing the tail of element `k` computes element `k + 1` and nothing
/// further, so `u64` holds the first 94 elements (up to F93);
/// use `num::BigUint` for exact values further out.
pub fn fibonacci<T>() -> Stream<T>
  where T: Zero + One + Clone + 'static {
  fib_from(T::one(), T::zero())
}

// `prev` is the element before `cur`; F(-1) = 1 starts the sequence at 0.
fn fib_from<T: Zero + Clone + 'static>(prev: T, cur: T) -> Stream<T> {
  let x = cur.clone();
  Stream::cons(cur, move || fib_from(x.clone(), prev.clone() + x.clone()))
}

/// `2, 3, 5, 7, 11, ...`, by trial division of the naturals from 2.
pub fn primes<T>() -> Stream<T>
  where T: Integer + Clone + 'static {
  let two = T::one() + T::one();
  let three = two.clone() + T::one();
  Stream::cons_with(two, move || count_from(three.clone()).filter(is_prime).map(Some))
}

/// Trial division by odd numbers up to the square root.
/// The bound is checked as `d <= n / d`, which cannot overflow.
pub fn is_prime<T: Integer + Clone>(n: &T) -> bool {
  let two = T::one() + T::one();
  if *n < two { return false }
  if n.is_even() { return *n == two }

  let mut d = two.clone() + T::one();
  while d <= n.clone() / d.clone() {
    if (n.clone() % d.clone()).is_zero() { return false }
    d = d + two.clone();
  }
  true
}
