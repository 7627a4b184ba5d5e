//! Lazy, memoized, possibly infinite streams.
//!
//! A `Stream<T>` is a cons cell holding a head and a deferred tail. Tails are
//! computed on first demand and cached, so a stream can describe an infinite
//! sequence while only the requested prefix is ever built.
//!
//! ```
//! use lazy_streams::{count_from, cycle, fibonacci};
//!
//! let odds = count_from(1).filter(|n| n % 2 == 1).unwrap();
//! assert_eq!(odds.take(3).unwrap(), vec![1, 3, 5]);
//!
//! let fibs = fibonacci::<u64>();
//! assert_eq!(fibs.drop(10).unwrap().head(), &55);
//!
//! assert_eq!(cycle([1, 2]).unwrap().take(5).unwrap(), vec![1, 2, 1, 2, 1]);
//! ```

pub mod error;
pub mod thunk;
pub mod stream;
pub mod combinators;
pub mod generators;
pub mod numeric;

#[cfg(test)]
pub mod proptest;

pub use error::{Result, StreamError};
pub use thunk::Thunk;
pub use stream::Stream;
pub use combinators::{FoldRest, Iter};
pub use generators::{count_from, count_from_step, cycle, from_vec, iterate, repeat, unfold};
pub use numeric::{fibonacci, is_prime, primes};
