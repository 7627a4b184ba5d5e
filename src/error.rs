use thiserror::Error;

/// Things that can go wrong while walking a stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {

  /// `cycle` was given nothing to repeat.
  #[error("cannot cycle an empty sequence")]
  EmptyInput,

  /// A finite stream ended before an operation got what it needed.
  ///   * `operation` - the combinator that ran out
  ///   * `requested` - how many elements it needed
  ///   * `available` - how many elements the stream actually had
  #[error("{operation}: stream exhausted after {available} of {requested} elements")]
  Exhausted { operation: &'static str, requested: usize, available: usize },

  /// A deferred cell was forced from inside its own computation.
  #[error("deferred cell forced while it was being evaluated")]
  Reentrant,
}

impl StreamError {
  pub(crate) fn exhausted(operation: &'static str, requested: usize, available: usize) -> Self {
    StreamError::Exhausted { operation, requested, available }
  }
}

pub type Result<T> = std::result::Result<T, StreamError>;
