use thiserror::Error;

/// Result type for finder operations
pub type FinderResult<T> = Result<T, FinderError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FinderError {
    /// The range [1, N] needs N >= 1.
    #[error("range bound must be at least 1")]
    EmptyRange,

    #[error("missing value {missing} is outside [1, {bound}]")]
    MissingOutOfRange { missing: u64, bound: u64 },

    /// The sequence for this bound cannot be held in memory on this target.
    #[error("range bound {bound} is too large to materialize a sequence")]
    BoundTooLarge { bound: u64 },

    #[error("sequence sum {actual} exceeds the expected sum {expected}")]
    SumExceedsExpected { expected: u128, actual: u128 },
}
