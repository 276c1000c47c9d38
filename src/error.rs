use cancel_this::Cancelled;
use std::fmt::{Display, Formatter};

/// A [`LandscapeResult`] is the outcome of any fallible landscape operation.
pub type LandscapeResult<T> = Result<T, LandscapeError>;

/// The error type returned by state space, landscape and trajectory operations.
///
/// All argument checks happen eagerly at call boundaries, before any enumeration work
/// begins. The only error that can appear "mid-way" is [`LandscapeError::Cancelled`],
/// in which case no partial result is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandscapeError {
    /// A size was supplied for a fixed-size network (or omitted for a variable-sized one),
    /// a step count was zero, an initial state was empty, or a state space cannot be built.
    InvalidArgument(String),
    /// A state vector or an encoded index lies outside the state space.
    OutOfRangeState(String),
    /// The network cannot be used as a deterministic update function.
    UnsupportedNetwork(String),
    /// Construction of the transition table was cancelled.
    Cancelled(Cancelled),
}

impl From<Cancelled> for LandscapeError {
    fn from(value: Cancelled) -> Self {
        LandscapeError::Cancelled(value)
    }
}

impl Display for LandscapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LandscapeError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            LandscapeError::OutOfRangeState(msg) => write!(f, "State out of range: {}", msg),
            LandscapeError::UnsupportedNetwork(msg) => write!(f, "Unsupported network: {}", msg),
            LandscapeError::Cancelled(c) => write!(f, "{}", c),
        }
    }
}

impl std::error::Error for LandscapeError {}
