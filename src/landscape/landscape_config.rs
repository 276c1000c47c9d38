use crate::error::LandscapeResult;
use crate::network::Network;
use crate::state_space::StateSpace;

/// The default number of states evaluated in one step of the transition table computation.
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 16;

/// A configuration object for landscape construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandscapeConfig<N> {
    /// The analysed network. Use a reference (`&N` is also a [`Network`]) if the network
    /// is expensive to clone.
    pub network: N,
    /// The state space the network acts on, resolved from the network [`crate::network::Sizing`]
    /// and the requested size.
    pub space: StateSpace,
    /// The number of states evaluated before the transition table computation suspends
    /// (default: [`DEFAULT_CHUNK_SIZE`]). Cancellation is checked between such chunks.
    pub chunk_size: usize,
}

impl<N: Network> LandscapeConfig<N> {
    /// Create a new [`LandscapeConfig`], resolving the state space of the `network`.
    ///
    /// A `size` must be given for variable-sized networks and omitted for fixed-size ones,
    /// otherwise this fails with [`crate::error::LandscapeError::InvalidArgument`].
    pub fn new(network: N, size: Option<usize>) -> LandscapeResult<LandscapeConfig<N>> {
        let space = network.sizing().state_space(size)?;
        Ok(LandscapeConfig {
            network,
            space,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Update the number of states evaluated per computation step (at least one).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> LandscapeConfig<N> {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
