//! Explicit state transition landscapes of synchronous networks.
//!
//! A [`Landscape`] enumerates the whole state space of a [`Network`] once, recording the
//! encoded successor of every state. The resulting functional graph (every state has
//! exactly one successor) is then decomposed into attractor cycles and their basins,
//! but only when this information is first requested.
//!
//! # Algorithms
//!
//! - [`TransitionTable`]: A resumable, cancellable computation that builds the table of
//!   successors in chunks of [`LandscapeConfig::chunk_size`] states.
//! - [`Decomposition::from_transitions`]: A single non-recursive pass over the functional
//!   graph that assigns every state to the basin of the unique cycle it reaches.
//!
//! # Typical usage
//!
//! ```no_run
//! use biodivine_algo_landscape::landscape::{Horizon, Landscape};
//! use biodivine_algo_landscape::network::SynchronousBooleanNetwork;
//! use biodivine_lib_param_bn::BooleanNetwork;
//!
//! let bn = BooleanNetwork::try_from_file("model.aeon").unwrap();
//! let network = SynchronousBooleanNetwork::new(&bn).unwrap();
//!
//! // The transition table is computed eagerly (this step is cancellable).
//! let landscape = Landscape::new(&network).unwrap();
//!
//! // Attractors and basins are computed on first access.
//! for (attractor, size) in landscape.attractors().iter().zip(landscape.basin_sizes()) {
//!     println!("Attractor {:?} has a basin of {} states.", attractor, size);
//! }
//! println!("Basin entropy: {}", landscape.basin_entropy(2.0));
//!
//! let path = landscape.trajectory_encoded(0usize, Horizon::UntilRepeat).unwrap();
//! println!("Orbit of state 0: {:?}", path);
//! ```

mod decomposition;
mod landscape_config;
mod timeseries;
mod trajectory;
mod transition_table;

#[cfg(test)]
mod tests;

use crate::error::LandscapeResult;
use crate::network::Network;
use crate::state_space::StateSpace;
use crate::statistics::shannon_entropy;
use crate::{log_space, simple_type_name};
use computation_process::Incomplete::Suspended;
use computation_process::{Computation, ComputationStep, Incomplete};
pub use decomposition::{Decomposition, DecompositionData};
pub use landscape_config::{DEFAULT_CHUNK_SIZE, LandscapeConfig};
use log::info;
use std::sync::OnceLock;
pub use timeseries::{Timeseries, TimeseriesData};
pub use trajectory::{Horizon, InitialState, Trajectory, network_trajectory};
pub use transition_table::{TransitionState, TransitionStep};

/// Compute the table of encoded successors of every state of a network.
///
/// A [`Computation`] must own a `'static` context, so this is only available for owned
/// networks. [`Landscape::configure`] drives the same [`TransitionStep`] directly and also
/// accepts borrowed networks.
pub type TransitionTable<N> =
    Computation<LandscapeConfig<N>, TransitionState, Vec<usize>, TransitionStep<N>>;

/// The state space of a network together with its state transitions and (lazily)
/// its attractor/basin decomposition.
pub struct Landscape<N: Network> {
    config: LandscapeConfig<N>,
    transitions: Vec<usize>,
    decomposition: OnceLock<Decomposition>,
}

impl<N: Network> Landscape<N> {
    /// Build the landscape of a fixed-size network.
    pub fn new(network: N) -> LandscapeResult<Landscape<N>> {
        Landscape::configure(LandscapeConfig::new(network, None)?)
    }

    /// Build the landscape of a variable-sized network with `size` nodes.
    pub fn with_size(network: N, size: usize) -> LandscapeResult<Landscape<N>> {
        Landscape::configure(LandscapeConfig::new(network, Some(size))?)
    }

    /// Build the landscape described by a [`LandscapeConfig`].
    ///
    /// This evaluates the network update on every state. The computation can be cancelled
    /// using `cancel_this`, in which case [`crate::error::LandscapeError::Cancelled`] is
    /// returned.
    pub fn configure(config: LandscapeConfig<N>) -> LandscapeResult<Landscape<N>> {
        info!(
            "Start building landscape of {} ({}).",
            simple_type_name::<N>(),
            log_space(&config.space)
        );

        let mut state = TransitionState::from(&config.space);
        let transitions = loop {
            match TransitionStep::<N>::step(&config, &mut state) {
                Ok(table) => break table,
                Err(Suspended) => continue,
                Err(Incomplete::Cancelled(c)) => return Err(c.into()),
                Err(e) => unreachable!(
                    "Correctness violation: unexpected transition table result ({}).",
                    e
                ),
            }
        };

        Ok(Landscape {
            config,
            transitions,
            decomposition: OnceLock::new(),
        })
    }

    /// The configuration used to build this landscape.
    pub fn config(&self) -> &LandscapeConfig<N> {
        &self.config
    }

    /// The analysed network.
    pub fn network(&self) -> &N {
        &self.config.network
    }

    /// The state space of the analysed network.
    pub fn state_space(&self) -> &StateSpace {
        &self.config.space
    }

    /// The number of network nodes.
    pub fn size(&self) -> usize {
        self.config.space.ndim()
    }

    /// The number of states.
    pub fn volume(&self) -> usize {
        self.config.space.volume()
    }

    /// The encoded successor of every encoded state.
    pub fn transitions(&self) -> &[usize] {
        &self.transitions
    }

    /// Consume the landscape, returning its transition table.
    pub fn into_transitions(self) -> Vec<usize> {
        self.transitions
    }

    /// The edges `(state, successor)` of the state transition graph.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.transitions.iter().copied().enumerate()
    }

    /// True if the attractor/basin decomposition has been computed already.
    pub fn is_decomposed(&self) -> bool {
        self.decomposition.get().is_some()
    }

    /// The attractor/basin decomposition, computed on first access.
    pub fn decomposition(&self) -> &Decomposition {
        self.decomposition
            .get_or_init(|| Decomposition::from_transitions(&self.transitions))
    }

    /// Consume the landscape, returning its attractor/basin decomposition.
    pub fn into_decomposition(self) -> Decomposition {
        let transitions = self.transitions;
        self.decomposition
            .into_inner()
            .unwrap_or_else(|| Decomposition::from_transitions(&transitions))
    }

    /// The attractor cycles, in discovery order.
    pub fn attractors(&self) -> &[Vec<usize>] {
        self.decomposition().attractors()
    }

    /// The basin id of every state.
    pub fn basins(&self) -> &[usize] {
        self.decomposition().basins()
    }

    /// The number of attractors, which is also the number of basins.
    pub fn num_attractors(&self) -> usize {
        self.decomposition().num_attractors()
    }

    /// The number of states in each basin, indexed by basin id.
    pub fn basin_sizes(&self) -> Vec<usize> {
        self.decomposition().basin_sizes()
    }

    /// The number of states in each attractor, indexed by basin id.
    pub fn attractor_lengths(&self) -> Vec<usize> {
        self.decomposition().attractor_lengths()
    }

    /// The Shannon entropy of the basin size distribution with logarithm of the given `base`.
    ///
    /// See: P. Krawitz and I. Shmulevich, "Basin Entropy in Boolean Network Ensembles",
    /// Phys. Rev. Lett. 98, 158701 (2007).
    pub fn basin_entropy(&self, base: f64) -> f64 {
        shannon_entropy(&self.basin_sizes(), base)
    }

    /// Follow the transitions from `initial`. The trajectory uses the same state
    /// representation as `initial`.
    pub fn trajectory<'a, I: Into<InitialState<'a>>>(
        &self,
        initial: I,
        horizon: Horizon,
    ) -> LandscapeResult<Trajectory> {
        let initial = initial.into();
        let path = self.follow(initial, horizon)?;
        Trajectory::from_indices(path, self.state_space(), initial.is_encoded())
    }

    /// Same as [`Landscape::trajectory`], but always produces encoded states.
    pub fn trajectory_encoded<'a, I: Into<InitialState<'a>>>(
        &self,
        initial: I,
        horizon: Horizon,
    ) -> LandscapeResult<Vec<usize>> {
        self.follow(initial.into(), horizon)
    }

    /// Same as [`Landscape::trajectory`], but always produces decoded states.
    pub fn trajectory_decoded<'a, I: Into<InitialState<'a>>>(
        &self,
        initial: I,
        horizon: Horizon,
    ) -> LandscapeResult<Vec<Vec<usize>>> {
        let path = self.follow(initial.into(), horizon)?;
        Trajectory::Encoded(path).into_decoded(self.state_space())
    }

    /// For every state, the decoded states reached after `0..=timesteps` steps.
    pub fn timeseries(&self, timesteps: usize) -> LandscapeResult<Timeseries> {
        Timeseries::build(self.state_space(), &self.transitions, timesteps)
    }

    fn follow(&self, initial: InitialState<'_>, horizon: Horizon) -> LandscapeResult<Vec<usize>> {
        horizon.validate()?;
        let start = initial.resolve(self.state_space())?;
        Ok(trajectory::follow(start, horizon, |state| {
            self.transitions[state]
        }))
    }
}

/// The encoded successor of every state of `network`.
///
/// Shorthand for building a [`Landscape`] and taking its transition table.
pub fn transitions<N: Network>(
    network: N,
    size: Option<usize>,
) -> LandscapeResult<Vec<usize>> {
    Ok(Landscape::configure(LandscapeConfig::new(network, size)?)?.into_transitions())
}

/// The attractor cycles of `network`, in discovery order.
pub fn attractors<N: Network>(
    network: N,
    size: Option<usize>,
) -> LandscapeResult<Vec<Vec<usize>>> {
    let landscape = Landscape::configure(LandscapeConfig::new(network, size)?)?;
    Ok(landscape.into_decomposition().attractors().to_vec())
}

/// The basin id of every state of `network`.
pub fn basins<N: Network>(
    network: N,
    size: Option<usize>,
) -> LandscapeResult<Vec<usize>> {
    let landscape = Landscape::configure(LandscapeConfig::new(network, size)?)?;
    Ok(landscape.into_decomposition().basins().to_vec())
}

/// The basin entropy of `network` (see [`Landscape::basin_entropy`]).
pub fn basin_entropy<N: Network>(
    network: N,
    size: Option<usize>,
    base: f64,
) -> LandscapeResult<f64> {
    let landscape = Landscape::configure(LandscapeConfig::new(network, size)?)?;
    Ok(landscape.basin_entropy(base))
}
