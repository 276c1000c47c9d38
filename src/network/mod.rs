//! The capability a dynamical network must provide to be analysed.
//!
//! The analysis treats every network as an opaque deterministic update rule. The
//! only other thing it needs to know is the shape of the state space, which is
//! either fixed by the network itself (e.g. a Boolean network with named variables),
//! or chosen by the caller (e.g. an elementary cellular automaton of any width).
//! This distinction is expressed by [`Sizing`] and resolved once, when a
//! [`crate::landscape::LandscapeConfig`] is created.

mod boolean;


use crate::error::{LandscapeError, LandscapeResult};
use crate::state_space::StateSpace;
pub use boolean::SynchronousBooleanNetwork;

/// A deterministic, synchronously updated network over a finite state space.
pub trait Network {
    /// Declare whether the network acts on one fixed state space or on a family
    /// of uniform state spaces parametrized by size.
    fn sizing(&self) -> Sizing;

    /// Compute the successor of `state`, writing it into `successor`.
    ///
    /// Both slices have the same length. The result must only depend on `state`:
    /// determinism is assumed by every algorithm in this crate and is never verified.
    fn update(&self, state: &[usize], successor: &mut [usize]);
}

impl<N: Network + ?Sized> Network for &N {
    fn sizing(&self) -> Sizing {
        (**self).sizing()
    }

    fn update(&self, state: &[usize], successor: &mut [usize]) {
        (**self).update(state, successor)
    }
}

/// The shape of the state space a [`Network`] acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sizing {
    /// The network always acts on this state space.
    Fixed(StateSpace),
    /// The network acts on any number of nodes, each with the given base.
    Variable { base: usize },
}

impl Sizing {
    /// Resolve the state space for an optional explicit `size`.
    ///
    /// A size must be given for [`Sizing::Variable`] and must be omitted for
    /// [`Sizing::Fixed`]. Otherwise, the call fails with [`LandscapeError::InvalidArgument`].
    pub fn state_space(&self, size: Option<usize>) -> LandscapeResult<StateSpace> {
        match (self, size) {
            (Sizing::Fixed(space), None) => Ok(space.clone()),
            (Sizing::Fixed(space), Some(size)) => Err(LandscapeError::InvalidArgument(format!(
                "size {} given for a fixed-size network with {} nodes",
                size,
                space.ndim()
            ))),
            (Sizing::Variable { base }, Some(size)) => StateSpace::uniform(size, *base),
            (Sizing::Variable { .. }, None) => Err(LandscapeError::InvalidArgument(
                "variable-sized network requires an explicit size".to_string(),
            )),
        }
    }

    /// True if the state space is fixed by the network.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Sizing::Fixed(_))
    }
}
