use crate::error::{LandscapeError, LandscapeResult};
use crate::network::{Network, Sizing};
use crate::state_space::StateSpace;
use log::debug;
use std::collections::HashSet;

/// How long a trajectory should be followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Horizon {
    /// Apply the update exactly this many times, producing `steps + 1` states.
    /// Zero steps are rejected.
    Steps(usize),
    /// Stop right before the first state that was already produced. On a finite
    /// deterministic system, this happens after at most `volume` steps.
    UntilRepeat,
}

/// The first state of a trajectory, either already encoded or as a state vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitialState<'a> {
    /// An index into the state space.
    Encoded(usize),
    /// A state vector with one value per node.
    Decoded(&'a [usize]),
}

/// A materialized trajectory in one of the two state representations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trajectory {
    /// The visited states as indices into the state space.
    Encoded(Vec<usize>),
    /// The visited states as state vectors.
    Decoded(Vec<Vec<usize>>),
}

impl From<usize> for InitialState<'_> {
    fn from(value: usize) -> Self {
        InitialState::Encoded(value)
    }
}

impl<'a> From<&'a [usize]> for InitialState<'a> {
    fn from(value: &'a [usize]) -> Self {
        InitialState::Decoded(value)
    }
}

impl<'a> From<&'a Vec<usize>> for InitialState<'a> {
    fn from(value: &'a Vec<usize>) -> Self {
        InitialState::Decoded(value.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [usize; N]> for InitialState<'a> {
    fn from(value: &'a [usize; N]) -> Self {
        InitialState::Decoded(value.as_slice())
    }
}

impl InitialState<'_> {
    /// True if the state is given as an encoded index.
    pub fn is_encoded(&self) -> bool {
        matches!(self, InitialState::Encoded(_))
    }

    /// Encode this state in the given `space`.
    pub fn resolve(&self, space: &StateSpace) -> LandscapeResult<usize> {
        match self {
            InitialState::Encoded(index) => {
                if space.contains_index(*index) {
                    Ok(*index)
                } else {
                    Err(LandscapeError::OutOfRangeState(format!(
                        "index {} is not below volume {}",
                        index,
                        space.volume()
                    )))
                }
            }
            InitialState::Decoded(state) => {
                if state.is_empty() {
                    return Err(LandscapeError::InvalidArgument(
                        "initial state cannot be empty".to_string(),
                    ));
                }
                space.encode(state)
            }
        }
    }
}

impl Horizon {
    /// Fails with [`LandscapeError::InvalidArgument`] for `Steps(0)`.
    pub fn validate(&self) -> LandscapeResult<()> {
        if let Horizon::Steps(0) = self {
            Err(LandscapeError::InvalidArgument(
                "number of steps must be positive".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl Trajectory {
    /// The number of states in this trajectory.
    pub fn len(&self) -> usize {
        match self {
            Trajectory::Encoded(states) => states.len(),
            Trajectory::Decoded(states) => states.len(),
        }
    }

    /// True if the trajectory has no states. Trajectories produced by this crate always
    /// contain at least the initial state.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode (if necessary) every state of this trajectory.
    pub fn into_encoded(self, space: &StateSpace) -> LandscapeResult<Vec<usize>> {
        match self {
            Trajectory::Encoded(states) => Ok(states),
            Trajectory::Decoded(states) => states.iter().map(|it| space.encode(it)).collect(),
        }
    }

    /// Decode (if necessary) every state of this trajectory.
    pub fn into_decoded(self, space: &StateSpace) -> LandscapeResult<Vec<Vec<usize>>> {
        match self {
            Trajectory::Encoded(states) => states.iter().map(|it| space.decode(*it)).collect(),
            Trajectory::Decoded(states) => Ok(states),
        }
    }

    /// Build a trajectory from encoded states, decoding them if `encoded` is false.
    pub(crate) fn from_indices(
        indices: Vec<usize>,
        space: &StateSpace,
        encoded: bool,
    ) -> LandscapeResult<Trajectory> {
        if encoded {
            Ok(Trajectory::Encoded(indices))
        } else {
            Trajectory::Encoded(indices)
                .into_decoded(space)
                .map(Trajectory::Decoded)
        }
    }
}

/// Follow `successor` from `initial` for the given (already validated) `horizon`.
pub(crate) fn follow<F: FnMut(usize) -> usize>(
    initial: usize,
    horizon: Horizon,
    mut successor: F,
) -> Vec<usize> {
    let mut current = initial;
    let mut path = vec![initial];
    match horizon {
        Horizon::Steps(steps) => {
            for _ in 0..steps {
                current = successor(current);
                path.push(current);
            }
        }
        Horizon::UntilRepeat => {
            let mut seen = HashSet::from([initial]);
            loop {
                current = successor(current);
                if !seen.insert(current) {
                    break;
                }
                path.push(current);
            }
        }
    }
    path
}

/// Compute a trajectory by repeatedly applying the network update, without building
/// the transition table of the whole state space.
///
/// A variable-sized network is sized by the length of the initial state, which
/// therefore must be given as a state vector. The output uses the same representation
/// as `initial`.
pub fn network_trajectory<'a, N: Network, I: Into<InitialState<'a>>>(
    network: &N,
    initial: I,
    horizon: Horizon,
) -> LandscapeResult<Trajectory> {
    let initial = initial.into();
    horizon.validate()?;

    let space = match (network.sizing(), initial) {
        (Sizing::Fixed(space), _) => space,
        (Sizing::Variable { .. }, InitialState::Decoded([])) => {
            return Err(LandscapeError::InvalidArgument(
                "initial state cannot be empty".to_string(),
            ));
        }
        (Sizing::Variable { base }, InitialState::Decoded(state)) => {
            StateSpace::uniform(state.len(), base)?
        }
        (Sizing::Variable { .. }, InitialState::Encoded(_)) => {
            return Err(LandscapeError::InvalidArgument(
                "variable-sized network requires a decoded initial state".to_string(),
            ));
        }
    };

    let start = initial.resolve(&space)?;
    let mut current = vec![0; space.ndim()];
    let mut next = vec![0; space.ndim()];
    let path = follow(start, horizon, |index| {
        space.decode_unchecked(index, &mut current);
        network.update(&current, &mut next);
        space
            .encode(&next)
            .expect("Correctness violation: Network successor must lie in the state space.")
    });

    debug!(
        "Network trajectory from {} has {} states ({:?}).",
        start,
        path.len(),
        horizon
    );

    Trajectory::from_indices(path, &space, initial.is_encoded())
}
