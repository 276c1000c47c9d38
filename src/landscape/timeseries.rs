use crate::error::{LandscapeError, LandscapeResult};
use crate::state_space::StateSpace;

/// Decoded trajectories of fixed length starting from every state of a state space.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TimeseriesData", into = "TimeseriesData")
)]
pub struct Timeseries {
    ndim: usize,
    volume: usize,
    timesteps: usize,
    values: Vec<usize>,
}

/// The unvalidated fields of a [`Timeseries`]. The `values` are stored per initial
/// state, then per time step, then per node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeseriesData {
    pub ndim: usize,
    pub volume: usize,
    pub timesteps: usize,
    pub values: Vec<usize>,
}

impl From<Timeseries> for TimeseriesData {
    fn from(value: Timeseries) -> Self {
        TimeseriesData {
            ndim: value.ndim,
            volume: value.volume,
            timesteps: value.timesteps,
            values: value.values,
        }
    }
}

impl TryFrom<TimeseriesData> for Timeseries {
    type Error = LandscapeError;

    fn try_from(value: TimeseriesData) -> LandscapeResult<Self> {
        let expected = value
            .timesteps
            .checked_add(1)
            .and_then(|it| it.checked_mul(value.volume))
            .and_then(|it| it.checked_mul(value.ndim));
        if value.timesteps == 0 || expected != Some(value.values.len()) {
            return Err(LandscapeError::InvalidArgument(format!(
                "{} values do not form a timeseries of {} steps over {} states with {} nodes",
                value.values.len(),
                value.timesteps,
                value.volume,
                value.ndim
            )));
        }
        Ok(Timeseries {
            ndim: value.ndim,
            volume: value.volume,
            timesteps: value.timesteps,
            values: value.values,
        })
    }
}

impl Timeseries {
    pub(crate) fn build(
        space: &StateSpace,
        transitions: &[usize],
        timesteps: usize,
    ) -> LandscapeResult<Timeseries> {
        if timesteps == 0 {
            return Err(LandscapeError::InvalidArgument(
                "timeseries must have at least one timestep".to_string(),
            ));
        }

        let ndim = space.ndim();
        let volume = space.volume();
        let length = timesteps
            .checked_add(1)
            .and_then(|it| it.checked_mul(volume))
            .and_then(|it| it.checked_mul(ndim))
            .ok_or_else(|| {
                LandscapeError::InvalidArgument(format!(
                    "timeseries of {} steps over {} states is too large",
                    timesteps, volume
                ))
            })?;

        let mut values = vec![0; length];
        for (initial, series) in values.chunks_exact_mut((timesteps + 1) * ndim).enumerate() {
            let mut state = initial;
            for frame in series.chunks_exact_mut(ndim) {
                space.decode_unchecked(state, frame);
                state = transitions[state];
            }
        }

        Ok(Timeseries {
            ndim,
            volume,
            timesteps,
            values,
        })
    }

    /// The number of nodes.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// The number of initial states.
    pub fn volume(&self) -> usize {
        self.volume
    }

    /// The number of steps; every series has `timesteps + 1` entries.
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    /// The decoded state reached from `initial` after `time` steps.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not below the volume or `time` exceeds the timesteps.
    pub fn state_at(&self, initial: usize, time: usize) -> &[usize] {
        assert!(initial < self.volume && time <= self.timesteps);
        let offset = (initial * (self.timesteps + 1) + time) * self.ndim;
        &self.values[offset..offset + self.ndim]
    }

    /// The value of `node` at `time` in the series starting from `initial`.
    pub fn get(&self, node: usize, initial: usize, time: usize) -> usize {
        self.state_at(initial, time)[node]
    }
}
