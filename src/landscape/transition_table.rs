use crate::landscape::LandscapeConfig;
use crate::network::Network;
use crate::state_space::StateSpace;
use crate::{log_space, simple_type_name};
use cancel_this::is_cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, info};
use std::marker::PhantomData;

/// Partial transition table: successors of the states `0..table.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionState {
    table: Vec<usize>,
}

impl TransitionState {
    /// The number of states whose successor is already known.
    pub fn progress(&self) -> usize {
        self.table.len()
    }
}

impl From<&StateSpace> for TransitionState {
    fn from(value: &StateSpace) -> Self {
        TransitionState {
            table: Vec::with_capacity(value.volume()),
        }
    }
}

impl From<TransitionState> for Vec<usize> {
    fn from(value: TransitionState) -> Self {
        value.table
    }
}

/// Evaluates the network update on the next `chunk_size` states of the enumeration and
/// records their encoded successors. The computation is done once all states are evaluated.
pub struct TransitionStep<N>(PhantomData<N>);

impl<N: Network> ComputationStep<LandscapeConfig<N>, TransitionState, Vec<usize>>
    for TransitionStep<N>
{
    fn step(context: &LandscapeConfig<N>, state: &mut TransitionState) -> Completable<Vec<usize>> {
        is_cancelled!()?;

        let space = &context.space;
        let volume = space.volume();
        let start = state.table.len();
        let end = volume.min(start.saturating_add(context.chunk_size.max(1)));

        if start < end {
            let mut current = vec![0; space.ndim()];
            let mut successor = vec![0; space.ndim()];
            space.decode_unchecked(start, &mut current);
            for _ in start..end {
                context.network.update(&current, &mut successor);
                let index = space
                    .encode(&successor)
                    .expect("Correctness violation: Network successor must lie in the state space.");
                state.table.push(index);
                space.advance(&mut current);
            }

            debug!(
                "[{}/{}] Transitions<{}> evaluated states {}..{}.",
                end,
                volume,
                simple_type_name::<N>(),
                start,
                end
            );
        }

        if state.table.len() == volume {
            info!(
                "Transitions<{}> finished ({}).",
                simple_type_name::<N>(),
                log_space(space)
            );
            Ok(std::mem::take(&mut state.table))
        } else {
            Err(Suspended)
        }
    }
}
