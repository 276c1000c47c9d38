use crate::error::{LandscapeError, LandscapeResult};
use log::{debug, info, trace};

const UNASSIGNED: usize = usize::MAX;

/// The partition of a functional graph into attractor cycles and their basins.
///
/// Basin ids are dense: basin `k` is the basin of `attractors()[k]`. Attractors
/// are stored in discovery order, and every cycle starts with the state at which it was
/// first closed, continuing along the transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DecompositionData", into = "DecompositionData")
)]
pub struct Decomposition {
    basins: Vec<usize>,
    attractors: Vec<Vec<usize>>,
}

/// The unvalidated fields of a [`Decomposition`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionData {
    pub basins: Vec<usize>,
    pub attractors: Vec<Vec<usize>>,
}

impl From<Decomposition> for DecompositionData {
    fn from(value: Decomposition) -> Self {
        DecompositionData {
            basins: value.basins,
            attractors: value.attractors,
        }
    }
}

impl TryFrom<DecompositionData> for Decomposition {
    type Error = LandscapeError;

    /// Check that basin ids are dense and that every attractor is a non-empty set of
    /// distinct states assigned to its own basin.
    ///
    /// Whether the attractors are actually cycles cannot be checked without transitions.
    fn try_from(value: DecompositionData) -> LandscapeResult<Self> {
        let DecompositionData { basins, attractors } = value;
        if let Some(state) = basins.iter().position(|it| *it >= attractors.len()) {
            return Err(LandscapeError::InvalidArgument(format!(
                "state {} is in basin {}, but there are only {} attractors",
                state,
                basins[state],
                attractors.len()
            )));
        }

        let mut on_cycle = vec![false; basins.len()];
        for (id, cycle) in attractors.iter().enumerate() {
            if cycle.is_empty() {
                return Err(LandscapeError::InvalidArgument(format!(
                    "attractor {} is empty",
                    id
                )));
            }
            for state in cycle {
                if basins.get(*state) != Some(&id) || on_cycle[*state] {
                    return Err(LandscapeError::InvalidArgument(format!(
                        "state {} of attractor {} is not a distinct state of basin {}",
                        state, id, id
                    )));
                }
                on_cycle[*state] = true;
            }
        }

        Ok(Decomposition { basins, attractors })
    }
}

impl Decomposition {
    /// Decompose the functional graph `i -> transitions[i]` in a single linear pass.
    ///
    /// States are scanned in index order. From every state that was not visited yet, the
    /// successors are followed (and pushed onto an explicit path) until a visited state is
    /// reached. If that state has no basin yet, it lies on the current path and the path
    /// has just closed a new cycle. Otherwise, the path merges into an already completed
    /// basin. Either way, the whole path is then assigned one basin id.
    ///
    /// Every state is pushed and popped exactly once. Apart from this, only the newly
    /// discovered cycles are walked again, so the total work is `O(volume)`.
    ///
    /// # Panics
    ///
    /// Panics if some `transitions[i]` is not a valid index into `transitions`.
    pub fn from_transitions(transitions: &[usize]) -> Decomposition {
        let volume = transitions.len();
        info!("Start attractor decomposition of {} states.", volume);

        let mut visited = vec![false; volume];
        let mut basins = vec![UNASSIGNED; volume];
        let mut attractors: Vec<Vec<usize>> = Vec::new();
        let mut path: Vec<usize> = Vec::new();

        let mut start = 0;
        while start < volume {
            visited[start] = true;
            path.push(start);
            let mut terminus = transitions[start];
            while !visited[terminus] {
                visited[terminus] = true;
                path.push(terminus);
                terminus = transitions[terminus];
            }

            let basin = if basins[terminus] == UNASSIGNED {
                // An unassigned visited state can only be on the current path.
                let mut cycle = vec![terminus];
                let mut state = transitions[terminus];
                while state != terminus {
                    cycle.push(state);
                    state = transitions[state];
                }
                trace!(
                    "Attractor #{} of length {} closed at state {} (path length {}).",
                    attractors.len(),
                    cycle.len(),
                    terminus,
                    path.len()
                );
                attractors.push(cycle);
                attractors.len() - 1
            } else {
                basins[terminus]
            };

            while let Some(state) = path.pop() {
                basins[state] = basin;
            }

            while start < volume && visited[start] {
                start += 1;
            }
        }

        debug!(
            "Decomposition of {} states finished with {} attractors.",
            volume,
            attractors.len()
        );

        Decomposition { basins, attractors }
    }

    /// The basin id of every state.
    pub fn basins(&self) -> &[usize] {
        &self.basins
    }

    /// The attractor cycles, in discovery order.
    pub fn attractors(&self) -> &[Vec<usize>] {
        &self.attractors
    }

    /// The number of attractors (which is also the number of basins).
    pub fn num_attractors(&self) -> usize {
        self.attractors.len()
    }

    /// The basin id of a single state, or `None` if the state does not exist.
    pub fn basin_of(&self, state: usize) -> Option<usize> {
        self.basins.get(state).copied()
    }

    /// The number of states in each basin, indexed by basin id.
    pub fn basin_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.attractors.len()];
        for basin in &self.basins {
            sizes[*basin] += 1;
        }
        sizes
    }

    /// The number of states in each attractor cycle, indexed by basin id.
    pub fn attractor_lengths(&self) -> Vec<usize> {
        self.attractors.iter().map(|it| it.len()).collect()
    }
}
