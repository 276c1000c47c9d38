//! Explicit state spaces of finite discrete dynamical systems.
//!
//! A [`StateSpace`] describes `n` coordinates, where coordinate `i` takes values
//! from `0..bases[i]`. States are encoded into dense indices using a mixed-radix
//! representation where the *first* coordinate is the least significant "digit":
//!
//! ```text
//! encode(x) = x[0] + b[0] * (x[1] + b[1] * (x[2] + ...))
//! ```
//!
//! The enumeration order of [`StateSpace::iter`] is exactly the order of the encoded
//! indices, i.e. the `k`-th enumerated state is `decode(k)`.
//!
//! ```rust
//! use biodivine_algo_landscape::state_space::StateSpace;
//!
//! let space = StateSpace::new(vec![2, 3]).unwrap();
//! assert_eq!(space.volume(), 6);
//! assert_eq!(space.encode(&[1, 2]).unwrap(), 5);
//! assert_eq!(space.decode(3).unwrap(), vec![1, 1]);
//! ```

mod iterator;


use crate::error::{LandscapeError, LandscapeResult};
pub use iterator::StateIterator;

/// The state space of an `n`-dimensional system with per-dimension cardinalities ("bases").
///
/// With the `serde` feature, a state space is serialized as the list of its bases, and
/// deserialization is validated the same way as [`StateSpace::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct StateSpace {
    bases: Vec<usize>,
    volume: usize,
}

impl StateSpace {
    /// Create a new [`StateSpace`] with the given per-dimension bases.
    ///
    /// Fails with [`LandscapeError::InvalidArgument`] if there are no dimensions, if some
    /// base is zero, or if the volume does not fit into `usize`.
    pub fn new(bases: Vec<usize>) -> LandscapeResult<StateSpace> {
        if bases.is_empty() {
            return Err(LandscapeError::InvalidArgument(
                "state space must have at least one dimension".to_string(),
            ));
        }

        let mut volume: usize = 1;
        for (i, base) in bases.iter().enumerate() {
            if *base == 0 {
                return Err(LandscapeError::InvalidArgument(format!(
                    "base of dimension {} must be positive",
                    i
                )));
            }
            volume = volume.checked_mul(*base).ok_or_else(|| {
                LandscapeError::InvalidArgument(format!(
                    "volume of state space with bases {:?} exceeds addressable range",
                    bases
                ))
            })?;
        }

        Ok(StateSpace { bases, volume })
    }

    /// Create a new [`StateSpace`] with `ndim` dimensions that all share the same `base`.
    pub fn uniform(ndim: usize, base: usize) -> LandscapeResult<StateSpace> {
        StateSpace::new(vec![base; ndim])
    }

    /// The number of dimensions (network nodes).
    pub fn ndim(&self) -> usize {
        self.bases.len()
    }

    /// The cardinality of every dimension.
    pub fn bases(&self) -> &[usize] {
        &self.bases
    }

    /// The shared base of all dimensions, or `None` if the bases differ.
    pub fn base(&self) -> Option<usize> {
        let first = self.bases[0];
        if self.bases.iter().all(|b| *b == first) {
            Some(first)
        } else {
            None
        }
    }

    /// True if all dimensions share the same base.
    pub fn is_uniform(&self) -> bool {
        self.base().is_some()
    }

    /// The total number of states.
    pub fn volume(&self) -> usize {
        self.volume
    }

    /// True if `state` has the right dimension and every coordinate is below its base.
    pub fn contains(&self, state: &[usize]) -> bool {
        state.len() == self.bases.len() && state.iter().zip(&self.bases).all(|(x, b)| x < b)
    }

    /// True if `index` is a valid encoded state.
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.volume
    }

    /// Encode a state vector into its dense index.
    ///
    /// Fails with [`LandscapeError::OutOfRangeState`] if the vector has the wrong number
    /// of coordinates or if some coordinate lies outside `[0, base)`.
    pub fn encode(&self, state: &[usize]) -> LandscapeResult<usize> {
        if state.len() != self.bases.len() {
            return Err(LandscapeError::OutOfRangeState(format!(
                "state has {} coordinates, expected {}",
                state.len(),
                self.bases.len()
            )));
        }
        for (i, (x, b)) in state.iter().zip(&self.bases).enumerate() {
            if x >= b {
                return Err(LandscapeError::OutOfRangeState(format!(
                    "coordinate {} has value {}, expected value below {}",
                    i, x, b
                )));
            }
        }
        Ok(self.encode_unchecked(state))
    }

    /// Decode a dense index into a freshly allocated state vector.
    ///
    /// Fails with [`LandscapeError::OutOfRangeState`] if `index` is not below the volume.
    pub fn decode(&self, index: usize) -> LandscapeResult<Vec<usize>> {
        let mut state = vec![0; self.bases.len()];
        self.decode_into(index, &mut state)?;
        Ok(state)
    }

    /// Same as [`StateSpace::decode`], but writes the result into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` does not have exactly [`StateSpace::ndim`] elements.
    pub fn decode_into(&self, index: usize, buffer: &mut [usize]) -> LandscapeResult<()> {
        if !self.contains_index(index) {
            return Err(LandscapeError::OutOfRangeState(format!(
                "index {} is not below volume {}",
                index, self.volume
            )));
        }
        self.decode_unchecked(index, buffer);
        Ok(())
    }

    /// Enumerate all states in the order of their encoded indices.
    ///
    /// The returned iterator is lazy. Call this method again to restart the enumeration.
    pub fn iter(&self) -> StateIterator<'_> {
        StateIterator::new(self)
    }

    /// Encode without validating the input. The caller guarantees `self.contains(state)`.
    pub(crate) fn encode_unchecked(&self, state: &[usize]) -> usize {
        let mut index = 0;
        let mut weight = 1;
        for (x, b) in state.iter().zip(&self.bases) {
            index += x * weight;
            weight *= b;
        }
        index
    }

    /// Decode without validating the input. The caller guarantees `index < volume`.
    pub(crate) fn decode_unchecked(&self, mut index: usize, buffer: &mut [usize]) {
        debug_assert_eq!(buffer.len(), self.bases.len());
        for (x, b) in buffer.iter_mut().zip(&self.bases) {
            *x = index % b;
            index /= b;
        }
    }

    /// Move `state` to the state with the next encoded index.
    ///
    /// Returns `false` (and resets `state` to all zeros) if `state` was the last state.
    pub(crate) fn advance(&self, state: &mut [usize]) -> bool {
        for (x, b) in state.iter_mut().zip(&self.bases) {
            *x += 1;
            if *x < *b {
                return true;
            }
            *x = 0;
        }
        false
    }
}

impl TryFrom<Vec<usize>> for StateSpace {
    type Error = LandscapeError;

    fn try_from(value: Vec<usize>) -> LandscapeResult<Self> {
        StateSpace::new(value)
    }
}

impl From<StateSpace> for Vec<usize> {
    fn from(value: StateSpace) -> Self {
        value.bases
    }
}

impl<'a> IntoIterator for &'a StateSpace {
    type Item = Vec<usize>;
    type IntoIter = StateIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
