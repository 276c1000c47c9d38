use crate::state_space::StateSpace;

/// Lazy enumeration of all states of a [`StateSpace`] in encoded-index order.
pub struct StateIterator<'a> {
    space: &'a StateSpace,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl<'a> StateIterator<'a> {
    pub(crate) fn new(space: &'a StateSpace) -> StateIterator<'a> {
        StateIterator {
            next: Some(vec![0; space.ndim()]),
            remaining: space.volume(),
            space,
        }
    }
}

impl Iterator for StateIterator<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if self.space.advance(&mut successor) {
            self.next = Some(successor);
        }
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StateIterator<'_> {}
