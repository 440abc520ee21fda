use std::collections::VecDeque;

use crate::containers::HashSet;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagatorId;

/// The propagators which are scheduled to run, one FIFO queue per [`Priority`].
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: [VecDeque<PropagatorId>; Priority::NUM_PRIORITIES],
    present_propagators: HashSet<PropagatorId>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        PropagatorQueue {
            queues: std::array::from_fn(|_| VecDeque::new()),
            present_propagators: HashSet::default(),
        }
    }
}

impl PropagatorQueue {
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.present_propagators.is_empty()
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: Priority) {
        if self.present_propagators.insert(propagator_id) {
            self.queues[priority as usize].push_back(propagator_id);
        }
    }

    /// Removes the propagator with the highest priority which was enqueued first.
    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let next_propagator_id = self
            .queues
            .iter_mut()
            .find_map(|queue| queue.pop_front())?;

        let _ = self.present_propagators.remove(&next_propagator_id);

        Some(next_propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
        self.present_propagators.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_priorities_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(0), Priority::Low);
        queue.enqueue_propagator(PropagatorId(1), Priority::High);
        queue.enqueue_propagator(PropagatorId(2), Priority::Low);

        assert_eq!(queue.pop(), Some(PropagatorId(1)));
        assert_eq!(queue.pop(), Some(PropagatorId(0)));
        assert_eq!(queue.pop(), Some(PropagatorId(2)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn a_propagator_is_enqueued_once() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(3), Priority::Medium);
        queue.enqueue_propagator(PropagatorId(3), Priority::Medium);

        assert_eq!(queue.pop(), Some(PropagatorId(3)));
        assert!(queue.is_empty());
    }
}
