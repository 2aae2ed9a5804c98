//! Time-ordered queue of pending movements
//!
//! Movements are ordered by action time. Movements sharing a time come out
//! in submission order, so a run with the same inputs always processes them
//! the same way.

use crate::movement::Movement;
use crate::simulation::error::{PortError, PortResult};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Scheduled {
    sequence: u64,
    movement: Movement,
}

impl Scheduled {
    fn key(&self) -> (u64, u64) {
        (self.movement.time(), self.sequence)
    }
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap yields the earliest movement first
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Pending movements, earliest first
#[derive(Debug, Clone, Default)]
pub struct MovementQueue {
    heap: BinaryHeap<Scheduled>,
    next_sequence: u64,
}

impl MovementQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a movement; movements before `now` are rejected
    pub fn add(&mut self, movement: Movement, now: u64) -> PortResult<()> {
        if movement.time() < now {
            return Err(PortError::MovementInPast { time: movement.time(), now });
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Scheduled { sequence, movement });
        Ok(())
    }

    /// Action time of the earliest pending movement
    pub fn peek_time(&self) -> Option<u64> {
        self.heap.peek().map(|scheduled| scheduled.movement.time())
    }

    /// Remove the earliest movement if it is due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<Movement> {
        match self.peek_time() {
            Some(time) if time <= now => self.heap.pop().map(|scheduled| scheduled.movement),
            _ => None,
        }
    }

    /// Number of pending movements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending movements in processing order
    pub fn to_sorted_vec(&self) -> Vec<&Movement> {
        let mut scheduled: Vec<&Scheduled> = self.heap.iter().collect();
        scheduled.sort_by_key(|s| s.key());
        scheduled.into_iter().map(|s| &s.movement).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::Container;
    use crate::types::{ContainerType, MovementDirection};

    fn cargo_movement(time: u64, id: u32) -> Movement {
        Movement::cargo(
            time,
            MovementDirection::Inbound,
            vec![Container::new(id, "Peru", ContainerType::Standard).into()],
        )
    }

    fn first_id(movement: &Movement) -> u32 {
        match movement.kind() {
            crate::movement::MovementKind::Cargo(cargo) => cargo[0].id().0,
            crate::movement::MovementKind::Ship(_) => unreachable!(),
        }
    }

    #[test]
    fn test_orders_by_time() {
        let mut queue = MovementQueue::new();
        queue.add(cargo_movement(30, 1), 0).unwrap();
        queue.add(cargo_movement(10, 2), 0).unwrap();
        queue.add(cargo_movement(20, 3), 0).unwrap();

        assert_eq!(queue.peek_time(), Some(10));
        let times: Vec<_> = queue.to_sorted_vec().iter().map(|m| m.time()).collect();
        assert_eq!(times, vec![10, 20, 30]);
    }

    #[test]
    fn test_ties_in_submission_order() {
        let mut queue = MovementQueue::new();
        for id in 0..5 {
            queue.add(cargo_movement(7, id), 0).unwrap();
        }
        let ids: Vec<_> = std::iter::from_fn(|| queue.pop_due(7)).map(|m| first_id(&m)).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_rejects_past_movement() {
        let mut queue = MovementQueue::new();
        let err = queue.add(cargo_movement(4, 1), 5).unwrap_err();
        assert_eq!(err, PortError::MovementInPast { time: 4, now: 5 });
        assert!(queue.is_empty());

        queue.add(cargo_movement(5, 1), 5).unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_pop_due_leaves_future_movements() {
        let mut queue = MovementQueue::new();
        queue.add(cargo_movement(3, 1), 0).unwrap();
        queue.add(cargo_movement(8, 2), 0).unwrap();

        assert!(queue.pop_due(2).is_none());
        assert_eq!(queue.pop_due(3).map(|m| m.time()), Some(3));
        assert!(queue.pop_due(3).is_none());
        assert_eq!(queue.len(), 1);
    }
}
