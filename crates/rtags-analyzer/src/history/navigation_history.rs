use std::collections::{VecDeque, vec_deque};

use tracing::trace;

use super::Location;

/// Number of jumps remembered when no `navigation.jumpLimit` is configured.
pub const DEFAULT_JUMP_LIMIT: usize = 10;

/// Bounded stack of the locations jumps navigated away from.
///
/// Pushes and pops happen at the top. When a push would exceed the capacity,
/// the oldest entry is dropped from the bottom, so the stack always holds the
/// most recent `capacity` jumps.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: VecDeque<Location>,
    capacity: usize,
}

impl NavigationHistory {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a pre-jump location, evicting the oldest entry when full.
    pub fn push(
        &mut self,
        location: Location,
    ) {
        if self.entries.len() == self.capacity
            && let Some(evicted) = self.entries.pop_front()
        {
            trace!("jump history full, evicting {evicted}");
        }
        self.entries.push_back(location);
    }

    /// Remove and return the most recent location, or `None` when there is
    /// nowhere to go back to.
    pub fn pop(&mut self) -> Option<Location> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn peek(&self) -> Option<&Location> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to most recent.
    pub fn iter(&self) -> vec_deque::Iter<'_, Location> {
        self.entries.iter()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_LIMIT)
    }
}

#[cfg(test)]
#[path = "../../tests/src/history/navigation_history_tests.rs"]
mod tests;
