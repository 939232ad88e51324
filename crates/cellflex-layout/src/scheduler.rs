// ABOUTME: Single-threaded cooperative scheduler for deferred resize checks.
// ABOUTME: Coalesces checks per widget per tick and defines the SizeChanged message.

use std::collections::{HashSet, VecDeque};

use crate::WidgetId;

/// Dispatched to a widget whose client size differs from the last check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChanged {
    pub target: WidgetId,
    pub width_changed: bool,
    pub height_changed: bool,
}

/// Queue of resize checks to run on the next tick.
///
/// A widget has at most one pending check; scheduling it again before the
/// tick runs is a no-op.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<WidgetId>,
    pending: HashSet<WidgetId>,
    ticks: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a check for `id`. Returns false if one is already pending.
    pub fn schedule_check(&mut self, id: WidgetId) -> bool {
        if !self.pending.insert(id) {
            return false;
        }
        self.queue.push_back(id);
        true
    }

    /// Take the checks queued for this tick. Anything scheduled while they
    /// run lands in the next tick.
    pub fn take_tick(&mut self) -> Vec<WidgetId> {
        let batch: Vec<WidgetId> = self.queue.drain(..).collect();
        for id in &batch {
            self.pending.remove(id);
        }
        if !batch.is_empty() {
            self.ticks += 1;
        }
        batch
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_pending(&self, id: WidgetId) -> bool {
        self.pending.contains(&id)
    }

    /// Number of non-empty ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_coalesce_within_a_tick() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.schedule_check(WidgetId(1)));
        assert!(!scheduler.schedule_check(WidgetId(1)));
        assert!(scheduler.schedule_check(WidgetId(2)));
        assert_eq!(scheduler.take_tick(), vec![WidgetId(1), WidgetId(2)]);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn rescheduling_after_a_tick_is_allowed() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_check(WidgetId(3));
        scheduler.take_tick();
        assert!(!scheduler.is_pending(WidgetId(3)));
        assert!(scheduler.schedule_check(WidgetId(3)));
        assert_eq!(scheduler.take_tick(), vec![WidgetId(3)]);
    }

    #[test]
    fn empty_tick_is_not_counted() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.take_tick().is_empty());
        assert_eq!(scheduler.ticks(), 0);
    }
}
