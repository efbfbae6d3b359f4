//! Deferred, cancellable controller actions.
//!
//! Delayed user-visible transitions (the pause before announcing a winner)
//! are queued here instead of being fired from UI timers. Each task is
//! stamped with the game generation that queued it; starting a new game
//! cancels everything still queued.

use std::time::Instant;

use crate::state::GameResult;

/// Work the controller can defer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    AnnounceResult(GameResult),
}

#[derive(Clone, Debug)]
struct ScheduledTask {
    seq: u64,
    due: Instant,
    generation: u64,
    action: DeferredAction,
}

/// Queue of deferred actions ordered by due time.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire at `due`.
    pub fn schedule(&mut self, due: Instant, generation: u64, action: DeferredAction) {
        self.tasks.push(ScheduledTask {
            seq: self.next_seq,
            due,
            generation,
            action,
        });
        self.next_seq += 1;
    }

    /// Drop every queued task.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Remove and return every task due at `now`, earliest first, with the
    /// generation that queued it.
    pub fn take_due(&mut self, now: Instant) -> Vec<(u64, DeferredAction)> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = waiting;
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| (t.generation, t.action)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const ANNOUNCE: DeferredAction = DeferredAction::AnnounceResult(GameResult::BlueWins);

    #[test]
    fn test_take_due() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(now + Duration::from_secs(5), 1, ANNOUNCE);
        scheduler.schedule(now, 2, DeferredAction::AnnounceResult(GameResult::RedWins));

        let fired = scheduler.take_due(now);
        assert_eq!(
            fired,
            vec![(2, DeferredAction::AnnounceResult(GameResult::RedWins))]
        );
        assert_eq!(scheduler.pending(), 1);

        let fired = scheduler.take_due(now + Duration::from_secs(10));
        assert_eq!(fired, vec![(1, ANNOUNCE)]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_same_due_keeps_queue_order() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(now, 1, ANNOUNCE);
        scheduler.schedule(now, 2, ANNOUNCE);

        let generations: Vec<u64> = scheduler.take_due(now).into_iter().map(|(g, _)| g).collect();
        assert_eq!(generations, vec![1, 2]);
    }

    #[test]
    fn test_cancel_all() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(now, 1, ANNOUNCE);
        scheduler.schedule(now, 1, ANNOUNCE);

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.take_due(now).is_empty());
    }
}
