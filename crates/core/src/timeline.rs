use std::time::Duration;

/// A one-shot task tagged with the session generation that scheduled it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<T> {
    pub due: Duration,
    pub generation: u64,
    pub task: T,
    seq: u64,
}

/// Virtual clock plus pending one-shot timers.
///
/// Time only moves when the owner calls [`Timeline::pop_due`] or
/// [`Timeline::advance_clock`], so tests can step through delays instantly
/// and a real front end can feed it wall-clock time.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn after(&mut self, delay: Duration, generation: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due: self.now + delay,
            generation,
            task,
            seq,
        });
    }

    /// Removes the earliest task due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<Scheduled<T>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, item)| item.due <= until)
            .min_by_key(|(_, item)| (item.due, item.seq))
            .map(|(idx, _)| idx)?;
        let item = self.pending.swap_remove(idx);
        self.now = self.now.max(item.due);
        Some(item)
    }

    /// Moves the clock forward; it never goes backwards.
    pub fn advance_clock(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|item| item.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn tasks_fire_in_due_order_then_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.after(ms(50), 1, "late");
        timeline.after(ms(10), 1, "early");
        timeline.after(ms(10), 1, "early-second");
        let mut fired = Vec::new();
        while let Some(item) = timeline.pop_due(ms(100)) {
            fired.push(item.task);
        }
        assert_eq!(fired, vec!["early", "early-second", "late"]);
        assert_eq!(timeline.now(), ms(50));
    }

    #[test]
    fn nothing_fires_before_its_time() {
        let mut timeline = Timeline::new();
        timeline.after(ms(680), 3, ());
        assert!(timeline.pop_due(ms(679)).is_none());
        assert_eq!(timeline.next_due(), Some(ms(680)));
        let item = timeline.pop_due(ms(680)).expect("due");
        assert_eq!(item.generation, 3);
        assert!(timeline.is_empty());
    }

    #[test]
    fn delays_are_relative_to_the_clock() {
        let mut timeline = Timeline::new();
        timeline.advance_clock(ms(1_000));
        timeline.advance_clock(ms(500));
        assert_eq!(timeline.now(), ms(1_000));
        timeline.after(ms(650), 1, ());
        assert_eq!(timeline.next_due(), Some(ms(1_650)));
    }
}
