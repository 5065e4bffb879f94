//! Deterministic timers. Nothing here sleeps: the host asks the scheduler
//! for due work with the current time, which makes every timer testable with
//! a [`ManualClock`].

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: u64,
    due: DateTime<Utc>,
    period: Option<Duration>,
    payload: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    pub fn schedule_at(&mut self, due: DateTime<Utc>, payload: T) -> TaskHandle {
        self.push(due, None, payload)
    }

    pub fn schedule_after(&mut self, now: DateTime<Utc>, delay: Duration, payload: T) -> TaskHandle {
        self.push(now + delay, None, payload)
    }

    /// Recurring task, first due one `period` after `now`. Periods shorter
    /// than a millisecond are raised to one millisecond.
    pub fn schedule_every(&mut self, now: DateTime<Utc>, period: Duration, payload: T) -> TaskHandle {
        let period = period.max(Duration::milliseconds(1));
        self.push(now + period, Some(period), payload)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != handle.0);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.id == handle.0)
    }

    /// Returns the payloads of every task due at `now`, earliest first.
    /// One-shot tasks are removed; recurring tasks fire once and are re-armed
    /// at their next period boundary after `now`, skipping missed ticks.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<T> {
        let mut due: Vec<(DateTime<Utc>, u64, T)> = self
            .tasks
            .iter()
            .filter(|task| task.due <= now)
            .map(|task| (task.due, task.id, task.payload.clone()))
            .collect();
        due.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        self.tasks.retain(|task| task.due > now || task.period.is_some());
        for task in self.tasks.iter_mut() {
            if let Some(period) = task.period {
                if task.due <= now {
                    task.due = next_boundary(task.due, period, now);
                }
            }
        }

        due.into_iter().map(|(_, _, payload)| payload).collect()
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.tasks.iter().map(|task| task.due).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn push(&mut self, due: DateTime<Utc>, period: Option<Duration>, payload: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due,
            period,
            payload,
        });
        TaskHandle(id)
    }
}

/// First `due + k × period` (k ≥ 1) strictly after `now`.
fn next_boundary(due: DateTime<Utc>, period: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
    match ((now - due).num_nanoseconds(), period.num_nanoseconds()) {
        (Some(behind), Some(step)) if step > 0 => {
            let missed = behind / step + 1;
            due + Duration::nanoseconds(missed.saturating_mul(step))
        }
        _ => now + period,
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Coalesces bursts of events into one firing `wait` after the last event.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now + self.wait);
    }

    /// True exactly once per burst, when the quiet period has elapsed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start() + Duration::minutes(5));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(start(), Duration::milliseconds(100), "recalc");

        assert!(scheduler.poll(start() + Duration::milliseconds(99)).is_empty());
        assert_eq!(scheduler.poll(start() + Duration::milliseconds(100)), vec!["recalc"]);
        assert!(scheduler.poll(start() + Duration::seconds(10)).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_recurring_task_rearms() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_every(start(), Duration::seconds(60), "countdown");

        assert!(scheduler.poll(start() + Duration::seconds(59)).is_empty());
        assert_eq!(scheduler.poll(start() + Duration::seconds(60)), vec!["countdown"]);
        assert_eq!(scheduler.next_due(), Some(start() + Duration::seconds(120)));

        // A long gap fires once and skips the missed ticks.
        assert_eq!(scheduler.poll(start() + Duration::seconds(400)), vec!["countdown"]);
        assert_eq!(scheduler.next_due(), Some(start() + Duration::seconds(420)));
        assert!(scheduler.is_pending(handle));
    }

    #[test]
    fn test_recurring_task_catches_up_after_long_sleep() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(start(), Duration::zero(), "tick");

        let later = start() + Duration::days(30);
        assert_eq!(scheduler.poll(later), vec!["tick"]);
        assert_eq!(scheduler.next_due(), Some(later + Duration::milliseconds(1)));

        // Landing exactly on a boundary moves to the next one.
        let boundary = later + Duration::milliseconds(1);
        assert_eq!(scheduler.poll(boundary), vec!["tick"]);
        assert_eq!(scheduler.next_due(), Some(boundary + Duration::milliseconds(1)));
    }

    #[test]
    fn test_cancel_removes_task() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_every(start(), Duration::hours(1), 1);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.poll(start() + Duration::hours(5)).is_empty());
    }

    #[test]
    fn test_due_tasks_come_back_in_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(start() + Duration::seconds(3), 'c');
        scheduler.schedule_at(start() + Duration::seconds(1), 'a');
        scheduler.schedule_at(start() + Duration::seconds(2), 'b');

        assert_eq!(scheduler.poll(start() + Duration::seconds(5)), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_debouncer_coalesces_bursts() {
        let mut debouncer = Debouncer::new(Duration::milliseconds(100));
        debouncer.trigger(start());
        debouncer.trigger(start() + Duration::milliseconds(50));
        debouncer.trigger(start() + Duration::milliseconds(90));

        assert!(!debouncer.poll(start() + Duration::milliseconds(150)));
        assert!(debouncer.poll(start() + Duration::milliseconds(190)));
        assert!(!debouncer.poll(start() + Duration::milliseconds(300)));
        assert!(!debouncer.is_armed());
    }
}
