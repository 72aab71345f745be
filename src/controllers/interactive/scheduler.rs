use std::time::{Duration, Instant};

/// Tick cadence as a pure state machine over caller-supplied instants.
///
/// The first tick after `start` is due one interval later, and each tick
/// schedules the next one interval after the poll that fired it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickScheduler {
    interval: Duration,
    next_tick: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    Tick,
    Wait(Duration),
    Stopped,
}

impl TickScheduler {
    /// A stopped scheduler.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    /// Stops the cadence and restarts it from `now` with the new interval.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.stop();
        self.interval = interval;
        self.start(now);
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> TickDecision {
        let Some(next_tick) = self.next_tick else {
            return TickDecision::Stopped;
        };

        if now < next_tick {
            return TickDecision::Wait(next_tick - now);
        }

        self.next_tick = Some(now + self.interval);
        TickDecision::Tick
    }
}

#[cfg(test)]
mod tests {
    use super::{TickDecision, TickScheduler};
    use std::time::{Duration, Instant};

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn new_scheduler_is_stopped() {
        let mut scheduler = TickScheduler::new(20 * MS);

        assert!(!scheduler.is_running());
        assert_eq!(scheduler.poll(Instant::now()), TickDecision::Stopped);
    }

    #[test]
    fn first_tick_is_one_interval_after_start() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(20 * MS);
        scheduler.start(t0);

        assert_eq!(scheduler.poll(t0), TickDecision::Wait(20 * MS));
        assert_eq!(scheduler.poll(t0 + 5 * MS), TickDecision::Wait(15 * MS));
        assert_eq!(scheduler.poll(t0 + 20 * MS), TickDecision::Tick);
    }

    #[test]
    fn tick_schedules_the_next_one_interval_later() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10 * MS);
        scheduler.start(t0);

        assert_eq!(scheduler.poll(t0 + 13 * MS), TickDecision::Tick);
        assert_eq!(scheduler.poll(t0 + 14 * MS), TickDecision::Wait(9 * MS));
        assert_eq!(scheduler.poll(t0 + 23 * MS), TickDecision::Tick);
    }

    #[test]
    fn zero_interval_ticks_back_to_back() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(Duration::ZERO);
        scheduler.start(t0);

        assert_eq!(scheduler.poll(t0), TickDecision::Tick);
        assert_eq!(scheduler.poll(t0), TickDecision::Tick);
    }

    #[test]
    fn stop_halts_ticks() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(MS);
        scheduler.start(t0);

        scheduler.stop();

        assert_eq!(scheduler.poll(t0 + 100 * MS), TickDecision::Stopped);
    }

    #[test]
    fn set_interval_restarts_from_now() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10 * MS);
        scheduler.start(t0);

        scheduler.set_interval(50 * MS, t0 + 8 * MS);

        assert_eq!(scheduler.interval(), 50 * MS);
        assert_eq!(scheduler.poll(t0 + 10 * MS), TickDecision::Wait(48 * MS));
        assert_eq!(scheduler.poll(t0 + 58 * MS), TickDecision::Tick);
    }

    #[test]
    fn set_interval_starts_a_stopped_scheduler() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10 * MS);

        scheduler.set_interval(5 * MS, t0);

        assert!(scheduler.is_running());
        assert_eq!(scheduler.poll(t0 + 5 * MS), TickDecision::Tick);
    }
}
