use std::time::{Duration, Instant};

/// The single owned poll timer. It holds at most one pending deadline, so a
/// settings change can never leave two ticks racing: `reschedule` always
/// cancels before it arms.
#[derive(Debug)]
pub struct PollTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm the timer one interval from now.
    pub fn schedule(&mut self) {
        self.schedule_at(Instant::now());
    }

    fn schedule_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Disarm. Reports whether a deadline was actually pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Cancel the pending deadline, then arm with the new interval.
    pub fn reschedule(&mut self, interval: Duration) {
        self.reschedule_at(interval, Instant::now());
    }

    fn reschedule_at(&mut self, interval: Duration, now: Instant) {
        self.cancel();
        self.interval = interval;
        self.schedule_at(now);
    }

    /// Apply a settings change. Only a changed interval touches the timer.
    pub fn apply_interval(&mut self, interval: Duration) -> bool {
        if interval == self.interval {
            return false;
        }
        self.reschedule(interval);
        true
    }

    /// Time until the pending deadline; zero when due, None when disarmed.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume a due deadline and re-arm for the next tick.
    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN: Duration = Duration::from_secs(10);
    const THREE: Duration = Duration::from_secs(3);

    #[test]
    fn starts_disarmed() {
        let timer = PollTimer::new(TEN);
        assert!(!timer.is_pending());
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn schedule_arms_one_deadline() {
        let mut timer = PollTimer::new(TEN);
        let now = Instant::now();
        timer.schedule_at(now);
        assert!(timer.is_pending());
        assert_eq!(timer.remaining_at(now), Some(TEN));
    }

    #[test]
    fn cancel_reports_whether_something_was_pending() {
        let mut timer = PollTimer::new(TEN);
        timer.schedule();
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.is_pending());
    }

    #[test]
    fn fire_only_when_due_and_rearms() {
        let mut timer = PollTimer::new(TEN);
        let now = Instant::now();
        timer.schedule_at(now);

        assert!(!timer.fire_at(now + THREE));
        assert!(timer.fire_at(now + TEN));

        // still exactly one pending deadline, one interval out
        assert!(timer.is_pending());
        assert_eq!(timer.remaining_at(now + TEN), Some(TEN));
    }

    #[test]
    fn fire_does_nothing_while_disarmed() {
        let mut timer = PollTimer::new(TEN);
        assert!(!timer.fire());
    }

    #[test]
    fn reschedule_swaps_the_deadline_for_the_new_interval() {
        let mut timer = PollTimer::new(TEN);
        let now = Instant::now();
        timer.schedule_at(now);

        timer.reschedule_at(THREE, now);
        assert!(timer.is_pending());
        assert_eq!(timer.interval(), THREE);
        assert_eq!(timer.remaining_at(now), Some(THREE));

        // the old ten-second deadline is gone: the timer fires on the new
        // cadence and only once per interval
        assert!(timer.fire_at(now + THREE));
        assert!(!timer.fire_at(now + THREE));
    }

    #[test]
    fn apply_interval_is_a_no_op_when_unchanged() {
        let mut timer = PollTimer::new(TEN);
        timer.schedule();
        assert!(!timer.apply_interval(TEN));
        assert!(timer.is_pending());

        assert!(timer.apply_interval(THREE));
        assert_eq!(timer.interval(), THREE);
    }
}
