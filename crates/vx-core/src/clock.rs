use std::time::{Duration, Instant};

/// Handle for an armed timer, returned by [`TickTimer::start`] and
/// consumed by [`TickTimer::stop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickHandle(u64);

/// Cooperative tick scheduler for the session loop.
///
/// The host loop calls [`poll`](TickTimer::poll) once per refresh and
/// receives at most one due tick. `stop` with the matching handle
/// disarms the timer deterministically; a stale handle from an earlier
/// `start` never cancels a newer arming.
///
/// The first poll after `start` is always due, so a session begins
/// ticking on the next refresh rather than one period later.
///
/// # Example
/// ```
/// use std::time::{Duration, Instant};
/// use vx_core::clock::TickTimer;
///
/// let mut timer = TickTimer::new(Duration::from_millis(16));
/// let handle = timer.start();
/// let t0 = Instant::now();
/// assert!(timer.poll(t0));
/// assert!(!timer.poll(t0));
/// timer.stop(handle);
/// assert!(!timer.poll(t0 + Duration::from_secs(1)));
/// ```
pub struct TickTimer {
    period: Duration,
    armed: Option<Armed>,
    next_id: u64,
}

struct Armed {
    handle: TickHandle,
    /// `None` until the first poll fires.
    next_due: Option<Instant>,
}

impl TickTimer {
    /// Create a disarmed timer with the given tick period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
            next_id: 0,
        }
    }

    /// Arm the timer. Replaces any previous arming.
    pub fn start(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.armed = Some(Armed {
            handle,
            next_due: None,
        });
        handle
    }

    /// Disarm iff `handle` matches the current arming.
    pub fn stop(&mut self, handle: TickHandle) {
        if self.armed.as_ref().is_some_and(|a| a.handle == handle) {
            self.armed = None;
        }
    }

    /// Report whether a tick is due at `now`, advancing the schedule
    /// when it is. Disarmed timers are never due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };
        match armed.next_due {
            None => {
                armed.next_due = Some(now + self.period);
                true
            }
            Some(due) if now >= due => {
                armed.next_due = Some(now + self.period);
                true
            }
            Some(_) => false,
        }
    }

    /// True while armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The configured tick period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(10);

    #[test]
    fn first_poll_after_start_fires() {
        let mut timer = TickTimer::new(PERIOD);
        timer.start();
        assert!(timer.poll(Instant::now()));
    }

    #[test]
    fn poll_respects_period() {
        let mut timer = TickTimer::new(PERIOD);
        timer.start();
        let t0 = Instant::now();
        assert!(timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(5)));
        assert!(timer.poll(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn disarmed_timer_is_never_due() {
        let mut timer = TickTimer::new(PERIOD);
        assert!(!timer.poll(Instant::now()));
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut timer = TickTimer::new(PERIOD);
        let handle = timer.start();
        let t0 = Instant::now();
        assert!(timer.poll(t0));
        timer.stop(handle);
        assert!(!timer.is_armed());
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn stale_handle_does_not_cancel_new_arming() {
        let mut timer = TickTimer::new(PERIOD);
        let old = timer.start();
        let _new = timer.start();
        timer.stop(old);
        assert!(timer.is_armed());
        assert!(timer.poll(Instant::now()));
    }

    #[test]
    fn restart_fires_immediately_again() {
        let mut timer = TickTimer::new(PERIOD);
        let handle = timer.start();
        let t0 = Instant::now();
        assert!(timer.poll(t0));
        timer.stop(handle);
        timer.start();
        assert!(timer.poll(t0));
    }
}
