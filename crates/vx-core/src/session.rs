use crate::mode::Mode;

/// Frames whose loudness is at or under this mean byte magnitude are
/// treated as silence and never counted toward the score.
pub const SILENCE_FLOOR: f32 = 5.0;

/// Running accuracy counters for one training session.
///
/// `total` counts active frames (above the silence floor); `within`
/// counts the subset at or under the active mode's threshold. Both are
/// mutated only by the tick step, so there is a single serialized
/// writer by construction.
///
/// # Example
/// ```
/// use vx_core::mode::Mode;
/// use vx_core::session::TrainingSession;
///
/// let mut session = TrainingSession::new(Mode::Normal);
/// session.observe(90.0); // active, over the 80 threshold
/// session.observe(50.0); // active, within
/// assert_eq!(session.total(), 2);
/// assert_eq!(session.within(), 1);
/// assert_eq!(session.score(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct TrainingSession {
    mode: Mode,
    total: u32,
    within: u32,
}

impl TrainingSession {
    /// Create a fresh session targeting `mode`.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            total: 0,
            within: 0,
        }
    }

    /// Account one frame's loudness.
    ///
    /// Loudness at or under [`SILENCE_FLOOR`] is ignored entirely, so idle
    /// periods neither inflate nor deflate the score.
    pub fn observe(&mut self, loudness: f32) {
        if loudness <= SILENCE_FLOOR {
            return;
        }
        self.total += 1;
        if loudness <= self.mode.threshold() {
            self.within += 1;
        }
    }

    /// Accuracy score 0-100: `round(within / total * 100)`, 0 when no
    /// active frame has been observed yet.
    #[must_use]
    pub fn score(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (f64::from(self.within) / f64::from(self.total) * 100.0).round() as u8
    }

    /// Switch the active mode. Counters reset iff the mode actually changes.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::debug!("mode changed: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.reset();
        }
    }

    /// Zero both counters. Single write path, so no observer can see a
    /// half-reset pair.
    pub fn reset(&mut self) {
        self.total = 0;
        self.within = 0;
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active frames observed since the last reset.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Active frames that stayed within the threshold.
    #[must_use]
    pub fn within(&self) -> u32 {
        self.within
    }
}

impl Default for TrainingSession {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
