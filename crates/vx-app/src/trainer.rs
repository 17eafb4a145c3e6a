use vx_audio::analyser::WINDOW_SIZE;
use vx_audio::classify;
use vx_core::frame::{SpectrumFrame, TickReading};
use vx_core::mode::Mode;
use vx_core::session::TrainingSession;
use vx_core::traits::FrameSource;

/// Tick engine: pulls one spectrum frame per tick, classifies it,
/// folds it into the running session, and keeps the latest reading
/// around for the UI.
///
/// Generic over the frame source so the whole pipeline runs against a
/// scripted source in tests.
pub struct Trainer<S> {
    source: S,
    session: TrainingSession,
    spectrum: SpectrumFrame,
    last_reading: TickReading,
}

impl<S: FrameSource> Trainer<S> {
    pub fn new(source: S, mode: Mode) -> Self {
        Self {
            source,
            session: TrainingSession::new(mode),
            spectrum: SpectrumFrame::default(),
            last_reading: TickReading::default(),
        }
    }

    /// Run one training tick.
    ///
    /// Returns `None` when the source has no frame to offer (closed or
    /// not yet producing), leaving the session untouched.
    pub fn tick(&mut self) -> Option<TickReading> {
        let frame = self.source.poll_frame()?;
        let loudness = classify::loudness(&frame);
        let average_hz =
            classify::average_frequency(&frame, self.source.sample_rate(), WINDOW_SIZE);
        let over_limit = classify::is_over_limit(loudness, self.session.mode());
        self.session.observe(loudness);

        let reading = TickReading {
            loudness,
            average_hz,
            over_limit,
            score: self.session.score(),
        };
        self.spectrum = frame;
        self.last_reading = reading;
        Some(reading)
    }

    /// Open the underlying source.
    ///
    /// # Errors
    /// Propagates the source's refusal (no device, no permission).
    pub fn open(&mut self) -> anyhow::Result<()> {
        self.source.open()
    }

    pub fn close(&mut self) {
        self.source.close();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn reset_session(&mut self) {
        self.session.reset();
    }

    #[must_use]
    pub fn spectrum(&self) -> &SpectrumFrame {
        &self.spectrum
    }

    #[must_use]
    pub fn last_reading(&self) -> TickReading {
        self.last_reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSource {
        frames: Vec<SpectrumFrame>,
        open: bool,
        refuse_open: bool,
    }

    impl ScriptedSource {
        fn with_frames(frames: Vec<SpectrumFrame>) -> Self {
            Self {
                frames,
                open: true,
                refuse_open: false,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn open(&mut self) -> anyhow::Result<()> {
            if self.refuse_open {
                anyhow::bail!("capture refused");
            }
            self.open = true;
            Ok(())
        }

        fn poll_frame(&mut self) -> Option<SpectrumFrame> {
            if !self.open || self.frames.is_empty() {
                return None;
            }
            Some(self.frames.remove(0))
        }

        fn close(&mut self) {
            self.open = false;
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn sample_rate(&self) -> u32 {
            44_100
        }
    }

    fn constant_frames(level: u8, count: usize) -> Vec<SpectrumFrame> {
        (0..count)
            .map(|_| SpectrumFrame::constant(level, 128))
            .collect()
    }

    #[test]
    fn quiet_session_scores_hundred() {
        let source = ScriptedSource::with_frames(constant_frames(60, 10));
        let mut trainer = Trainer::new(source, Mode::Normal);
        let mut last = None;
        for _ in 0..10 {
            last = trainer.tick();
        }
        let reading = last.unwrap();
        assert_eq!(reading.score, 100);
        assert!(!reading.over_limit);
        assert!((reading.loudness - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn loud_frames_drag_the_score_down() {
        let mut frames = constant_frames(90, 10);
        frames.extend(constant_frames(50, 10));
        let mut trainer = Trainer::new(ScriptedSource::with_frames(frames), Mode::Normal);

        let mut last = trainer.tick().unwrap();
        assert!(last.over_limit);
        assert_eq!(last.score, 0);
        for _ in 0..9 {
            last = trainer.tick().unwrap();
        }
        // All 10 loud ticks counted, none within.
        assert_eq!(last.score, 0);

        for _ in 0..10 {
            last = trainer.tick().unwrap();
        }
        // 10 of 20 active ticks stayed within the limit.
        assert_eq!(last.score, 50);
        assert!(!last.over_limit);
    }

    #[test]
    fn silence_is_never_scored() {
        // Loudness 3 sits under the silence floor of 5.
        let mut trainer = Trainer::new(
            ScriptedSource::with_frames(constant_frames(3, 5)),
            Mode::Whisper,
        );
        let mut last = None;
        for _ in 0..5 {
            last = trainer.tick();
        }
        let reading = last.unwrap();
        assert_eq!(reading.score, 0);
        assert!(!reading.over_limit);
    }

    #[test]
    fn faint_signal_reports_frequency_without_scoring() {
        // One lit bin keeps the mean loudness under the silence floor,
        // but the frequency readout still reflects it.
        let mut frame = SpectrumFrame::constant(0, 128);
        frame.bins[7] = 200;
        let mut trainer = Trainer::new(ScriptedSource::with_frames(vec![frame]), Mode::Normal);

        let reading = trainer.tick().unwrap();
        assert_eq!(reading.average_hz, 1206);
        assert_eq!(reading.score, 0);
    }

    #[test]
    fn closed_source_skips_the_tick() {
        let mut source = ScriptedSource::with_frames(constant_frames(60, 3));
        source.open = false;
        let mut trainer = Trainer::new(source, Mode::Normal);
        assert!(trainer.tick().is_none());
        assert_eq!(trainer.last_reading(), TickReading::default());
    }

    #[test]
    fn mode_switch_resets_the_running_score() {
        let mut trainer = Trainer::new(
            ScriptedSource::with_frames(constant_frames(60, 4)),
            Mode::Normal,
        );
        trainer.tick();
        trainer.tick();
        assert_eq!(trainer.last_reading().score, 100);

        trainer.set_mode(Mode::Whisper);
        // 60 is over the whisper limit, so the fresh session scores 0.
        let reading = trainer.tick().unwrap();
        assert!(reading.over_limit);
        assert_eq!(reading.score, 0);
    }

    #[test]
    fn refused_open_propagates() {
        let mut source = ScriptedSource::with_frames(Vec::new());
        source.refuse_open = true;
        source.open = false;
        let mut trainer = Trainer::new(source, Mode::Normal);
        assert!(trainer.open().is_err());
        assert!(!trainer.is_open());
    }
}
