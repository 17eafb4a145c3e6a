use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use vx_audio::sampler::AudioSampler;
use vx_core::clock::{TickHandle, TickTimer};
use vx_core::config::TrainerConfig;
use vx_core::mode::Mode;
use vx_core::traits::{TranscriptError, TranscriptService};
use vx_render::cells::CellPainter;
use vx_render::fps::FpsCounter;
use vx_render::ui::{SessionView, Ui};

use crate::trainer::Trainer;

/// Application state.
///
/// # Example
/// ```
/// use vx_app::app::AppState;
/// let state = AppState::Idle;
/// assert!(matches!(state, AppState::Idle));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the user to start a session. The last reading stays
    /// on screen, dimmed.
    Idle,
    /// Session live: capture open, tick timer armed.
    Running,
    /// Shut down at the next loop turn.
    Quitting,
}

/// Main application: owns the trainer, the tick timer, the optional
/// recognition backend, and the UI.
pub struct App {
    /// Current application state.
    pub state: AppState,
    config: TrainerConfig,
    trainer: Trainer<AudioSampler>,
    timer: TickTimer,
    tick_handle: Option<TickHandle>,
    transcript: Option<Box<dyn TranscriptService>>,
    transcript_rx: Option<flume::Receiver<String>>,
    transcript_line: String,
    ui: Ui,
    fps_counter: FpsCounter,
}

impl App {
    #[must_use]
    pub fn new(config: TrainerConfig, transcript: Option<Box<dyn TranscriptService>>) -> Self {
        let painter = CellPainter::new(config.cells, config.color_enabled);
        let period = Duration::from_secs_f64(1.0 / f64::from(config.target_fps.max(1)));
        Self {
            state: AppState::Idle,
            trainer: Trainer::new(AudioSampler::new(), config.mode),
            timer: TickTimer::new(period),
            tick_handle: None,
            transcript,
            transcript_rx: None,
            transcript_line: String::new(),
            ui: Ui::new(painter),
            fps_counter: FpsCounter::new(60),
            config,
        }
    }

    /// Main event loop.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let frame_duration =
            Duration::from_secs_f64(1.0 / f64::from(self.config.target_fps.max(1)));
        let mut last_frame = Instant::now();

        loop {
            if self.state == AppState::Quitting {
                break;
            }

            let now = Instant::now();
            let elapsed = now - last_frame;
            if elapsed < frame_duration {
                // Sleep out the remainder of the frame, but stay
                // responsive to input.
                let remaining = frame_duration.saturating_sub(elapsed);
                if event::poll(remaining)? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_frame = now;

            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            // One training tick per armed timer period. A timer stopped
            // mid-frame simply stops firing, so a session that just
            // ended never scores a stray frame.
            if self.timer.poll(Instant::now()) {
                let _ = self.trainer.tick();
            }
            self.drain_transcript();

            self.fps_counter.tick();
            let view = SessionView {
                mode: self.trainer.mode(),
                running: self.state == AppState::Running,
                reading: self.trainer.last_reading(),
                spectrum: self.trainer.spectrum(),
                transcript: &self.transcript_line,
            };
            let ui = &mut self.ui;
            let fps_counter = &self.fps_counter;
            terminal.draw(|frame| ui.draw(frame, &view, fps_counter))?;
        }

        Ok(())
    }

    /// Handle a terminal event.
    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = *event
        {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.stop_session();
                    self.state = AppState::Quitting;
                }
                KeyCode::Char(' ') => self.toggle_session(),
                KeyCode::Char('1') => self.trainer.set_mode(Mode::Whisper),
                KeyCode::Char('2') => self.trainer.set_mode(Mode::Normal),
                KeyCode::Char('3') => self.trainer.set_mode(Mode::Speaker),
                KeyCode::Tab => self.trainer.set_mode(self.trainer.mode().next()),
                _ => {}
            }
        }
    }

    fn toggle_session(&mut self) {
        match self.state {
            AppState::Idle => self.start_session(),
            AppState::Running => self.stop_session(),
            AppState::Quitting => {}
        }
    }

    /// Open capture, arm the tick timer, begin recognition.
    ///
    /// A refused capture (no device, no permission) logs one warning
    /// and leaves the app idle rather than aborting.
    fn start_session(&mut self) {
        if self.state == AppState::Running {
            return;
        }
        if let Err(err) = self.trainer.open() {
            log::warn!("microphone unavailable: {err:#}");
            return;
        }
        self.tick_handle = Some(self.timer.start());
        self.begin_transcript();
        self.state = AppState::Running;
        log::info!("session started in {} mode", self.trainer.mode());
    }

    /// Cancel the pending tick, end recognition, release capture.
    /// Counters reset here so every session starts fresh. Stopping
    /// while idle is a guarded no-op.
    fn stop_session(&mut self) {
        if self.state != AppState::Running {
            return;
        }
        if let Some(handle) = self.tick_handle.take() {
            self.timer.stop(handle);
        }
        self.end_transcript();
        self.trainer.close();
        self.trainer.reset_session();
        self.state = AppState::Idle;
        log::info!("session stopped");
    }

    fn begin_transcript(&mut self) {
        let Some(service) = self.transcript.as_mut() else {
            return;
        };
        match service.begin() {
            Ok(rx) => self.transcript_rx = Some(rx),
            Err(TranscriptError::AlreadyRunning) => {
                log::debug!("recognition already running, keeping current stream");
            }
            Err(err) => {
                log::warn!("recognition unavailable: {err}");
            }
        }
    }

    /// The last recognized line stays on screen after a stop, matching
    /// the transcript panel's sticky behavior.
    fn end_transcript(&mut self) {
        if let Some(service) = self.transcript.as_mut() {
            service.end();
        }
        self.transcript_rx = None;
    }

    fn drain_transcript(&mut self) {
        let Some(rx) = self.transcript_rx.as_ref() else {
            return;
        };
        while let Ok(line) = rx.try_recv() {
            self.transcript_line = line;
        }
    }
}
