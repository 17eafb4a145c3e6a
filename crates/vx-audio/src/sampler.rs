use vx_core::frame::SpectrumFrame;
use vx_core::traits::FrameSource;

use crate::analyser::{SpectrumAnalyser, WINDOW_SIZE};
use crate::capture::CaptureLink;

/// Microphone-backed [`FrameSource`].
///
/// `open` spins up the capture thread, `poll_frame` drains whatever the
/// device produced since the last call into a sliding sample window and
/// runs the analyser over it. With no fresh samples the window is
/// re-analysed as-is, so smoothing keeps converging between device
/// callbacks instead of stalling.
pub struct AudioSampler {
    active: Option<ActiveCapture>,
}

struct ActiveCapture {
    link: CaptureLink,
    analyser: SpectrumAnalyser,
    window: Vec<f32>,
    drain: Vec<f32>,
}

impl AudioSampler {
    #[must_use]
    pub fn new() -> Self {
        Self { active: None }
    }
}

impl Default for AudioSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for AudioSampler {
    fn open(&mut self) -> anyhow::Result<()> {
        if self.active.is_some() {
            log::debug!("sampler already open, keeping existing capture");
            return Ok(());
        }
        let link = CaptureLink::open_default()?;
        log::info!("capture open at {} Hz", link.sample_rate());
        self.active = Some(ActiveCapture {
            link,
            analyser: SpectrumAnalyser::new(WINDOW_SIZE),
            window: vec![0.0; WINDOW_SIZE],
            drain: Vec::new(),
        });
        Ok(())
    }

    fn poll_frame(&mut self) -> Option<SpectrumFrame> {
        let active = self.active.as_mut()?;
        active.link.drain_into(&mut active.drain);
        push_window(&mut active.window, &active.drain);
        Some(active.analyser.process(&active.window))
    }

    fn close(&mut self) {
        if let Some(active) = self.active.take() {
            active.link.shutdown();
            log::info!("capture closed");
        }
    }

    fn is_open(&self) -> bool {
        self.active.is_some()
    }

    fn sample_rate(&self) -> u32 {
        self.active.as_ref().map_or(0, |a| a.link.sample_rate())
    }
}

/// Slide `incoming` into the fixed-size window, keeping the newest
/// `window.len()` samples. An empty batch leaves the window untouched.
fn push_window(window: &mut [f32], incoming: &[f32]) {
    let len = window.len();
    if incoming.len() >= len {
        window.copy_from_slice(&incoming[incoming.len() - len..]);
    } else if !incoming.is_empty() {
        let keep = len - incoming.len();
        window.copy_within(incoming.len().., 0);
        window[keep..].copy_from_slice(incoming);
    }
}
