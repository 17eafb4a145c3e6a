use thiserror::Error;

use crate::frame::SpectrumFrame;

/// Feeds spectrum frames to the tick engine.
///
/// Implemented by the live audio sampler and by scripted fakes in tests.
///
/// # Example
/// ```
/// use vx_core::frame::SpectrumFrame;
/// use vx_core::traits::FrameSource;
///
/// struct Silence;
/// impl FrameSource for Silence {
///     fn open(&mut self) -> anyhow::Result<()> { Ok(()) }
///     fn poll_frame(&mut self) -> Option<SpectrumFrame> { Some(SpectrumFrame::constant(0, 128)) }
///     fn close(&mut self) {}
///     fn is_open(&self) -> bool { true }
///     fn sample_rate(&self) -> u32 { 44_100 }
/// }
/// ```
pub trait FrameSource {
    /// Acquire the capture resource. A second `open` while already open
    /// is a no-op reusing the existing resource.
    ///
    /// # Errors
    /// Returns an error when acquisition is refused (no device, no
    /// permission). The caller decides whether to degrade or abort.
    fn open(&mut self) -> anyhow::Result<()>;

    /// Snapshot the current frame, or `None` when the source is not open.
    ///
    /// Pull-based and non-blocking: called once at tick start.
    fn poll_frame(&mut self) -> Option<SpectrumFrame>;

    /// Release the capture resource. Fire-and-forget; a later `open`
    /// acquires a fresh resource.
    fn close(&mut self);

    /// True between a successful `open` and the next `close`.
    fn is_open(&self) -> bool;

    /// Capture sample rate in Hz, or 0 when not open.
    fn sample_rate(&self) -> u32;
}

/// Errors from the external speech-to-text collaborator.
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// Recognition was already started. Benign on duplicate start commands.
    #[error("recognition already running")]
    AlreadyRunning,

    /// The service cannot run at all.
    #[error("recognition unavailable: {0}")]
    Unavailable(String),
}

/// External speech-to-text service started and stopped with the session.
///
/// No implementation ships with the trainer; hosts wire one in, and the
/// scheduler only drives its lifecycle.
pub trait TranscriptService {
    /// Start recognition. Returns the channel delivering recognized text.
    ///
    /// # Errors
    /// [`TranscriptError::AlreadyRunning`] when recognition is already
    /// live; the scheduler treats that as benign and keeps the existing
    /// receiver.
    fn begin(&mut self) -> Result<flume::Receiver<String>, TranscriptError>;

    /// Stop recognition. Idempotent.
    fn end(&mut self);
}
