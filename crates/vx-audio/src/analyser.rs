use realfft::RealFftPlanner;

use vx_core::frame::SpectrumFrame;

/// Analysis window length in samples. Yields half as many output bins.
pub const WINDOW_SIZE: usize = 256;

/// Previous-frame weight for per-bin exponential smoothing.
const SMOOTHING_TIME_CONSTANT: f32 = 0.8;

/// Smoothed magnitudes at or below this level map to byte 0.
const MIN_DECIBELS: f32 = -100.0;

/// Smoothed magnitudes at or above this level map to byte 255.
const MAX_DECIBELS: f32 = -30.0;

/// Byte-spectrum analyser over the most recent capture window.
///
/// Implements the analyser-node chain the loudness thresholds are
/// calibrated against: Blackman window, forward real FFT with 1/N
/// magnitude normalization, per-bin exponential time smoothing, then
/// dB mapping of [-100, -30] onto 0-255.
///
/// Pre-allocates the FFT plan and scratch buffers; `process` allocates
/// only the returned frame.
///
/// # Example
/// ```
/// use vx_audio::analyser::SpectrumAnalyser;
/// let mut analyser = SpectrumAnalyser::new(256);
/// let samples = vec![0.0f32; 256];
/// let frame = analyser.process(&samples);
/// assert_eq!(frame.len(), 128);
/// ```
pub struct SpectrumAnalyser {
    window_size: usize,
    input_buf: Vec<f32>,
    spectrum_buf: Vec<realfft::num_complex::Complex<f32>>,
    scratch: Vec<realfft::num_complex::Complex<f32>>,
    plan: std::sync::Arc<dyn realfft::RealToComplex<f32>>,
    /// Blackman window coefficients.
    window: Vec<f32>,
    /// Per-bin smoothed magnitudes carried across frames.
    smoothed: Vec<f32>,
}

impl SpectrumAnalyser {
    /// Create an analyser with the given window size.
    ///
    /// # Panics
    /// Panics if `size` is 0.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "window size must be > 0");

        let mut planner = RealFftPlanner::<f32>::new();
        let plan = planner.plan_fft_forward(size);

        let input_buf = plan.make_input_vec();
        let spectrum_buf = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();

        // Blackman window: 0.42 - 0.5 cos(2πi/N) + 0.08 cos(4πi/N)
        let window: Vec<f32> = (0..size)
            .map(|i| {
                let phase = std::f32::consts::TAU * i as f32 / size as f32;
                0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
            })
            .collect();

        Self {
            window_size: size,
            input_buf,
            spectrum_buf,
            scratch,
            plan,
            window,
            smoothed: vec![0.0; size / 2],
        }
    }

    /// Run one analysis pass over `samples` and return the byte spectrum.
    ///
    /// Repeated calls on an unchanged buffer keep applying the time
    /// smoothing, so a quiet signal decays toward the floor instead of
    /// freezing.
    ///
    /// # Example
    /// ```
    /// use vx_audio::analyser::SpectrumAnalyser;
    /// let mut analyser = SpectrumAnalyser::new(256);
    /// let samples = vec![1.0f32; 256];
    /// let frame = analyser.process(&samples);
    /// assert_eq!(frame.bins[0], 255); // DC component saturates
    /// ```
    pub fn process(&mut self, samples: &[f32]) -> SpectrumFrame {
        let n = self.window_size.min(samples.len());

        // Copy and window
        for (i, slot) in self.input_buf.iter_mut().enumerate() {
            *slot = if i < n { samples[i] * self.window[i] } else { 0.0 };
        }

        // Forward FFT
        if self
            .plan
            .process_with_scratch(&mut self.input_buf, &mut self.spectrum_buf, &mut self.scratch)
            .is_err()
        {
            return SpectrumFrame::new(vec![0; self.bins()]);
        }

        // Magnitude, smoothing, dB byte mapping
        let mut bins = Vec::with_capacity(self.bins());
        for (prev, c) in self.smoothed.iter_mut().zip(&self.spectrum_buf) {
            let mag = (c.re * c.re + c.im * c.im).sqrt() / self.window_size as f32;
            let sm = SMOOTHING_TIME_CONSTANT * *prev + (1.0 - SMOOTHING_TIME_CONSTANT) * mag;
            *prev = sm;
            bins.push(db_to_byte(20.0 * sm.log10()));
        }
        SpectrumFrame::new(bins)
    }

    /// Number of output bins (half the window size).
    #[must_use]
    pub fn bins(&self) -> usize {
        self.window_size / 2
    }

    /// The analysis window size.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

/// Map a dB level onto the [`MIN_DECIBELS`, `MAX_DECIBELS`] byte range.
#[inline(always)]
fn db_to_byte(db: f32) -> u8 {
    let norm = (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
    (255.0 * norm).clamp(0.0, 255.0) as u8
}
