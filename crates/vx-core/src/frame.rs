/// Byte spectrum for one tick, one magnitude per frequency bin.
///
/// Bins are ordered low frequency first. Frames are ephemeral: produced
/// by the sampler and consumed within the same tick, never retained.
///
/// # Example
/// ```
/// use vx_core::frame::SpectrumFrame;
/// let frame = SpectrumFrame::new(vec![0; 128]);
/// assert_eq!(frame.len(), 128);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpectrumFrame {
    /// Bin magnitudes, 0-255.
    pub bins: Vec<u8>,
}

impl SpectrumFrame {
    /// Wrap a bin vector.
    #[must_use]
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    /// A frame with every bin at the given constant magnitude.
    ///
    /// # Example
    /// ```
    /// use vx_core::frame::SpectrumFrame;
    /// let frame = SpectrumFrame::constant(90, 128);
    /// assert!(frame.bins.iter().all(|&b| b == 90));
    /// ```
    #[must_use]
    pub fn constant(magnitude: u8, bins: usize) -> Self {
        Self {
            bins: vec![magnitude; bins],
        }
    }

    /// Number of frequency bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when the frame has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Scalar results of one tick, handed from the tick engine to the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReading {
    /// Mean bin magnitude on the 0-255 scale.
    pub loudness: f32,
    /// Presence-weighted average frequency in Hz. 0 when silent.
    pub average_hz: u32,
    /// True when loudness exceeded the active mode's threshold.
    pub over_limit: bool,
    /// Accuracy score 0-100 after this tick.
    pub score: u8,
}

/// Value, range, and color for one gauge draw. Rebuilt every tick,
/// never retained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeState {
    /// Current value; clamped against `max_value` at draw time.
    pub value: f32,
    /// Full-scale value for the gauge.
    pub max_value: f32,
    /// Progress arc color (RGB).
    pub color: (u8, u8, u8),
}

impl GaugeState {
    /// Build a gauge state.
    #[must_use]
    pub fn new(value: f32, max_value: f32, color: (u8, u8, u8)) -> Self {
        Self {
            value,
            max_value,
            color,
        }
    }
}
