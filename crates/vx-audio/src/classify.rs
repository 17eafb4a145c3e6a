use vx_core::frame::SpectrumFrame;
use vx_core::mode::Mode;

/// Mean bin magnitude: the loudness scale the mode thresholds live on.
///
/// # Example
/// ```
/// use vx_audio::classify::loudness;
/// use vx_core::frame::SpectrumFrame;
/// let frame = SpectrumFrame::constant(90, 128);
/// assert_eq!(loudness(&frame), 90.0);
/// ```
#[must_use]
pub fn loudness(frame: &SpectrumFrame) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: f32 = frame.bins.iter().map(|&b| f32::from(b)).sum();
    sum / frame.len() as f32
}

/// Presence-weighted average frequency in Hz.
///
/// Every bin with nonzero magnitude contributes its center frequency
/// `index * sample_rate / window_size`; magnitude is only a presence
/// filter, never a weight, so this is not a true spectral centroid.
/// Returns 0 when every bin is silent.
///
/// # Example
/// ```
/// use vx_audio::classify::average_frequency;
/// use vx_core::frame::SpectrumFrame;
///
/// let mut frame = SpectrumFrame::constant(0, 128);
/// frame.bins[7] = 1;
/// // bin width 44100 / 256 = 172.265625 Hz
/// assert_eq!(average_frequency(&frame, 44_100, 256), 1206);
/// ```
#[must_use]
pub fn average_frequency(frame: &SpectrumFrame, sample_rate: u32, window_size: usize) -> u32 {
    if window_size == 0 {
        return 0;
    }
    let bin_width = f64::from(sample_rate) / window_size as f64;

    let mut sum = 0.0f64;
    let mut count = 0u32;
    for (i, &mag) in frame.bins.iter().enumerate() {
        if mag > 0 {
            sum += i as f64 * bin_width;
            count += 1;
        }
    }
    if count == 0 {
        return 0;
    }
    (sum / f64::from(count)).round() as u32
}

/// True when `loudness` exceeds the mode's inclusive threshold.
#[must_use]
pub fn is_over_limit(loudness: f32, mode: Mode) -> bool {
    loudness > mode.threshold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loudness_of_constant_frame_is_exact() {
        for x in [1u8, 5, 90, 180, 255] {
            let frame = SpectrumFrame::constant(x, 128);
            assert_eq!(loudness(&frame), f32::from(x));
        }
    }

    #[test]
    fn loudness_of_empty_frame_is_zero() {
        assert_eq!(loudness(&SpectrumFrame::default()), 0.0);
    }

    #[test]
    fn average_frequency_of_silence_is_zero() {
        let frame = SpectrumFrame::constant(0, 128);
        assert_eq!(average_frequency(&frame, 44_100, 256), 0);
    }

    #[test]
    fn average_frequency_single_bin() {
        // bin width 172.265625 Hz
        for (i, expected) in [(0usize, 0u32), (1, 172), (2, 345), (7, 1206), (64, 11025)] {
            let mut frame = SpectrumFrame::constant(0, 128);
            frame.bins[i] = 200;
            assert_eq!(
                average_frequency(&frame, 44_100, 256),
                expected,
                "bin {i}"
            );
        }
    }

    #[test]
    fn average_frequency_ignores_magnitude_as_weight() {
        // A barely-lit bin counts exactly as much as a saturated one.
        let mut faint = SpectrumFrame::constant(0, 128);
        faint.bins[4] = 1;
        faint.bins[8] = 1;
        let mut loud = SpectrumFrame::constant(0, 128);
        loud.bins[4] = 255;
        loud.bins[8] = 255;

        let hz = average_frequency(&faint, 44_100, 256);
        assert_eq!(hz, average_frequency(&loud, 44_100, 256));
        // Mean of bins 4 and 8 -> bin 6 -> round(6 * 172.265625)
        assert_eq!(hz, 1034);
    }

    #[test]
    fn zero_window_size_is_guarded() {
        let frame = SpectrumFrame::constant(10, 128);
        assert_eq!(average_frequency(&frame, 44_100, 0), 0);
    }

    #[test]
    fn over_limit_is_exclusive_at_threshold() {
        assert!(!is_over_limit(80.0, Mode::Normal));
        assert!(is_over_limit(80.1, Mode::Normal));
        assert!(!is_over_limit(30.0, Mode::Whisper));
        assert!(is_over_limit(30.1, Mode::Whisper));
        assert!(!is_over_limit(180.0, Mode::Speaker));
        assert!(is_over_limit(180.1, Mode::Speaker));
    }
}
