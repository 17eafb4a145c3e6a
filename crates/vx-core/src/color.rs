/// Alert red for over-limit readouts, gauge fill, and bars.
pub const ALERT: (u8, u8, u8) = (0xff, 0x4d, 0x4d);

/// Within-band green for the accuracy gauge and readouts.
pub const OK: (u8, u8, u8) = (0x47, 0xeb, 0x47);

/// Purple fill for the frequency gauge.
pub const FREQUENCY: (u8, u8, u8) = (0xaf, 0x46, 0xe8);

/// Dark gray background track behind each gauge.
pub const TRACK: (u8, u8, u8) = (0x2e, 0x2e, 0x2e);

/// Convert HSL to RGB [0,255]. H in degrees (wraps), S and L in [0.0, 1.0].
///
/// # Example
/// ```
/// use vx_core::color::hsl_to_rgb;
/// assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
/// assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
/// assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
/// ```
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    (
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

/// Hue for bar `i` of `count`: a 120°-to-280° sweep across the strip.
///
/// # Example
/// ```
/// use vx_core::color::bar_hue;
/// assert_eq!(bar_hue(0, 120), 120.0);
/// assert!((bar_hue(60, 120) - 200.0).abs() < 0.01);
/// ```
#[must_use]
pub fn bar_hue(i: usize, count: usize) -> f32 {
    if count == 0 {
        return 120.0;
    }
    120.0 + (i as f32 / count as f32) * 160.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        let (r, g, b) = hsl_to_rgb(200.0, 0.0, 0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn hsl_lightness_extremes() {
        assert_eq!(hsl_to_rgb(45.0, 0.8, 0.0), (0, 0, 0));
        assert_eq!(hsl_to_rgb(45.0, 0.8, 1.0), (255, 255, 255));
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(-120.0, 1.0, 0.5), hsl_to_rgb(240.0, 1.0, 0.5));
    }

    #[test]
    fn bar_hue_spans_gradient() {
        assert_eq!(bar_hue(0, 120), 120.0);
        let last = bar_hue(119, 120);
        assert!(last < 280.0 && last > 278.0);
    }
}
