use vx_core::color;
use vx_core::frame::SpectrumFrame;

use crate::surface::Surface;

/// Bars drawn across the strip when there is room for all of them.
pub const BAR_COUNT: usize = 120;

/// Every bar keeps at least this many pixels of height, so a silent
/// spectrum still reads as a baseline instead of an empty strip.
const MIN_BAR_HEIGHT: f32 = 5.0;

/// Bars peak at 80% of the strip height.
const HEIGHT_SCALE: f32 = 0.8;

/// Rasterize spectrum bars into `surface`, resizing it to
/// `width` x `height` first.
///
/// Bars are vertically centered and sample the frame at a fixed stride.
/// When the strip is narrower than [`BAR_COUNT`] pixels or the frame
/// has fewer bins, the bar count shrinks to fit and the hue gradient
/// stretches over what remains. While the session is over its loudness
/// limit every bar turns the alert color instead.
///
/// `rounded` shaves the corner dots off each bar. Callers pass the glyph
/// capability resolved at painter construction: corners only read as
/// curves at braille dot density, so block-mode strips keep plain
/// rectangles.
pub fn draw_bars(
    surface: &mut Surface,
    width: u32,
    height: u32,
    frame: &SpectrumFrame,
    over_limit: bool,
    rounded: bool,
) {
    surface.resize(width, height);
    if width == 0 || height == 0 || frame.is_empty() {
        return;
    }

    let bars = BAR_COUNT.min(frame.len()).min(width as usize).max(1);
    let slot = (width as usize / bars).max(1) as u32;
    let bar_width = if slot > 1 { slot - 1 } else { 1 };
    let stride = (frame.len() / bars).max(1);
    let center_y = height as f32 / 2.0;

    for i in 0..bars {
        let amp = frame.bins[(i * stride).min(frame.len() - 1)];
        let mut bar_height = f32::from(amp) / 255.0 * height as f32 * HEIGHT_SCALE;
        if bar_height < MIN_BAR_HEIGHT {
            bar_height = MIN_BAR_HEIGHT;
        }
        let bar_height = bar_height.min(height as f32);

        let rgb = if over_limit {
            color::ALERT
        } else {
            color::hsl_to_rgb(color::bar_hue(i, bars), 0.8, 0.6)
        };

        let y_top = (center_y - bar_height / 2.0).max(0.0) as u32;
        let y_bot = (y_top + bar_height as u32).min(height);
        let x_left = i as u32 * slot;
        let x_right = (x_left + bar_width).min(width);
        // Corner shaving needs a lit dot left on the end rows.
        let shave = rounded && x_right - x_left >= 3 && y_bot - y_top >= 3;
        for x in x_left..x_right {
            for y in y_top..y_bot {
                let corner =
                    (x == x_left || x == x_right - 1) && (y == y_top || y == y_bot - 1);
                if shave && corner {
                    continue;
                }
                surface.set_px(x, y, rgb);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_rows_in_column(s: &Surface, x: u32) -> Vec<u32> {
        (0..s.height).filter(|&y| s.pixel(x, y).3 > 0).collect()
    }

    #[test]
    fn silence_still_draws_a_baseline() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(0, 128);
        draw_bars(&mut s, 128, 40, &frame, false, false);
        // 5px minimum, centered on row 20.
        assert_eq!(lit_rows_in_column(&s, 0), vec![17, 18, 19, 20, 21]);
    }

    #[test]
    fn saturated_bins_fill_eighty_percent() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(255, 128);
        draw_bars(&mut s, 128, 40, &frame, false, false);
        // 0.8 * 40 = 32 rows centered: 4..36.
        let rows = lit_rows_in_column(&s, 0);
        assert_eq!(rows.len(), 32);
        assert_eq!(rows[0], 4);
        assert_eq!(*rows.last().unwrap(), 35);
    }

    #[test]
    fn rounded_bars_shave_corner_dots() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(255, 128);
        // 120 bars in 4-pixel slots: 3-dot-wide bars spanning rows 4..36.
        draw_bars(&mut s, 480, 40, &frame, false, true);
        assert_eq!(s.pixel(0, 4).3, 0, "top-left corner dot");
        assert_eq!(s.pixel(2, 4).3, 0, "top-right corner dot");
        assert_eq!(s.pixel(0, 35).3, 0, "bottom-left corner dot");
        assert_eq!(s.pixel(1, 4).3, 255, "top edge center stays lit");
        assert_eq!(s.pixel(0, 5).3, 255, "left edge below the corner");
        assert_eq!(s.pixel(0, 20).3, 255, "bar body");

        // The plain-rectangle path keeps its corners.
        draw_bars(&mut s, 480, 40, &frame, false, false);
        assert_eq!(s.pixel(0, 4).3, 255);
    }

    #[test]
    fn narrow_bars_ignore_rounding() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(0, 128);
        // Single-dot bars cannot lose their corners.
        draw_bars(&mut s, 128, 40, &frame, false, true);
        assert_eq!(lit_rows_in_column(&s, 0), vec![17, 18, 19, 20, 21]);
    }

    #[test]
    fn over_limit_paints_every_bar_alert() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(200, 128);
        draw_bars(&mut s, 128, 40, &frame, true, false);
        for y in 0..s.height {
            for x in 0..s.width {
                let (r, g, b, a) = s.pixel(x, y);
                if a > 0 {
                    assert_eq!((r, g, b), color::ALERT);
                }
            }
        }
    }

    #[test]
    fn gradient_runs_green_to_violet() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(200, 128);
        draw_bars(&mut s, 240, 40, &frame, false, false);
        // First bar sits at hue 120 (green), the last one near 280
        // (violet).
        let (r, g, b, a) = s.pixel(0, 20);
        assert_eq!(a, 255);
        assert!(g > r && g > b, "first bar should be green, got {:?}", (r, g, b));
        let last_x = s.width - 2;
        let (r, g, b, a) = s.pixel(last_x, 20);
        assert_eq!(a, 255);
        assert!(b > g && r > g, "last bar should be violet, got {:?}", (r, g, b));
    }

    #[test]
    fn bar_count_shrinks_with_narrow_strips() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(255, 128);
        draw_bars(&mut s, 16, 20, &frame, false, false);
        // 16 one-pixel bars, no gap when slots are single pixels.
        let lit_columns: Vec<u32> = (0..s.width).filter(|&x| s.pixel(x, 10).3 > 0).collect();
        assert_eq!(lit_columns.len(), 16);
    }

    #[test]
    fn short_frames_cap_the_bar_count() {
        let mut s = Surface::new(1, 1);
        let frame = SpectrumFrame::constant(255, 8);
        draw_bars(&mut s, 240, 20, &frame, false, false);
        // 8 bars in 30-pixel slots, 29 lit columns each.
        let lit: Vec<u32> = (0..s.width).filter(|&x| s.pixel(x, 10).3 > 0).collect();
        assert_eq!(lit.len(), 8 * 29);
    }

    #[test]
    fn empty_frame_clears_the_strip() {
        let mut s = Surface::new(4, 4);
        s.set_px(0, 0, (9, 9, 9));
        draw_bars(&mut s, 4, 4, &SpectrumFrame::default(), false, false);
        assert!(s.data.iter().all(|&b| b == 0));
    }
}
