use std::f32::consts::{PI, TAU};

use vx_core::color;
use vx_core::frame::GaugeState;

use crate::surface::Surface;

/// Stroke thickness as a fraction of the shorter half-dimension.
const STROKE_RATIO: f32 = 0.25;

/// Angular sweep of the progress arc in radians, 0 at the left horizon
/// up to a half turn at full scale.
///
/// Degenerate inputs (non-positive or non-finite `max`, non-finite
/// ratio) sweep nothing instead of poisoning the arc angles.
///
/// # Example
/// ```
/// use std::f32::consts::PI;
/// use vx_render::gauge::progress_sweep;
/// assert!((progress_sweep(50.0, 100.0) - PI / 2.0).abs() < 1e-6);
/// assert_eq!(progress_sweep(7.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn progress_sweep(value: f32, max: f32) -> f32 {
    if !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    let ratio = value / max;
    if !ratio.is_finite() {
        return 0.0;
    }
    PI * ratio.clamp(0.0, 1.0)
}

/// Rasterize a semicircular gauge into `surface`, resizing it to
/// `width` x `height` first.
///
/// The dial is a dome over a center point near the bottom edge. The
/// dark track always spans the full half turn; the colored progress
/// arc sweeps clockwise from the left horizon and covers it up to
/// [`progress_sweep`]. Both strokes get round caps. Areas too small to
/// hold a dial stay blank.
pub fn draw_gauge(surface: &mut Surface, width: u32, height: u32, gauge: &GaugeState) {
    surface.resize(width, height);
    if width < 6 || height < 4 {
        return;
    }
    let cx = width as f32 / 2.0;
    let cy = height as f32 * 0.9 - 1.0;
    let reach = cx.min(cy);
    let stroke = (reach * STROKE_RATIO).max(2.0);
    let radius = reach - stroke;
    if radius < 2.0 {
        return;
    }
    let geo = ArcGeometry {
        cx,
        cy,
        radius,
        half_stroke: stroke / 2.0,
    };

    stroke_arc(surface, &geo, PI, TAU, color::TRACK);
    let sweep = progress_sweep(gauge.value, gauge.max_value);
    if sweep > 0.0 {
        stroke_arc(surface, &geo, PI, PI + sweep, gauge.color);
    }
}

struct ArcGeometry {
    cx: f32,
    cy: f32,
    radius: f32,
    half_stroke: f32,
}

/// Per-pixel arc stroke over the bounding box. A pixel is lit when its
/// center sits on the stroke band inside [start, end], or inside one of
/// the cap discs at the arc endpoints.
fn stroke_arc(surface: &mut Surface, geo: &ArcGeometry, start: f32, end: f32, color: (u8, u8, u8)) {
    let reach = geo.radius + geo.half_stroke;
    let x0 = (geo.cx - reach).floor().max(0.0) as u32;
    let x1 = (((geo.cx + reach).ceil()).max(0.0) as u32).min(surface.width);
    let y0 = (geo.cy - reach).floor().max(0.0) as u32;
    let y1 = (((geo.cy + reach).ceil()).max(0.0) as u32).min(surface.height);

    let (sx, sy) = (
        geo.radius.mul_add(start.cos(), geo.cx),
        geo.radius.mul_add(start.sin(), geo.cy),
    );
    let (ex, ey) = (
        geo.radius.mul_add(end.cos(), geo.cx),
        geo.radius.mul_add(end.sin(), geo.cy),
    );
    let cap_sq = geo.half_stroke * geo.half_stroke;

    for y in y0..y1 {
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let dx = px - geo.cx;
            let dy = py - geo.cy;
            let dist = dx.hypot(dy);

            let mut lit = false;
            if (dist - geo.radius).abs() <= geo.half_stroke {
                // Angles live in (0, 2pi]; the dome is the [pi, 2pi] band.
                let mut theta = dy.atan2(dx);
                if theta <= 0.0 {
                    theta += TAU;
                }
                lit = theta >= start && theta <= end;
            }
            if !lit {
                let ds = (px - sx).powi(2) + (py - sy).powi(2);
                let de = (px - ex).powi(2) + (py - ey).powi(2);
                lit = ds <= cap_sq || de <= cap_sq;
            }
            if lit {
                surface.set_px(x, y, color);
            }
        }
    }
}
