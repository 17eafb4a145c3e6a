use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use vx_core::config::CellMode;

use crate::surface::Surface;

/// Braille base codepoint (U+2800).
const BRAILLE_BASE: u32 = 0x2800;

/// Terminal glyph backend for pixel surfaces.
///
/// The backend is resolved exactly once at construction: `auto` probes
/// the locale for UTF-8 support and picks braille (2x4 dots per cell)
/// when it finds it, half blocks (1x2) otherwise. Draw calls never
/// re-probe.
pub struct CellPainter {
    braille: bool,
    color: bool,
}

impl CellPainter {
    #[must_use]
    pub fn new(mode: CellMode, color_enabled: bool) -> Self {
        let braille = match mode {
            CellMode::Braille => true,
            CellMode::Block => false,
            CellMode::Auto => utf8_locale(),
        };
        log::debug!(
            "cell painter: {} glyphs, color {}",
            if braille { "braille" } else { "half-block" },
            if color_enabled { "on" } else { "off" },
        );
        Self {
            braille,
            color: color_enabled,
        }
    }

    #[must_use]
    pub fn is_braille(&self) -> bool {
        self.braille
    }

    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Pixel resolution the given cell area provides.
    ///
    /// # Example
    /// ```
    /// use ratatui::layout::Rect;
    /// use vx_core::config::CellMode;
    /// use vx_render::cells::CellPainter;
    ///
    /// let painter = CellPainter::new(CellMode::Braille, true);
    /// assert_eq!(painter.pixel_size(Rect::new(0, 0, 10, 5)), (20, 20));
    /// ```
    #[must_use]
    pub fn pixel_size(&self, area: Rect) -> (u32, u32) {
        if self.braille {
            (u32::from(area.width) * 2, u32::from(area.height) * 4)
        } else {
            (u32::from(area.width), u32::from(area.height) * 2)
        }
    }

    /// Write the surface into the terminal buffer at `area`.
    ///
    /// Cells without a single lit pixel are left untouched, so whatever
    /// the layout painted underneath stays visible.
    pub fn blit(&self, surface: &Surface, area: Rect, buf: &mut Buffer) {
        if self.braille {
            self.blit_braille(surface, area, buf);
        } else {
            self.blit_halfblock(surface, area, buf);
        }
    }

    fn blit_braille(&self, surface: &Surface, area: Rect, buf: &mut Buffer) {
        let cols = area.width.min((surface.width / 2) as u16);
        let rows = area.height.min((surface.height / 4) as u16);
        for cy in 0..rows {
            for cx in 0..cols {
                let base_x = u32::from(cx) * 2;
                let base_y = u32::from(cy) * 4;

                let mut dots = [false; 8];
                let mut acc = (0u32, 0u32, 0u32);
                let mut lit = 0u32;
                for dy in 0..4u32 {
                    for dx in 0..2u32 {
                        let (r, g, b, a) = surface.pixel(base_x + dx, base_y + dy);
                        if a == 0 {
                            continue;
                        }
                        // Column-major dot order: left column holds
                        // dots 1,2,3,7 and the right one 4,5,6,8.
                        let dot = if dx == 0 {
                            match dy {
                                0 => 0,
                                1 => 1,
                                2 => 2,
                                _ => 6,
                            }
                        } else {
                            match dy {
                                0 => 3,
                                1 => 4,
                                2 => 5,
                                _ => 7,
                            }
                        };
                        dots[dot] = true;
                        acc.0 += u32::from(r);
                        acc.1 += u32::from(g);
                        acc.2 += u32::from(b);
                        lit += 1;
                    }
                }
                if lit == 0 {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_char(encode_braille(dots));
                    if self.color {
                        cell.set_fg(Color::Rgb(
                            (acc.0 / lit) as u8,
                            (acc.1 / lit) as u8,
                            (acc.2 / lit) as u8,
                        ));
                    }
                }
            }
        }
    }

    fn blit_halfblock(&self, surface: &Surface, area: Rect, buf: &mut Buffer) {
        let cols = area.width.min(surface.width as u16);
        let rows = area.height.min((surface.height / 2) as u16);
        for cy in 0..rows {
            for cx in 0..cols {
                let x = u32::from(cx);
                let top = surface.pixel(x, u32::from(cy) * 2);
                let bot = surface.pixel(x, u32::from(cy) * 2 + 1);
                let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) else {
                    continue;
                };
                match (top.3 > 0, bot.3 > 0) {
                    (false, false) => {}
                    (true, false) => {
                        cell.set_char('▀');
                        if self.color {
                            cell.set_fg(Color::Rgb(top.0, top.1, top.2));
                        }
                    }
                    (false, true) => {
                        cell.set_char('▄');
                        if self.color {
                            cell.set_fg(Color::Rgb(bot.0, bot.1, bot.2));
                        }
                    }
                    (true, true) => {
                        if self.color {
                            // Bottom pixel in fg, top pixel in bg.
                            cell.set_char('▄');
                            cell.set_fg(Color::Rgb(bot.0, bot.1, bot.2))
                                .set_bg(Color::Rgb(top.0, top.1, top.2));
                        } else {
                            cell.set_char('█');
                        }
                    }
                }
            }
        }
    }
}

/// Encode a 2x4 dot block into a braille character.
///
/// Dot numbering (column-major):
/// ```text
///  1 4
///  2 5
///  3 6
///  7 8
/// ```
///
/// # Example
/// ```
/// use vx_render::cells::encode_braille;
/// assert_eq!(encode_braille([false; 8]), '\u{2800}'); // empty
/// assert_eq!(encode_braille([true; 8]), '\u{28FF}'); // full
/// ```
#[must_use]
pub fn encode_braille(dots: [bool; 8]) -> char {
    // Dot n maps to bit n-1.
    let mut code = 0u32;
    for (i, &dot) in dots.iter().enumerate() {
        if dot {
            code |= 1 << i;
        }
    }
    char::from_u32(BRAILLE_BASE + code).unwrap_or(' ')
}

/// First nonempty locale variable wins, mirroring glibc lookup order.
fn utf8_locale() -> bool {
    for key in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = std::env::var(key) {
            if !value.is_empty() {
                let v = value.to_ascii_lowercase();
                return v.contains("utf-8") || v.contains("utf8");
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braille_empty_is_blank() {
        assert_eq!(encode_braille([false; 8]), '\u{2800}');
    }

    #[test]
    fn braille_full_is_solid() {
        assert_eq!(encode_braille([true; 8]), '\u{28FF}');
    }

    #[test]
    fn braille_single_dots_hit_their_bits() {
        let mut dots = [false; 8];
        dots[0] = true;
        assert_eq!(encode_braille(dots), '\u{2801}');
        let mut dots = [false; 8];
        dots[7] = true;
        assert_eq!(encode_braille(dots), '\u{2880}');
    }

    #[test]
    fn pixel_size_follows_glyph_mode() {
        let braille = CellPainter::new(CellMode::Braille, true);
        assert_eq!(braille.pixel_size(Rect::new(0, 0, 10, 5)), (20, 20));
        let block = CellPainter::new(CellMode::Block, true);
        assert_eq!(block.pixel_size(Rect::new(0, 0, 10, 5)), (10, 10));
    }

    #[test]
    fn blit_colors_only_lit_cells() {
        let painter = CellPainter::new(CellMode::Braille, true);
        let mut surface = Surface::new(2, 4);
        for y in 0..4 {
            for x in 0..2 {
                surface.set_px(x, y, (255, 0, 0));
            }
        }
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        painter.blit(&surface, Rect::new(0, 0, 2, 1), &mut buf);

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "\u{28FF}");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        // The second cell has no backing pixels and stays untouched.
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn halfblock_glyph_follows_the_lit_half() {
        let painter = CellPainter::new(CellMode::Block, true);
        let area = Rect::new(0, 0, 1, 1);

        let mut top_only = Surface::new(1, 2);
        top_only.set_px(0, 0, (0, 255, 0));
        let mut buf = Buffer::empty(area);
        painter.blit(&top_only, area, &mut buf);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "▀");

        let mut bottom_only = Surface::new(1, 2);
        bottom_only.set_px(0, 1, (0, 255, 0));
        let mut buf = Buffer::empty(area);
        painter.blit(&bottom_only, area, &mut buf);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "▄");

        let mut both = Surface::new(1, 2);
        both.set_px(0, 0, (10, 20, 30));
        both.set_px(0, 1, (40, 50, 60));
        let mut buf = Buffer::empty(area);
        painter.blit(&both, area, &mut buf);
        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "▄");
        assert_eq!(cell.fg, Color::Rgb(40, 50, 60));
        assert_eq!(cell.bg, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn colorless_painter_leaves_default_styling() {
        let painter = CellPainter::new(CellMode::Braille, false);
        let mut surface = Surface::new(2, 4);
        surface.set_px(0, 0, (255, 255, 255));
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        painter.blit(&surface, Rect::new(0, 0, 1, 1), &mut buf);

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "\u{2801}");
        assert_eq!(cell.fg, Color::Reset);
    }
}
