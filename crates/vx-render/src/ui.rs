use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use vx_core::color;
use vx_core::frame::{GaugeState, SpectrumFrame, TickReading};
use vx_core::mode::Mode;

use crate::cells::CellPainter;
use crate::fps::FpsCounter;
use crate::gauge;
use crate::spectrum;
use crate::surface::Surface;

/// Accuracy gauge full-scale value.
const ACCURACY_GAUGE_MAX: f32 = 100.0;

/// Frequency gauge full scale, 10 kHz.
const FREQUENCY_GAUGE_MAX_HZ: f32 = 10_000.0;

/// Everything the draw needs from the application for one frame.
pub struct SessionView<'a> {
    pub mode: Mode,
    pub running: bool,
    pub reading: TickReading,
    pub spectrum: &'a SpectrumFrame,
    /// Latest recognized line, empty when recognition is off.
    pub transcript: &'a str,
}

/// Full-screen layout: header, gauge pair, transcript line, spectrum
/// strip, key-hint footer.
///
/// Owns the cell painter and two scratch surfaces so the per-frame
/// rasterization never allocates once the terminal size settles.
pub struct Ui {
    painter: CellPainter,
    gauge_surface: Surface,
    bars_surface: Surface,
}

impl Ui {
    #[must_use]
    pub fn new(painter: CellPainter) -> Self {
        Self {
            painter,
            gauge_surface: Surface::new(0, 0),
            bars_surface: Surface::new(0, 0),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, view: &SessionView, fps: &FpsCounter) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.draw_header(frame, rows[0], view);
        self.draw_gauges(frame, rows[1], view);
        self.draw_transcript(frame, rows[2], view);
        self.draw_spectrum_strip(frame, rows[3], view);
        self.draw_footer(frame, rows[4], fps);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, view: &SessionView) {
        let (badge, badge_style) = if view.running {
            ("▶ RUN", self.rgb_style(color::OK))
        } else {
            ("⏸ IDLE", self.faint_style())
        };
        let reading = view.reading;
        let readout_style = if reading.over_limit {
            self.rgb_style(color::ALERT)
        } else {
            Style::default()
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(badge, badge_style),
            Span::raw("  "),
            Span::raw(view.mode.label()),
            Span::raw("   "),
            Span::styled(format!("{:>3}%", reading.score), readout_style),
            Span::raw("  "),
            Span::styled(format!("{:>5} Hz", reading.average_hz), readout_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_gauges(&mut self, frame: &mut Frame, area: Rect, view: &SessionView) {
        let halves =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
        let reading = view.reading;

        let accuracy_color = if reading.over_limit {
            color::ALERT
        } else {
            color::OK
        };
        let accuracy = GaugeState::new(
            f32::from(reading.score),
            ACCURACY_GAUGE_MAX,
            accuracy_color,
        );
        self.draw_gauge_panel(frame, halves[0], " Accuracy ", &accuracy, view.running);

        let frequency = GaugeState::new(
            reading.average_hz as f32,
            FREQUENCY_GAUGE_MAX_HZ,
            color::FREQUENCY,
        );
        self.draw_gauge_panel(frame, halves[1], " Frequency ", &frequency, view.running);
    }

    fn draw_gauge_panel(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        state: &GaugeState,
        running: bool,
    ) {
        let block = Block::default().borders(Borders::TOP).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let (pw, ph) = self.painter.pixel_size(inner);
        gauge::draw_gauge(&mut self.gauge_surface, pw, ph, state);
        if !running {
            self.gauge_surface.dim();
        }
        self.painter.blit(&self.gauge_surface, inner, frame.buffer_mut());
    }

    fn draw_transcript(&self, frame: &mut Frame, area: Rect, view: &SessionView) {
        if view.transcript.is_empty() {
            return;
        }
        let style = if view.reading.over_limit {
            self.rgb_style(color::ALERT)
        } else {
            Style::default()
        };
        let line = Line::from(Span::styled(view.transcript, style)).centered();
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_spectrum_strip(&mut self, frame: &mut Frame, area: Rect, view: &SessionView) {
        let block = Block::default().borders(Borders::TOP).title(" Spectrum ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let (pw, ph) = self.painter.pixel_size(inner);
        spectrum::draw_bars(
            &mut self.bars_surface,
            pw,
            ph,
            view.spectrum,
            view.reading.over_limit,
            self.painter.is_braille(),
        );
        if !view.running {
            self.bars_surface.dim();
        }
        self.painter.blit(&self.bars_surface, inner, frame.buffer_mut());
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, fps: &FpsCounter) {
        let fps_str = format!("{:.0} FPS ", fps.fps());
        let fps_len = fps_str.len() as u16;
        let cols =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(fps_len)]).split(area);

        let hints = Span::styled(
            " space start/stop   1/2/3 tab mode   q quit",
            self.faint_style(),
        );
        frame.render_widget(Paragraph::new(Line::from(hints)), cols[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(fps_str, self.faint_style()))),
            cols[1],
        );
    }

    fn rgb_style(&self, rgb: (u8, u8, u8)) -> Style {
        if self.painter.color_enabled() {
            Style::default().fg(Color::Rgb(rgb.0, rgb.1, rgb.2))
        } else {
            Style::default()
        }
    }

    fn faint_style(&self) -> Style {
        if self.painter.color_enabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        }
    }
}
