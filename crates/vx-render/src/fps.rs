use std::collections::VecDeque;
use std::time::Instant;

/// Sliding-window FPS counter. Zero allocation after construction.
///
/// # Example
/// ```
/// use vx_render::fps::FpsCounter;
/// let mut counter = FpsCounter::new(60);
/// assert!(counter.fps().abs() < f64::EPSILON);
/// counter.tick();
/// assert!(counter.fps() >= 0.0);
/// ```
pub struct FpsCounter {
    /// Timestamps of the last N frames.
    timestamps: VecDeque<Instant>,
    /// Number of frames to average over.
    window: usize,
    /// Computed FPS, refreshed on every tick.
    fps: f64,
}

impl FpsCounter {
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(window + 1),
            window,
            fps: 0.0,
        }
    }

    /// Call once per frame, after the draw.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.timestamps.push_back(now);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
        if self.timestamps.len() >= 2 {
            let first = self.timestamps.front().copied().unwrap_or(now);
            let secs = now.duration_since(first).as_secs_f64();
            if secs > 0.0 {
                self.fps = (self.timestamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// Average FPS over the window, 0.0 until two frames have passed.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}
