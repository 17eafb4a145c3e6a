/// Reusable RGBA pixel surface for the gauge and bar rasterizers.
///
/// Stores pixels RGBA row-major, 4 bytes per pixel. Alpha 0 marks an
/// unlit pixel, which lets the cell painter leave the terminal
/// background alone.
///
/// # Example
/// ```
/// use vx_render::surface::Surface;
/// let s = Surface::new(10, 10);
/// assert_eq!(s.pixel(0, 0), (0, 0, 0, 0));
/// ```
pub struct Surface {
    /// Pixels RGBA, row-major, 4 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Surface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 4) as usize],
            width,
            height,
        }
    }

    /// Sync the surface to the given dimensions and wipe it blank.
    ///
    /// Reallocates only when the dimensions actually changed, so calling
    /// this at the top of every draw is cheap.
    ///
    /// # Example
    /// ```
    /// use vx_render::surface::Surface;
    /// let mut s = Surface::new(4, 4);
    /// s.set_px(0, 0, (255, 0, 0));
    /// s.resize(4, 4);
    /// assert_eq!(s.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.data = vec![0u8; (width * height * 4) as usize];
        } else {
            self.clear();
        }
    }

    /// Wipe every pixel back to unlit.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Light the pixel (x, y) with an opaque color. Out-of-range
    /// coordinates are ignored, so edge rounding in the rasterizers
    /// never writes past the buffer.
    #[inline(always)]
    pub fn set_px(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.data[idx] = rgb.0;
        self.data[idx + 1] = rgb.1;
        self.data[idx + 2] = rgb.2;
        self.data[idx + 3] = 255;
    }

    /// Read pixel (x, y) as (r, g, b, a). Out-of-range reads come back
    /// blank.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Halve the color of every lit pixel. Used to gray the last frame
    /// out while the trainer is idle.
    ///
    /// # Example
    /// ```
    /// use vx_render::surface::Surface;
    /// let mut s = Surface::new(2, 2);
    /// s.set_px(1, 1, (200, 100, 50));
    /// s.dim();
    /// assert_eq!(s.pixel(1, 1), (100, 50, 25, 255));
    /// ```
    pub fn dim(&mut self) {
        for px in self.data.chunks_exact_mut(4) {
            if px[3] > 0 {
                px[0] /= 2;
                px[1] /= 2;
                px[2] /= 2;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_read_back() {
        let mut s = Surface::new(8, 8);
        s.set_px(3, 5, (10, 20, 30));
        assert_eq!(s.pixel(3, 5), (10, 20, 30, 255));
        assert_eq!(s.pixel(3, 4), (0, 0, 0, 0));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut s = Surface::new(4, 4);
        s.set_px(4, 0, (255, 255, 255));
        s.set_px(0, 4, (255, 255, 255));
        assert!(s.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn resize_to_new_dimensions_reallocates() {
        let mut s = Surface::new(4, 4);
        s.resize(10, 2);
        assert_eq!(s.width, 10);
        assert_eq!(s.height, 2);
        assert_eq!(s.data.len(), 10 * 2 * 4);
    }

    #[test]
    fn resize_to_same_dimensions_clears() {
        let mut s = Surface::new(4, 4);
        s.set_px(1, 1, (9, 9, 9));
        s.resize(4, 4);
        assert_eq!(s.pixel(1, 1), (0, 0, 0, 0));
    }

    #[test]
    fn dim_leaves_unlit_pixels_alone() {
        let mut s = Surface::new(2, 1);
        s.set_px(0, 0, (100, 100, 100));
        s.dim();
        assert_eq!(s.pixel(0, 0), (50, 50, 50, 255));
        assert_eq!(s.pixel(1, 0), (0, 0, 0, 0));
    }
}
