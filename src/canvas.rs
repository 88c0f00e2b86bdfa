use std::io;

use crate::geometry::{GridSize, Point};
use crate::hal::PixelDisplay;

/// Row-major buffer of on/off pixels. Writes only touch the buffer; the display sees
/// them on the next [`Canvas::flush`].
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    size: GridSize,
    pixels: Vec<bool>,
}

impl Canvas {
    pub fn new(size: GridSize) -> Self {
        Canvas {
            size,
            pixels: vec![false; size.cells()],
        }
    }

    fn offset(&self, point: Point) -> usize {
        debug_assert!(
            self.size.contains(point),
            "pixel {point:?} outside {:?}",
            self.size
        );
        point.y as usize * self.size.columns as usize + point.x as usize
    }

    pub fn set_pixel(&mut self, point: Point, on: bool) {
        let offset = self.offset(point);
        self.pixels[offset] = on;
    }

    pub fn get_pixel(&self, point: Point) -> bool {
        self.pixels[self.offset(point)]
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Lights or clears a whole row.
    pub fn fill_row(&mut self, row: u16, on: bool) {
        let start = self.offset(Point::new(0, row));
        let end = start + self.size.columns as usize;
        self.pixels[start..end].fill(on);
    }

    pub fn flush(&self, display: &mut impl PixelDisplay) -> io::Result<()> {
        display.show(self)
    }

    pub fn rows(&self) -> u16 {
        self.size.rows
    }

    pub fn columns(&self) -> u16 {
        self.size.columns
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|on| **on).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDisplay;

    fn canvas() -> Canvas {
        Canvas::new(GridSize {
            columns: 4,
            rows: 3,
        })
    }

    #[test]
    fn test_set_and_clear() {
        let mut canvas = canvas();
        canvas.set_pixel(Point::new(3, 2), true);
        canvas.set_pixel(Point::new(0, 1), true);
        assert!(canvas.get_pixel(Point::new(3, 2)));
        assert!(!canvas.get_pixel(Point::new(2, 2)));
        assert_eq!(canvas.lit_count(), 2);

        canvas.set_pixel(Point::new(0, 1), false);
        assert_eq!(canvas.lit_count(), 1);

        canvas.clear();
        assert_eq!(canvas.lit_count(), 0);
    }

    #[test]
    fn test_writes_are_deferred_until_flush() {
        let mut canvas = canvas();
        let mut display = RecordingDisplay::default();

        canvas.set_pixel(Point::new(1, 1), true);
        assert!(display.frames.is_empty());

        canvas.flush(&mut display).unwrap();
        assert_eq!(display.frames.len(), 1);
        assert!(display.last().get_pixel(Point::new(1, 1)));

        canvas.clear();
        assert!(display.last().get_pixel(Point::new(1, 1)));
    }

    #[test]
    fn test_fill_row() {
        let mut canvas = canvas();
        canvas.fill_row(1, true);
        assert_eq!(canvas.lit_count(), 4);
        assert!((0..4).all(|x| canvas.get_pixel(Point::new(x, 1))));
        assert!(!canvas.get_pixel(Point::new(0, 0)));
        canvas.fill_row(1, false);
        assert_eq!(canvas.lit_count(), 0);
    }

    #[test]
    fn test_dimensions() {
        let canvas = canvas();
        assert_eq!(canvas.columns(), 4);
        assert_eq!(canvas.rows(), 3);
    }
}
