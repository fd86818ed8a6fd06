// Core types shared by the mapper, the animation state and the renderer.

/// Fully transparent pixel; the overlay window shows the desktop through it.
pub const TRANSPARENT: u32 = 0x00_00_00_00;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // overlay width in pixels
    pub height: usize,     // overlay height in pixels
    pub pixels: Vec<u32>,  // each entry is 0xAARRGGBB for minifb (alpha 0 = see-through)
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![TRANSPARENT; width * height] }
    }

    /// Reset every pixel to transparent before compositing a new frame.
    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

/// A point in output-image (overlay) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pixel position (rounded to nearest).
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// The four corners of the mat, clockwise starting at the top-left one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    pub fn from_pixels(corners: [(i32, i32); 4]) -> Self {
        Self { corners: corners.map(Point::from) }
    }

    /// Corner pairs in drawing order: P0-P1, P1-P2, P2-P3, P3-P0.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let c = self.corners;
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }
}

/// Raw display size used to normalize pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}
