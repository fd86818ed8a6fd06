// Overlay window + software compositing.
// Visual effects provided here:
// 1) A borderless, see-through, always-on-top window that shows the cat.
// 2) Alpha-blended sprites (background, paws, mouse).
// 3) Outline shapes for missing sprites and the debug overlay.

use crate::error::Error;
use crate::session::OverlayEvent;
use crate::sprites::{Sprite, SpriteSlot};
use crate::types::{FrameBuffer, Point, Quad};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::warn;

pub struct Drawer {
    window: Window, // the overlay window on the desktop
}

impl Drawer {
    /// Open the overlay window. If the platform refuses the overlay flags we
    /// still open a plain window so the cat is visible at all.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, Error> {
        let overlay = WindowOptions {
            borderless: true,
            transparency: true,
            topmost: true,
            ..WindowOptions::default()
        };
        let mut window = match Window::new(title, width, height, overlay) {
            Ok(window) => window,
            Err(e) => {
                warn!("overlay window options rejected ({e}); falling back to a regular window");
                Window::new(title, width, height, WindowOptions::default())
                    .map_err(|e| Error::WindowInit(e.to_string()))?
            }
        };
        window.set_target_fps(target_fps);
        Ok(Self { window })
    }

    /// Push the composited frame. This is also where minifb paces the loop
    /// and refreshes keyboard state.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Window-level events since the last present.
    pub fn poll_events(&self) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() {
            events.push(OverlayEvent::CloseRequested);
        }
        if self.window.is_key_down(Key::Escape) {
            events.push(OverlayEvent::EscapePressed);
        }
        if self.window.is_key_pressed(Key::D, KeyRepeat::No) {
            events.push(OverlayEvent::ToggleDebug);
        }
        events
    }
}

/* ---------- Pixel helpers ---------- */

#[inline]
fn argb(a: u32, r: u32, g: u32, b: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if let Some(idx) = fb.index(x, y) {
        fb.pixels[idx] = color;
    }
}

/// Source-over blend of one straight-alpha RGBA pixel onto an ARGB pixel.
#[inline]
fn blend_over(dst: u32, [r, g, b, a]: [u8; 4]) -> u32 {
    let sa = a as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return argb(255, r as u32, g as u32, b as u32);
    }

    let da = dst >> 24;
    let inv = 255 - sa;
    // alpha in 0..=255 scale, times 255 to keep precision
    let out_a255 = sa * 255 + da * inv;
    if out_a255 == 0 {
        return 0;
    }
    let mix = |sc: u8, shift: u32| {
        let dc = (dst >> shift) & 0xFF;
        (sc as u32 * sa * 255 + dc * da * inv) / out_a255
    };
    argb(out_a255 / 255, mix(r, 16), mix(g, 8), mix(b, 0))
}

/// Blit a sprite with its top-left corner at (x,y), clipped to the frame.
pub fn blit(fb: &mut FrameBuffer, sprite: &Sprite, x: i32, y: i32) {
    for sy in 0..sprite.height {
        let dy = y + sy as i32;
        if dy < 0 || dy as usize >= fb.height {
            continue;
        }
        let row = &sprite.rgba[sy * sprite.width..(sy + 1) * sprite.width];
        for (sx, px) in row.iter().enumerate() {
            if let Some(idx) = fb.index(x + sx as i32, dy) {
                fb.pixels[idx] = blend_over(fb.pixels[idx], *px);
            }
        }
    }
}

/// Blit a sprite centered on (cx,cy).
pub fn blit_centered(fb: &mut FrameBuffer, sprite: &Sprite, cx: i32, cy: i32) {
    blit(fb, sprite, cx - sprite.width as i32 / 2, cy - sprite.height as i32 / 2);
}

/// Draw a sprite slot at its top-left corner, or a rectangle outline of
/// `fallback` size when the sprite never loaded.
pub fn draw_slot(fb: &mut FrameBuffer, slot: &SpriteSlot, x: i32, y: i32, fallback: (i32, i32), color: u32) {
    match slot {
        SpriteSlot::Loaded(sprite) => blit(fb, sprite, x, y),
        SpriteSlot::Missing => draw_rect_outline(fb, x, y, fallback.0, fallback.1, color),
    }
}

/// Same as [`draw_slot`] but centered, and a circle when missing.
pub fn draw_slot_centered(fb: &mut FrameBuffer, slot: &SpriteSlot, cx: i32, cy: i32, fallback_radius: i32, color: u32) {
    match slot {
        SpriteSlot::Loaded(sprite) => blit_centered(fb, sprite, cx, cy),
        SpriteSlot::Missing => draw_circle_outline(fb, cx, cy, fallback_radius, color),
    }
}

/* ---------- Outline shapes ---------- */

/// Bresenham line between (x0,y0) and (x1,y1).
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x, y, color);
        if x == x1 && y == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x += sx; }
        if e2 <= dx { err += dx; y += sy; }
    }
}

pub fn draw_rect_outline(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (x1, y1) = (x + w - 1, y + h - 1);
    draw_line(fb, x, y, x1, y, color);
    draw_line(fb, x1, y, x1, y1, color);
    draw_line(fb, x1, y1, x, y1, color);
    draw_line(fb, x, y1, x, y, color);
}

/// Midpoint circle outline.
pub fn draw_circle_outline(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let (mut x, mut y) = (radius, 0);
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + px, cy + py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Small "+" marker centered at (cx,cy).
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy + size, color);
}

pub fn draw_quad_outline(fb: &mut FrameBuffer, quad: &Quad, color: u32) {
    for (a, b) in quad.edges() {
        let ((x0, y0), (x1, y1)) = (a.to_pixel(), b.to_pixel());
        draw_line(fb, x0, y0, x1, y1, color);
    }
}

pub fn draw_marker(fb: &mut FrameBuffer, at: Point, color: u32) {
    let (x, y) = at.to_pixel();
    draw_crosshair(fb, x, y, 6, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TRANSPARENT;

    const RED: u32 = 0xFF_FF_00_00;

    fn sprite(w: usize, h: usize, px: [u8; 4]) -> Sprite {
        Sprite { width: w, height: h, rgba: vec![px; w * h] }
    }

    #[test]
    fn opaque_pixels_overwrite() {
        let mut fb = FrameBuffer::new(4, 4);
        blit(&mut fb, &sprite(2, 2, [0x11, 0x22, 0x33, 255]), 1, 1);
        assert_eq!(fb.pixels[5], 0xFF_11_22_33);
        assert_eq!(fb.pixels[10], 0xFF_11_22_33);
        assert_eq!(fb.pixels[0], TRANSPARENT);
        assert_eq!(fb.pixels[15], TRANSPARENT);
    }

    #[test]
    fn transparent_pixels_leave_destination() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.pixels.fill(RED);
        blit(&mut fb, &sprite(2, 2, [0, 0, 255, 0]), 0, 0);
        assert!(fb.pixels.iter().all(|&p| p == RED));
    }

    #[test]
    fn half_alpha_mixes_over_opaque() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.pixels[0] = 0xFF_00_00_00;
        blit(&mut fb, &sprite(1, 1, [255, 255, 255, 128]), 0, 0);
        let px = fb.pixels[0];
        assert_eq!(px >> 24, 255);
        let r = (px >> 16) & 0xFF;
        assert!((127..=129).contains(&r), "r = {r}");
    }

    #[test]
    fn half_alpha_over_transparent_keeps_color() {
        let mut fb = FrameBuffer::new(1, 1);
        blit(&mut fb, &sprite(1, 1, [200, 100, 50, 128]), 0, 0);
        assert_eq!(fb.pixels[0], argb(128, 200, 100, 50));
    }

    #[test]
    fn blit_clips_at_edges() {
        let mut fb = FrameBuffer::new(3, 3);
        blit(&mut fb, &sprite(4, 4, [1, 2, 3, 255]), -2, 1);
        let covered = fb.pixels.iter().filter(|&&p| p != TRANSPARENT).count();
        assert_eq!(covered, 2 * 2);
        blit(&mut fb, &sprite(2, 2, [1, 2, 3, 255]), 50, -50);
    }

    #[test]
    fn centered_blit_uses_sprite_middle() {
        let mut fb = FrameBuffer::new(5, 5);
        blit_centered(&mut fb, &sprite(3, 3, [9, 9, 9, 255]), 2, 2);
        assert_eq!(fb.pixels[0], TRANSPARENT);
        assert_ne!(fb.pixels[6], TRANSPARENT);
        assert_ne!(fb.pixels[18], TRANSPARENT);
        assert_eq!(fb.pixels[24], TRANSPARENT);
    }

    #[test]
    fn missing_slot_draws_rectangle_outline() {
        let mut fb = FrameBuffer::new(6, 6);
        draw_slot(&mut fb, &SpriteSlot::Missing, 1, 1, (4, 4), RED);
        assert_eq!(fb.pixels[1 * 6 + 1], RED);
        assert_eq!(fb.pixels[4 * 6 + 4], RED);
        // hollow
        assert_eq!(fb.pixels[2 * 6 + 2], TRANSPARENT);
    }

    #[test]
    fn missing_slot_centered_draws_circle() {
        let mut fb = FrameBuffer::new(11, 11);
        draw_slot_centered(&mut fb, &SpriteSlot::Missing, 5, 5, 4, RED);
        assert_eq!(fb.pixels[5 * 11 + 9], RED);
        assert_eq!(fb.pixels[1 * 11 + 5], RED);
        assert_eq!(fb.pixels[5 * 11 + 5], TRANSPARENT);
    }

    #[test]
    fn quad_outline_touches_every_corner() {
        let mut fb = FrameBuffer::new(20, 20);
        let quad = Quad::from_pixels([(2, 2), (17, 3), (15, 16), (1, 14)]);
        draw_quad_outline(&mut fb, &quad, RED);
        for (x, y) in [(2, 2), (17, 3), (15, 16), (1, 14)] {
            assert_eq!(fb.pixels[y * 20 + x], RED);
        }
    }
}
