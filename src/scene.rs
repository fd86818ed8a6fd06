// Builds one overlay frame from the sprites and the current pose.
// Draw order: background -> keyboard paw -> mouse paw -> mouse -> debug shapes.

use crate::animation::{PawPosture, Pose};
use crate::config::Config;
use crate::draw::{blit, draw_circle_outline, draw_marker, draw_quad_outline, draw_slot, draw_slot_centered};
use crate::sprites::SpriteSet;
use crate::types::FrameBuffer;

const PLACEHOLDER: u32 = 0xFF_FF_40_40; // red outline where a sprite is missing
const DEBUG_MAT: u32 = 0xFF_40_FF_40;
const DEBUG_ANCHOR: u32 = 0xFF_40_A0_FF;
const DEBUG_REACH: u32 = 0xFF_FF_D0_40;

const PAW_PLACEHOLDER: (i32, i32) = (80, 60);
const RIGHT_PAW_RADIUS: i32 = 20;
const MOUSE_RADIUS: i32 = 10;

pub fn compose(fb: &mut FrameBuffer, sprites: &SpriteSet, pose: &Pose, config: &Config, debug_overlay: bool) {
    fb.clear();

    blit(fb, &sprites.background, 0, 0);

    let left = match pose.left {
        PawPosture::Pressed => &sprites.left_down,
        PawPosture::Raised => &sprites.left_up,
    };
    let (lx, ly) = config.left_anchor.to_pixel();
    draw_slot(fb, left, lx, ly, PAW_PLACEHOLDER, PLACEHOLDER);

    let (rx, ry) = pose.right_paw;
    draw_slot_centered(fb, &sprites.right, rx, ry, RIGHT_PAW_RADIUS, PLACEHOLDER);

    let (mx, my) = pose.pointer;
    draw_slot_centered(fb, &sprites.mouse, mx, my, MOUSE_RADIUS, PLACEHOLDER);

    if debug_overlay {
        draw_quad_outline(fb, &config.mat, DEBUG_MAT);
        draw_marker(fb, config.right_anchor, DEBUG_ANCHOR);
        draw_marker(fb, config.left_anchor, DEBUG_ANCHOR);
        let (ax, ay) = config.right_anchor.to_pixel();
        draw_circle_outline(fb, ax, ay, config.max_reach.round() as i32, DEBUG_REACH);
    }
}
