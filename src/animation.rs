// Per-frame paw posture and positions.
// Visual: the keyboard paw slaps down while any key is held, the mouse paw
// reaches toward the little mouse on the mat.

use crate::config::Config;
use crate::geometry::{limit_reach, map_to_mat};
use crate::input::InputSnapshot;
use crate::types::{DisplaySize, Point, Quad};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PawPosture {
    Raised,  // no key held: `up.png`
    Pressed, // at least one key held: `left.png`
}

impl PawPosture {
    pub fn from_keys_held(keys_held: usize) -> Self {
        if keys_held > 0 { Self::Pressed } else { Self::Raised }
    }
}

/// Where everything goes this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub left: PawPosture,
    /// Mouse sprite center, on the mat.
    pub pointer: (i32, i32),
    /// Right paw sprite center, clamped to reach.
    pub right_paw: (i32, i32),
}

pub struct AnimationState {
    mat: Quad,
    display: DisplaySize,
    right_anchor: Point,
    max_reach: f32,
    posture: PawPosture,
}

impl AnimationState {
    pub fn new(config: &Config, display: DisplaySize) -> Self {
        Self {
            mat: config.mat,
            display,
            right_anchor: config.right_anchor,
            max_reach: config.max_reach,
            posture: PawPosture::Raised,
        }
    }

    pub fn posture(&self) -> PawPosture {
        self.posture
    }

    /// Recompute the pose from the latest input.
    pub fn update(&mut self, input: &InputSnapshot) -> Pose {
        let posture = PawPosture::from_keys_held(input.keys_held);
        if posture != self.posture {
            debug!(?posture, keys_held = input.keys_held, "keyboard paw");
            self.posture = posture;
        }

        let on_mat = map_to_mat(input.pointer, self.display, &self.mat);
        Pose {
            left: posture,
            pointer: on_mat.to_pixel(),
            right_paw: limit_reach(self.right_anchor, on_mat, self.max_reach),
        }
    }
}
