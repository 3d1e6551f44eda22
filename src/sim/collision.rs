//! Landing detection against horizontal surfaces
//!
//! Platforms and a teammate's head are both reduced to a [`Surface`]: a
//! center point, a horizontal half-extent and the height of the walkable top
//! above the center. There is no horizontal collision at all.

use glam::Vec2;

use crate::consts::STANDING_TOLERANCE;

/// Something a player can land on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    /// Walkable top sits this far above `y`
    pub clearance: f32,
}

impl Surface {
    /// Height a landing body is clamped to
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.clearance
    }

    /// Whether `x` lies strictly inside the horizontal extent
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        (x - self.x).abs() < self.half_width
    }

    /// Whether a body at `pos` falling to `candidate_y` this tick lands here.
    ///
    /// The body must start at or above the surface center, so something
    /// already below a platform passes through it on the way up.
    pub fn catches(&self, pos: Vec2, candidate_y: f32) -> bool {
        self.spans(pos.x) && pos.y >= self.y && candidate_y <= self.top()
    }

    /// Whether a body at `pos` is resting on this surface (can jump off it)
    pub fn supports(&self, pos: Vec2) -> bool {
        self.spans(pos.x) && (pos.y - self.top()).abs() < STANDING_TOLERANCE
    }
}

/// Resolve a fall against a set of surfaces.
///
/// Returns the landing height if any surface catches the body. When several
/// do, the highest top wins so the result never depends on iteration order.
pub fn landing_height(
    pos: Vec2,
    candidate_y: f32,
    surfaces: impl IntoIterator<Item = Surface>,
) -> Option<f32> {
    surfaces
        .into_iter()
        .filter(|s| s.catches(pos, candidate_y))
        .map(|s| s.top())
        .reduce(f32::max)
}
