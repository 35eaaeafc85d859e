//! Court coordinate system
//!
//! Every recorded location is a percentage of the rendered court:
//! - X: 0 = left edge, 100 = right edge
//! - Y: 0 = top edge (away back line side), 100 = bottom edge (home side)
//!
//! The playable rectangle is inset from the rendering, so a ball can land
//! "out" and still be representable.

use serde::{Deserialize, Serialize};

use super::events::{ActionType, TeamSide};

/// Upper bound of both axes.
pub const COORD_MAX: f64 = 100.0;

/// Playable court bounds (inclusive) in percent.
pub mod bounds {
    pub const MIN_X: f64 = 10.0;
    pub const MAX_X: f64 = 90.0;
    pub const MIN_Y: f64 = 5.0;
    pub const MAX_Y: f64 = 95.0;
}

/// Court-relative position, both axes in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Build a coordinate, clamping each axis into [0, 100].
    ///
    /// Non-finite input collapses to 0 on that axis.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: clamp_axis(x), y: clamp_axis(y) }
    }

    /// Mirror across the net (both axes), used for the away half.
    pub fn mirrored(self) -> Self {
        Self { x: COORD_MAX - self.x, y: COORD_MAX - self.y }
    }

    /// Finite and within [0, 100] on both axes.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (0.0..=COORD_MAX).contains(&self.x)
            && (0.0..=COORD_MAX).contains(&self.y)
    }
}

/// Pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

/// Bounding box of the rendered court in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

fn clamp_axis(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, COORD_MAX)
    } else {
        0.0
    }
}

fn scale_axis(pos: f64, origin: f64, extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 {
        return 0.0;
    }
    clamp_axis((pos - origin) / extent * COORD_MAX)
}

/// Map a raw pointer position into court percent, clamped at both ends.
pub fn normalize(raw: RawPoint, container: ContainerBounds) -> Coordinate {
    Coordinate {
        x: scale_axis(raw.x, container.left, container.width),
        y: scale_axis(raw.y, container.top, container.height),
    }
}

/// True when the point lies inside the playable rectangle (edges count as in).
pub fn is_inside_court(c: Coordinate) -> bool {
    c.x >= bounds::MIN_X && c.x <= bounds::MAX_X && c.y >= bounds::MIN_Y && c.y <= bounds::MAX_Y
}

/// Where a shot path starts when the operator skips picking a location.
///
/// Values are expressed for the home half; the away side gets the mirror image.
pub fn default_start_coordinate(action: ActionType, side: TeamSide) -> Coordinate {
    let (x, y) = match action {
        ActionType::Serve => (80.0, 98.0),
        ActionType::Attack => (20.0, 65.0),
        ActionType::Set => (65.0, 55.0),
        ActionType::Receive | ActionType::Dig => (50.0, 85.0),
        ActionType::Block | ActionType::Substitution => (50.0, 75.0),
    };

    let home = Coordinate { x, y };
    match side {
        TeamSide::Home => home,
        TeamSide::Away => home.mirrored(),
    }
}
