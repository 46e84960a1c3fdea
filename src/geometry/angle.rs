use egui::{Pos2, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_1_SQRT_2;

/// The eight directions a line segment may take, by increasing angle from +x.
///
/// World space is y-down like the canvas, so `North` is +y and points down
/// on screen; angles grow clockwise as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Nearest permitted direction for an angle in degrees (any range).
    ///
    /// Rounds `angle / 45` to the nearest integer, so 360° wraps back to east.
    pub fn nearest(angle_degrees: f32) -> Self {
        let normalized = angle_degrees.rem_euclid(360.0);
        let step = (normalized / 45.0).round() as usize % 8;
        Self::ALL[step]
    }

    pub fn degrees(self) -> f32 {
        match self {
            Direction::East => 0.0,
            Direction::NorthEast => 45.0,
            Direction::North => 90.0,
            Direction::NorthWest => 135.0,
            Direction::West => 180.0,
            Direction::SouthWest => 225.0,
            Direction::South => 270.0,
            Direction::SouthEast => 315.0,
        }
    }

    pub fn unit_vector(self) -> Vec2 {
        match self {
            Direction::East => vec2(1.0, 0.0),
            Direction::NorthEast => vec2(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            Direction::North => vec2(0.0, 1.0),
            Direction::NorthWest => vec2(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            Direction::West => vec2(-1.0, 0.0),
            Direction::SouthWest => vec2(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            Direction::South => vec2(0.0, -1.0),
            Direction::SouthEast => vec2(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        }
    }
}

/// Rotates the segment `last -> cursor` onto the nearest permitted direction,
/// keeping its length.
pub fn constrain_to_angles(last: Pos2, cursor: Pos2) -> Pos2 {
    let delta = cursor - last;
    let distance = delta.length();
    let angle = delta.y.atan2(delta.x).to_degrees();

    last + Direction::nearest(angle).unit_vector() * distance
}

/// The drawable area of the diagram, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn clamp(&self, point: Pos2) -> Pos2 {
        pos2(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    pub fn contains(&self, point: Pos2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Clamps into the world, then rounds each coordinate to the nearest grid multiple.
pub fn snap_to_grid(point: Pos2, bounds: WorldBounds, grid_size: f32) -> Pos2 {
    let clamped = bounds.clamp(point);
    if grid_size <= 0.0 {
        return clamped;
    }

    // Rounding up past a bound that is not a grid multiple falls back one cell.
    let snap_axis = |value: f32, bound: f32| {
        let snapped = (value / grid_size).round() * grid_size;
        if snapped > bound { snapped - grid_size } else { snapped }
    };

    pos2(
        snap_axis(clamped.x, bounds.width),
        snap_axis(clamped.y, bounds.height),
    )
}

/// Angle constraint followed by the optional grid snap.
///
/// Pure: the same inputs always give the same point, so it serves both the
/// committed point and the ghost preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleConstraint {
    pub bounds: WorldBounds,
    pub grid_size: Option<f32>,
}

impl Default for AngleConstraint {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::default(),
            grid_size: Some(20.0),
        }
    }
}

impl AngleConstraint {
    pub fn new(bounds: WorldBounds, grid_size: Option<f32>) -> Self {
        Self { bounds, grid_size }
    }

    /// Next point of a polyline whose last committed point is `last`
    pub fn apply(&self, last: Pos2, cursor: Pos2) -> Pos2 {
        self.snap(constrain_to_angles(last, cursor))
    }

    /// Grid snap only, used for the first point of a line
    pub fn snap(&self, point: Pos2) -> Pos2 {
        match self.grid_size {
            Some(grid_size) => snap_to_grid(point, self.bounds, grid_size),
            None => point,
        }
    }
}
