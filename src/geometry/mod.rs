//! Pure geometry used by every tool: proximity tests, projections and the
//! angle/grid constraints applied while drawing.

pub mod angle;
pub mod hit_testing;

pub use angle::{AngleConstraint, Direction, WorldBounds, constrain_to_angles, snap_to_grid};
pub use hit_testing::{
    centroid, closest_point_across_polylines, closest_point_on_polyline, closest_point_on_segment,
    distance_to_segment, is_point_near_polyline, normalize,
};
