use egui::{Pos2, Vec2};

/// Closest point to `point` on the segment `a`-`b`.
///
/// A zero-length segment collapses to `a`.
pub fn closest_point_on_segment(point: Pos2, a: Pos2, b: Pos2) -> Pos2 {
    let segment = b - a;
    let len_sq = segment.length_sq();
    if len_sq == 0.0 {
        return a;
    }

    let t = ((point - a).dot(segment) / len_sq).clamp(0.0, 1.0);
    a + segment * t
}

/// Distance from `point` to the segment `a`-`b`
pub fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    point.distance(closest_point_on_segment(point, a, b))
}

/// True if any segment of the polyline passes strictly closer than `threshold`.
///
/// Polylines with fewer than two points have no segments and are never near.
pub fn is_point_near_polyline(point: Pos2, coords: &[Pos2], threshold: f32) -> bool {
    coords
        .windows(2)
        .any(|segment| distance_to_segment(point, segment[0], segment[1]) < threshold)
}

/// Projection of `point` onto the nearest segment of the polyline.
///
/// Returns `point` unchanged when there is no segment to project onto.
pub fn closest_point_on_polyline(point: Pos2, coords: &[Pos2]) -> Pos2 {
    let mut closest = point;
    let mut min_distance = f32::INFINITY;

    for segment in coords.windows(2) {
        let candidate = closest_point_on_segment(point, segment[0], segment[1]);
        let distance = point.distance(candidate);
        if distance < min_distance {
            min_distance = distance;
            closest = candidate;
        }
    }

    closest
}

/// Nearest projection of `point` across several polylines, or `point` itself
/// when there is nothing to project onto.
pub fn closest_point_across_polylines<'a, I>(point: Pos2, polylines: I) -> Pos2
where
    I: IntoIterator<Item = &'a [Pos2]>,
{
    let mut closest = point;
    let mut min_distance = f32::INFINITY;

    for coords in polylines {
        if coords.len() < 2 {
            continue;
        }
        let candidate = closest_point_on_polyline(point, coords);
        let distance = point.distance(candidate);
        if distance < min_distance {
            min_distance = distance;
            closest = candidate;
        }
    }

    closest
}

/// Arithmetic mean of the points, `None` for an empty slice
pub fn centroid(points: &[Pos2]) -> Option<Pos2> {
    if points.is_empty() {
        return None;
    }

    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, point| acc + point.to_vec2());
    Some((sum / points.len() as f32).to_pos2())
}

/// Unit vector in the direction of `vector`; the zero vector stays zero
pub fn normalize(vector: Vec2) -> Vec2 {
    let length = vector.length();
    if length == 0.0 {
        Vec2::ZERO
    } else {
        vector / length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn degenerate_segment_measures_to_endpoint() {
        let a = pos2(3.0, 4.0);
        assert_eq!(distance_to_segment(pos2(0.0, 0.0), a, a), 5.0);
        assert_eq!(closest_point_on_segment(pos2(10.0, 10.0), a, a), a);
    }

    #[test]
    fn projection_clamps_to_segment_ends() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(closest_point_on_segment(pos2(-5.0, 3.0), a, b), a);
        assert_eq!(closest_point_on_segment(pos2(15.0, -3.0), a, b), b);
        assert_close(closest_point_on_segment(pos2(4.0, 7.0), a, b), pos2(4.0, 0.0));
    }

    #[test]
    fn near_test_uses_strict_threshold() {
        let line = [pos2(0.0, 0.0), pos2(100.0, 0.0)];
        assert!(is_point_near_polyline(pos2(50.0, 4.9), &line, 5.0));
        assert!(!is_point_near_polyline(pos2(50.0, 5.0), &line, 5.0));
    }

    fn assert_close(a: Pos2, b: Pos2) {
        assert!(a.distance(b) < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn short_polylines_are_handled() {
        let p = pos2(7.0, 8.0);
        assert!(!is_point_near_polyline(p, &[pos2(7.0, 8.0)], 5.0));
        assert_eq!(closest_point_on_polyline(p, &[]), p);
        assert_eq!(closest_point_on_polyline(p, &[pos2(0.0, 0.0)]), p);
        assert_eq!(closest_point_across_polylines(p, std::iter::empty()), p);
    }

    #[test]
    fn closest_point_picks_nearest_segment() {
        let line = [pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(100.0, 100.0)];
        assert_close(closest_point_on_polyline(pos2(95.0, 60.0), &line), pos2(100.0, 60.0));
        assert_close(closest_point_on_polyline(pos2(20.0, 3.0), &line), pos2(20.0, 0.0));
    }

    #[test]
    fn closest_point_across_prefers_nearer_line() {
        let horizontal = [pos2(0.0, 0.0), pos2(100.0, 0.0)];
        let vertical = [pos2(50.0, -50.0), pos2(50.0, 50.0)];
        let lines: [&[Pos2]; 2] = [&horizontal, &vertical];
        assert_close(closest_point_across_polylines(pos2(48.0, 20.0), lines), pos2(50.0, 20.0));
    }

    #[test]
    fn centroid_and_normalize() {
        assert_eq!(centroid(&[]), None);
        assert_eq!(
            centroid(&[pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(5.0, 9.0)]),
            Some(pos2(5.0, 3.0))
        );
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(normalize(egui::vec2(0.0, -4.0)), egui::vec2(0.0, -1.0));
    }
}
