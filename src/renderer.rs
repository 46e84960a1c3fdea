use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};
use std::collections::HashMap;

use crate::document::Document;
use crate::element::LineId;
use crate::geometry::normalize;
use crate::input::Viewport;
use crate::selection::Selection;
use crate::state::EditorConfig;
use crate::tools::Draft;

/// Number of straight pieces a rounded corner is flattened into
const CORNER_SEGMENTS: usize = 8;

pub const STATION_RADIUS: f32 = 5.0;
pub const STATION_STROKE: f32 = 4.0;
pub const JUNCTION_UNIT: f32 = 10.0;
pub const JUNCTION_ROUNDING: f32 = 4.0;
pub const JUNCTION_STROKE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    pub width: f32,
    pub color: Color32,
}

/// Everything the renderer draws goes through this trait.
///
/// Coordinates are in world space; implementations map them to their own
/// output.
pub trait DiagramSurface {
    fn polyline(&mut self, points: &[Pos2], style: PolylineStyle);

    fn station_marker(&mut self, center: Pos2, line_count: usize, highlighted: bool);

    fn ghost_point(&mut self, center: Pos2, radius: f32);

    fn grid_line(&mut self, a: Pos2, b: Pos2);
}

/// Rounds the corners of a polyline with quadratic curves.
///
/// Each interior vertex becomes the control point of a curve that starts and
/// ends `ratio` times the shorter adjacent segment away from it, so curves
/// of neighbouring corners never overlap for `ratio <= 0.5`.
pub fn smooth_polyline(coords: &[Pos2], ratio: f32) -> Vec<Pos2> {
    if coords.len() < 3 {
        return coords.to_vec();
    }

    let mut path = Vec::with_capacity(coords.len() * (CORNER_SEGMENTS + 1));
    path.push(coords[0]);

    for window in coords.windows(3) {
        let (prev, corner, next) = (window[0], window[1], window[2]);
        let incoming = corner - prev;
        let outgoing = next - corner;
        let radius = incoming.length().min(outgoing.length()) * ratio;

        let start = corner - normalize(incoming) * radius;
        let end = corner + normalize(outgoing) * radius;

        path.push(start);
        for step in 1..=CORNER_SEGMENTS {
            let t = step as f32 / CORNER_SEGMENTS as f32;
            path.push(quadratic_point(start, corner, end, t));
        }
    }

    path.extend(coords.last().copied());
    path
}

fn quadratic_point(start: Pos2, control: Pos2, end: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let x = u * u * start.x + 2.0 * u * t * control.x + t * t * end.x;
    let y = u * u * start.y + 2.0 * u * t * control.y + t * t * end.y;
    Pos2::new(x, y)
}

/// The render path of a line: smoothed if it has more than `min_vertices`
/// vertices, its raw coordinates otherwise
pub fn render_path(coords: &[Pos2], min_vertices: usize, ratio: f32) -> Vec<Pos2> {
    if coords.len() > min_vertices {
        smooth_polyline(coords, ratio)
    } else {
        coords.to_vec()
    }
}

#[derive(Debug, Clone)]
struct CachedPath {
    source: Vec<Pos2>,
    min_vertices: usize,
    ratio: f32,
    path: Vec<Pos2>,
}

/// Transient state drawn on top of the document
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub draft: Option<&'a Draft>,
    pub ghost: Option<Pos2>,
    pub selection: Option<Selection>,
}

/// Turns the document into draw calls on a [`DiagramSurface`].
///
/// Owns the per-line render paths; entities in the document never hold
/// rendering state.
#[derive(Debug, Default)]
pub struct Renderer {
    paths: HashMap<LineId, CachedPath>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_paths(&self) -> usize {
        self.paths.len()
    }

    /// Render path for a line, recomputed only when its coordinates or the
    /// smoothing settings changed
    fn path_for(&mut self, id: LineId, coords: &[Pos2], config: &EditorConfig) -> &[Pos2] {
        let stale = self.paths.get(&id).is_none_or(|cached| {
            cached.source != coords
                || cached.min_vertices != config.smoothing_min_vertices
                || cached.ratio != config.corner_radius_ratio
        });

        if stale {
            log::trace!("Rebuilding render path for line {}", id);
            self.paths.insert(
                id,
                CachedPath {
                    source: coords.to_vec(),
                    min_vertices: config.smoothing_min_vertices,
                    ratio: config.corner_radius_ratio,
                    path: render_path(coords, config.smoothing_min_vertices, config.corner_radius_ratio),
                },
            );
        }

        self.paths.get(&id).map(|cached| cached.path.as_slice()).unwrap_or_default()
    }

    pub fn render(
        &mut self,
        surface: &mut dyn DiagramSurface,
        document: &Document,
        overlay: Overlay<'_>,
        config: &EditorConfig,
    ) {
        if config.show_grid {
            render_grid(surface, config);
        }

        self.paths.retain(|id, _| document.line(*id).is_some());

        for line in document.lines() {
            let path = self.path_for(line.id(), line.coords(), config);
            if line.is_highlighted() {
                surface.polyline(
                    path,
                    PolylineStyle {
                        width: config.line_width + config.highlight_extra_width,
                        color: line.color().gamma_multiply(0.5),
                    },
                );
            }
            surface.polyline(
                path,
                PolylineStyle {
                    width: config.line_width,
                    color: line.color(),
                },
            );
        }

        if let Some(draft) = overlay.draft {
            let path = render_path(draft.points(), config.smoothing_min_vertices, config.corner_radius_ratio);
            surface.polyline(
                &path,
                PolylineStyle {
                    width: config.line_width,
                    color: draft.color(),
                },
            );
        }

        for station in document.stations() {
            let highlighted = overlay.selection == Some(Selection::Station(station.id()));
            surface.station_marker(station.coords(), station.lines().len(), highlighted);
        }

        if let Some(ghost) = overlay.ghost {
            surface.ghost_point(ghost, config.ghost_point_radius);
        }
    }
}

fn render_grid(surface: &mut dyn DiagramSurface, config: &EditorConfig) {
    let step = config.grid_size;
    if step <= 0.0 {
        return;
    }
    let world = config.world;

    let mut x = 0.0;
    while x <= world.width {
        surface.grid_line(Pos2::new(x, 0.0), Pos2::new(x, world.height));
        x += step;
    }
    let mut y = 0.0;
    while y <= world.height {
        surface.grid_line(Pos2::new(0.0, y), Pos2::new(world.width, y));
        y += step;
    }
}

/// Paints onto an egui canvas through a [`Viewport`]
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    viewport: &'a Viewport,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, viewport: &'a Viewport) -> Self {
        Self { painter, viewport }
    }
}

impl DiagramSurface for EguiSurface<'_> {
    fn polyline(&mut self, points: &[Pos2], style: PolylineStyle) {
        if points.len() < 2 {
            return;
        }
        let screen: Vec<Pos2> = points.iter().map(|p| self.viewport.world_to_screen(*p)).collect();
        self.painter.add(Shape::line(
            screen,
            Stroke::new(self.viewport.scale(style.width), style.color),
        ));
    }

    fn station_marker(&mut self, center: Pos2, line_count: usize, highlighted: bool) {
        let center = self.viewport.world_to_screen(center);
        let outline = if highlighted {
            Color32::from_rgb(33, 150, 243)
        } else {
            Color32::BLACK
        };

        if line_count > 1 {
            let size = egui::vec2(JUNCTION_UNIT, JUNCTION_UNIT * line_count as f32);
            let rect = Rect::from_center_size(center, size * self.viewport.zoom());
            let rounding = self.viewport.scale(JUNCTION_ROUNDING);
            self.painter.rect_filled(rect, rounding, Color32::WHITE);
            self.painter
                .rect_stroke(rect, rounding, Stroke::new(self.viewport.scale(JUNCTION_STROKE), outline));
        } else {
            self.painter.circle(
                center,
                self.viewport.scale(STATION_RADIUS),
                Color32::WHITE,
                Stroke::new(self.viewport.scale(STATION_STROKE), outline),
            );
        }
    }

    fn ghost_point(&mut self, center: Pos2, radius: f32) {
        self.painter.circle_filled(
            self.viewport.world_to_screen(center),
            self.viewport.scale(radius),
            Color32::from_black_alpha(96),
        );
    }

    fn grid_line(&mut self, a: Pos2, b: Pos2) {
        self.painter.line_segment(
            [self.viewport.world_to_screen(a), self.viewport.world_to_screen(b)],
            Stroke::new(1.0, Color32::from_gray(225)),
        );
    }
}
