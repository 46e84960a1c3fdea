use egui::{Pos2, Vec2, vec2};

use crate::document::SharedDocument;
use crate::element::LineId;
use crate::event::EditorEvent;
use crate::geometry::normalize;
use crate::palette::SharedPalette;
use crate::state::EditorConfig;
use crate::tools::{HoverTracker, Tool, ToolKind};

/// Unit normal of the segment `from -> to`, rotated +90° from its direction
fn segment_normal(from: Pos2, to: Pos2) -> Vec2 {
    let delta = to - from;
    let perpendicular = delta.y.atan2(delta.x) + std::f32::consts::FRAC_PI_2;
    vec2(perpendicular.cos(), perpendicular.sin())
}

/// Offset direction for every vertex of the polyline.
///
/// Endpoints use the normal of their only segment. Interior vertices use the
/// bisector of the two adjacent normals. On a full reversal the bisector
/// vanishes and the incoming normal is used.
pub fn perpendicular_directions(coords: &[Pos2]) -> Vec<Vec2> {
    let count = coords.len();
    if count < 2 {
        return vec![Vec2::ZERO; count];
    }

    (0..count)
        .map(|index| {
            if index == 0 {
                segment_normal(coords[0], coords[1])
            } else if index == count - 1 {
                segment_normal(coords[index - 1], coords[index])
            } else {
                let incoming = segment_normal(coords[index - 1], coords[index]);
                let outgoing = segment_normal(coords[index], coords[index + 1]);
                let sum = incoming + outgoing;
                if sum.length() < 1e-6 { incoming } else { normalize(sum) }
            }
        })
        .collect()
}

/// Parallel copy of the polyline, every vertex moved `offset` along its
/// perpendicular direction. Same vertex count and order as the input.
pub fn offset_polyline(coords: &[Pos2], offset: f32) -> Vec<Pos2> {
    coords
        .iter()
        .zip(perpendicular_directions(coords))
        .map(|(&point, direction)| point + direction * offset)
        .collect()
}

/// Duplicates the hovered line on click
#[derive(Debug)]
pub struct DuplicateTool {
    hover: HoverTracker,
    document: SharedDocument,
    palette: SharedPalette,
    offset: f32,
}

impl DuplicateTool {
    pub fn new(document: SharedDocument, palette: SharedPalette, config: &EditorConfig) -> Self {
        Self {
            hover: HoverTracker::new(document.clone(), config.hover_threshold),
            document,
            palette,
            offset: config.line_width,
        }
    }

    pub fn hovered(&self) -> Option<LineId> {
        self.hover.hovered()
    }

    /// Adds an offset copy of `original` as its child, colored with the next
    /// palette color. `None` if `original` does not exist.
    pub fn duplicate(&self, original: LineId) -> Option<LineId> {
        let mut document = self.document.lock();
        let coords = offset_polyline(document.line(original)?.coords(), self.offset);
        let color = self.palette.lock().next_color();
        let id = document.add_duplicate(original, coords, color)?.id();
        log::info!("Duplicated line {} as {}", original, id);
        Some(id)
    }
}

impl Tool for DuplicateTool {
    fn name(&self) -> &'static str {
        "Duplicate"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Duplicate
    }

    fn deactivate(&mut self) -> Option<EditorEvent> {
        self.hover.clear()
    }

    fn on_pointer_down(&mut self, pos: Pos2) -> Option<EditorEvent> {
        self.hover.update(pos);
        let original = self.hover.hovered()?;
        let duplicate = self.duplicate(original)?;
        Some(EditorEvent::LineDuplicated { original, duplicate })
    }

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<EditorEvent> {
        self.hover.update(pos)
    }

    fn current_state_name(&self) -> &'static str {
        if self.hover.hovered().is_some() { "Hovering" } else { "Idle" }
    }
}
