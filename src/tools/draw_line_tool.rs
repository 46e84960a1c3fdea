use egui::{Color32, Key, Pos2};

use crate::document::SharedDocument;
use crate::element::LineId;
use crate::error::TransitionError;
use crate::event::EditorEvent;
use crate::geometry::AngleConstraint;
use crate::palette::SharedPalette;
use crate::state::EditorConfig;
use crate::tools::{Tool, ToolKind};

/// The polyline being drawn, not yet part of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    points: Vec<Pos2>,
    color: Color32,
}

impl Draft {
    fn new(start: Pos2, color: Color32) -> Self {
        Self {
            points: vec![start],
            color,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    fn last_point(&self) -> Pos2 {
        // A draft always holds its start point.
        self.points[self.points.len() - 1]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawLineState {
    #[default]
    Idle,
    Drawing(Draft),
}

impl DrawLineState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing(_) => "Drawing",
        }
    }
}

/// What a call to [`DrawLineTool::add_point`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawStep {
    Appended(Pos2),
    /// The click closed the line; `None` if the draft was too short to keep
    Finalized(Option<LineId>),
    /// The constrained point coincided with the last one
    Unchanged,
}

/// Builds angle-constrained polylines point by point.
///
/// `Idle -> Drawing` on [`start`](Self::start), back to `Idle` on
/// [`finalize`](Self::finalize) or [`reset`](Self::reset).
#[derive(Debug)]
pub struct DrawLineTool {
    state: DrawLineState,
    document: SharedDocument,
    palette: SharedPalette,
    constraint: AngleConstraint,
    close_path_threshold: f32,
    ghost: Option<Pos2>,
}

impl DrawLineTool {
    pub fn new(document: SharedDocument, palette: SharedPalette, config: &EditorConfig) -> Self {
        Self {
            state: DrawLineState::Idle,
            document,
            palette,
            constraint: config.angle_constraint(),
            close_path_threshold: config.close_path_threshold,
            ghost: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawLineState::Drawing(_))
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            DrawLineState::Drawing(draft) => Some(draft),
            DrawLineState::Idle => None,
        }
    }

    pub fn constraint(&self) -> AngleConstraint {
        self.constraint
    }

    /// Opens a draft at `point` with a fresh palette color
    pub fn start(&mut self, point: Pos2) -> Result<(), TransitionError> {
        if self.is_drawing() {
            return Err(TransitionError::InvalidStateTransition {
                action: "start a line",
                state: self.state.name(),
            });
        }

        let color = self.palette.lock().next_color();
        log::debug!("Starting line at {:?}", point);
        self.state = DrawLineState::Drawing(Draft::new(point, color));
        Ok(())
    }

    /// Appends the constrained form of `raw`, or closes the line when `raw`
    /// lands within the close threshold of the last point of a draft that
    /// already has two points.
    pub fn add_point(&mut self, raw: Pos2) -> Result<DrawStep, TransitionError> {
        let close_path_threshold = self.close_path_threshold;
        let constraint = self.constraint;
        let DrawLineState::Drawing(draft) = &mut self.state else {
            return Err(TransitionError::InvalidStateTransition {
                action: "add a point",
                state: "Idle",
            });
        };

        let last = draft.last_point();
        if draft.points.len() >= 2 && raw.distance(last) < close_path_threshold {
            return self.finalize().map(DrawStep::Finalized);
        }

        let next = constraint.apply(last, raw);
        if next == last {
            return Ok(DrawStep::Unchanged);
        }

        draft.points.push(next);
        Ok(DrawStep::Appended(next))
    }

    /// Promotes the draft into the document.
    ///
    /// A draft with fewer than two distinct points is discarded and
    /// `Ok(None)` returned.
    pub fn finalize(&mut self) -> Result<Option<LineId>, TransitionError> {
        match std::mem::take(&mut self.state) {
            DrawLineState::Idle => Err(TransitionError::InvalidStateTransition {
                action: "finalize a line",
                state: "Idle",
            }),
            DrawLineState::Drawing(draft) => {
                let mut points = draft.points;
                points.dedup();
                if points.len() < 2 {
                    log::info!("Discarding degenerate line with {} distinct point(s)", points.len());
                    return Ok(None);
                }

                let id = self.document.lock().add_line(points, draft.color).id();
                log::info!("Finalized line {}", id);
                Ok(Some(id))
            }
        }
    }

    /// Drops the draft without adding it. Returns how many points it had.
    pub fn reset(&mut self) -> Option<usize> {
        self.ghost = None;
        match std::mem::take(&mut self.state) {
            DrawLineState::Drawing(draft) => {
                log::debug!("Discarding draft with {} point(s)", draft.points.len());
                Some(draft.points.len())
            }
            DrawLineState::Idle => None,
        }
    }

    /// The point [`add_point`](Self::add_point) would append for `raw`.
    /// `None` while idle.
    pub fn preview_next(&self, raw: Pos2) -> Option<Pos2> {
        self.draft().map(|draft| self.constraint.apply(draft.last_point(), raw))
    }

    fn line_added(&self, id: LineId) -> EditorEvent {
        let vertices = self.document.lock().line(id).map_or(0, |line| line.coords().len());
        EditorEvent::LineAdded { id, vertices }
    }
}

impl Tool for DrawLineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn deactivate(&mut self) -> Option<EditorEvent> {
        self.reset().map(|vertices| EditorEvent::DraftDiscarded { vertices })
    }

    fn on_pointer_down(&mut self, pos: Pos2) -> Option<EditorEvent> {
        let result = if self.is_drawing() {
            self.add_point(pos)
        } else {
            self.start(self.constraint.snap(pos)).map(|()| DrawStep::Unchanged)
        };

        match result {
            Ok(DrawStep::Finalized(id)) => {
                self.ghost = None;
                id.map(|id| self.line_added(id))
            }
            Ok(_) => None,
            Err(err) => {
                log::warn!("Line tool: {}", err);
                None
            }
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<EditorEvent> {
        self.ghost = Some(self.preview_next(pos).unwrap_or_else(|| self.constraint.snap(pos)));
        None
    }

    fn on_key(&mut self, key: Key) -> Option<EditorEvent> {
        match key {
            Key::Escape => self.deactivate(),
            Key::Enter if self.is_drawing() => {
                self.ghost = None;
                match self.finalize() {
                    Ok(Some(id)) => Some(self.line_added(id)),
                    Ok(None) => Some(EditorEvent::DraftDiscarded { vertices: 1 }),
                    Err(err) => {
                        log::warn!("Line tool: {}", err);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn ghost_point(&self) -> Option<Pos2> {
        self.ghost
    }

    fn current_state_name(&self) -> &'static str {
        self.state.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::palette::ColorPalette;
    use egui::pos2;

    fn tool() -> (DrawLineTool, SharedDocument) {
        let document = Document::new().into_shared();
        let palette = ColorPalette::seeded(3).into_shared();
        (DrawLineTool::new(document.clone(), palette, &EditorConfig::default()), document)
    }

    #[test]
    fn transitions_out_of_order_are_rejected() {
        let (mut tool, _) = tool();
        assert!(tool.add_point(pos2(10.0, 10.0)).is_err());
        assert!(tool.finalize().is_err());

        tool.start(pos2(0.0, 0.0)).unwrap();
        assert_eq!(
            tool.start(pos2(20.0, 0.0)),
            Err(TransitionError::InvalidStateTransition {
                action: "start a line",
                state: "Drawing"
            })
        );
    }

    #[test]
    fn single_point_draft_is_discarded() {
        let (mut tool, document) = tool();
        tool.start(pos2(0.0, 0.0)).unwrap();
        assert_eq!(tool.finalize(), Ok(None));
        assert!(!tool.is_drawing());
        assert!(document.lock().lines().is_empty());
    }

    #[test]
    fn repeated_point_is_not_appended() {
        let (mut tool, _) = tool();
        tool.start(pos2(0.0, 0.0)).unwrap();
        assert_eq!(tool.add_point(pos2(3.0, 2.0)), Ok(DrawStep::Unchanged));
        assert_eq!(tool.draft().map(|d| d.points().len()), Some(1));
    }

    #[test]
    fn preview_does_not_mutate() {
        let (mut tool, _) = tool();
        assert_eq!(tool.preview_next(pos2(50.0, 50.0)), None);

        tool.start(pos2(0.0, 0.0)).unwrap();
        let before = tool.draft().cloned();
        assert_eq!(tool.preview_next(pos2(98.0, 103.0)), Some(pos2(100.0, 100.0)));
        assert_eq!(tool.draft().cloned(), before);
    }

    #[test]
    fn escape_discards_and_enter_finalizes() {
        let (mut tool, document) = tool();
        tool.on_pointer_down(pos2(0.0, 0.0));
        tool.on_pointer_down(pos2(0.0, 200.0));
        assert_eq!(tool.on_key(Key::Escape), Some(EditorEvent::DraftDiscarded { vertices: 2 }));
        assert!(document.lock().lines().is_empty());

        tool.on_pointer_down(pos2(0.0, 0.0));
        tool.on_pointer_down(pos2(0.0, 200.0));
        assert_eq!(
            tool.on_key(Key::Enter),
            Some(EditorEvent::LineAdded { id: LineId::new(1), vertices: 2 })
        );
    }

    #[test]
    fn ghost_follows_cursor_on_grid_when_idle() {
        let (mut tool, _) = tool();
        tool.on_pointer_move(pos2(31.0, 49.0));
        assert_eq!(tool.ghost_point(), Some(pos2(40.0, 40.0)));
    }
}
