use egui::Pos2;

use crate::document::SharedDocument;
use crate::element::{LineId, StationId};
use crate::event::EditorEvent;
use crate::selection::Selection;
use crate::state::EditorConfig;
use crate::tools::{Tool, ToolKind};

/// Keeps the highlight on the first line under the pointer, and only there
#[derive(Debug)]
pub struct HoverTracker {
    document: SharedDocument,
    threshold: f32,
    hovered: Option<LineId>,
}

impl HoverTracker {
    pub fn new(document: SharedDocument, threshold: f32) -> Self {
        Self {
            document,
            threshold,
            hovered: None,
        }
    }

    pub fn hovered(&self) -> Option<LineId> {
        self.hovered
    }

    pub fn update(&mut self, pos: Pos2) -> Option<EditorEvent> {
        let mut document = self.document.lock();
        let found = document.find_near(pos, self.threshold).first().map(|line| line.id());
        if found == self.hovered {
            return None;
        }

        if let Some(old) = self.hovered {
            document.set_highlighted(old, false);
        }
        if let Some(new) = found {
            document.set_highlighted(new, true);
        }

        let old = std::mem::replace(&mut self.hovered, found);
        Some(EditorEvent::HoverChanged { old, new: found })
    }

    pub fn clear(&mut self) -> Option<EditorEvent> {
        let old = self.hovered.take()?;
        self.document.lock().set_highlighted(old, false);
        Some(EditorEvent::HoverChanged { old: Some(old), new: None })
    }
}

/// Highlights lines on hover and picks a line or station on click.
///
/// Every click reports what is under the pointer; the editor context drops
/// reports that do not change its selection.
#[derive(Debug)]
pub struct SelectionTool {
    hover: HoverTracker,
    document: SharedDocument,
    station_pick_radius: f32,
}

impl SelectionTool {
    pub fn new(document: SharedDocument, config: &EditorConfig) -> Self {
        Self {
            hover: HoverTracker::new(document.clone(), config.hover_threshold),
            document,
            station_pick_radius: config.ghost_point_radius + config.line_width,
        }
    }

    pub fn hovered(&self) -> Option<LineId> {
        self.hover.hovered()
    }

    fn station_at(&self, pos: Pos2) -> Option<StationId> {
        let document = self.document.lock();
        document
            .stations()
            .iter()
            .map(|station| (station.id(), station.coords().distance(pos)))
            .filter(|&(_, distance)| distance <= self.station_pick_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn deactivate(&mut self) -> Option<EditorEvent> {
        self.hover.clear()
    }

    fn on_pointer_down(&mut self, pos: Pos2) -> Option<EditorEvent> {
        self.hover.update(pos);

        let picked = self
            .station_at(pos)
            .map(Selection::Station)
            .or_else(|| self.hover.hovered().map(Selection::Line));

        Some(EditorEvent::SelectionChanged(picked))
    }

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<EditorEvent> {
        self.hover.update(pos)
    }

    fn current_state_name(&self) -> &'static str {
        if self.hover.hovered().is_some() { "Hovering" } else { "Idle" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use egui::{Color32, pos2};

    #[test]
    fn hover_moves_highlight_between_lines() {
        let document = Document::new().into_shared();
        let (a, b) = {
            let mut doc = document.lock();
            let a = doc.add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED).id();
            let b = doc.add_line(vec![pos2(0.0, 50.0), pos2(100.0, 50.0)], Color32::BLUE).id();
            (a, b)
        };
        let mut tool = SelectionTool::new(document.clone(), &EditorConfig::default());

        assert_eq!(
            tool.on_pointer_move(pos2(10.0, 2.0)),
            Some(EditorEvent::HoverChanged { old: None, new: Some(a) })
        );
        assert_eq!(tool.on_pointer_move(pos2(12.0, 1.0)), None);
        assert_eq!(
            tool.on_pointer_move(pos2(10.0, 48.0)),
            Some(EditorEvent::HoverChanged { old: Some(a), new: Some(b) })
        );
        {
            let doc = document.lock();
            assert!(!doc.line(a).unwrap().is_highlighted());
            assert!(doc.line(b).unwrap().is_highlighted());
        }

        tool.deactivate();
        assert_eq!(document.lock().highlighted_lines().count(), 0);
    }

    #[test]
    fn click_prefers_station_over_line() {
        let document = Document::new().into_shared();
        let station = {
            let mut doc = document.lock();
            let a = doc.add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED).id();
            doc.add_station(pos2(50.0, 0.0), vec![a]).id()
        };
        let mut tool = SelectionTool::new(document, &EditorConfig::default());

        assert_eq!(
            tool.on_pointer_down(pos2(52.0, 1.0)),
            Some(EditorEvent::SelectionChanged(Some(Selection::Station(station))))
        );
        assert_eq!(
            tool.on_pointer_down(pos2(10.0, 1.0)),
            Some(EditorEvent::SelectionChanged(Some(Selection::Line(LineId::new(1)))))
        );
        assert_eq!(
            tool.on_pointer_down(pos2(10.0, 300.0)),
            Some(EditorEvent::SelectionChanged(None))
        );
    }
}
