use egui::Pos2;

use crate::document::{Document, SharedDocument};
use crate::element::{LineId, StationId};
use crate::event::EditorEvent;
use crate::geometry::{centroid, closest_point_on_polyline};
use crate::state::EditorConfig;
use crate::tools::{Tool, ToolKind};

/// Where a station would go and which lines it would serve
#[derive(Debug, Clone, PartialEq)]
pub struct StationSite {
    pub coords: Pos2,
    pub lines: Vec<LineId>,
}

/// Resolves a station site for `position`.
///
/// Every line within `threshold` pulls in its whole duplicate family. A
/// single line gives the projection of `position` onto it; several give the
/// centroid of each line's own projection.
pub fn station_site(document: &Document, position: Pos2, threshold: f32) -> Option<StationSite> {
    let related = document.find_near_related(position, threshold);
    let projections: Vec<Pos2> = related
        .iter()
        .map(|line| closest_point_on_polyline(position, line.coords()))
        .collect();

    let coords = match projections.as_slice() {
        [] => return None,
        [single] => *single,
        several => centroid(several)?,
    };

    Some(StationSite {
        coords,
        lines: related.iter().map(|line| line.id()).collect(),
    })
}

/// Places stations snapped onto nearby lines
#[derive(Debug)]
pub struct StationTool {
    document: SharedDocument,
    threshold: f32,
    ghost: Option<Pos2>,
}

impl StationTool {
    pub fn new(document: SharedDocument, config: &EditorConfig) -> Self {
        Self {
            document,
            threshold: config.station_threshold,
            ghost: None,
        }
    }

    /// Creates a station at the resolved site, or does nothing if no line is
    /// within `threshold`.
    pub fn place_station(&self, position: Pos2, threshold: f32) -> Option<StationId> {
        let mut document = self.document.lock();
        let site = station_site(&document, position, threshold)?;
        let id = document.add_station(site.coords, site.lines).id();
        log::info!("Placed station {} at {:?}", id, site.coords);
        Some(id)
    }

    /// The site [`place_station`](Self::place_station) would use, without creating anything
    pub fn preview_station(&self, position: Pos2, threshold: f32) -> Option<Pos2> {
        station_site(&self.document.lock(), position, threshold).map(|site| site.coords)
    }
}

impl Tool for StationTool {
    fn name(&self) -> &'static str {
        "Station"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Station
    }

    fn deactivate(&mut self) -> Option<EditorEvent> {
        self.ghost = None;
        None
    }

    fn on_pointer_down(&mut self, pos: Pos2) -> Option<EditorEvent> {
        let id = self.place_station(pos, self.threshold)?;
        let document = self.document.lock();
        let station = document.station(id)?;
        Some(EditorEvent::StationPlaced {
            id,
            coords: station.coords(),
            lines: station.lines().to_vec(),
        })
    }

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<EditorEvent> {
        self.ghost = self.preview_station(pos, self.threshold);
        None
    }

    fn ghost_point(&self) -> Option<Pos2> {
        self.ghost
    }

    fn current_state_name(&self) -> &'static str {
        if self.ghost.is_some() { "Snapping" } else { "Idle" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn nothing_nearby_places_nothing() {
        let document = Document::new().into_shared();
        document.lock().add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED);
        let tool = StationTool::new(document.clone(), &EditorConfig::default());

        assert_eq!(tool.preview_station(pos2(50.0, 40.0), 5.0), None);
        assert_eq!(tool.place_station(pos2(50.0, 40.0), 5.0), None);
        assert!(document.lock().stations().is_empty());
    }

    #[test]
    fn threshold_is_per_call() {
        let document = Document::new().into_shared();
        document.lock().add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED);
        let tool = StationTool::new(document, &EditorConfig::default());

        assert_eq!(tool.preview_station(pos2(50.0, 12.0), 5.0), None);
        let preview = tool.preview_station(pos2(50.0, 12.0), 20.0).unwrap();
        assert!(preview.distance(pos2(50.0, 0.0)) < 1e-4, "{preview:?}");
    }

    #[test]
    fn default_station_name() {
        let document = Document::new().into_shared();
        document.lock().add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED);
        let mut tool = StationTool::new(document.clone(), &EditorConfig::default());

        let event = tool.on_pointer_down(pos2(30.0, 2.0));
        assert!(matches!(event, Some(EditorEvent::StationPlaced { ref lines, .. }) if lines == &[LineId::new(1)]));
        assert_eq!(document.lock().stations()[0].name(), "station_1");
    }
}
