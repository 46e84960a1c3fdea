use egui::{Color32, Pos2};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::element::{Line, LineId, Station, StationId};
use crate::error::GraphError;
use crate::geometry::is_point_near_polyline;

/// The document behind the single lock every tool goes through
pub type SharedDocument = Arc<Mutex<Document>>;

/// Owns every line and station of the diagram.
///
/// Lines form a forest through their parent/child duplicate links. Ids are
/// `count + 1` at creation time and are never reused.
#[derive(Debug, Default, Clone)]
pub struct Document {
    lines: Vec<Line>,
    stations: Vec<Station>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.lines.get(index).filter(|line| line.id() == id)
    }

    fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.lines.get_mut(index).filter(|line| line.id() == id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.stations.get(index).filter(|station| station.id() == id)
    }

    fn next_line_id(&self) -> LineId {
        LineId::new(self.lines.len() as u32 + 1)
    }

    /// Registers a user-drawn line with no parent
    pub fn add_line(&mut self, coords: Vec<Pos2>, color: Color32) -> &Line {
        let id = self.next_line_id();
        log::debug!("Adding line {} with {} points", id, coords.len());
        self.lines.push(Line::new(id, coords, color, None));
        &self.lines[self.lines.len() - 1]
    }

    /// Registers a duplicate of `original` and links it as the original's child.
    ///
    /// Returns `None` without touching the graph if `original` does not exist.
    pub fn add_duplicate(&mut self, original: LineId, coords: Vec<Pos2>, color: Color32) -> Option<&Line> {
        if self.line(original).is_none() {
            log::warn!("Cannot duplicate unknown line {}", original);
            return None;
        }

        let id = self.next_line_id();
        self.lines.push(Line::new(id, coords, color, Some(original)));
        if let Some(parent) = self.line_mut(original) {
            parent.push_child(id);
        }
        log::debug!("Added line {} as duplicate of {}", id, original);
        self.line(id)
    }

    /// Every line in the same duplicate family as `id`, including itself,
    /// ordered by id. Empty if `id` does not exist.
    ///
    /// Follows parent and child links transitively. A visited set keeps the
    /// walk finite even over corrupted links, which are reported as errors.
    pub fn find_related(&self, id: LineId) -> Vec<&Line> {
        let mut visited = BTreeSet::new();
        let mut pending = vec![id];

        while let Some(current_id) = pending.pop() {
            if visited.contains(&current_id) {
                continue;
            }
            let Some(current) = self.line(current_id) else {
                log::error!("Related-line walk reached missing line {}", current_id);
                continue;
            };
            visited.insert(current_id);

            if let Some(parent_id) = current.parent() {
                match self.line(parent_id) {
                    Some(parent) if !parent.children().contains(&current_id) => {
                        log::error!("{}", GraphError::OrphanedChild { parent: parent_id, child: current_id });
                    }
                    None => log::error!("{}", GraphError::DanglingReference(current_id)),
                    _ => {}
                }
                pending.push(parent_id);
            }

            for &child_id in current.children() {
                if let Some(child) = self.line(child_id) {
                    if child.parent() != Some(current_id) {
                        log::error!(
                            "{}",
                            GraphError::AsymmetricChild {
                                parent: current_id,
                                child: child_id,
                                actual: child.parent(),
                            }
                        );
                    }
                }
                pending.push(child_id);
            }
        }

        visited.into_iter().filter_map(|id| self.line(id)).collect()
    }

    /// Lines passing strictly within `threshold` of `point`, in id order
    pub fn find_near(&self, point: Pos2, threshold: f32) -> Vec<&Line> {
        self.lines
            .iter()
            .filter(|line| is_point_near_polyline(point, line.coords(), threshold))
            .collect()
    }

    /// Union of the families of every line near `point`, deduplicated by id
    pub fn find_near_related(&self, point: Pos2, threshold: f32) -> Vec<&Line> {
        let ids: BTreeSet<LineId> = self
            .find_near(point, threshold)
            .into_iter()
            .flat_map(|line| self.find_related(line.id()))
            .map(Line::id)
            .collect();

        ids.into_iter().filter_map(|id| self.line(id)).collect()
    }

    pub fn add_station(&mut self, coords: Pos2, mut lines: Vec<LineId>) -> &Station {
        lines.sort();
        lines.dedup();
        let id = StationId::new(self.stations.len() as u32 + 1);
        log::debug!("Adding station {} at {:?} on lines {:?}", id, coords, lines);
        self.stations.push(Station::new(id, coords, lines));
        &self.stations[self.stations.len() - 1]
    }

    pub fn rename_station(&mut self, id: StationId, name: impl Into<String>) -> Result<(), GraphError> {
        let index = (id.get() as usize)
            .checked_sub(1)
            .ok_or(GraphError::UnknownStation(id))?;
        let station = self
            .stations
            .get_mut(index)
            .filter(|station| station.id() == id)
            .ok_or(GraphError::UnknownStation(id))?;
        station.set_name(name);
        Ok(())
    }

    pub fn set_line_color(&mut self, id: LineId, color: Color32) -> Result<(), GraphError> {
        let line = self.line_mut(id).ok_or(GraphError::UnknownLine(id))?;
        line.set_color(color);
        Ok(())
    }

    /// Sets the transient hover flag; unknown ids are ignored
    pub fn set_highlighted(&mut self, id: LineId, highlighted: bool) {
        if let Some(line) = self.line_mut(id) {
            line.highlighted = highlighted;
        }
    }

    pub fn clear_highlights(&mut self) {
        for line in &mut self.lines {
            line.highlighted = false;
        }
    }

    pub fn highlighted_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| line.is_highlighted())
    }

    /// Checks referential symmetry of every parent/child link and that no
    /// parent chain loops back on itself.
    pub fn validate(&self) -> Result<(), GraphError> {
        for line in &self.lines {
            let id = line.id();

            if let Some(parent_id) = line.parent() {
                let parent = self.line(parent_id).ok_or(GraphError::DanglingReference(id))?;
                if !parent.children().contains(&id) {
                    return Err(GraphError::OrphanedChild {
                        parent: parent_id,
                        child: id,
                    });
                }
            }

            for &child_id in line.children() {
                let child = self.line(child_id).ok_or(GraphError::DanglingReference(id))?;
                if child.parent() != Some(id) {
                    return Err(GraphError::AsymmetricChild {
                        parent: id,
                        child: child_id,
                        actual: child.parent(),
                    });
                }
            }

            let mut steps = 0;
            let mut ancestor = line.parent();
            while let Some(ancestor_id) = ancestor {
                steps += 1;
                if steps > self.lines.len() {
                    return Err(GraphError::Cycle(id));
                }
                ancestor = self.line(ancestor_id).and_then(Line::parent);
            }
        }

        Ok(())
    }
}
