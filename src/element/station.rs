use egui::Pos2;
use std::fmt;

use super::LineId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(u32);

impl StationId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stop anchored on one line, or an interchange across several
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    coords: Pos2,
    lines: Vec<LineId>,
}

impl Station {
    pub(crate) fn new(id: StationId, coords: Pos2, lines: Vec<LineId>) -> Self {
        Self {
            id,
            name: format!("station_{}", id.get()),
            coords,
            lines,
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn coords(&self) -> Pos2 {
        self.coords
    }

    /// Ids of the lines this station sits on, ascending
    pub fn lines(&self) -> &[LineId] {
        &self.lines
    }

    pub fn is_junction(&self) -> bool {
        self.lines.len() > 1
    }
}
