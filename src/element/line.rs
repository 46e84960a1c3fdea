use egui::{Color32, Pos2};
use std::fmt;

/// Stable identifier of a line, assigned in creation order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u32);

impl LineId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A drawn or duplicated polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: LineId,
    coords: Vec<Pos2>,
    color: Color32,
    pub(crate) parent: Option<LineId>,
    children: Vec<LineId>,
    pub(crate) highlighted: bool,
}

impl Line {
    pub(crate) fn new(id: LineId, coords: Vec<Pos2>, color: Color32, parent: Option<LineId>) -> Self {
        Self {
            id,
            coords,
            color,
            parent,
            children: Vec::new(),
            highlighted: false,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn coords(&self) -> &[Pos2] {
        &self.coords
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// The line this one was duplicated from, if any
    pub fn parent(&self) -> Option<LineId> {
        self.parent
    }

    /// Lines duplicated from this one, in creation order
    pub fn children(&self) -> &[LineId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: LineId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_duplicate(&self) -> bool {
        self.parent.is_some()
    }
}
