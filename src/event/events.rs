use egui::Pos2;
use std::fmt;

use crate::element::{LineId, StationId};
use crate::selection::Selection;
use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    LineAdded {
        id: LineId,
        vertices: usize,
    },
    LineDuplicated {
        original: LineId,
        duplicate: LineId,
    },
    StationPlaced {
        id: StationId,
        coords: Pos2,
        lines: Vec<LineId>,
    },
    HoverChanged {
        old: Option<LineId>,
        new: Option<LineId>,
    },
    SelectionChanged(Option<Selection>),
    /// An unfinished line was thrown away
    DraftDiscarded {
        vertices: usize,
    },
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolChanged { new, .. } => write!(f, "Tool: {}", new.label()),
            Self::LineAdded { id, vertices } => write!(f, "Added line {id} ({vertices} points)"),
            Self::LineDuplicated { original, duplicate } => {
                write!(f, "Duplicated line {original} as {duplicate}")
            }
            Self::StationPlaced { id, lines, .. } if lines.len() > 1 => {
                write!(f, "Placed junction {id} across {} lines", lines.len())
            }
            Self::StationPlaced { id, .. } => write!(f, "Placed station {id}"),
            Self::HoverChanged { new: Some(id), .. } => write!(f, "Hovering line {id}"),
            Self::HoverChanged { new: None, .. } => write!(f, "Hovering nothing"),
            Self::SelectionChanged(Some(Selection::Line(id))) => write!(f, "Selected line {id}"),
            Self::SelectionChanged(Some(Selection::Station(id))) => write!(f, "Selected station {id}"),
            Self::SelectionChanged(None) => write!(f, "Selection cleared"),
            Self::DraftDiscarded { vertices } => write!(f, "Discarded unfinished line ({vertices} points)"),
        }
    }
}
