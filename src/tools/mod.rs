use egui::{Key, Pos2};
use std::fmt;

use crate::document::SharedDocument;
use crate::event::EditorEvent;
use crate::palette::SharedPalette;
use crate::state::EditorConfig;

/// Interface shared by every canvas tool.
///
/// Tools receive world-space positions only and report what they changed
/// as an [`EditorEvent`].
pub trait Tool {
    fn name(&self) -> &'static str;

    fn kind(&self) -> ToolKind;

    /// Called when the tool becomes active
    fn activate(&mut self) {
        // default: do nothing
    }

    /// Called when another tool takes over. Must drop any transient state
    /// (drafts, hover highlights) before the next pointer event.
    fn deactivate(&mut self) -> Option<EditorEvent>;

    fn on_pointer_down(&mut self, pos: Pos2) -> Option<EditorEvent>;

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<EditorEvent>;

    fn on_key(&mut self, _key: Key) -> Option<EditorEvent> {
        None
    }

    /// Where the ghost indicator should be drawn, if anywhere
    fn ghost_point(&self) -> Option<Pos2> {
        None
    }

    fn current_state_name(&self) -> &'static str;
}

/// The tool selector's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    Line,
    Select,
    Duplicate,
    Station,
    #[default]
    None,
}

impl ToolKind {
    /// The tools offered in the toolbar, in display order
    pub const SELECTABLE: [ToolKind; 4] = [ToolKind::Line, ToolKind::Select, ToolKind::Duplicate, ToolKind::Station];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Line => "Line",
            ToolKind::Select => "Select",
            ToolKind::Duplicate => "Duplicate",
            ToolKind::Station => "Station",
            ToolKind::None => "None",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Line => "╱",
            ToolKind::Select => "⬚",
            ToolKind::Duplicate => "⧉",
            ToolKind::Station => "◉",
            ToolKind::None => "",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handles every tool is constructed from
#[derive(Debug, Clone)]
pub struct ToolResources {
    pub document: SharedDocument,
    pub palette: SharedPalette,
    pub config: EditorConfig,
}

mod draw_line_tool;
pub use draw_line_tool::{Draft, DrawLineState, DrawLineTool, DrawStep};

mod selection_tool;
pub use selection_tool::{HoverTracker, SelectionTool};

mod duplicate_tool;
pub use duplicate_tool::{DuplicateTool, offset_polyline, perpendicular_directions};

mod station_tool;
pub use station_tool::{StationSite, StationTool, station_site};

/// All concrete tools, dispatched with an exhaustive match
#[derive(Debug)]
pub enum ToolType {
    DrawLine(DrawLineTool),
    Select(SelectionTool),
    Duplicate(DuplicateTool),
    Station(StationTool),
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::DrawLine(tool) => tool.name(),
            Self::Select(tool) => tool.name(),
            Self::Duplicate(tool) => tool.name(),
            Self::Station(tool) => tool.name(),
        }
    }

    fn kind(&self) -> ToolKind {
        match self {
            Self::DrawLine(tool) => tool.kind(),
            Self::Select(tool) => tool.kind(),
            Self::Duplicate(tool) => tool.kind(),
            Self::Station(tool) => tool.kind(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::DrawLine(tool) => tool.activate(),
            Self::Select(tool) => tool.activate(),
            Self::Duplicate(tool) => tool.activate(),
            Self::Station(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) -> Option<EditorEvent> {
        match self {
            Self::DrawLine(tool) => tool.deactivate(),
            Self::Select(tool) => tool.deactivate(),
            Self::Duplicate(tool) => tool.deactivate(),
            Self::Station(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2) -> Option<EditorEvent> {
        match self {
            Self::DrawLine(tool) => tool.on_pointer_down(pos),
            Self::Select(tool) => tool.on_pointer_down(pos),
            Self::Duplicate(tool) => tool.on_pointer_down(pos),
            Self::Station(tool) => tool.on_pointer_down(pos),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<EditorEvent> {
        match self {
            Self::DrawLine(tool) => tool.on_pointer_move(pos),
            Self::Select(tool) => tool.on_pointer_move(pos),
            Self::Duplicate(tool) => tool.on_pointer_move(pos),
            Self::Station(tool) => tool.on_pointer_move(pos),
        }
    }

    fn on_key(&mut self, key: Key) -> Option<EditorEvent> {
        match self {
            Self::DrawLine(tool) => tool.on_key(key),
            Self::Select(tool) => tool.on_key(key),
            Self::Duplicate(tool) => tool.on_key(key),
            Self::Station(tool) => tool.on_key(key),
        }
    }

    fn ghost_point(&self) -> Option<Pos2> {
        match self {
            Self::DrawLine(tool) => tool.ghost_point(),
            Self::Select(tool) => tool.ghost_point(),
            Self::Duplicate(tool) => tool.ghost_point(),
            Self::Station(tool) => tool.ghost_point(),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::DrawLine(tool) => tool.current_state_name(),
            Self::Select(tool) => tool.current_state_name(),
            Self::Duplicate(tool) => tool.current_state_name(),
            Self::Station(tool) => tool.current_state_name(),
        }
    }
}

impl ToolType {
    /// Builds the tool for `kind`; `ToolKind::None` has no tool
    pub fn new(kind: ToolKind, resources: &ToolResources) -> Option<Self> {
        let ToolResources { document, palette, config } = resources;
        match kind {
            ToolKind::Line => Some(Self::DrawLine(DrawLineTool::new(document.clone(), palette.clone(), config))),
            ToolKind::Select => Some(Self::Select(SelectionTool::new(document.clone(), config))),
            ToolKind::Duplicate => Some(Self::Duplicate(DuplicateTool::new(document.clone(), palette.clone(), config))),
            ToolKind::Station => Some(Self::Station(StationTool::new(document.clone(), config))),
            ToolKind::None => None,
        }
    }

    pub fn as_draw_line_tool(&self) -> Option<&DrawLineTool> {
        match self {
            Self::DrawLine(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn hovered_line(&self) -> Option<crate::element::LineId> {
        match self {
            Self::Select(tool) => tool.hovered(),
            Self::Duplicate(tool) => tool.hovered(),
            Self::DrawLine(_) | Self::Station(_) => None,
        }
    }
}
