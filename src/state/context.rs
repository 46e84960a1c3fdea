//! The editor context owns the shared document and palette, the active tool,
//! and the event bus. It is the single entry point for pointer and key
//! input: every event is routed to the active tool with an exhaustive match
//! over [`ToolType`], in delivery order.
//!
//! Switching tools deactivates the old tool first, so a half-drawn line is
//! discarded before the next pointer event is interpreted by the new tool.

use egui::{Color32, Key, Pos2};

use crate::document::{Document, SharedDocument};
use crate::element::{LineId, StationId};
use crate::error::GraphError;
use crate::event::{EditorEvent, EventBus};
use crate::input::InputEvent;
use crate::palette::{ColorPalette, SharedPalette};
use crate::selection::Selection;
use crate::state::EditorConfig;
use crate::tools::{Draft, Tool, ToolKind, ToolResources, ToolType};

#[derive(Debug)]
pub struct EditorContext {
    document: SharedDocument,
    palette: SharedPalette,
    config: EditorConfig,
    active_tool: Option<ToolType>,
    selection: Option<Selection>,
    event_bus: EventBus,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_palette(config, ColorPalette::default())
    }

    pub fn with_palette(config: EditorConfig, palette: ColorPalette) -> Self {
        Self {
            document: Document::new().into_shared(),
            palette: palette.into_shared(),
            config,
            active_tool: None,
            selection: None,
            event_bus: EventBus::new(),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn palette(&self) -> &SharedPalette {
        &self.palette
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn active_tool(&self) -> Option<&ToolType> {
        self.active_tool.as_ref()
    }

    pub fn active_tool_kind(&self) -> ToolKind {
        self.active_tool.as_ref().map_or(ToolKind::None, Tool::kind)
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn ghost_point(&self) -> Option<Pos2> {
        self.active_tool.as_ref().and_then(Tool::ghost_point)
    }

    /// The in-progress line, if the line tool is drawing
    pub fn draft(&self) -> Option<&Draft> {
        self.active_tool.as_ref()?.as_draw_line_tool()?.draft()
    }

    /// Selects `kind`; selecting the active tool again switches to none
    pub fn toggle_tool(&mut self, kind: ToolKind) {
        let next = if kind == self.active_tool_kind() { ToolKind::None } else { kind };
        self.set_active_tool(next);
    }

    pub fn set_active_tool(&mut self, kind: ToolKind) {
        let old = self.active_tool_kind();
        if old == kind {
            return;
        }

        if let Some(mut tool) = self.active_tool.take() {
            if let Some(event) = tool.deactivate() {
                self.emit(event);
            }
        }

        let resources = ToolResources {
            document: self.document.clone(),
            palette: self.palette.clone(),
            config: self.config.clone(),
        };
        self.active_tool = ToolType::new(kind, &resources);
        if let Some(tool) = &mut self.active_tool {
            tool.activate();
        }

        log::info!("Tool changed: {} -> {}", old, kind);
        self.emit(EditorEvent::ToolChanged { old, new: kind });
    }

    /// Replaces the configuration. The active tool is rebuilt so it picks up
    /// the new thresholds; any draft is discarded.
    pub fn set_config(&mut self, config: EditorConfig) {
        if config == self.config {
            return;
        }
        let kind = self.active_tool_kind();
        self.set_active_tool(ToolKind::None);
        self.config = config;
        self.set_active_tool(kind);
    }

    pub fn select(&mut self, selection: Option<Selection>) {
        self.emit(EditorEvent::SelectionChanged(selection));
    }

    pub fn rename_station(&mut self, id: StationId, name: impl Into<String>) -> Result<(), GraphError> {
        let name = name.into();
        self.document.lock().rename_station(id, name.as_str())?;
        log::debug!("Renamed station {} to {:?}", id, name);
        Ok(())
    }

    pub fn set_line_color(&mut self, id: LineId, color: Color32) -> Result<(), GraphError> {
        self.document.lock().set_line_color(id, color)?;
        log::debug!("Recolored line {}", id);
        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { world } => self.pointer_move(world),
            InputEvent::PointerDown { world } => self.pointer_down(world),
            InputEvent::KeyDown { key } => self.key_down(key),
        }
    }

    pub fn pointer_move(&mut self, world: Pos2) {
        let event = self.active_tool.as_mut().and_then(|tool| tool.on_pointer_move(world));
        if let Some(event) = event {
            self.emit(event);
        }
    }

    /// A click is also a move to the click position, so hover state and its
    /// event are current before the tool handles the press.
    pub fn pointer_down(&mut self, world: Pos2) {
        self.pointer_move(world);
        let event = self.active_tool.as_mut().and_then(|tool| tool.on_pointer_down(world));
        if let Some(event) = event {
            self.emit(event);
        }
    }

    pub fn key_down(&mut self, key: Key) {
        let event = self.active_tool.as_mut().and_then(|tool| tool.on_key(key));
        if let Some(event) = event {
            self.emit(event);
        }
    }

    fn emit(&mut self, event: EditorEvent) {
        if let EditorEvent::SelectionChanged(selection) = &event {
            if self.selection == *selection {
                return;
            }
            log::debug!("Selection changed to {:?}", selection);
            self.selection = *selection;
        }
        self.event_bus.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn toggling_the_active_tool_turns_it_off() {
        let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(1));
        context.toggle_tool(ToolKind::Station);
        assert_eq!(context.active_tool_kind(), ToolKind::Station);
        context.toggle_tool(ToolKind::Station);
        assert_eq!(context.active_tool_kind(), ToolKind::None);
        assert!(context.active_tool().is_none());
    }

    #[test]
    fn pointer_events_without_tool_are_ignored() {
        let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(1));
        context.pointer_down(pos2(10.0, 10.0));
        context.pointer_move(pos2(20.0, 20.0));
        assert!(context.document().lock().lines().is_empty());
        assert_eq!(context.ghost_point(), None);
    }

    #[test]
    fn config_change_rebuilds_tool() {
        let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(1));
        context.set_active_tool(ToolKind::Line);
        context.pointer_down(pos2(0.0, 0.0));
        assert!(context.draft().is_some());

        context.set_config(EditorConfig {
            grid_size: 10.0,
            ..EditorConfig::default()
        });
        assert_eq!(context.active_tool_kind(), ToolKind::Line);
        assert!(context.draft().is_none());
        assert_eq!(context.config().grid_size, 10.0);
    }

    #[test]
    fn repeated_clicks_report_selection_once() {
        use crate::event::EventHandler;
        use parking_lot::Mutex;
        use std::sync::Arc;

        struct Counter(Arc<Mutex<usize>>);
        impl EventHandler for Counter {
            fn handle_event(&mut self, event: &EditorEvent) {
                if matches!(event, EditorEvent::SelectionChanged(_)) {
                    *self.0.lock() += 1;
                }
            }
        }

        let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(1));
        let line = context
            .document()
            .lock()
            .add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED)
            .id();
        let count = Arc::new(Mutex::new(0));
        context.event_bus().subscribe(Box::new(Counter(count.clone())));

        context.set_active_tool(ToolKind::Select);
        context.pointer_down(pos2(10.0, 1.0));
        context.pointer_down(pos2(20.0, 1.0));
        assert_eq!(context.selection(), Some(Selection::Line(line)));
        assert_eq!(*count.lock(), 1);

        // closing the drawer lets the same click select again
        context.select(None);
        context.pointer_down(pos2(20.0, 1.0));
        assert_eq!(context.selection(), Some(Selection::Line(line)));
        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn click_without_move_reports_hover_then_selection() {
        use crate::event::EventHandler;
        use parking_lot::Mutex;
        use std::sync::Arc;

        struct Recorder(Arc<Mutex<Vec<EditorEvent>>>);
        impl EventHandler for Recorder {
            fn handle_event(&mut self, event: &EditorEvent) {
                self.0.lock().push(event.clone());
            }
        }

        let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(1));
        let line = context
            .document()
            .lock()
            .add_line(vec![pos2(0.0, 0.0), pos2(100.0, 0.0)], Color32::RED)
            .id();
        context.set_active_tool(ToolKind::Select);

        let events = Arc::new(Mutex::new(Vec::new()));
        context.event_bus().subscribe(Box::new(Recorder(events.clone())));
        context.pointer_down(pos2(10.0, 1.0));

        assert_eq!(
            *events.lock(),
            vec![
                EditorEvent::HoverChanged { old: None, new: Some(line) },
                EditorEvent::SelectionChanged(Some(Selection::Line(line))),
            ]
        );
    }

    #[test]
    fn editing_unknown_ids_fails() {
        let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(1));
        assert_eq!(
            context.rename_station(StationId::new(3), "Bank"),
            Err(GraphError::UnknownStation(StationId::new(3)))
        );
        assert_eq!(
            context.set_line_color(LineId::new(1), Color32::RED),
            Err(GraphError::UnknownLine(LineId::new(1)))
        );
    }
}
