use egui::{Key, pos2};
use parking_lot::Mutex;
use std::sync::Arc;

use tubemap_editor::tools::{DrawLineTool, DrawStep};
use tubemap_editor::{
    ColorPalette, Document, EditorConfig, EditorContext, EditorEvent, EventHandler, InputEvent, LineId, ToolKind,
};

#[derive(Default, Clone)]
struct Recorder {
    events: Arc<Mutex<Vec<EditorEvent>>>,
}

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}

fn context_with_recorder() -> (EditorContext, Recorder) {
    let context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(42));
    let recorder = Recorder::default();
    context.event_bus().subscribe(Box::new(recorder.clone()));
    (context, recorder)
}

#[test]
fn nearly_horizontal_segment_is_flattened() {
    let document = Document::new().into_shared();
    let palette = ColorPalette::seeded(1).into_shared();
    let mut tool = DrawLineTool::new(document.clone(), palette, &EditorConfig::default());

    tool.start(pos2(0.0, 0.0)).unwrap();
    assert_eq!(tool.add_point(pos2(100.0, 5.0)), Ok(DrawStep::Appended(pos2(100.0, 0.0))));

    let id = tool.finalize().unwrap().unwrap();
    assert!(!tool.is_drawing());
    let document = document.lock();
    assert_eq!(document.line(id).unwrap().coords(), &[pos2(0.0, 0.0), pos2(100.0, 0.0)]);
}

#[test]
fn click_near_last_point_closes_the_line() {
    let (mut context, recorder) = context_with_recorder();
    context.set_active_tool(ToolKind::Line);

    for world in [pos2(100.0, 100.0), pos2(300.0, 100.0), pos2(300.0, 300.0), pos2(303.0, 302.0)] {
        context.handle_event(InputEvent::PointerDown { world });
    }

    let document = context.document().lock();
    assert_eq!(document.lines().len(), 1);
    assert_eq!(
        document.lines()[0].coords(),
        &[pos2(100.0, 100.0), pos2(300.0, 100.0), pos2(300.0, 300.0)]
    );
    assert!(context.draft().is_none());
    assert!(recorder.events.lock().contains(&EditorEvent::LineAdded {
        id: LineId::new(1),
        vertices: 3,
    }));
}

#[test]
fn close_click_is_not_a_close_before_the_second_point() {
    let (mut context, _) = context_with_recorder();
    context.set_active_tool(ToolKind::Line);

    context.pointer_down(pos2(100.0, 100.0));
    context.pointer_down(pos2(104.0, 100.0));

    // snapped back onto the start point: nothing appended, still drawing
    assert_eq!(context.draft().map(|draft| draft.points().len()), Some(1));
    assert!(context.document().lock().lines().is_empty());
}

#[test]
fn switching_tools_discards_the_draft() {
    let (mut context, recorder) = context_with_recorder();
    context.set_active_tool(ToolKind::Line);
    context.pointer_down(pos2(100.0, 100.0));
    context.pointer_down(pos2(200.0, 100.0));

    context.set_active_tool(ToolKind::Station);

    assert!(context.draft().is_none());
    assert!(context.document().lock().lines().is_empty());
    let events = recorder.events.lock();
    assert!(events.contains(&EditorEvent::DraftDiscarded { vertices: 2 }));
    assert_eq!(
        events.last(),
        Some(&EditorEvent::ToolChanged {
            old: ToolKind::Line,
            new: ToolKind::Station,
        })
    );
}

#[test]
fn ghost_point_previews_the_next_vertex() {
    let (mut context, _) = context_with_recorder();
    context.set_active_tool(ToolKind::Line);

    context.pointer_move(pos2(41.0, 38.0));
    assert_eq!(context.ghost_point(), Some(pos2(40.0, 40.0)));

    context.pointer_down(pos2(40.0, 40.0));
    context.pointer_move(pos2(140.0, 143.0));
    assert_eq!(context.ghost_point(), Some(pos2(140.0, 140.0)));
    // preview does not commit anything
    assert_eq!(context.draft().map(|draft| draft.points().len()), Some(1));
}

#[test]
fn enter_finalizes_and_escape_cancels() {
    let (mut context, _) = context_with_recorder();
    context.set_active_tool(ToolKind::Line);

    context.pointer_down(pos2(0.0, 0.0));
    context.pointer_down(pos2(0.0, 200.0));
    context.handle_event(InputEvent::KeyDown { key: Key::Enter });
    assert_eq!(context.document().lock().lines().len(), 1);

    context.pointer_down(pos2(400.0, 400.0));
    context.pointer_down(pos2(600.0, 400.0));
    context.handle_event(InputEvent::KeyDown { key: Key::Escape });
    assert_eq!(context.document().lock().lines().len(), 1);
    assert!(context.draft().is_none());
}

#[test]
fn each_line_takes_a_palette_color() {
    let (mut context, _) = context_with_recorder();
    context.set_active_tool(ToolKind::Line);

    for y in [100.0, 200.0, 300.0] {
        context.pointer_down(pos2(0.0, y));
        context.pointer_down(pos2(200.0, y));
        context.key_down(Key::Enter);
    }

    let usage: u32 = context
        .palette()
        .lock()
        .usage_stats()
        .iter()
        .map(|usage| usage.usage_count)
        .sum();
    assert_eq!(usage, 3);
}
