use egui::{Color32, Pos2, pos2};

use tubemap_editor::tools::station_site;
use tubemap_editor::{ColorPalette, Document, EditorConfig, EditorContext, EditorEvent, LineId, StationId, ToolKind};

fn assert_close(a: Pos2, b: Pos2) {
    assert!(a.distance(b) < 1e-4, "{a:?} != {b:?}");
}

#[test]
fn station_snaps_onto_a_single_line() {
    let mut document = Document::new();
    let line = document
        .add_line(vec![pos2(0.0, 100.0), pos2(200.0, 100.0)], Color32::RED)
        .id();

    let site = station_site(&document, pos2(50.0, 103.0), 5.0).unwrap();
    assert_close(site.coords, pos2(50.0, 100.0));
    assert_eq!(site.lines, vec![line]);
}

#[test]
fn nothing_within_threshold_places_nothing() {
    let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(5));
    context
        .document()
        .lock()
        .add_line(vec![pos2(0.0, 100.0), pos2(200.0, 100.0)], Color32::RED);

    context.set_active_tool(ToolKind::Station);
    context.pointer_down(pos2(50.0, 150.0));
    assert!(context.document().lock().stations().is_empty());
}

#[test]
fn crossing_lines_make_a_junction_at_the_centroid() {
    let mut document = Document::new();
    let a = document
        .add_line(vec![pos2(0.0, 100.0), pos2(200.0, 100.0)], Color32::RED)
        .id();
    let b = document
        .add_line(vec![pos2(100.0, 0.0), pos2(100.0, 200.0)], Color32::BLUE)
        .id();

    // projections are (102, 100) and (100, 103)
    let site = station_site(&document, pos2(102.0, 103.0), 5.0).unwrap();
    assert_eq!(site.lines, vec![a, b]);
    assert_close(site.coords, pos2(101.0, 101.5));
}

#[test]
fn duplicate_family_is_pulled_into_the_station() {
    let mut document = Document::new();
    let original = document
        .add_line(vec![pos2(0.0, 100.0), pos2(200.0, 100.0)], Color32::RED)
        .id();
    let duplicate = document
        .add_duplicate(original, vec![pos2(0.0, 108.0), pos2(200.0, 108.0)], Color32::BLUE)
        .unwrap()
        .id();

    // only the original is within reach, its duplicate joins through the family
    let site = station_site(&document, pos2(60.0, 98.0), 5.0).unwrap();
    assert_eq!(site.lines, vec![original, duplicate]);
    assert_close(site.coords, pos2(60.0, 104.0));
}

#[test]
fn station_tool_reports_the_placed_station() {
    let mut context = EditorContext::with_palette(EditorConfig::default(), ColorPalette::seeded(5));
    let line = context
        .document()
        .lock()
        .add_line(vec![pos2(0.0, 100.0), pos2(200.0, 100.0)], Color32::RED)
        .id();

    context.set_active_tool(ToolKind::Station);
    context.pointer_move(pos2(80.0, 97.0));
    assert_close(context.ghost_point().unwrap(), pos2(80.0, 100.0));

    context.pointer_down(pos2(80.0, 97.0));
    let document = context.document().lock();
    let station = document.station(StationId::new(1)).unwrap();
    assert_close(station.coords(), pos2(80.0, 100.0));
    assert_eq!(station.lines(), &[line]);
    assert_eq!(station.name(), "station_1");
    assert!(!station.is_junction());

    let event = EditorEvent::StationPlaced {
        id: station.id(),
        coords: station.coords(),
        lines: vec![LineId::new(1)],
    };
    assert_eq!(event.to_string(), "Placed station #1");
}
