use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::TubeMapApp;
use crate::element::{LineId, StationId};
use crate::selection::Selection;

fn format_ids<T: std::fmt::Display>(ids: impl IntoIterator<Item = T>) -> String {
    let ids: Vec<String> = ids.into_iter().map(|id| id.to_string()).collect();
    if ids.is_empty() { "-".to_owned() } else { ids.join(", ") }
}

/// The property drawer for the current selection
pub fn properties_panel(app: &mut TubeMapApp, ctx: &egui::Context) {
    let Some(selection) = app.context().selection() else {
        return;
    };

    egui::SidePanel::right("properties_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Properties");
                if ui.small_button("✕").clicked() {
                    app.context_mut().select(None);
                }
            });
            ui.separator();

            match selection {
                Selection::Line(id) => line_properties(app, ui, id),
                Selection::Station(id) => station_properties(app, ui, id),
            }
        });
}

fn line_properties(app: &mut TubeMapApp, ui: &mut egui::Ui, id: LineId) {
    // Copy what we show out of the document; edits lock it again
    let (mut color, duplicate_of, children, related, vertices) = {
        let document = app.context().document().lock();
        let Some(line) = document.line(id) else {
            ui.label(format!("Line {} no longer exists", id));
            return;
        };
        let related: Vec<LineId> = document.find_related(id).iter().map(|line| line.id()).collect();
        let duplicate_of = if line.is_duplicate() { line.parent() } else { None };
        (line.color(), duplicate_of, line.children().to_vec(), related, line.coords().len())
    };

    egui::Grid::new("line_properties_grid").num_columns(2).show(ui, |ui| {
        ui.label("Line");
        ui.label(id.to_string());
        ui.end_row();

        ui.label("Color");
        if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
            if let Err(err) = app.context_mut().set_line_color(id, color) {
                log::error!("Failed to recolor line: {}", err);
            }
        }
        ui.end_row();

        ui.label("Vertices");
        ui.label(vertices.to_string());
        ui.end_row();

        ui.label("Duplicate of");
        ui.label(match duplicate_of {
            Some(parent) => parent.to_string(),
            None => "original".to_owned(),
        });
        ui.end_row();

        ui.label("Children");
        ui.label(format_ids(children));
        ui.end_row();

        ui.label("Family");
        ui.label(format_ids(related));
        ui.end_row();
    });
}

fn station_properties(app: &mut TubeMapApp, ui: &mut egui::Ui, id: StationId) {
    let (mut name, coords, lines) = {
        let document = app.context().document().lock();
        let Some(station) = document.station(id) else {
            ui.label(format!("Station {} no longer exists", id));
            return;
        };
        (station.name().to_owned(), station.coords(), station.lines().to_vec())
    };

    egui::Grid::new("station_properties_grid").num_columns(2).show(ui, |ui| {
        ui.label("Station");
        ui.label(id.to_string());
        ui.end_row();

        ui.label("Name");
        if ui.text_edit_singleline(&mut name).changed() {
            if let Err(err) = app.context_mut().rename_station(id, name.as_str()) {
                log::error!("Failed to rename station: {}", err);
            }
        }
        ui.end_row();

        ui.label("Position");
        ui.label(format!("({:.1}, {:.1})", coords.x, coords.y));
        ui.end_row();

        ui.label(if lines.len() > 1 { "Junction of" } else { "On line" });
        ui.label(format_ids(lines));
        ui.end_row();
    });
}
