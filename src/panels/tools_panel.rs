use crate::TubeMapApp;
use crate::components::ToolButton;
use crate::tools::{Tool, ToolKind};

pub fn tools_panel(app: &mut TubeMapApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.context().active_tool_kind();
            ui.horizontal(|ui| {
                for kind in ToolKind::SELECTABLE {
                    if ToolButton::new(kind, active == kind).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind);
                        app.context_mut().toggle_tool(kind);
                    }
                }
            });

            if let Some(tool) = app.context().active_tool() {
                ui.label(format!("{} ({})", tool.name(), tool.current_state_name()));
            } else {
                ui.label("No tool");
            }

            ui.separator();
            ui.heading("Canvas");

            let mut config = app.context().config().clone();
            ui.checkbox(&mut config.snap_to_grid, "Snap to grid");
            ui.checkbox(&mut config.show_grid, "Show grid");
            ui.horizontal(|ui| {
                ui.label("Grid size:");
                ui.add(egui::Slider::new(&mut config.grid_size, 5.0..=100.0));
            });
            ui.horizontal(|ui| {
                ui.label("Line width:");
                ui.add(egui::Slider::new(&mut config.line_width, 1.0..=30.0));
            });
            if config != *app.context().config() {
                match config.validate() {
                    Ok(()) => app.context_mut().set_config(config),
                    Err(err) => log::warn!("Rejected configuration change: {}", err),
                }
            }

            ui.horizontal(|ui| {
                ui.label(format!("Zoom: {:.0}%", app.viewport().zoom() * 100.0));
                if ui.button("Reset view").clicked() {
                    app.viewport_mut().reset();
                }
            });

            ui.separator();
            ui.heading("Palette");

            let stats = app.context().palette().lock().usage_stats();
            egui::Grid::new("palette_usage_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for usage in stats {
                        let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 2.0, usage.color);
                        ui.label(usage.usage_count.to_string());
                        ui.end_row();
                    }
                });
            if ui.button("Reset usage").clicked() {
                app.context().palette().lock().reset_usage();
            }
        });
}
