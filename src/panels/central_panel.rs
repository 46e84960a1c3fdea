use crate::TubeMapApp;
use crate::renderer::{EguiSurface, Overlay};

pub fn central_panel(app: &mut TubeMapApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        app.viewport_mut().set_rect(response.rect);

        // Handle input before rendering so this frame shows its effect
        app.handle_input(ctx, &response);

        painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);

        let (context, renderer, viewport) = app.render_parts();
        let mut surface = EguiSurface::new(&painter, viewport);
        let overlay = Overlay {
            draft: context.draft(),
            ghost: context.ghost_point(),
            selection: context.selection(),
        };
        let document = context.document().lock();
        renderer.render(&mut surface, &document, overlay, context.config());
    });
}
