use parking_lot::Mutex;
use std::sync::Arc;

use crate::event::{EditorEvent, EventHandler};
use crate::input::{InputHandler, Viewport};
use crate::panels::{central_panel, properties_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{EditorConfig, EditorContext};

/// Keeps the description of the most recent editor event for the status bar
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    latest: Arc<Mutex<Option<String>>>,
}

impl StatusLine {
    pub fn text(&self) -> Option<String> {
        self.latest.lock().clone()
    }
}

impl EventHandler for StatusLine {
    fn handle_event(&mut self, event: &EditorEvent) {
        // Hover changes are too noisy for the status bar
        if matches!(event, EditorEvent::HoverChanged { .. }) {
            return;
        }
        *self.latest.lock() = Some(event.to_string());
    }
}

pub struct TubeMapApp {
    context: EditorContext,
    renderer: Renderer,
    viewport: Viewport,
    input: InputHandler,
    status: StatusLine,
}

impl Default for TubeMapApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl TubeMapApp {
    /// Called once before the first frame.
    ///
    /// An explicit configuration wins over the one persisted by the last
    /// session.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<EditorConfig>) -> Self {
        let config = config
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value::<EditorConfig>(storage, eframe::APP_KEY))
            })
            .filter(|config| match config.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Ignoring invalid configuration: {}", err);
                    false
                }
            })
            .unwrap_or_default();

        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let context = EditorContext::new(config);
        let status = StatusLine::default();
        context.event_bus().subscribe(Box::new(status.clone()));

        Self {
            context,
            renderer: Renderer::new(),
            viewport: Viewport::new(),
            input: InputHandler::new(),
            status,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.context
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Translate this frame's canvas input and feed it to the editor
    pub fn handle_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        for event in self.input.process_input(ctx, response, &mut self.viewport) {
            self.context.handle_event(event);
        }
    }

    pub(crate) fn render_parts(&mut self) -> (&EditorContext, &mut Renderer, &Viewport) {
        (&self.context, &mut self.renderer, &self.viewport)
    }
}

impl eframe::App for TubeMapApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.context.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.text().unwrap_or_else(|| "Ready".to_owned()));
                ui.separator();
                let document = self.context.document().lock();
                ui.label(format!(
                    "{} lines, {} stations",
                    document.lines().len(),
                    document.stations().len()
                ));
            });
        });

        tools_panel(self, ctx);
        properties_panel(self, ctx);
        central_panel(self, ctx);
    }
}
