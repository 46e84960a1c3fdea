#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod panels;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod tools;

pub use app::TubeMapApp;
pub use document::{Document, SharedDocument};
pub use element::{Line, LineId, Station, StationId};
pub use error::{ConfigError, GraphError, TransitionError};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use input::{InputEvent, InputHandler, Viewport};
pub use palette::{ColorPalette, SharedPalette};
pub use renderer::{DiagramSurface, PolylineStyle, Renderer};
pub use selection::Selection;
pub use state::{EditorConfig, EditorContext};
pub use tools::{Tool, ToolKind, ToolType};
