mod config;
pub mod context;

pub use config::{ConfigResult, EditorConfig};
pub use context::EditorContext;
