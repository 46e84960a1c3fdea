//! The entities of a diagram. These are plain data: rendering state lives in
//! the [`Renderer`](crate::renderer::Renderer), keyed by id.

mod line;
mod station;

pub use line::{Line, LineId};
pub use station::{Station, StationId};
