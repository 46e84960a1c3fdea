use crate::element::{LineId, StationId};

/// What the property drawer is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Line(LineId),
    Station(StationId),
}
