use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::geometry::{AngleConstraint, WorldBounds};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Every tunable of the editor. Persisted between sessions; the diagram is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct EditorConfig {
    pub world: WorldBounds,
    pub grid_size: f32,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    /// Stroke width of a line, also the offset between a line and its duplicate
    pub line_width: f32,
    /// Extra width of the translucent outline drawn under a highlighted line
    pub highlight_extra_width: f32,
    /// A click closer than this to the last point finishes the line
    pub close_path_threshold: f32,
    pub hover_threshold: f32,
    pub station_threshold: f32,
    /// Lines with more vertices than this are drawn with rounded corners
    pub smoothing_min_vertices: usize,
    /// Corner radius as a fraction of the shorter adjacent segment
    pub corner_radius_ratio: f32,
    pub ghost_point_radius: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            world: WorldBounds::default(),
            grid_size: 20.0,
            snap_to_grid: true,
            show_grid: true,
            line_width: 8.0,
            highlight_extra_width: 2.0,
            close_path_threshold: 15.0,
            hover_threshold: 5.0,
            station_threshold: 5.0,
            smoothing_min_vertices: 4,
            corner_radius_ratio: 0.4,
            ghost_point_radius: 5.0,
        }
    }
}

impl EditorConfig {
    pub fn angle_constraint(&self) -> AngleConstraint {
        AngleConstraint::new(self.world, self.snap_to_grid.then_some(self.grid_size))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("world.width", self.world.width),
            ("world.height", self.world.height),
            ("grid_size", self.grid_size),
            ("line_width", self.line_width),
            ("close_path_threshold", self.close_path_threshold),
            ("hover_threshold", self.hover_threshold),
            ("station_threshold", self.station_threshold),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !(0.0..=0.5).contains(&self.corner_radius_ratio) {
            return Err(ConfigError::Invalid(format!(
                "corner_radius_ratio must be within 0..=0.5, got {}",
                self.corner_radius_ratio
            )));
        }

        Ok(())
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        log::info!("Loading editor config from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
