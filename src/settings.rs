use std::io;
use std::path::{Path, PathBuf};

use force_layout::{ForceParams, Viewport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const SETTINGS_FILE: &str = "settings.json";

/// Common slider metadata so bounds live in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.min
        }
    }
}

// Layout ranges
pub const LINK_DISTANCE_RANGE: SliderRange = SliderRange::new(20.0, 200.0, 1.0);
pub const CHARGE_STRENGTH_RANGE: SliderRange = SliderRange::new(-1000.0, -10.0, 10.0);
pub const VELOCITY_DECAY_RANGE: SliderRange = SliderRange::new(0.05, 0.9, 0.01);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f32,
    pub height: f32,
}

impl CanvasSettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub layout: ForceParams,
    pub canvas: CanvasSettings,
    pub show_labels: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            layout: ForceParams::default(),
            canvas: CanvasSettings::default(),
            show_labels: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppSettings {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, SettingsError> {
        let settings: AppSettings =
            serde_json::from_str(text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(SettingsError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                info!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "using default settings");
                Self::default()
            }
        }
    }

    /// Pull slider-backed values into their ranges and replace any other
    /// layout or canvas value the engine cannot run with by its default.
    pub fn sanitized(mut self) -> Self {
        let d = ForceParams::default();
        let layout = &mut self.layout;
        layout.link_distance = LINK_DISTANCE_RANGE.clamp(layout.link_distance);
        layout.charge_strength = CHARGE_STRENGTH_RANGE.clamp(layout.charge_strength);
        layout.velocity_decay = VELOCITY_DECAY_RANGE.clamp(layout.velocity_decay);

        layout.alpha_decay = valid_or_default(
            "alpha_decay",
            layout.alpha_decay,
            d.alpha_decay,
            |v| v > 0.0 && v < 1.0,
        );
        layout.alpha_min = valid_or_default(
            "alpha_min",
            layout.alpha_min,
            d.alpha_min,
            |v| v > 0.0 && v < 1.0,
        );
        let alpha_min = layout.alpha_min;
        layout.drag_alpha_target = valid_or_default(
            "drag_alpha_target",
            layout.drag_alpha_target,
            d.drag_alpha_target.max(alpha_min),
            |v| v >= alpha_min && v <= 1.0,
        );
        layout.center_strength = valid_or_default(
            "center_strength",
            layout.center_strength,
            d.center_strength,
            |v| (0.0..=1.0).contains(&v),
        );
        layout.mass_unit =
            valid_or_default("mass_unit", layout.mass_unit, d.mass_unit, |v| v > 0.0);
        layout.link_stiffness = valid_or_default(
            "link_stiffness",
            layout.link_stiffness,
            d.link_stiffness,
            |v| v >= 0.0,
        );
        layout.charge_distance_min = valid_or_default(
            "charge_distance_min",
            layout.charge_distance_min,
            d.charge_distance_min,
            |v| v > 0.0,
        );

        let canvas = CanvasSettings::default();
        self.canvas.width =
            valid_or_default("canvas.width", self.canvas.width, canvas.width, |v| v > 0.0);
        self.canvas.height =
            valid_or_default("canvas.height", self.canvas.height, canvas.height, |v| v > 0.0);
        self
    }
}

/// `value` when it is finite and passes `valid`, otherwise `default`.
fn valid_or_default(field: &str, value: f32, default: f32, valid: impl Fn(f32) -> bool) -> f32 {
    if value.is_finite() && valid(value) {
        value
    } else {
        warn!(field, value, default, "invalid setting, using default");
        default
    }
}
