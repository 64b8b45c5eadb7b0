//! TOML configuration for the camera and its tick clock.
//!
//! ```toml
//! resolution = [320, 180]
//! stretching = true
//! keep_aspect_ratio = true
//! filter = "hermite"
//! updates_per_second = 60
//! ```
//!
//! Missing keys take their default value.

use std::path::{Path, PathBuf};

use bevy::log::{debug, info, warn};
use bevy::math::UVec2;
use serde::{Deserialize, Serialize};

use crate::projection::{ProjectionConfig, ScalingFilter};
use crate::ticks::{DEFAULT_UPS, TickClock};
use crate::zoomer::is_valid_zoom;

#[cfg(feature = "native")]
const CONFIG_FILE: &str = "pixel_lens.toml";

/// Error loading or saving a [`PixelLensConfig`].
#[derive(Debug)]
pub enum ConfigError {
  Io(std::io::Error),
  Parse(toml::de::Error),
  Serialize(toml::ser::Error),
  /// Parsed fine, but a value is out of range.
  Invalid(String),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "config I/O error: {e}"),
      Self::Parse(e) => write!(f, "config parse error: {e}"),
      Self::Serialize(e) => write!(f, "config serialize error: {e}"),
      Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
      Self::Serialize(e) => Some(e),
      Self::Invalid(_) => None,
    }
  }
}

impl From<std::io::Error> for ConfigError {
  fn from(e: std::io::Error) -> Self {
    Self::Io(e)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(e: toml::de::Error) -> Self {
    Self::Parse(e)
  }
}

impl From<toml::ser::Error> for ConfigError {
  fn from(e: toml::ser::Error) -> Self {
    Self::Serialize(e)
  }
}

/// Camera and clock settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelLensConfig {
  /// Logical game resolution.
  pub resolution: [u32; 2],
  pub stretching: bool,
  pub keep_aspect_ratio: bool,
  pub dynamic_scaling: bool,
  pub best_fit_render_size: [u32; 2],
  pub best_fit_context_size: [u32; 2],
  pub filter: ScalingFilter,
  /// Ticks per update.
  pub tick_rate: u64,
  pub updates_per_second: u32,
  /// Initial zoom level.
  pub zoom: f64,
  pub redraw_managed: bool,
}

impl Default for PixelLensConfig {
  fn default() -> Self {
    let projection = ProjectionConfig::default();
    Self {
      resolution: [320, 180],
      stretching: projection.stretching,
      keep_aspect_ratio: projection.keep_aspect_ratio,
      dynamic_scaling: projection.dynamic_scaling,
      best_fit_render_size: projection.best_fit_render_size.as_uvec2().to_array(),
      best_fit_context_size: projection.best_fit_context_size.as_uvec2().to_array(),
      filter: projection.filter,
      tick_rate: 1,
      updates_per_second: DEFAULT_UPS,
      zoom: 1.0,
      redraw_managed: false,
    }
  }
}

impl PixelLensConfig {
  pub fn resolution(&self) -> UVec2 {
    UVec2::from_array(self.resolution)
  }

  pub fn projection(&self) -> ProjectionConfig {
    ProjectionConfig {
      stretching: self.stretching,
      keep_aspect_ratio: self.keep_aspect_ratio,
      dynamic_scaling: self.dynamic_scaling,
      best_fit_render_size: UVec2::from_array(self.best_fit_render_size).as_dvec2(),
      best_fit_context_size: UVec2::from_array(self.best_fit_context_size).as_dvec2(),
      filter: self.filter,
    }
  }

  pub fn tick_clock(&self) -> TickClock {
    TickClock::new(self.tick_rate, self.updates_per_second)
  }

  /// Checks every value the camera would otherwise panic on.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let sizes = [
      ("resolution", self.resolution),
      ("best_fit_render_size", self.best_fit_render_size),
      ("best_fit_context_size", self.best_fit_context_size),
    ];
    for (name, [x, y]) in sizes {
      if x < 1 || y < 1 {
        return Err(ConfigError::Invalid(format!(
          "{name} must be at least [1, 1], got [{x}, {y}]"
        )));
      }
    }
    if self.tick_rate < 1 {
      return Err(ConfigError::Invalid("tick_rate must be at least 1".into()));
    }
    if self.updates_per_second < 1 {
      return Err(ConfigError::Invalid(
        "updates_per_second must be at least 1".into(),
      ));
    }
    if !is_valid_zoom(self.zoom) {
      return Err(ConfigError::Invalid(format!(
        "zoom {} outside [0.005, 500]",
        self.zoom
      )));
    }
    Ok(())
  }

  /// Parses and validates a TOML document.
  pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config = Self::from_toml_str(&contents)?;
    info!("Loaded pixel lens config from {}", path.display());
    Ok(config)
  }

  /// Loads `path`, falling back to defaults if it's missing or broken.
  pub fn load_or_default(path: &Path) -> Self {
    match Self::load(path) {
      Ok(config) => config,
      Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!("No pixel lens config at {}, using defaults", path.display());
        Self::default()
      }
      Err(e) => {
        warn!("Failed to load pixel lens config: {e}, using defaults");
        Self::default()
      }
    }
  }

  pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    debug!("Saved pixel lens config to {}", path.display());
    Ok(())
  }
}

/// Default config location under the user's config directory.
pub fn default_config_path() -> Option<PathBuf> {
  #[cfg(feature = "native")]
  {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("bevy_pixel_lens").join(CONFIG_FILE))
  }
  #[cfg(not(feature = "native"))]
  {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_is_default() {
    assert_eq!(
      PixelLensConfig::from_toml_str("").unwrap(),
      PixelLensConfig::default()
    );
  }

  #[test]
  fn partial_document_overrides() {
    let config = PixelLensConfig::from_toml_str(
      r#"
        resolution = [128, 72]
        stretching = true
        filter = "src_bilinear"
        tick_rate = 2
      "#,
    )
    .unwrap();
    assert_eq!(config.resolution(), UVec2::new(128, 72));
    assert!(config.projection().stretching);
    assert_eq!(config.filter, ScalingFilter::SrcBilinear);
    assert_eq!(config.tick_clock().rate(), 2);
    assert_eq!(config.updates_per_second, DEFAULT_UPS);
  }

  #[test]
  fn invalid_values_are_rejected() {
    let err = PixelLensConfig::from_toml_str("resolution = [0, 10]").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("resolution"));

    let err = PixelLensConfig::from_toml_str("zoom = 900.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn malformed_toml_is_parse_error() {
    let err = PixelLensConfig::from_toml_str("resolution = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(std::error::Error::source(&err).is_some());
  }

  #[test]
  fn unknown_filter_is_parse_error() {
    let err = PixelLensConfig::from_toml_str("filter = \"lanczos\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }
}
