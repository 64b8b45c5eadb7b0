//! Config file loading and saving.

use bevy::math::UVec2;
use bevy_pixel_lens::{ConfigError, PixelCamera, PixelLensConfig, ScalingFilter};
use tempfile::TempDir;

#[test]
fn saved_config_loads_back() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("nested").join("pixel_lens.toml");
  let config = PixelLensConfig {
    resolution: [256, 144],
    stretching: true,
    keep_aspect_ratio: true,
    filter: ScalingFilter::Bicubic,
    updates_per_second: 120,
    zoom: 1.5,
    ..Default::default()
  };

  config.save(&path).unwrap();
  assert_eq!(PixelLensConfig::load(&path).unwrap(), config);
}

#[test]
fn missing_file_falls_back_to_defaults() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("absent.toml");
  assert!(matches!(
    PixelLensConfig::load(&path),
    Err(ConfigError::Io(_))
  ));
  assert_eq!(
    PixelLensConfig::load_or_default(&path),
    PixelLensConfig::default()
  );
}

#[test]
fn broken_file_falls_back_to_defaults() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("broken.toml");
  std::fs::write(&path, "resolution = [0, 0]\n").unwrap();
  assert!(matches!(
    PixelLensConfig::load(&path),
    Err(ConfigError::Invalid(_))
  ));
  assert_eq!(
    PixelLensConfig::load_or_default(&path),
    PixelLensConfig::default()
  );
}

#[test]
fn camera_from_loaded_config() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join("pixel_lens.toml");
  std::fs::write(
    &path,
    "resolution = [64, 32]\nfilter = \"nearest\"\nredraw_managed = true\n",
  )
  .unwrap();

  let camera = PixelCamera::from_config(&PixelLensConfig::load(&path).unwrap());
  assert_eq!(camera.resolution(), UVec2::new(64, 32));
  assert_eq!(camera.filter(), ScalingFilter::Nearest);
  assert!(camera.is_redraw_managed());
}
