// config.rs - Demo settings with RON persistence
//
// Every field has a default matching the reference scene, so a config file
// only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Top-level settings for both demos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub sky: SkyConfig,
    pub shatter: ShatterConfig,
    /// Quiet period before a burst of resize events is delivered.
    pub resize_debounce_ms: f64,
}

/// Octahedron sky settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Radius of the attributed inner mesh.
    pub radius: f32,
    /// Subdivision level of the inner mesh.
    pub detail: u32,
    /// Radius of the plain outer shell.
    pub shell_radius: f32,
    pub shell_detail: u32,
    /// Per-face delays are drawn from `[0, max_delay)`.
    pub max_delay: f32,
}

/// One ring of sample points around the focal point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SampleRing {
    pub radius: f32,
    pub count: u32,
}

impl SampleRing {
    pub const fn new(radius: f32, count: u32) -> Self {
        Self { radius, count }
    }
}

/// What a click does while a shatter animation is still running.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Drop the click.
    #[default]
    IgnoreWhileActive,
    /// Release the running session and shatter the current image again.
    Restart,
}

/// Image shatter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShatterConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub rings: Vec<SampleRing>,
    /// Ring jitter as a fraction of the ring radius.
    pub jitter: f32,
    /// Seconds of delay per pixel of distance from the focal point.
    pub delay_per_px: f32,
    /// Multiplicative delay jitter, `(min, max)`.
    pub delay_jitter: (f32, f32),
    /// Rotation magnitudes in degrees.
    pub rotation_x: f32,
    pub rotation_y: f32,
    /// Target translation along z.
    pub depth: f32,
    pub fly_duration: f32,
    /// Fade start, relative to the fragment's own delay.
    pub fade_start: f32,
    pub fade_duration: f32,
    /// Vertical offset a new image drops in from.
    pub drop_height: f32,
    pub drop_duration: f32,
    /// CSS perspective of the fragment container.
    pub perspective: f32,
    pub click_policy: ClickPolicy,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sky: SkyConfig::default(),
            shatter: ShatterConfig::default(),
            resize_debounce_ms: 1000.0,
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            radius: 90.0,
            detail: 4,
            shell_radius: 150.0,
            shell_detail: 4,
            max_delay: 0.5,
        }
    }
}

impl Default for ShatterConfig {
    fn default() -> Self {
        Self {
            image_width: 768,
            image_height: 485,
            // The outer ring covers the image corners for any click.
            rings: vec![
                SampleRing::new(50.0, 12),
                SampleRing::new(150.0, 12),
                SampleRing::new(300.0, 12),
                SampleRing::new(1200.0, 12),
            ],
            jitter: 0.25,
            delay_per_px: 0.003,
            delay_jitter: (0.9, 1.1),
            rotation_x: 30.0,
            rotation_y: 90.0,
            depth: -500.0,
            fly_duration: 1.0,
            fade_start: 0.6,
            fade_duration: 0.4,
            drop_height: -1000.0,
            drop_duration: 0.75,
            perspective: 500.0,
            click_policy: ClickPolicy::default(),
        }
    }
}

impl ShatterConfig {
    /// Number of points the radial sampler emits, focal point included.
    pub fn sample_count(&self) -> usize {
        1 + self.rings.iter().map(|r| r.count as usize).sum::<usize>()
    }
}

impl DemoConfig {
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(ConfigError::Parse)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }

    /// Load a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_ron(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
