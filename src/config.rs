use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::math::{hex_to_rgb, Rgb, SceneRng};
use crate::post::{Bloom, ColorCorrection, PostChain};
use crate::scenes::Showcase;

/// Environment variable consulted when no showcase is given on the command line
pub const SHOWCASE_ENV: &str = "HOLO_SHOWCASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Holo Scenes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 10.0, 30.0],
            target: [0.0; 3],
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    pub bloom: Option<Bloom>,
    pub color_correction: Option<ColorCorrection>,
}

impl PostConfig {
    pub fn chain(&self, width: u32, height: u32) -> PostChain {
        PostChain::from_parts(width, height, self.bloom, self.color_correction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub showcase: Showcase,
    /// Fixed seed for reproducible layouts; a random one is drawn when absent
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub post: PostConfig,
    /// 0xRRGGBB clear color
    pub background: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_showcase(Showcase::default())
    }
}

impl Config {
    /// Stock settings for a showcase
    pub fn for_showcase(showcase: Showcase) -> Self {
        match showcase {
            Showcase::Holodeck => Self {
                showcase,
                seed: None,
                window: WindowConfig::default(),
                camera: CameraConfig::default(),
                post: PostConfig {
                    bloom: Some(Bloom {
                        strength: 1.5,
                        radius: 0.4,
                        threshold: 0.85,
                    }),
                    color_correction: Some(ColorCorrection {
                        brightness: 0.05,
                        contrast: 1.2,
                        saturation: 1.2,
                    }),
                },
                background: 0x050510,
            },
            Showcase::Constellation => Self {
                showcase,
                seed: None,
                window: WindowConfig::default(),
                camera: CameraConfig {
                    fov: 60.0,
                    position: [0.0, 0.0, 40.0],
                    auto_rotate: false,
                    ..CameraConfig::default()
                },
                post: PostConfig {
                    bloom: Some(Bloom {
                        strength: 0.8,
                        radius: 0.3,
                        threshold: 0.1,
                    }),
                    color_correction: None,
                },
                background: 0xf0f0f0,
            },
            Showcase::Aurora => Self {
                showcase,
                seed: None,
                window: WindowConfig::default(),
                camera: CameraConfig {
                    position: [0.0, 0.0, 1.0],
                    auto_rotate: false,
                    ..CameraConfig::default()
                },
                post: PostConfig::default(),
                background: 0x000000,
            },
        }
    }

    /// Parse JSON, filling missing fields from the chosen showcase's defaults
    pub fn from_json(text: &str, showcase: Option<Showcase>) -> Result<Self> {
        let mut overlay: Value = serde_json::from_str(text).context("config is not valid JSON")?;
        if let (Some(showcase), Value::Object(map)) = (showcase, &mut overlay) {
            map.insert("showcase".to_string(), serde_json::to_value(showcase)?);
        }

        let chosen = match overlay.get("showcase") {
            Some(value) => serde_json::from_value(value.clone()).context("invalid showcase in config")?,
            None => Showcase::default(),
        };

        let mut merged = serde_json::to_value(Self::for_showcase(chosen))?;
        merge(&mut merged, overlay);
        serde_json::from_value(merged).context("invalid config")
    }

    pub fn load(path: &Path, showcase: Option<Showcase>) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text, showcase)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Combine an optional config file with a command line or environment showcase
    pub fn resolve(path: Option<&Path>, showcase: Option<Showcase>) -> Result<Self> {
        let showcase = match showcase {
            Some(showcase) => Some(showcase),
            None => showcase_from_env()?,
        };
        let config = match path {
            Some(path) => Self::load(path, showcase)?,
            None => Self::for_showcase(showcase.unwrap_or_default()),
        };
        info!("showcase {}", config.showcase);
        Ok(config)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn rng(&self) -> SceneRng {
        let rng = match self.seed {
            Some(seed) => SceneRng::seeded(seed),
            None => SceneRng::from_entropy(),
        };
        info!("scene seed {}", rng.seed());
        rng
    }

    pub fn background_rgb(&self) -> Rgb {
        hex_to_rgb(self.background)
    }
}

fn showcase_from_env() -> Result<Option<Showcase>> {
    parse_showcase_override(std::env::var(SHOWCASE_ENV).ok())
}

fn parse_showcase_override(value: Option<String>) -> Result<Option<Showcase>> {
    match value {
        Some(value) if !value.trim().is_empty() => value
            .parse()
            .map(Some)
            .with_context(|| format!("{} is set to an unknown showcase", SHOWCASE_ENV)),
        _ => Ok(None),
    }
}

/// Recursively overlay `overlay` onto `base`; objects merge, everything else replaces
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showcase_defaults() {
        let holodeck = Config::for_showcase(Showcase::Holodeck);
        assert_eq!(holodeck.background, 0x050510);
        assert_eq!(holodeck.camera.fov, 75.0);
        assert!(holodeck.camera.auto_rotate);
        assert_eq!(holodeck.post.bloom.map(|b| b.threshold), Some(0.85));

        let constellation = Config::for_showcase(Showcase::Constellation);
        assert_eq!(constellation.background, 0xf0f0f0);
        assert_eq!(constellation.camera.position, [0.0, 0.0, 40.0]);
        assert!(!constellation.camera.auto_rotate);
        assert!(constellation.post.color_correction.is_none());

        assert!(Config::for_showcase(Showcase::Aurora).post.bloom.is_none());
    }

    #[test]
    fn partial_json_keeps_showcase_defaults() {
        let config = Config::from_json(r#"{ "showcase": "constellation", "seed": 7, "camera": { "fov": 50.0 } }"#, None)
            .unwrap();
        assert_eq!(config.showcase, Showcase::Constellation);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.camera.fov, 50.0);
        assert_eq!(config.camera.position, [0.0, 0.0, 40.0]);
        assert_eq!(config.background, 0xf0f0f0);
    }

    #[test]
    fn explicit_showcase_wins_over_file() {
        let config = Config::from_json(r#"{ "showcase": "constellation" }"#, Some(Showcase::Aurora)).unwrap();
        assert_eq!(config.showcase, Showcase::Aurora);
        assert!(config.post.bloom.is_none());
    }

    #[test]
    fn post_passes_can_be_disabled() {
        let config = Config::from_json(r#"{ "post": { "bloom": null } }"#, None).unwrap();
        assert!(config.post.bloom.is_none());
        assert!(config.post.color_correction.is_some());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Config::from_json("not json", None).is_err());
        assert!(Config::from_json(r#"{ "showcase": "matrix" }"#, None).is_err());
        assert!(parse_showcase_override(Some("matrix".into())).is_err());
        assert_eq!(parse_showcase_override(Some(" ".into())).unwrap(), None);
        assert_eq!(
            parse_showcase_override(Some("AURORA".into())).unwrap(),
            Some(Showcase::Aurora)
        );
    }

    #[test]
    fn seed_override_only_when_given() {
        let config = Config::default().with_seed(Some(3)).with_seed(None);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.rng().seed(), 3);
    }
}
