use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::css::is_valid_color;
use crate::{ParallaxError, ScrollBehavior};

/// Page structure and motion constants of parallax effect.
///
/// Every field has default, so partial JSON like `{"fallback_color": "black"}` or
/// `{"back": {"speed": 0.25}}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selectors: Selectors,
    /// The far layer, moves slowest.
    pub back: LayerMotion,
    /// The near layer.
    pub base: LayerMotion,
    /// Solid color substituted for missing or broken background images.
    pub fallback_color: String,
    pub anchor_scroll: ScrollBehavior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub container: String,
    pub header: String,
    pub back: String,
    pub base: String,
    pub foreground: String,
    pub layer: String,
    pub anchor: String,
}

/// Layer depth placement and speed relative to scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerMotion {
    pub depth: f32,
    pub scale: f32,
    pub speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            back: LayerMotion {
                depth: -2.0,
                scale: 3.0,
                speed: 0.5,
            },
            base: LayerMotion {
                depth: -1.0,
                scale: 2.0,
                speed: 0.7,
            },
            fallback_color: "#6B8E23".to_string(),
            anchor_scroll: ScrollBehavior::Smooth,
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            container: ".parallax-container".to_string(),
            header: ".hero-section".to_string(),
            back: ".parallax-layer-back".to_string(),
            base: ".parallax-layer-base".to_string(),
            foreground: ".parallax-layer-foreground".to_string(),
            layer: ".parallax-layer".to_string(),
            anchor: "a[href^=\"#\"]".to_string(),
        }
    }
}

impl Config {
    /// Reads configuration, fields missing at any depth keep default values.
    pub fn from_json(json: &str) -> Result<Self, ParallaxError> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut value = serde_json::to_value(Config::default())?;
        merge(&mut value, overrides);
        let config: Config = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ParallaxError> {
        if !is_valid_color(&self.fallback_color) {
            return Err(ParallaxError::Config(format!(
                "fallback color {:?} is not a CSS color",
                self.fallback_color
            )));
        }
        for motion in [&self.back, &self.base] {
            if !motion.speed.is_finite() || !motion.scale.is_finite() || !motion.depth.is_finite()
            {
                return Err(ParallaxError::Config(format!(
                    "layer motion must be finite, {motion:?}"
                )));
            }
        }
        Ok(())
    }
}

fn merge(target: &mut Value, overrides: Value) {
    match (target, overrides) {
        (Value::Object(target), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match target.get_mut(&key) {
                    Some(field) => merge(field, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, value) => *target = value,
    }
}
