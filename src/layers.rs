use std::fmt;

use log::debug;

use crate::config::LayerMotion;
use crate::css::px;
use crate::Surface;

/// Background layers moved by parallax effect and the content layer they follow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layers<E> {
    pub back: E,
    pub base: E,
    pub foreground: E,
}

/// Stretches both background layers to the full scrollable height of content layer.
/// Returns the applied height.
pub fn sync_heights<S: Surface>(surface: &mut S, layers: &Layers<S::Element>) -> f32 {
    let height = surface.scroll_height(layers.foreground);
    let value = px(height);
    surface.set_style(layers.back, "height", &value);
    surface.set_style(layers.base, "height", &value);
    debug!("parallax layers height synced to {value}");
    height
}

/// The layer transform for given scroll offset, depends on nothing else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    pub depth: f32,
    pub scale: f32,
    pub translate_y: f32,
}

impl LayerTransform {
    pub fn new(motion: &LayerMotion, scroll: f32) -> Self {
        Self {
            depth: motion.depth,
            scale: motion.scale,
            translate_y: scroll * motion.speed,
        }
    }
}

impl fmt::Display for LayerTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translateZ({}px) scale({}) translateY({}px)",
            self.depth, self.scale, self.translate_y
        )
    }
}

pub fn apply_transforms<S: Surface>(
    surface: &mut S,
    layers: &Layers<S::Element>,
    back: &LayerMotion,
    base: &LayerMotion,
    scroll: f32,
) {
    let transform = LayerTransform::new(back, scroll).to_string();
    surface.set_style(layers.back, "transform", &transform);
    let transform = LayerTransform::new(base, scroll).to_string();
    surface.set_style(layers.base, "transform", &transform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    pub fn test_far_layer_transform() {
        let config = Config::default();
        let transform = LayerTransform::new(&config.back, 100.0);
        assert_eq!(transform.translate_y, 50.0);
        assert_eq!(
            transform.to_string(),
            "translateZ(-2px) scale(3) translateY(50px)"
        )
    }

    #[test]
    pub fn test_near_layer_transform() {
        let config = Config::default();
        let transform = LayerTransform::new(&config.base, 10.0);
        assert_eq!(transform.translate_y, 10.0 * 0.7);
        assert!(transform.to_string().starts_with("translateZ(-1px) scale(2) translateY("))
    }

    #[test]
    pub fn test_transform_at_top() {
        let config = Config::default();
        let transform = LayerTransform::new(&config.back, 0.0);
        assert_eq!(
            transform.to_string(),
            "translateZ(-2px) scale(3) translateY(0px)"
        )
    }

    #[test]
    pub fn test_transform_is_linear() {
        let config = Config::default();
        for scroll in [0.0, 1.0, 33.3, 480.0, 12345.5, 1.0e7] {
            let back = LayerTransform::new(&config.back, scroll);
            let base = LayerTransform::new(&config.base, scroll);
            assert_eq!(back.translate_y, scroll * 0.5);
            assert_eq!(base.translate_y, scroll * 0.7);
            assert_eq!(back, LayerTransform::new(&config.back, scroll));
        }
    }
}
