use crate::css::background_image_url;
use crate::Surface;

/// State of layer background image at setup.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerImage {
    /// No image declared or the declaration has no usable URL.
    Missing,
    Declared(String),
}

pub fn inspect_layer<S: Surface>(surface: &S, layer: S::Element) -> LayerImage {
    surface
        .style(layer, "background-image")
        .filter(|value| value.trim() != "none")
        .and_then(|value| background_image_url(&value))
        .map(LayerImage::Declared)
        .unwrap_or(LayerImage::Missing)
}

pub fn apply_fallback<S: Surface>(surface: &mut S, layer: S::Element, color: &str) {
    surface.set_style(layer, "background-image", "none");
    surface.set_style(layer, "background-color", color);
}
