use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::ParallaxError;

/// The minimal set of page capabilities parallax effect depends on.
///
/// Implemented by [`crate::Document`] and by test fakes. Styles are inline styles only,
/// the same as `element.style` in browser.
pub trait Surface {
    /// Handle of page element, stays valid for the page lifetime.
    type Element: Copy + Eq + Hash + Debug;

    /// Returns the first element matching CSS selector.
    fn query(&self, selector: &str) -> Result<Option<Self::Element>, ParallaxError>;

    /// Returns all elements matching CSS selector in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, ParallaxError>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn attribute(&self, element: Self::Element, name: &str) -> Option<String>;

    fn style(&self, element: Self::Element, property: &str) -> Option<String>;

    fn set_style(&mut self, element: Self::Element, property: &str, value: &str);

    fn scroll_top(&self, element: Self::Element) -> f32;

    /// The height of element content including content not visible due to overflow.
    fn scroll_height(&self, element: Self::Element) -> f32;

    /// The distance from element top border to the top of its offset parent.
    fn offset_top(&self, element: Self::Element) -> f32;

    fn offset_height(&self, element: Self::Element) -> f32;

    fn scroll_to(&mut self, element: Self::Element, request: ScrollRequest);

    /// Short human readable identification of element for diagnostics.
    fn describe(&self, element: Self::Element) -> String;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Instant,
    /// Animated transition, easing and duration are up to the surface.
    #[default]
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub top: f32,
    pub behavior: ScrollBehavior,
}
