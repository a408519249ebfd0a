pub use config::*;
pub use document::*;
pub use error::*;
pub use input::*;
pub use layers::{LayerTransform, Layers};
pub use loader::*;
pub use output::*;
pub use parallax::*;
pub use surface::*;

mod anchors;
mod animation;
mod config;
mod css;
mod document;
mod error;
mod fallback;
mod input;
mod layers;
mod layout;
mod listeners;
mod loader;
mod output;
mod parallax;
mod surface;
#[cfg(test)]
mod testing;
