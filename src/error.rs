use std::fmt;

#[derive(Debug)]
pub enum ParallaxError {
    /// Required page element is absent, holds the selector.
    ElementNotFound(String),
    InvalidSelector(String),
    Config(String),
    Json(serde_json::Error),
    Layout(taffy::TaffyError),
}

impl fmt::Display for ParallaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParallaxError::ElementNotFound(selector) => {
                write!(f, "element not found: {selector}")
            }
            ParallaxError::InvalidSelector(selector) => write!(f, "invalid selector: {selector}"),
            ParallaxError::Config(message) => write!(f, "invalid config: {message}"),
            ParallaxError::Json(error) => write!(f, "unable to read config, {error}"),
            ParallaxError::Layout(error) => write!(f, "layout failed, {error:?}"),
        }
    }
}

impl std::error::Error for ParallaxError {}

impl From<serde_json::Error> for ParallaxError {
    fn from(error: serde_json::Error) -> Self {
        ParallaxError::Json(error)
    }
}

impl From<taffy::TaffyError> for ParallaxError {
    fn from(error: taffy::TaffyError) -> Self {
        ParallaxError::Layout(error)
    }
}
