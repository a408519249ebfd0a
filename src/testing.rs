use std::collections::HashMap;
use std::time::Instant;

use log::{set_boxed_logger, set_max_level, LevelFilter, Log, Metadata, Record};

use crate::css::{get_declaration, set_declaration, Declarations};
use crate::{ImageLoader, ImageOutcome, ParallaxError, Probe, ProbeId, ScrollRequest, Surface};

/// Prints records of this crate from debug level, dependencies only from warn,
/// so scraper and lightningcss internals do not flood test output.
struct TestLogger {
    start: Instant,
    crate_level: LevelFilter,
    dependency_level: LevelFilter,
}

impl TestLogger {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            crate_level: LevelFilter::Debug,
            dependency_level: LevelFilter::Warn,
        }
    }
}

impl Log for TestLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let own = metadata.target().split("::").next() == Some(env!("CARGO_CRATE_NAME"));
        let level = if own {
            self.crate_level
        } else {
            self.dependency_level
        };
        metadata.level() <= level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed().as_millis();
        println!(
            "{elapsed:>6}ms {:<5} {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    }

    fn flush(&self) {}
}

pub fn setup_tests_logging() {
    let _ = set_boxed_logger(Box::new(TestLogger::new()));
    set_max_level(LevelFilter::Debug);
}

/// In-memory page where geometry is given, not computed.
#[derive(Default)]
pub struct FakeSurface {
    pub elements: Vec<FakeElement>,
    pub scroll_requests: Vec<(usize, ScrollRequest)>,
}

#[derive(Default)]
pub struct FakeElement {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub style: Declarations,
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub offset_top: f32,
    pub offset_height: f32,
}

impl FakeSurface {
    pub fn add(&mut self, tag: &str, classes: &str) -> usize {
        self.elements.push(FakeElement {
            tag: tag.to_string(),
            classes: classes.split_whitespace().map(str::to_string).collect(),
            ..FakeElement::default()
        });
        self.elements.len() - 1
    }

    pub fn get(&mut self, element: usize) -> &mut FakeElement {
        &mut self.elements[element]
    }

    /// Supports `.class`, `#id`, `tag` and `a[href^="#"]` selectors only.
    fn matches(&self, element: &FakeElement, selector: &str) -> Result<bool, ParallaxError> {
        if let Some(class) = selector.strip_prefix('.') {
            return Ok(element.classes.iter().any(|name| name == class));
        }
        if let Some(id) = selector.strip_prefix('#') {
            return Ok(element.id.as_deref() == Some(id));
        }
        if selector == "a[href^=\"#\"]" {
            let href = element.attrs.get("href").map(String::as_str).unwrap_or("");
            return Ok(element.tag == "a" && href.starts_with('#'));
        }
        if selector.chars().all(|char| char.is_ascii_alphanumeric()) {
            return Ok(element.tag == selector);
        }
        Err(ParallaxError::InvalidSelector(selector.to_string()))
    }
}

impl Surface for FakeSurface {
    type Element = usize;

    fn query(&self, selector: &str) -> Result<Option<usize>, ParallaxError> {
        Ok(self.query_all(selector)?.first().cloned())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<usize>, ParallaxError> {
        let mut elements = vec![];
        for (index, element) in self.elements.iter().enumerate() {
            if self.matches(element, selector)? {
                elements.push(index);
            }
        }
        Ok(elements)
    }

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
    }

    fn attribute(&self, element: usize, name: &str) -> Option<String> {
        self.elements[element].attrs.get(name).cloned()
    }

    fn style(&self, element: usize, property: &str) -> Option<String> {
        get_declaration(&self.elements[element].style, property).map(str::to_string)
    }

    fn set_style(&mut self, element: usize, property: &str, value: &str) {
        set_declaration(&mut self.elements[element].style, property, value.to_string());
    }

    fn scroll_top(&self, element: usize) -> f32 {
        self.elements[element].scroll_top
    }

    fn scroll_height(&self, element: usize) -> f32 {
        self.elements[element].scroll_height
    }

    fn offset_top(&self, element: usize) -> f32 {
        self.elements[element].offset_top
    }

    fn offset_height(&self, element: usize) -> f32 {
        self.elements[element].offset_height
    }

    fn scroll_to(&mut self, element: usize, request: ScrollRequest) {
        self.scroll_requests.push((element, request));
    }

    fn describe(&self, element: usize) -> String {
        let element = &self.elements[element];
        format!("{}.{}", element.tag, element.classes.join("."))
    }
}

/// Image loader resolved by test code, probes stay pending until resolved.
#[derive(Default)]
pub struct ScriptedLoader {
    pub requested: Vec<Probe>,
    resolved: Vec<(ProbeId, ImageOutcome)>,
}

impl ScriptedLoader {
    pub fn resolve(&mut self, url: &str, outcome: ImageOutcome) {
        let probe = self
            .requested
            .iter()
            .find(|probe| probe.url == url)
            .expect("probe requested");
        self.resolved.push((probe.id, outcome));
    }
}

impl ImageLoader for ScriptedLoader {
    fn request(&mut self, probe: Probe) {
        self.requested.push(probe);
    }

    fn poll(&mut self) -> Vec<(ProbeId, ImageOutcome)> {
        std::mem::take(&mut self.resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn metadata(target: &str, level: Level) -> Metadata<'_> {
        Metadata::builder().target(target).level(level).build()
    }

    #[test]
    pub fn test_logger_filters_dependencies() {
        let logger = TestLogger::new();
        assert!(logger.enabled(&metadata("parallax::loader", Level::Debug)));
        assert!(logger.enabled(&metadata("parallax", Level::Error)));
        assert!(!logger.enabled(&metadata("html5ever::tree_builder", Level::Debug)));
        assert!(!logger.enabled(&metadata("parallax_extra", Level::Debug)));
        assert!(logger.enabled(&metadata("selectors::matching", Level::Warn)));
    }
}
