use std::collections::HashMap;
use std::time::Duration;

use ego_tree::NodeId;
use log::{debug, error};
use scraper::{ElementRef, Html, Node, Selector};

use crate::animation::ScrollAnimator;
use crate::css::{get_declaration, read_inline_style, set_declaration, write_inline_style, Declarations};
use crate::layout::{compute_metrics, Metrics};
use crate::{ParallaxError, ScrollBehavior, ScrollRequest, Surface};

/// Properties which change element geometry, writing them invalidates layout.
const LAYOUT_PROPERTIES: [&str; 26] = [
    "display",
    "position",
    "overflow",
    "overflow-x",
    "overflow-y",
    "width",
    "height",
    "min-height",
    "max-height",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "top",
    "right",
    "bottom",
    "left",
    "min-width",
    "max-width",
    "inset",
];

/// HTML page with inline styles, layout and scroll state.
///
/// Elements are addressed by tree node ids, which are stable for the document lifetime.
pub struct Document {
    html: Html,
    body: NodeId,
    styles: HashMap<NodeId, Declarations>,
    metrics: HashMap<NodeId, Metrics>,
    viewport: [f32; 2],
    scrolls: HashMap<NodeId, f32>,
    animations: Vec<(NodeId, ScrollAnimator)>,
    requests: Vec<(NodeId, ScrollRequest)>,
}

impl Document {
    pub fn parse(html: &str) -> Result<Self, ParallaxError> {
        let html = Html::parse_document(html);
        for error in &html.errors {
            debug!("html recovered, {error}");
        }
        let mut styles = HashMap::new();
        let mut body = None;
        for node in html.tree.nodes() {
            if let Node::Element(element) = node.value() {
                if body.is_none() && element.name() == "body" {
                    body = Some(node.id());
                }
                if let Some(style) = element.attr("style") {
                    styles.insert(node.id(), read_inline_style(style));
                }
            }
        }
        let body = body.ok_or_else(|| ParallaxError::ElementNotFound("body".to_string()))?;
        let mut document = Self {
            html,
            body,
            styles,
            metrics: HashMap::new(),
            viewport: [800.0, 600.0],
            scrolls: HashMap::new(),
            animations: vec![],
            requests: vec![],
        };
        document.reflow()?;
        Ok(document)
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    /// Changes viewport size and recomputes layout, the host then reports `Event::Resize`.
    pub fn resize(&mut self, viewport: [f32; 2]) -> Result<(), ParallaxError> {
        self.viewport = viewport;
        self.reflow()?;
        for element in self.scrolls.keys().cloned().collect::<Vec<_>>() {
            let top = self.clamp_scroll(element, self.scroll_top(element));
            self.scrolls.insert(element, top);
        }
        Ok(())
    }

    /// Serialized inline style of element as it would appear in `style` attribute.
    pub fn inline_style(&self, element: NodeId) -> String {
        self.styles
            .get(&element)
            .map(write_inline_style)
            .unwrap_or_default()
    }

    /// Every scroll request made to the document, in order.
    pub fn scroll_requests(&self) -> &[(NodeId, ScrollRequest)] {
        &self.requests
    }

    pub fn is_scrolling(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Scrolls element by user, the same as mouse wheel or scrollbar drag.
    /// Returns the new scroll offset after clamping.
    pub fn scroll_by(&mut self, element: NodeId, delta: f32) -> f32 {
        self.animations.retain(|(target, _)| *target != element);
        let top = self.clamp_scroll(element, self.scroll_top(element) + delta);
        self.scrolls.insert(element, top);
        top
    }

    /// Advances smooth scroll animations, returns elements whose scroll offset changed.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<NodeId> {
        let mut scrolled = vec![];
        let time = elapsed.as_secs_f32();
        for (element, animator) in self.animations.iter_mut() {
            let top = animator.update(time);
            let previous = self.scrolls.insert(*element, top).unwrap_or(0.0);
            if previous != top {
                scrolled.push(*element);
            }
        }
        self.animations.retain(|(_, animator)| !animator.is_finished());
        scrolled
    }

    fn element(&self, node: NodeId) -> Option<ElementRef> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    fn reflow(&mut self) -> Result<(), ParallaxError> {
        self.metrics = compute_metrics(&self.html, self.body, &self.styles, self.viewport)?;
        Ok(())
    }

    fn metrics(&self, element: NodeId) -> Metrics {
        self.metrics.get(&element).cloned().unwrap_or_default()
    }

    fn clamp_scroll(&self, element: NodeId, top: f32) -> f32 {
        let max = (self.scroll_height(element) - self.offset_height(element)).max(0.0);
        top.clamp(0.0, max)
    }

    /// The nearest positioned ancestor, body otherwise.
    fn offset_parent(&self, element: NodeId) -> NodeId {
        let ancestors = match self.html.tree.get(element) {
            Some(node) => node.ancestors(),
            None => return self.body,
        };
        for ancestor in ancestors {
            if ancestor.id() == self.body {
                break;
            }
            let position = self
                .styles
                .get(&ancestor.id())
                .and_then(|style| get_declaration(style, "position"));
            if matches!(position, Some(position) if position != "static") {
                return ancestor.id();
            }
        }
        self.body
    }

    fn select(&self, selector: &str) -> Result<Selector, ParallaxError> {
        Selector::parse(selector)
            .map_err(|error| ParallaxError::InvalidSelector(format!("{selector}, {error:?}")))
    }
}

impl Surface for Document {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Result<Option<NodeId>, ParallaxError> {
        let selector = self.select(selector)?;
        Ok(self.html.select(&selector).next().map(|element| element.id()))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, ParallaxError> {
        let selector = self.select(selector)?;
        Ok(self.html.select(&selector).map(|element| element.id()).collect())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.html
            .tree
            .nodes()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
            .map(|element| element.id())
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.element(element)
            .and_then(|element| element.value().attr(name).map(str::to_string))
    }

    fn style(&self, element: NodeId, property: &str) -> Option<String> {
        self.styles
            .get(&element)
            .and_then(|style| get_declaration(style, property))
            .map(str::to_string)
    }

    fn set_style(&mut self, element: NodeId, property: &str, value: &str) {
        let style = self.styles.entry(element).or_default();
        if get_declaration(style, property) == Some(value) {
            return;
        }
        set_declaration(style, property, value.to_string());
        if LAYOUT_PROPERTIES.contains(&property) {
            if let Err(error) = self.reflow() {
                error!("unable to reflow document after {property} changed, {error}");
            }
        }
    }

    fn scroll_top(&self, element: NodeId) -> f32 {
        self.scrolls.get(&element).cloned().unwrap_or(0.0)
    }

    fn scroll_height(&self, element: NodeId) -> f32 {
        let metrics = self.metrics(element);
        metrics.height.max(metrics.content_height)
    }

    fn offset_top(&self, element: NodeId) -> f32 {
        let parent = self.offset_parent(element);
        self.metrics(element).top - self.metrics(parent).top
    }

    fn offset_height(&self, element: NodeId) -> f32 {
        self.metrics(element).height
    }

    fn scroll_to(&mut self, element: NodeId, request: ScrollRequest) {
        self.requests.push((element, request));
        self.animations.retain(|(target, _)| *target != element);
        let from = self.scroll_top(element);
        let to = self.clamp_scroll(element, request.top);
        match request.behavior {
            ScrollBehavior::Instant => {
                self.scrolls.insert(element, to);
            }
            ScrollBehavior::Smooth if from != to => {
                self.animations.push((element, ScrollAnimator::new(from, to)));
            }
            ScrollBehavior::Smooth => {}
        }
    }

    fn describe(&self, element: NodeId) -> String {
        let element = match self.element(element) {
            Some(element) => element.value(),
            None => return format!("{element:?}"),
        };
        let mut description = element.name().to_string();
        if let Some(id) = element.id() {
            description += &format!("#{id}");
        }
        for class in element.classes() {
            description += &format!(".{class}");
        }
        description
    }
}
