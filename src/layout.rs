use std::collections::HashMap;

use ego_tree::NodeId;
use log::error;
use scraper::{Html, Node};
use taffy::{
    AvailableSpace, Dimension, Display, LengthPercentage, LengthPercentageAuto, Overflow,
    Position, Rect, Size, Style, TaffyTree,
};

use crate::css::{read_length, Declarations, Length};
use crate::ParallaxError;

/// Elements never rendered by browsers, their subtree takes no space.
const HIDDEN_TAGS: [&str; 8] = [
    "head", "script", "style", "template", "meta", "link", "title", "noscript",
];

const FONT_SIZE: f32 = 16.0;

/// Border box of element after layout, top is measured from the document top.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub top: f32,
    pub height: f32,
    pub content_height: f32,
}

enum Content {
    Element(NodeId),
    Text(String),
}

/// Lays out the body of document within viewport, styles are the elements inline styles.
pub fn compute_metrics(
    html: &Html,
    body: NodeId,
    styles: &HashMap<NodeId, Declarations>,
    viewport: [f32; 2],
) -> Result<HashMap<NodeId, Metrics>, ParallaxError> {
    let mut tree: TaffyTree<Content> = TaffyTree::new();
    let [width, height] = viewport;
    let mut root_layout = default_layout();
    root_layout.size = Size {
        width: Dimension::Length(width),
        height: Dimension::Length(height),
    };
    let root = tree.new_leaf(root_layout)?;
    if let Some(body) = render_node(&mut tree, html, body, styles)? {
        tree.add_child(root, body)?;
    }
    let available = Size {
        width: AvailableSpace::Definite(width),
        height: AvailableSpace::Definite(height),
    };
    tree.compute_layout_with_measure(root, available, |size, space, _, content, _| {
        measure_text(size, space, content)
    })?;
    let mut metrics = HashMap::new();
    collect_metrics(&tree, root, 0.0, &mut metrics)?;
    Ok(metrics)
}

fn render_node(
    tree: &mut TaffyTree<Content>,
    html: &Html,
    node: NodeId,
    styles: &HashMap<NodeId, Declarations>,
) -> Result<Option<taffy::NodeId>, ParallaxError> {
    let node_ref = match html.tree.get(node) {
        Some(node_ref) => node_ref,
        None => return Ok(None),
    };
    match node_ref.value() {
        Node::Text(text) => {
            let text = text.text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            let leaf = tree.new_leaf_with_context(default_layout(), Content::Text(text.to_string()))?;
            Ok(Some(leaf))
        }
        Node::Element(element) => {
            if HIDDEN_TAGS.contains(&element.name()) {
                return Ok(None);
            }
            let layout = styles
                .get(&node)
                .map(element_layout)
                .unwrap_or_else(default_layout);
            let mut children = vec![];
            for child in node_ref.children() {
                if let Some(child) = render_node(tree, html, child.id(), styles)? {
                    children.push(child);
                }
            }
            let id = tree.new_with_children(layout, &children)?;
            tree.set_node_context(id, Some(Content::Element(node)))?;
            Ok(Some(id))
        }
        _ => Ok(None),
    }
}

fn collect_metrics(
    tree: &TaffyTree<Content>,
    node: taffy::NodeId,
    parent_top: f32,
    metrics: &mut HashMap<NodeId, Metrics>,
) -> Result<(), ParallaxError> {
    let layout = tree.layout(node)?;
    let top = parent_top + layout.location.y;
    if let Some(Content::Element(element)) = tree.get_node_context(node) {
        let element_metrics = Metrics {
            top,
            height: layout.size.height,
            content_height: layout.content_size.height,
        };
        metrics.insert(*element, element_metrics);
    }
    for child in tree.children(node)? {
        collect_metrics(tree, child, top, metrics)?;
    }
    Ok(())
}

fn measure_text(
    size: Size<Option<f32>>,
    space: Size<AvailableSpace>,
    content: Option<&mut Content>,
) -> Size<f32> {
    if let Size {
        width: Some(width),
        height: Some(height),
    } = size
    {
        return Size { width, height };
    }
    let text = match content {
        Some(Content::Text(text)) => text,
        _ => return Size::ZERO,
    };
    // NOTE: approximate monospace metric, there is no font shaping here
    let advance = FONT_SIZE * 0.5;
    let width = text.chars().count() as f32 * advance;
    let longest_word = text
        .split_whitespace()
        .map(|word| word.chars().count())
        .max()
        .unwrap_or(0) as f32
        * advance;
    let max_width = size.width.unwrap_or(match space.width {
        AvailableSpace::MinContent => longest_word,
        AvailableSpace::MaxContent => width,
        AvailableSpace::Definite(width) => width,
    });
    if width <= max_width || max_width <= 0.0 {
        return Size {
            width,
            height: FONT_SIZE,
        };
    }
    let lines = (width / max_width).ceil();
    Size {
        width: max_width,
        height: lines * FONT_SIZE,
    }
}

fn default_layout() -> Style {
    Style {
        display: Display::Block,
        ..Style::default()
    }
}

fn element_layout(declarations: &Declarations) -> Style {
    let mut layout = default_layout();
    for (name, value) in declarations {
        match (name.as_str(), value.as_str()) {
            ("display", "none") => layout.display = Display::None,
            ("display", "flex") => layout.display = Display::Flex,
            ("display", _) => layout.display = Display::Block,
            ("position", "absolute" | "fixed") => layout.position = Position::Absolute,
            ("position", _) => layout.position = Position::Relative,
            ("overflow", value) => {
                let values: Vec<&str> = value.split_whitespace().collect();
                if let (Some(x), Some(y)) = (values.first(), values.last()) {
                    layout.overflow.x = overflow(x);
                    layout.overflow.y = overflow(y);
                }
            }
            ("overflow-x", value) => layout.overflow.x = overflow(value),
            ("overflow-y", value) => layout.overflow.y = overflow(value),
            ("width", value) => layout.size.width = dimension(value),
            ("height", value) => layout.size.height = dimension(value),
            ("min-height", value) => layout.min_size.height = dimension(value),
            ("max-height", value) => layout.max_size.height = dimension(value),
            ("padding", value) => layout.padding = edges(value, layout.padding, length_percentage),
            ("padding-top", value) => layout.padding.top = length_percentage(value),
            ("padding-right", value) => layout.padding.right = length_percentage(value),
            ("padding-bottom", value) => layout.padding.bottom = length_percentage(value),
            ("padding-left", value) => layout.padding.left = length_percentage(value),
            ("margin", value) => layout.margin = edges(value, layout.margin, length_percentage_auto),
            ("margin-top", value) => layout.margin.top = length_percentage_auto(value),
            ("margin-right", value) => layout.margin.right = length_percentage_auto(value),
            ("margin-bottom", value) => layout.margin.bottom = length_percentage_auto(value),
            ("margin-left", value) => layout.margin.left = length_percentage_auto(value),
            ("top", value) => layout.inset.top = length_percentage_auto(value),
            ("right", value) => layout.inset.right = length_percentage_auto(value),
            ("bottom", value) => layout.inset.bottom = length_percentage_auto(value),
            ("left", value) => layout.inset.left = length_percentage_auto(value),
            _ => {}
        }
    }
    layout
}

fn overflow(value: &str) -> Overflow {
    match value {
        "hidden" => Overflow::Hidden,
        "clip" => Overflow::Clip,
        "scroll" | "auto" => Overflow::Scroll,
        _ => Overflow::Visible,
    }
}

fn dimension(value: &str) -> Dimension {
    match read_length(value) {
        Some(Length::Px(value)) => Dimension::Length(value),
        Some(Length::Percent(value)) => Dimension::Percent(value),
        None => Dimension::Auto,
    }
}

fn length_percentage(value: &str) -> LengthPercentage {
    match read_length(value) {
        Some(Length::Px(value)) => LengthPercentage::Length(value),
        Some(Length::Percent(value)) => LengthPercentage::Percent(value),
        None => LengthPercentage::Length(0.0),
    }
}

fn length_percentage_auto(value: &str) -> LengthPercentageAuto {
    match read_length(value) {
        Some(Length::Px(value)) => LengthPercentageAuto::Length(value),
        Some(Length::Percent(value)) => LengthPercentageAuto::Percent(value),
        None => LengthPercentageAuto::Auto,
    }
}

/// Expands CSS box shorthand: `all`, `vertical horizontal`, `top horizontal bottom`
/// or `top right bottom left`.
fn edges<T: Copy>(value: &str, current: Rect<T>, read: fn(&str) -> T) -> Rect<T> {
    let values: Vec<T> = value.split_whitespace().map(read).collect();
    match values.as_slice() {
        [all] => Rect {
            top: *all,
            right: *all,
            bottom: *all,
            left: *all,
        },
        [vertical, horizontal] => Rect {
            top: *vertical,
            right: *horizontal,
            bottom: *vertical,
            left: *horizontal,
        },
        [top, horizontal, bottom] => Rect {
            top: *top,
            right: *horizontal,
            bottom: *bottom,
            left: *horizontal,
        },
        [top, right, bottom, left] => Rect {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        },
        _ => {
            error!("unable to expand box shorthand {value:?}");
            current
        }
    }
}
