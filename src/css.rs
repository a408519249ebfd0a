use lightningcss::printer::PrinterOptions;
use lightningcss::properties::background::Background;
use lightningcss::properties::Property;
use lightningcss::stylesheet::{ParserOptions, StyleAttribute};
use lightningcss::traits::{Parse, ToCss};
use lightningcss::values::color::CssColor;
use lightningcss::values::image::Image;
use lightningcss::values::length::{LengthPercentage, LengthValue};
use log::error;

/// Inline style of an element, property name and serialized value in declaration order.
pub type Declarations = Vec<(String, String)>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    /// Fraction of the containing block, 1.0 is 100%.
    Percent(f32),
}

/// Reads the content of HTML style attribute into declarations.
///
/// Values are normalized by the CSS printer, so `url("a.png")` is kept as `url(a.png)`.
/// The `background` shorthand is kept as its longhands, the same way as browsers
/// expand it for `element.style`, so writing `background-image` later replaces the image.
pub fn read_inline_style(style: &str) -> Declarations {
    let mut declarations = vec![];
    let options = ParserOptions {
        error_recovery: true,
        ..ParserOptions::default()
    };
    let attribute = match StyleAttribute::parse(style, options) {
        Ok(attribute) => attribute,
        Err(error) => {
            error!("unable to read inline style {style:?}, {error}");
            return declarations;
        }
    };
    let block = &attribute.declarations;
    let properties = block
        .declarations
        .iter()
        .chain(block.important_declarations.iter());
    for property in properties {
        if let Property::Background(backgrounds) = property {
            for (name, value) in background_longhands(backgrounds) {
                set_declaration(&mut declarations, name, value);
            }
            continue;
        }
        let name = property.property_id().name().to_string();
        match property.value_to_css_string(PrinterOptions::default()) {
            Ok(value) => set_declaration(&mut declarations, &name, value),
            Err(error) => error!("unable to print {name} value, {error}"),
        }
    }
    declarations
}

fn background_longhands(backgrounds: &[Background]) -> Vec<(&'static str, String)> {
    fn layers<F>(backgrounds: &[Background], print: F) -> String
    where
        F: Fn(&Background) -> Option<String>,
    {
        backgrounds
            .iter()
            .filter_map(print)
            .collect::<Vec<_>>()
            .join(", ")
    }
    let mut longhands = vec![
        (
            "background-image",
            layers(backgrounds, |bg| bg.image.to_css_string(PrinterOptions::default()).ok()),
        ),
        (
            "background-position",
            layers(backgrounds, |bg| bg.position.to_css_string(PrinterOptions::default()).ok()),
        ),
        (
            "background-size",
            layers(backgrounds, |bg| bg.size.to_css_string(PrinterOptions::default()).ok()),
        ),
        (
            "background-repeat",
            layers(backgrounds, |bg| bg.repeat.to_css_string(PrinterOptions::default()).ok()),
        ),
        (
            "background-attachment",
            layers(backgrounds, |bg| bg.attachment.to_css_string(PrinterOptions::default()).ok()),
        ),
        (
            "background-origin",
            layers(backgrounds, |bg| bg.origin.to_css_string(PrinterOptions::default()).ok()),
        ),
        (
            "background-clip",
            layers(backgrounds, |bg| bg.clip.to_css_string(PrinterOptions::default()).ok()),
        ),
    ];
    // only the final layer has color
    if let Some(color) = backgrounds
        .last()
        .and_then(|bg| bg.color.to_css_string(PrinterOptions::default()).ok())
    {
        longhands.push(("background-color", color));
    }
    longhands
}

pub fn set_declaration(declarations: &mut Declarations, name: &str, value: String) {
    match declarations.iter_mut().find(|(key, _)| key == name) {
        Some(declaration) => declaration.1 = value,
        None => declarations.push((name.to_string(), value)),
    }
}

pub fn get_declaration<'d>(declarations: &'d Declarations, name: &str) -> Option<&'d str> {
    declarations
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

pub fn write_inline_style(declarations: &Declarations) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extracts the first image URL of `background-image` value.
///
/// Accepts `url(a.png)`, `url('a.png')` and `url("a.png")`.
/// Returns `None` for `none`, gradients, empty URLs and values that are not valid CSS.
pub fn background_image_url(value: &str) -> Option<String> {
    let declaration = format!("background-image: {value}");
    let attribute = StyleAttribute::parse(&declaration, ParserOptions::default()).ok()?;
    let url = attribute
        .declarations
        .declarations
        .iter()
        .find_map(|property| match property {
            Property::BackgroundImage(images) => images.iter().find_map(|image| match image {
                Image::Url(url) => Some(url.url.to_string()),
                _ => None,
            }),
            _ => None,
        })?;
    if url.trim().is_empty() {
        None
    } else {
        Some(url)
    }
}

pub fn read_length(value: &str) -> Option<Length> {
    match LengthPercentage::parse_string(value.trim()) {
        Ok(LengthPercentage::Dimension(LengthValue::Px(px))) => Some(Length::Px(px)),
        Ok(LengthPercentage::Percentage(percentage)) => Some(Length::Percent(percentage.0)),
        Ok(_) => {
            error!("unable to resolve length {value}, only px and % supported");
            None
        }
        Err(_) => None,
    }
}

pub fn is_valid_color(value: &str) -> bool {
    CssColor::parse_string(value.trim()).is_ok()
}

#[inline(always)]
pub fn px(value: f32) -> String {
    format!("{value}px")
}
