use log::debug;

use crate::{ScrollBehavior, ScrollRequest, Surface};

/// Returns the element id referenced by same page link, `#intro` references `intro`.
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scrolls container so the target of link lands right below the header.
///
/// Links to absent elements are ignored, returns the issued request if any.
pub fn scroll_to_anchor<S: Surface>(
    surface: &mut S,
    container: S::Element,
    header: S::Element,
    href: &str,
    behavior: ScrollBehavior,
) -> Option<ScrollRequest> {
    let target = match fragment(href).and_then(|id| surface.element_by_id(id)) {
        Some(target) => target,
        None => {
            debug!("anchor {href:?} target not found, ignored");
            return None;
        }
    };
    let top = surface.offset_top(target) - surface.offset_height(header);
    let request = ScrollRequest { top, behavior };
    surface.scroll_to(container, request);
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_fragment() {
        assert_eq!(fragment("#section2"), Some("section2"));
        assert_eq!(fragment("#"), None);
        assert_eq!(fragment("page.html#top"), None);
    }
}
