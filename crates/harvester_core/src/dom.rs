//! Small queries over `scraper` documents shared by the entity parsers.

use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Selector};

use crate::ParseError;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("static regex"));

pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|err| ParseError::InvalidSelector {
        selector: css.to_string(),
        message: err.to_string(),
    })
}

/// Concatenated text of the element and its descendants, trimmed.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Like [`text_of`], but drops text that lives under any element matching `excluded`.
pub(crate) fn text_without(element: ElementRef<'_>, excluded: &Selector) -> String {
    let skipped: Vec<_> = element.select(excluded).map(|e| e.id()).collect();
    let mut out = String::new();
    for node in element.descendants() {
        if let Node::Text(text) = node.value() {
            if node.ancestors().any(|a| skipped.contains(&a.id())) {
                continue;
            }
            out.push_str(text);
        }
    }
    out.trim().to_string()
}

pub(crate) fn first_attr(element: ElementRef<'_>, css: &str, attr: &str) -> Result<String, ParseError> {
    let sel = selector(css)?;
    Ok(element
        .select(&sel)
        .next()
        .and_then(|found| found.value().attr(attr))
        .unwrap_or_default()
        .to_string())
}

pub(crate) fn next_sibling_named<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == name)
}

/// Nearest ancestor `div`, excluding the element itself.
pub(crate) fn enclosing_div(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "div")
}

pub(crate) fn first_number(text: &str) -> String {
    FIRST_NUMBER
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn first_number_takes_leading_decimal() {
        assert_eq!(first_number("冷却 1.5 秒"), "1.5");
        assert_eq!(first_number("12 / 3"), "12");
        assert_eq!(first_number("none"), "");
    }

    #[test]
    fn text_without_skips_excluded_subtrees() {
        let html = Html::parse_fragment(
            r#"<div class="m">Deals damage<small class="description">hint</small>.</div>"#,
        );
        let sel = selector("div.m").unwrap();
        let div = html.select(&sel).next().unwrap();
        let excluded = selector("small.description").unwrap();
        assert_eq!(text_without(div, &excluded), "Deals damage.");
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = selector("div[").unwrap_err();
        assert!(matches!(err, ParseError::InvalidSelector { .. }));
    }
}
