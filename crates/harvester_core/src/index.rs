use scraper::{ElementRef, Html};

use crate::dom::{enclosing_div, first_attr, selector, text_of};
use crate::{ItemReference, ParseError};

/// Listing-side data attached to each reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryExtras {
    #[default]
    None,
    /// Hero entries: `desc` is the text after the entry's `<hr>`, `icon` the
    /// first image of the block around the entry.
    HeroSummary,
}

/// Where an index page lives and which anchors on it name detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Listing path, joined onto the site root like any reference id.
    pub path: String,
    /// Container to search in; `None` searches the whole document.
    pub container: Option<String>,
    /// Anchor selector, evaluated inside the container.
    pub anchor: String,
    pub extras: EntryExtras,
}

impl IndexSpec {
    pub fn new(path: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            container: None,
            anchor: anchor.into(),
            extras: EntryExtras::None,
        }
    }

    pub fn within(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_extras(mut self, extras: EntryExtras) -> Self {
        self.extras = extras;
        self
    }
}

/// Extracts references in document order. Anchors without a usable `href`
/// are skipped; duplicates are kept.
///
/// A missing container yields an empty list.
pub fn extract_references(html: &str, spec: &IndexSpec) -> Result<Vec<ItemReference>, ParseError> {
    let doc = Html::parse_document(html);
    let anchor_sel = selector(&spec.anchor)?;

    let root = match spec.container.as_deref() {
        Some(css) => {
            let container_sel = selector(css)?;
            match doc.select(&container_sel).next() {
                Some(container) => container,
                None => return Ok(Vec::new()),
            }
        }
        None => doc.root_element(),
    };

    let mut references = Vec::new();
    for anchor in root.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        let reference = ItemReference::new(href, text_of(anchor));
        references.push(match spec.extras {
            EntryExtras::None => reference,
            EntryExtras::HeroSummary => hero_summary(reference, anchor)?,
        });
    }

    Ok(references)
}

fn hero_summary(
    reference: ItemReference,
    anchor: ElementRef<'_>,
) -> Result<ItemReference, ParseError> {
    let Some(entry) = enclosing_div(anchor) else {
        return Ok(reference.with_extra("desc", "").with_extra("icon", ""));
    };

    let hr_sel = selector("hr")?;
    let desc = entry
        .select(&hr_sel)
        .next()
        .and_then(|hr| hr.next_sibling())
        .and_then(|node| node.value().as_text().map(|text| text.trim().to_string()))
        .unwrap_or_default();
    let icon = match enclosing_div(entry) {
        Some(block) => first_attr(block, "img", "src")?,
        None => String::new(),
    };

    Ok(reference.with_extra("desc", desc).with_extra("icon", icon))
}
