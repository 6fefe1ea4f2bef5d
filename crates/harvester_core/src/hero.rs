use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::dom::{enclosing_div, first_attr, selector, text_of};
use crate::{ParseError, Record};

const TRAIT_TITLE: &str = "div.fw-bold";

static UNLOCK_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"需求等级\s*(\d+)").expect("static regex"));

/// Hero detail pages list the hero's traits; each bold title starts one.
///
/// A page without traits still yields a hero with an empty trait list.
pub fn parse_hero(html: &str, id: &str, name: &str) -> Result<Option<Record>, ParseError> {
    let doc = Html::parse_document(html);
    let title_sel = selector(TRAIT_TITLE)?;

    let mut traits = Vec::new();
    for title in doc.select(&title_sel) {
        if let Some(hero_trait) = parse_trait(title)? {
            traits.push(hero_trait);
        }
    }

    Ok(Some(Record::new(id, name).with_field("traits", traits)))
}

/// Layout: the trait block encloses the title, the block's own parent holds the icon.
fn parse_trait(title: ElementRef<'_>) -> Result<Option<Record>, ParseError> {
    let Some(block) = enclosing_div(title) else {
        return Ok(None);
    };
    let icon = match enclosing_div(block) {
        Some(frame) => first_attr(frame, "img", "src")?,
        None => String::new(),
    };

    let block_text = block.text().collect::<String>();
    let unlock_level = UNLOCK_LEVEL
        .captures(&block_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let div_sel = selector("div")?;
    let desc = block.select(&div_sel).nth(1).map(text_of).unwrap_or_default();

    let name = text_of(title);
    Ok(Some(
        Record::new(name.clone(), name)
            .with_field("icon", icon)
            .with_field("desc", desc)
            .with_field("unlock_level", unlock_level),
    ))
}
