//! Skill detail pages. All four skill kinds share one card layout and differ
//! in which attribute rows they read and how the description is assembled.

use scraper::{ElementRef, Html};

use crate::dom::{first_attr, first_number, next_sibling_named, selector, text_of, text_without};
use crate::{EntityKind, ParseError, Record};

const CARD: &str = "div.card.ui_item.popupItem";
const TAG: &str = "span.border.p-1.mb-1.tag";
const DESCRIPTION: &str = "div.explicitMod";
const ATTRIBUTE_ROW: &str = "div.d-flex.justify-content-center";
const WEAPON_RESTRICTION: &str = r#"div[data-block="weapon_restrict_description"]"#;
const DESCRIPTION_HINT: &str = "small.description";

const SLOT_NOTICE: &str = "该技能只能安装在每个主动技能的第 1 个辅助技能栏位。";

/// How an attribute value is turned into a field.
#[derive(Clone, Copy)]
enum Value {
    Text,
    Number,
}

/// (row label, field name, value handling)
type AttributeMap = &'static [(&'static str, &'static str, Value)];

const ACTIVE_ATTRIBUTES: AttributeMap = &[
    ("魔力消耗", "mana_cost", Value::Text),
    ("主属性：", "main_attribute", Value::Text),
    ("伤害倍率", "damage_match", Value::Text),
    ("冷却时间", "cooldown", Value::Number),
    ("施法速度", "casting_speed", Value::Number),
];

const PASSIVE_ATTRIBUTES: AttributeMap = &[
    ("魔力封印", "magic_seal", Value::Text),
    ("主属性：", "main_attribute", Value::Text),
    ("伤害倍率", "damage_match", Value::Text),
    ("施法速度", "casting_speed", Value::Number),
];

const MANA_MULTIPLIER_ATTRIBUTES: AttributeMap =
    &[("魔力消耗倍率", "mana_cost_match", Value::Text)];

pub fn parse_active_skill(html: &str, id: &str, name: &str) -> Result<Option<Record>, ParseError> {
    let doc = Html::parse_document(html);
    let Some(card) = find_card(&doc)? else {
        return Ok(None);
    };

    let record = base_record(card, id, name, EntityKind::ActiveSkill)?
        .with_field("description", first_description(card)?);
    let record = apply_attributes(record, card, ACTIVE_ATTRIBUTES)?;

    let restriction_sel = selector(WEAPON_RESTRICTION)?;
    let restrictions: Vec<String> = match card.select(&restriction_sel).next() {
        Some(block) => text_of(block)
            .replace("限定", "")
            .split('、')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        None => Vec::new(),
    };

    Ok(Some(record.with_field("weapon_restrictions", restrictions)))
}

pub fn parse_passive_skill(html: &str, id: &str, name: &str) -> Result<Option<Record>, ParseError> {
    let doc = Html::parse_document(html);
    let Some(card) = find_card(&doc)? else {
        return Ok(None);
    };

    let record = base_record(card, id, name, EntityKind::PassiveSkill)?
        .with_field("description", first_description(card)?);
    let record = with_blank_attributes(record, PASSIVE_ATTRIBUTES);
    apply_attributes(record, card, PASSIVE_ATTRIBUTES).map(Some)
}

pub fn parse_support_skill(html: &str, id: &str, name: &str) -> Result<Option<Record>, ParseError> {
    let doc = Html::parse_document(html);
    let Some(card) = find_card(&doc)? else {
        return Ok(None);
    };

    let description_sel = selector(DESCRIPTION)?;
    let hint_sel = selector(DESCRIPTION_HINT)?;
    let description = card
        .select(&description_sel)
        .next()
        .map(|div| text_without(div, &hint_sel))
        .unwrap_or_default();

    let record = base_record(card, id, name, EntityKind::SupportSkill)?
        .with_field("description", description);
    let record = with_blank_attributes(record, MANA_MULTIPLIER_ATTRIBUTES);
    apply_attributes(record, card, MANA_MULTIPLIER_ATTRIBUTES).map(Some)
}

/// Activation-medium cards split their description over several blocks; the
/// first one carries a slot notice that is dropped.
pub fn parse_activation_medium_skill(
    html: &str,
    id: &str,
    name: &str,
) -> Result<Option<Record>, ParseError> {
    let doc = Html::parse_document(html);
    let Some(card) = find_card(&doc)? else {
        return Ok(None);
    };

    let description_sel = selector(DESCRIPTION)?;
    let mut description = String::new();
    for (index, block) in card.select(&description_sel).enumerate() {
        let text = text_of(block);
        if index == 0 {
            description.push_str(&text.replace(SLOT_NOTICE, ""));
        } else {
            description.push_str(&text);
            description.push('。');
        }
    }

    let record = base_record(card, id, name, EntityKind::ActivationMediumSkill)?
        .with_field("description", description);
    let record = with_blank_attributes(record, MANA_MULTIPLIER_ATTRIBUTES);
    apply_attributes(record, card, MANA_MULTIPLIER_ATTRIBUTES).map(Some)
}

fn find_card(doc: &Html) -> Result<Option<ElementRef<'_>>, ParseError> {
    let card_sel = selector(CARD)?;
    Ok(doc.select(&card_sel).next())
}

fn base_record(
    card: ElementRef<'_>,
    id: &str,
    name: &str,
    kind: EntityKind,
) -> Result<Record, ParseError> {
    let tag_sel = selector(TAG)?;
    let tags: Vec<String> = card.select(&tag_sel).map(text_of).collect();

    Ok(Record::new(id, name)
        .with_field("type", kind.wire_name())
        .with_field("icon", first_attr(card, "img", "src")?)
        .with_field("tags", tags))
}

fn first_description(card: ElementRef<'_>) -> Result<String, ParseError> {
    let description_sel = selector(DESCRIPTION)?;
    Ok(card
        .select(&description_sel)
        .next()
        .map(text_of)
        .unwrap_or_default())
}

/// Seeds every field of `map` with an empty value.
fn with_blank_attributes(record: Record, map: AttributeMap) -> Record {
    map.iter()
        .fold(record, |record, (_, field, _)| record.with_field(*field, ""))
}

/// Reads label/value rows; only labels listed in `map` produce fields.
fn apply_attributes(
    mut record: Record,
    card: ElementRef<'_>,
    map: AttributeMap,
) -> Result<Record, ParseError> {
    let row_sel = selector(ATTRIBUTE_ROW)?;
    let div_sel = selector("div")?;

    for row in card.select(&row_sel) {
        let Some(label) = row.select(&div_sel).next() else {
            continue;
        };
        let Some(value) = next_sibling_named(label, "div") else {
            continue;
        };
        let label_text = text_of(label);
        let Some((_, field, handling)) = map.iter().find(|(l, _, _)| *l == label_text) else {
            continue;
        };
        let value_text = text_of(value);
        let value = match handling {
            Value::Text => value_text,
            Value::Number => first_number(&value_text),
        };
        record = record.with_field(*field, value);
    }

    Ok(record)
}
