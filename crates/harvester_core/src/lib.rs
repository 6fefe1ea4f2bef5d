//! Harvester core: pure data model and per-entity page extraction.
//!
//! Nothing in this crate performs IO. The engine fetches pages and hands the
//! HTML to the parsers defined here.
mod catalog;
mod dom;
mod hero;
mod index;
mod parser;
mod record;
mod skills;

pub use catalog::{EntityKind, UnknownEntityKind};
pub use hero::parse_hero;
pub use index::{extract_references, EntryExtras, IndexSpec};
pub use parser::{ItemParser, ParseError, ParseFn};
pub use record::{FieldValue, ItemReference, Record};
pub use skills::{
    parse_activation_medium_skill, parse_active_skill, parse_passive_skill, parse_support_skill,
};
