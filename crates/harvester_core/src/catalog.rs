use std::fmt;
use std::str::FromStr;

use crate::{
    parse_activation_medium_skill, parse_active_skill, parse_hero, parse_passive_skill,
    parse_support_skill, EntryExtras, IndexSpec, ParseFn,
};

const ITEM_ANCHOR: &str = "div.flex-grow-1.mx-2.my-1 a";

/// The entity kinds the source site exposes, each with its own index page and parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ActiveSkill,
    PassiveSkill,
    SupportSkill,
    ActivationMediumSkill,
    Hero,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::ActiveSkill,
        EntityKind::PassiveSkill,
        EntityKind::SupportSkill,
        EntityKind::ActivationMediumSkill,
        EntityKind::Hero,
    ];

    /// Value written into the `type` field of skill records.
    pub fn wire_name(self) -> &'static str {
        match self {
            EntityKind::ActiveSkill => "active",
            EntityKind::PassiveSkill => "passive",
            EntityKind::SupportSkill => "support",
            EntityKind::ActivationMediumSkill => "activation_medium",
            EntityKind::Hero => "hero",
        }
    }

    pub fn index_spec(self) -> IndexSpec {
        match self {
            EntityKind::ActiveSkill => {
                IndexSpec::new("Active_Skill", ITEM_ANCHOR).within("div#主动技能Tag")
            }
            EntityKind::PassiveSkill => {
                IndexSpec::new("Passive_Skill", ITEM_ANCHOR).within("div#被动技能Tag")
            }
            EntityKind::SupportSkill => {
                IndexSpec::new("Support_Skill", ITEM_ANCHOR).within("div#辅助技能Tag")
            }
            EntityKind::ActivationMediumSkill => {
                IndexSpec::new("Activation_Medium_Skill", ITEM_ANCHOR).within("div#触媒技能Tag")
            }
            EntityKind::Hero => {
                IndexSpec::new("Hero", ITEM_ANCHOR).with_extras(EntryExtras::HeroSummary)
            }
        }
    }

    pub fn parser(self) -> ParseFn {
        match self {
            EntityKind::ActiveSkill => parse_active_skill,
            EntityKind::PassiveSkill => parse_passive_skill,
            EntityKind::SupportSkill => parse_support_skill,
            EntityKind::ActivationMediumSkill => parse_activation_medium_skill,
            EntityKind::Hero => parse_hero,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_name().replace('_', "-"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind {0:?}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == normalized)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}
