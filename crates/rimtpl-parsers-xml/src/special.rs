//! Synthetic entries for Defs the game generates at runtime from a base
//! template (leather, meat and corpses of creatures, stone variants, ...).

use crate::{child, text_of};
use rimtpl_core::{TemplateBlock, TemplateEntry};
use roxmltree::Node;

pub const CREATURE_BASES: &[&str] = &[
    "BasePawn",
    "AnimalThingBase",
    "BaseMechanoid",
    "BaseInsect",
    "BaseHare",
    "BaseBear",
];

/// Creatures that yield no leather.
pub const NO_LEATHER: &[&str] = &[
    "Chicken",
    "Megascarab",
    "Megaspider",
    "Spelopede",
    "Mechanoid_Centipede",
    "Mechanoid_Scyther",
];

/// Creatures that yield no meat.
pub const NO_MEAT: &[&str] = &["Mechanoid_Centipede", "Mechanoid_Scyther"];

pub const STONE_BLOCKS_BASE: &str = "StoneBlocksBase";
/// Length of the `" blocks"` suffix on stone block labels.
pub const STONE_BLOCKS_SUFFIX_LEN: usize = 7;

pub const TILE_STONE_BASE: &str = "TileStoneBase";
pub const TILE_STONE_DESCRIPTION: &str =
    "Solid stone tiles for a castle feeling. Pretty to look at, but they take a long time to lay.";

pub const TABLE_BASE: &str = "TableBase";
pub const TABLE_DESCRIPTION: &str = "People eat off tables when chairs are placed facing them.";

pub const RESOURCE_BASES: &[&str] = &["ResourceBase", "ResourceVerbBase"];

pub const BITE_BASE: &str = "Bite";
pub const BITE_DEATH_MESSAGE: &str = "{0} has been bitten to death.";

/// Def whose presence triggers the rough/smooth stone table.
pub const STONE_TABLE_TRIGGER: &str = "CarpetDark";
pub const STONES: &[&str] = &["Sandstone", "Granite", "Limestone", "Slate", "Marble"];
pub const ROUGHNESS: &[(&str, &str)] = &[
    ("Rough", "rough"),
    ("RoughHewn", "rough-hewn"),
    ("Smooth", "smooth"),
];

const STUFF_ADJECTIVE: &str = "stuffProps.stuffAdjective";

/// Entries derived from the Def's `ParentName`. Rules are independent; a Def
/// may match more than one.
pub fn augment(def: Node, def_name: &str) -> Vec<TemplateEntry> {
    let mut out = Vec::new();
    let Some(parent) = def.attribute("ParentName") else {
        return out;
    };
    let label = child(def, "label").and_then(text_of);

    if CREATURE_BASES.contains(&parent) {
        match label {
            Some(label) => creature_products(def, def_name, label, &mut out),
            None => skip(def_name, parent, "label"),
        }
    }

    if parent == STONE_BLOCKS_BASE {
        match label.and_then(strip_blocks_suffix) {
            Some(adjective) => out.push(TemplateEntry::new(def_name, STUFF_ADJECTIVE, adjective)),
            None => skip(def_name, parent, "label"),
        }
    }

    if parent == TILE_STONE_BASE {
        out.push(TemplateEntry::new(def_name, "description", TILE_STONE_DESCRIPTION));
    }

    if parent == TABLE_BASE {
        out.push(TemplateEntry::new(def_name, "description", TABLE_DESCRIPTION));
    }

    if RESOURCE_BASES.contains(&parent) && child(def, "stuffProps").is_some() {
        match label {
            Some(label) => out.push(TemplateEntry::new(def_name, STUFF_ADJECTIVE, label)),
            None => skip(def_name, parent, "label"),
        }
    }

    if parent == BITE_BASE {
        out.push(TemplateEntry::new(def_name, "deathMessage", BITE_DEATH_MESSAGE));
    }

    out
}

fn creature_products(def: Node, def_name: &str, label: &str, out: &mut Vec<TemplateEntry>) {
    let race = child(def, "race");
    let race_label = |tag: &str| race.and_then(|r| child(r, tag)).and_then(text_of);

    if !NO_LEATHER.contains(&def_name) {
        let id = format!("{def_name}_Leather");
        let leather = race_label("leatherLabel")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{label} leather"));
        out.push(TemplateEntry::new(&id, "label", &leather));
        out.push(TemplateEntry::new(
            &id,
            "description",
            format!("Leather made from the skin of a {label}."),
        ));
        out.push(TemplateEntry::new(&id, STUFF_ADJECTIVE, leather));
    }

    if !NO_MEAT.contains(&def_name) {
        let id = format!("{def_name}_Meat");
        let meat = race_label("meatLabel")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{label} meat"));
        out.push(TemplateEntry::new(&id, "label", meat));
        out.push(TemplateEntry::new(
            &id,
            "description",
            format!("Raw flesh of a {label}."),
        ));
    }

    let id = format!("{def_name}_Corpse");
    out.push(TemplateEntry::new(&id, "label", format!("{label} corpse")));
    out.push(TemplateEntry::new(
        &id,
        "description",
        format!("Dead body of a {label}."),
    ));
}

/// `"granite blocks"` -> `"granite"`.
fn strip_blocks_suffix(label: &str) -> Option<String> {
    let len = label.chars().count();
    if len <= STONE_BLOCKS_SUFFIX_LEN {
        return None;
    }
    Some(label.chars().take(len - STONE_BLOCKS_SUFFIX_LEN).collect())
}

fn skip(def_name: &str, parent: &str, missing: &str) {
    tracing::warn!(
        event = "special_case_skipped",
        def = def_name,
        parent = parent,
        missing = missing,
        "Def matches a special case but lacks a field it needs"
    );
}

/// Static blocks emitted after the Def's own block.
pub fn static_blocks(def_name: &str) -> Vec<TemplateBlock> {
    if def_name != STONE_TABLE_TRIGGER {
        return Vec::new();
    }
    STONES
        .iter()
        .map(|stone| TemplateBlock {
            entries: ROUGHNESS
                .iter()
                .map(|(tag, adjective)| {
                    TemplateEntry::new(
                        format!("{stone}_{tag}"),
                        "label",
                        format!("{adjective} {}", stone.to_lowercase()),
                    )
                })
                .collect(),
        })
        .collect()
}
