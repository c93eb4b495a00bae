//! Path extraction for a single Def.

use crate::{child, has_element_children, text_of, TagSets};
use rimtpl_core::TemplateEntry;
use roxmltree::Node;

/// A list container plus one nested list inside it.
pub const MAX_LIST_DEPTH: usize = 2;

/// Collect the Def's translatable fields: simple labels, list containers,
/// then singly-nested fields.
pub fn extract_def(def: Node, def_name: &str, tags: &TagSets) -> Vec<TemplateEntry> {
    let mut out = Vec::new();
    simple_labels(def, def_name, tags, &mut out);
    for start in &tags.list_starts {
        if let Some(container) = child(def, start) {
            collect_list(container, start.clone(), 1, def_name, tags, &mut out);
        }
    }
    nested_fields(def, def_name, tags, &mut out);
    out
}

/// Revert the legacy capitalisation (`Description` -> `description`).
pub fn lower_first(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn simple_labels(def: Node, def_name: &str, tags: &TagSets, out: &mut Vec<TemplateEntry>) {
    for tag in &tags.labels {
        let Some(node) = child(def, tag) else {
            continue;
        };
        if let Some(text) = text_of(node) {
            out.push(TemplateEntry::new(def_name, lower_first(tag), text));
        }
    }
}

fn collect_list(
    container: Node,
    prefix: String,
    depth: usize,
    def_name: &str,
    tags: &TagSets,
    out: &mut Vec<TemplateEntry>,
) {
    let items: Vec<Node> = container
        .children()
        .filter(|c| c.is_element() && c.tag_name().name() == "li")
        .collect();

    if items.is_empty() {
        if depth >= MAX_LIST_DEPTH {
            return;
        }
        // all nested lists present, not just the first
        for nested in &tags.nested_lists {
            if let Some(list) = child(container, nested) {
                collect_list(
                    list,
                    format!("{prefix}.{nested}"),
                    depth + 1,
                    def_name,
                    tags,
                    out,
                );
            }
        }
        return;
    }

    for (i, item) in items.into_iter().enumerate() {
        let path = format!("{prefix}.{i}");
        if !has_element_children(item) {
            if let Some(text) = text_of(item) {
                out.push(TemplateEntry::new(def_name, path, text));
            }
            continue;
        }
        // first sub-label in curated order wins, even if others follow
        let sub = tags
            .list_labels
            .iter()
            .find_map(|tag| child(item, tag).map(|node| (tag, node)));
        if let Some((tag, node)) = sub {
            if let Some(text) = text_of(node) {
                out.push(TemplateEntry::new(def_name, format!("{path}.{tag}"), text));
            }
        }
    }
}

fn nested_fields(def: Node, def_name: &str, tags: &TagSets, out: &mut Vec<TemplateEntry>) {
    for start in &tags.nested_starts {
        let Some(nested) = child(def, start) else {
            continue;
        };
        for label in &tags.nested_labels {
            let Some(node) = child(nested, label) else {
                continue;
            };
            if let Some(text) = text_of(node) {
                let tag = node.tag_name().name();
                out.push(TemplateEntry::new(def_name, format!("{start}.{tag}"), text));
            }
        }
    }
}
