use crate::{child, def_name, defs, TagSets};
use roxmltree::{Document, Node};

/// A Def is translatable when it has a name and at least one simple label or
/// list container as a direct child.
pub fn def_is_translatable(def: Node, tags: &TagSets) -> bool {
    if def_name(def).is_none() {
        return false;
    }
    tags.labels.iter().any(|t| child(def, t).is_some())
        || tags.list_starts.iter().any(|t| child(def, t).is_some())
}

/// Whole-file check done before any output file is created.
pub fn has_translatable_defs(doc: &Document, tags: &TagSets) -> bool {
    defs(doc).any(|def| def_is_translatable(def, tags))
}
