//! Reads RimWorld Defs XML and turns it into DefInjected template entries.

use rimtpl_core::{RimTplError, Result, TemplateBlock, TemplateDocument};
use roxmltree::{Document, Node};
use std::path::Path;

pub mod classify;
pub mod extract;
pub mod special;
pub mod tags;

pub use classify::{def_is_translatable, has_translatable_defs};
pub use tags::{TagKind, TagSets};

/// Parse a Defs file. Malformed XML is reported with the file path.
pub fn load<'input>(text: &'input str, path: &Path) -> Result<Document<'input>> {
    Document::parse(text).map_err(|e| {
        RimTplError::Xml {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Build the template for a whole Defs document: one block per named Def,
/// followed by any static blocks the Def triggers.
pub fn build_document(doc: &Document, tags: &TagSets) -> TemplateDocument {
    let mut out = TemplateDocument::default();
    for def in defs(doc) {
        let Some(name) = def_name(def) else {
            continue;
        };
        let mut block = TemplateBlock::default();
        let entries = extract::extract_def(def, name, tags)
            .into_iter()
            .chain(special::augment(def, name));
        for entry in entries {
            let key = entry.key();
            if !block.push_unique(entry) {
                tracing::debug!(event = "duplicate_key_dropped", key = %key);
            }
        }
        out.blocks.push(block);
        out.blocks.extend(special::static_blocks(name));
    }
    out
}

/// Element children of the document root.
pub fn defs<'a, 'input>(doc: &'a Document<'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.root_element().children().filter(|n| n.is_element())
}

/// `defName`, falling back to the legacy `DefName`.
pub fn def_name<'a>(def: Node<'a, '_>) -> Option<&'a str> {
    child(def, "defName")
        .or_else(|| child(def, "DefName"))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First element child with the given tag.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
}

/// Leading text of an element, if it has any non-whitespace content.
/// The returned text is not trimmed.
pub(crate) fn text_of<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().filter(|t| !t.trim().is_empty())
}

pub(crate) fn has_element_children(node: Node) -> bool {
    node.children().any(|c| c.is_element())
}
