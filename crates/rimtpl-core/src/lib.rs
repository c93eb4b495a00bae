use std::path::PathBuf;

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Root element of every DefInjected file.
pub const LANGUAGE_DATA_ROOT: &str = "LanguageData";

/// One translatable field of a DefInjected template.
///
/// Rendered as `<identifier.path>text</identifier.path>`, e.g.
/// `<Ocean.label>ocean</Ocean.label>` or
/// `<Misc.comps.0.labelTendedWell>bandaged</Misc.comps.0.labelTendedWell>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Def name, or a synthetic name such as `Turtle_Leather`.
    pub identifier: String,
    /// Dotted path from the Def root to the field (tags and list indices).
    pub path: String,
    /// Source-language text; never empty.
    pub text: String,
}

impl TemplateEntry {
    pub fn new(
        identifier: impl Into<String>,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
            text: text.into(),
        }
    }

    /// Tag name used in the template file.
    pub fn key(&self) -> String {
        format!("{}.{}", self.identifier, self.path)
    }
}

/// Entries that are written together and followed by a separator line.
/// Usually one block per Def.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateBlock {
    pub entries: Vec<TemplateEntry>,
}

impl TemplateBlock {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push unless an entry with the same key is already present.
    /// Returns whether the entry was added.
    pub fn push_unique(&mut self, entry: TemplateEntry) -> bool {
        if self
            .entries
            .iter()
            .any(|e| e.identifier == entry.identifier && e.path == entry.path)
        {
            return false;
        }
        self.entries.push(entry);
        true
    }
}

/// Everything written for one source Defs file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDocument {
    pub blocks: Vec<TemplateBlock>,
}

impl TemplateDocument {
    pub fn entry_count(&self) -> usize {
        self.blocks.iter().map(|b| b.entries.len()).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.blocks.iter().flat_map(|b| b.entries.iter())
    }
}

#[derive(Debug, Error)]
pub enum RimTplError {
    #[error("Invalid RimWorld installation folder: {0} does not exist")]
    InvalidInstallRoot(PathBuf),
    #[error("output_dir {0:?} must be a single folder name inside the template root")]
    InvalidOutputDir(String),
    #[error("directory name {0:?} maps to an empty DefInjected folder name")]
    EmptyDirName(String),
    #[error("{path}: {message}")]
    Xml { path: PathBuf, message: String },
}
