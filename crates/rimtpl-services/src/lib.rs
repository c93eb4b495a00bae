//! High-level orchestration over the parser and writer crates.
//! Kept thin so the CLI only talks to this crate.

pub mod generate;
pub mod naming;

pub use generate::{
    check_install_root, count_xml_files, generate_templates, tag_sets, GenerateOptions,
    GenerateSummary,
};
pub use naming::def_injected_dir_name;
pub use rimtpl_core::{Result, TemplateDocument, TemplateEntry};
