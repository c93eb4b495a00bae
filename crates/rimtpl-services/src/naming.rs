use rimtpl_core::{RimTplError, Result};

/// Map a Defs subdirectory name to its DefInjected folder name:
/// `ThingDefs_Items` -> `ThingDef`, `BiomeDefs` -> `BiomeDef`, `Defs` -> `Def`.
pub fn def_injected_dir_name(source_dir: &str) -> Result<String> {
    let head = source_dir.split('_').next().unwrap_or_default();
    let name = match head.strip_suffix("Defs") {
        Some(stem) => format!("{stem}Def"),
        None => head.to_string(),
    };
    if name.is_empty() {
        return Err(RimTplError::EmptyDirName(source_dir.to_string()).into());
    }
    Ok(name)
}
