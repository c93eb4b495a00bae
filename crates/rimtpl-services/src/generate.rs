use crate::naming::def_injected_dir_name;
use color_eyre::eyre::WrapErr;
use rimtpl_config::{RimTplConfig, TagsCfg};
use rimtpl_core::{RimTplError, Result};
use rimtpl_parsers_xml::{TagKind, TagSets};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub install_root: PathBuf,
    pub template_root: PathBuf,
    pub defs_subpath: String,
    pub output_dir: String,
    pub tags: TagSets,
}

impl GenerateOptions {
    pub fn new(install_root: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self::from_config(install_root, template_root, &RimTplConfig::default())
    }

    pub fn from_config(
        install_root: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
        cfg: &RimTplConfig,
    ) -> Self {
        Self {
            install_root: install_root.into(),
            template_root: template_root.into(),
            defs_subpath: cfg.defs_subpath().to_string(),
            output_dir: cfg.output_dir().to_string(),
            tags: tag_sets(cfg.tags.as_ref()),
        }
    }

    pub fn defs_dir(&self) -> PathBuf {
        self.install_root.join(&self.defs_subpath)
    }

    /// The folder that is wiped and rebuilt. It has to be exactly one plain
    /// name below the template root.
    pub fn out_dir(&self) -> Result<PathBuf> {
        let mut parts = Path::new(&self.output_dir).components();
        match (parts.next(), parts.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.template_root.join(&self.output_dir)),
            _ => Err(RimTplError::InvalidOutputDir(self.output_dir.clone()).into()),
        }
    }
}

/// Built-in tag lists extended by the `[tags]` config section.
pub fn tag_sets(cfg: Option<&TagsCfg>) -> TagSets {
    let mut tags = TagSets::default();
    let Some(cfg) = cfg else {
        return tags;
    };
    let extra = [
        (TagKind::Labels, &cfg.labels),
        (TagKind::ListStarts, &cfg.list_starts),
        (TagKind::ListLabels, &cfg.list_labels),
        (TagKind::NestedLists, &cfg.nested_lists),
        (TagKind::NestedStarts, &cfg.nested_starts),
        (TagKind::NestedLabels, &cfg.nested_labels),
    ];
    for (kind, list) in extra {
        if let Some(list) = list {
            tags.extend(kind, list);
        }
    }
    tags
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub files_total: usize,
    pub files_processed: usize,
    pub files_written: usize,
    pub entries_written: usize,
    pub dirs_created: usize,
}

/// Return the Defs directory, or fail if the installation folder is wrong.
pub fn check_install_root(opts: &GenerateOptions) -> Result<PathBuf> {
    let defs_dir = opts.defs_dir();
    if !defs_dir.is_dir() {
        return Err(RimTplError::InvalidInstallRoot(defs_dir).into());
    }
    Ok(defs_dir)
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

fn xml_files(root: &Path) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter(|e| match e {
            Ok(entry) => entry.file_type().is_file() && is_xml(entry.path()),
            Err(_) => true,
        })
}

/// Count the `.xml` files under `root`.
pub fn count_xml_files(root: &Path) -> Result<usize> {
    let mut n = 0usize;
    for entry in xml_files(root) {
        entry?;
        n += 1;
    }
    Ok(n)
}

/// Rebuild the DefInjected template tree from the Defs tree.
///
/// The output folder is removed and recreated first. `progress` is called
/// after every source file with `(processed, total)`.
pub fn generate_templates(
    opts: &GenerateOptions,
    mut progress: impl FnMut(usize, usize),
) -> Result<GenerateSummary> {
    let defs_dir = check_install_root(opts)?;
    let out_dir = opts.out_dir()?;

    if out_dir.exists() {
        std::fs::remove_dir_all(&out_dir)
            .wrap_err_with(|| format!("removing {}", out_dir.display()))?;
    }
    std::fs::create_dir_all(&out_dir)
        .wrap_err_with(|| format!("creating {}", out_dir.display()))?;

    let mut summary = GenerateSummary {
        files_total: count_xml_files(&defs_dir)?,
        ..Default::default()
    };
    tracing::info!(
        event = "generate_start",
        defs = %defs_dir.display(),
        out = %out_dir.display(),
        files = summary.files_total
    );

    for entry in xml_files(&defs_dir) {
        let entry = entry?;
        let path = entry.path();
        if let Some(entries) = process_file(path, &out_dir, &opts.tags, &mut summary)? {
            summary.files_written += 1;
            summary.entries_written += entries;
        }
        summary.files_processed += 1;
        progress(summary.files_processed, summary.files_total);
    }

    tracing::info!(
        event = "generate_done",
        processed = summary.files_processed,
        written = summary.files_written,
        entries = summary.entries_written
    );
    Ok(summary)
}

/// Returns the number of entries written, or `None` when the file has
/// nothing to translate.
fn process_file(
    path: &Path,
    out_dir: &Path,
    tags: &TagSets,
    summary: &mut GenerateSummary,
) -> Result<Option<usize>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let doc = rimtpl_parsers_xml::load(text, path)?;

    if !rimtpl_parsers_xml::has_translatable_defs(&doc, tags) {
        tracing::debug!(event = "file_skipped", path = %path.display());
        return Ok(None);
    }

    let source_dir = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target_dir = out_dir.join(def_injected_dir_name(&source_dir)?);
    if !target_dir.exists() {
        std::fs::create_dir(&target_dir)
            .wrap_err_with(|| format!("creating {}", target_dir.display()))?;
        summary.dirs_created += 1;
    }

    let Some(file_name) = path.file_name() else {
        return Ok(None);
    };
    let target = target_dir.join(file_name);
    let template = rimtpl_parsers_xml::build_document(&doc, tags);
    rimtpl_export_xml::write_template_file(&target, &template)
        .wrap_err_with(|| format!("writing {}", target.display()))?;

    let count = template.entry_count();
    tracing::debug!(
        event = "template_written",
        source = %path.display(),
        target = %target.display(),
        entries = count
    );
    Ok(Some(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ITEMS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Defs>
  <ThingDef ParentName="ResourceBase">
    <defName>Steel</defName>
    <label>steel</label>
    <description>Refined iron.</description>
    <stuffProps/>
  </ThingDef>
</Defs>
"#;

    const BIOMES: &str = "\u{feff}<Defs>
  <BiomeDef>
    <defName>Ocean</defName>
    <label>ocean</label>
    <description>Open ocean.</description>
  </BiomeDef>
</Defs>
";

    const STATS_ONLY: &str = "<Defs><StatDef><defName>Mass</defName><minValue>0</minValue></StatDef></Defs>";

    fn write(root: &Path, rel: &str, content: &str) {
        let p = root.join("Mods/Core/Defs").join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, content).unwrap();
    }

    fn fixture() -> (tempfile::TempDir, tempfile::TempDir) {
        let install = tempdir().unwrap();
        write(install.path(), "ThingDefs_Items/Items_Resource.xml", ITEMS);
        write(install.path(), "BiomeDefs/Biomes.xml", BIOMES);
        write(install.path(), "StatDefs/Stats.xml", STATS_ONLY);
        write(install.path(), "StatDefs/readme.txt", "not xml");
        (install, tempdir().unwrap())
    }

    #[test]
    fn generates_templates_per_renamed_directory() -> Result<()> {
        let (install, out) = fixture();
        let opts = GenerateOptions::new(install.path(), out.path());
        let mut calls = Vec::new();
        let summary = generate_templates(&opts, |cur, total| calls.push((cur, total)))?;

        assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(summary.files_total, 3);
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.dirs_created, 2);
        assert_eq!(summary.entries_written, 5);

        let def_injected = out.path().join("DefInjected");
        let items = fs::read_to_string(def_injected.join("ThingDef/Items_Resource.xml"))?;
        assert!(items.contains("    <Steel.label>steel</Steel.label>\n"));
        assert!(items.contains("    <Steel.description>Refined iron.</Steel.description>\n"));
        assert!(items.contains("    <Steel.stuffProps.stuffAdjective>steel</Steel.stuffProps.stuffAdjective>\n"));

        let biomes = fs::read_to_string(def_injected.join("BiomeDef/Biomes.xml"))?;
        let label = biomes.find("<Ocean.label>ocean</Ocean.label>").unwrap();
        let desc = biomes
            .find("<Ocean.description>Open ocean.</Ocean.description>")
            .unwrap();
        assert!(label < desc);

        assert!(!def_injected.join("StatDef").exists(), "no translatable defs, no folder");
        Ok(())
    }

    #[test]
    fn rerun_is_byte_identical_and_drops_stale_files() -> Result<()> {
        let (install, out) = fixture();
        let opts = GenerateOptions::new(install.path(), out.path());
        generate_templates(&opts, |_, _| {})?;
        let first = fs::read(out.path().join("DefInjected/BiomeDef/Biomes.xml"))?;

        let stale = out.path().join("DefInjected/Old/Stale.xml");
        fs::create_dir_all(stale.parent().unwrap())?;
        fs::write(&stale, "<LanguageData/>")?;

        generate_templates(&opts, |_, _| {})?;
        let second = fs::read(out.path().join("DefInjected/BiomeDef/Biomes.xml"))?;
        assert_eq!(first, second);
        assert!(!stale.exists());
        Ok(())
    }

    #[test]
    fn invalid_install_root_is_reported() {
        let install = tempdir().unwrap();
        let out = tempdir().unwrap();
        let opts = GenerateOptions::new(install.path(), out.path());
        let err = generate_templates(&opts, |_, _| {}).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RimTplError>(),
            Some(RimTplError::InvalidInstallRoot(_))
        ));
        assert!(!out.path().join("DefInjected").exists());
    }

    #[test]
    fn output_dir_outside_one_folder_is_refused_before_wiping() {
        let (install, out) = fixture();
        let keyed = out.path().join("Keyed/MyWork.xml");
        fs::create_dir_all(keyed.parent().unwrap()).unwrap();
        fs::write(&keyed, "<LanguageData/>").unwrap();
        let absolute = out.path().join("Keyed").to_string_lossy().into_owned();

        for bad in ["", ".", "..", "Keyed/..", "DefInjected/ThingDef", absolute.as_str()] {
            let cfg = RimTplConfig {
                output_dir: Some(bad.to_string()),
                ..Default::default()
            };
            let opts = GenerateOptions::from_config(install.path(), out.path(), &cfg);
            let err = generate_templates(&opts, |_, _| {}).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<RimTplError>(),
                    Some(RimTplError::InvalidOutputDir(_))
                ),
                "{bad:?} accepted"
            );
            assert!(keyed.is_file(), "{bad:?} wiped unrelated files");
        }
    }

    #[test]
    fn malformed_xml_aborts_the_run() {
        let (install, out) = fixture();
        write(install.path(), "BiomeDefs/Broken.xml", "<Defs><BiomeDef></Defs>");
        let opts = GenerateOptions::new(install.path(), out.path());
        let err = generate_templates(&opts, |_, _| {}).unwrap_err();
        assert!(format!("{err:?}").contains("Broken.xml"));
    }

    #[test]
    fn same_destination_name_merges_directories() -> Result<()> {
        let install = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(install.path(), "ThingDefs_Items/A.xml", ITEMS);
        write(install.path(), "ThingDefs_Misc/B.xml", ITEMS);
        let opts = GenerateOptions::new(install.path(), out.path());
        let summary = generate_templates(&opts, |_, _| {})?;
        assert_eq!(summary.dirs_created, 1);
        let dir = out.path().join("DefInjected/ThingDef");
        assert!(dir.join("A.xml").is_file());
        assert!(dir.join("B.xml").is_file());
        Ok(())
    }

    #[test]
    fn config_paths_and_tags_are_honoured() -> Result<()> {
        let install = tempdir().unwrap();
        let out = tempdir().unwrap();
        let p = install.path().join("Data/Defs/Quests/Q.xml");
        fs::create_dir_all(p.parent().unwrap())?;
        fs::write(
            &p,
            "<Defs><QuestDef><defName>Q1</defName><title>Rescue</title></QuestDef></Defs>",
        )?;
        let cfg = RimTplConfig {
            defs_subpath: Some("Data/Defs".into()),
            output_dir: Some("Templates".into()),
            tags: Some(TagsCfg {
                labels: Some(vec!["title".into()]),
                ..Default::default()
            }),
        };
        let opts = GenerateOptions::from_config(install.path(), out.path(), &cfg);
        generate_templates(&opts, |_, _| {})?;
        let text = fs::read_to_string(out.path().join("Templates/Quests/Q.xml"))?;
        assert!(text.contains("<Q1.title>Rescue</Q1.title>"));
        Ok(())
    }
}
