use quick_xml::escape::minimal_escape;
use rimtpl_core::{Result, TemplateDocument, LANGUAGE_DATA_ROOT};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const INDENT: &str = "    ";

/// Write a DefInjected template in the layout translators expect:
///
/// ```text
/// <?xml version="1.0" encoding="utf-8" ?>
/// <LanguageData>
///
///     <Ocean.label>ocean</Ocean.label>
///
/// </LanguageData>
/// ```
///
/// Every block is followed by an indented blank line. Only `&` and `<` are
/// escaped; everything else, including the `->` of grammar rules, is kept.
pub fn write_template<W: Write>(mut w: W, doc: &TemplateDocument) -> Result<()> {
    writeln!(w, r#"<?xml version="1.0" encoding="utf-8" ?>"#)?;
    writeln!(w, "<{LANGUAGE_DATA_ROOT}>")?;
    writeln!(w, "{INDENT}")?;
    for block in &doc.blocks {
        for entry in &block.entries {
            let key = entry.key();
            writeln!(w, "{INDENT}<{key}>{}</{key}>", minimal_escape(entry.text.as_str()))?;
        }
        writeln!(w, "{INDENT}")?;
    }
    writeln!(w, "</{LANGUAGE_DATA_ROOT}>")?;
    w.flush()?;
    Ok(())
}

/// Create (or truncate) `out_path` and write the template into it.
/// The parent directory must already exist.
pub fn write_template_file(out_path: &Path, doc: &TemplateDocument) -> Result<()> {
    let file = File::create(out_path)?;
    write_template(BufWriter::new(file), doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rimtpl_core::{TemplateBlock, TemplateEntry};

    fn render(doc: &TemplateDocument) -> String {
        let mut buf = Vec::new();
        write_template(&mut buf, doc).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_entries_separators_and_footer() {
        let doc = TemplateDocument {
            blocks: vec![
                TemplateBlock {
                    entries: vec![
                        TemplateEntry::new("Ocean", "label", "ocean"),
                        TemplateEntry::new("Ocean", "description", "Open ocean."),
                    ],
                },
                TemplateBlock::default(),
            ],
        };
        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n\
                        <LanguageData>\n    \n    \
                        <Ocean.label>ocean</Ocean.label>\n    \
                        <Ocean.description>Open ocean.</Ocean.description>\n    \n    \n\
                        </LanguageData>\n";
        assert_eq!(render(&doc), expected);
    }

    #[test]
    fn empty_document_has_header_and_footer_only() {
        let out = render(&TemplateDocument::default());
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n<LanguageData>\n    \n</LanguageData>\n"
        );
    }

    #[test]
    fn only_ampersand_and_less_than_are_escaped() {
        let doc = TemplateDocument {
            blocks: vec![TemplateBlock {
                entries: vec![TemplateEntry::new(
                    "Names",
                    "rulePack.rulesStrings.0",
                    "r_name->\"Fish & Chips\" <x>",
                )],
            }],
        };
        let out = render(&doc);
        assert!(out.contains(
            "    <Names.rulePack.rulesStrings.0>r_name->\"Fish &amp; Chips\" &lt;x></Names.rulePack.rulesStrings.0>\n"
        ));
    }

    #[test]
    fn grammar_rule_arrows_are_written_verbatim() {
        let doc = TemplateDocument {
            blocks: vec![TemplateBlock {
                entries: vec![TemplateEntry::new(
                    "Names",
                    "rulePack.rulesStrings.0",
                    "r_name->Bob",
                )],
            }],
        };
        let out = render(&doc);
        assert!(out.contains(
            "    <Names.rulePack.rulesStrings.0>r_name->Bob</Names.rulePack.rulesStrings.0>\n"
        ));
        assert!(!out.contains("&gt;"));
    }

    #[test]
    fn file_is_truncated_on_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Out.xml");
        std::fs::write(&path, "x".repeat(4096)).unwrap();
        write_template_file(&path, &TemplateDocument::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("</LanguageData>\n"));
        assert!(!text.contains("xxxxxxxx"));
    }
}
