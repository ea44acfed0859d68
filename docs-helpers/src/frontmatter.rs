// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Renaming keys in the YAML front matter of pages.
//!
//! This file contains main logic used by the binary `docs-rename-field`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{error, info, warn};
use serde_yaml::{Mapping, Value};
use walkdir::WalkDir;

use crate::error::FrontMatterError;
use crate::BatchStats;

const DELIMITER: &str = "---";

/// A page split into its front matter and body.
#[derive(Debug, PartialEq)]
pub struct Document<'a> {
    /// The parsed header, `None` if the page has no header block.
    pub front_matter: Option<Mapping>,
    /// Everything after the closing delimiter, without the blank
    /// lines separating it from the header.
    pub body: &'a str,
}

impl<'a> Document<'a> {
    /// Parse `content` into front matter and body.
    ///
    /// An empty header gives an empty mapping. A header which is
    /// valid YAML but not a mapping is an error.
    pub fn parse(content: &'a str) -> Result<Self, FrontMatterError> {
        let Some((header, body)) = split_front_matter(content) else {
            return Ok(Document {
                front_matter: None,
                body: content,
            });
        };
        let front_matter = if header.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str(header)? {
                Value::Mapping(mapping) => mapping,
                Value::Null => Mapping::new(),
                _ => return Err(FrontMatterError::NotAMapping),
            }
        };
        Ok(Document {
            front_matter: Some(front_matter),
            body,
        })
    }

    /// Reassemble the page with a freshly serialized header.
    pub fn render(&self) -> Result<String, serde_yaml::Error> {
        let header = match &self.front_matter {
            Some(mapping) => serde_yaml::to_string(mapping)?,
            None => serde_yaml::to_string(&Mapping::new())?,
        };
        Ok(format!("{DELIMITER}\n{header}{DELIMITER}\n\n{}", self.body))
    }
}

/// Split `content` into the raw header text and the body.
///
/// The header must start on the first non-blank line with a line
/// containing only `---` and end with the next such line. Returns
/// `None` if there is no complete header block.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let mut offset = 0;

    let mut header_start = None;
    for line in lines.by_ref() {
        offset += line.len();
        if line.trim().is_empty() {
            continue;
        }
        if line.trim() == DELIMITER {
            header_start = Some(offset);
        }
        break;
    }
    let header_start = header_start?;

    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &content[header_start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

/// What [`rename_key`] did to a mapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyRename {
    /// The legacy key was not there.
    Absent,
    /// The legacy key was renamed in place.
    Renamed,
    /// Both keys existed; the legacy entry was removed.
    Dropped,
}

/// Rename `legacy` to `replacement` in `mapping`.
///
/// The renamed entry keeps its position. If `replacement` is already
/// present, its value wins and the legacy entry is removed.
pub fn rename_key(mapping: &mut Mapping, legacy: &str, replacement: &str) -> KeyRename {
    if !mapping.contains_key(legacy) {
        return KeyRename::Absent;
    }
    let conflict = mapping.contains_key(replacement);
    let legacy_key = Value::String(legacy.to_string());

    for (key, value) in std::mem::take(mapping) {
        if key != legacy_key {
            mapping.insert(key, value);
        } else if !conflict {
            mapping.insert(Value::String(replacement.to_string()), value);
        }
    }

    if conflict {
        KeyRename::Dropped
    } else {
        KeyRename::Renamed
    }
}

/// Which front matter key to rename, and in which files.
#[derive(Clone, Debug)]
pub struct FieldRename {
    pub legacy_key: String,
    pub replacement_key: String,
    /// File extensions to process, compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for FieldRename {
    fn default() -> Self {
        Self {
            legacy_key: String::from("summary"),
            replacement_key: String::from("description"),
            extensions: vec![String::from("mdx")],
        }
    }
}

impl FieldRename {
    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

/// Result of processing a single file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileOutcome {
    Modified,
    NoLegacyKey,
    NotAMapping,
}

/// Rename the configured key in a single file.
///
/// The file is written back only when the header changed. A YAML
/// error is returned as an error and leaves the file untouched.
pub fn rename_field_in_file(path: &Path, rename: &FieldRename) -> anyhow::Result<FileOutcome> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;

    let mut document = match Document::parse(&content) {
        Ok(document) => document,
        Err(FrontMatterError::NotAMapping) => return Ok(FileOutcome::NotAMapping),
        Err(err) => return Err(err.into()),
    };
    let Some(front_matter) = document.front_matter.as_mut() else {
        return Ok(FileOutcome::NoLegacyKey);
    };

    match rename_key(front_matter, &rename.legacy_key, &rename.replacement_key) {
        KeyRename::Absent => return Ok(FileOutcome::NoLegacyKey),
        KeyRename::Renamed => info!(
            "  Renaming '{}' to '{}'",
            rename.legacy_key, rename.replacement_key
        ),
        KeyRename::Dropped => warn!(
            "  Both '{}' and '{}' exist, keeping '{}' and removing '{}'",
            rename.legacy_key, rename.replacement_key, rename.replacement_key, rename.legacy_key
        ),
    }

    let new_content = document
        .render()
        .context("Failed to serialize updated front matter")?;
    fs::write(path, new_content).with_context(|| format!("Could not write {}", path.display()))?;
    Ok(FileOutcome::Modified)
}

/// Rename the configured key in every matching file below `directory`.
///
/// Failures on individual files are logged and counted, they never
/// abort the batch.
pub fn rename_field_in_tree(directory: &Path, rename: &FieldRename) -> anyhow::Result<BatchStats> {
    anyhow::ensure!(
        directory.is_dir(),
        "Target directory not found or is not a directory: {}",
        directory.display()
    );
    info!("Starting processing in directory: {}", directory.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Could not walk {}", directory.display()))?;
        if entry.file_type().is_file() && rename.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    info!("Found {} files to process", files.len());

    let mut stats = BatchStats::default();
    for path in &files {
        let relative_path = path.strip_prefix(directory).unwrap_or(path);
        info!("Processing: {}", relative_path.display());
        stats.processed += 1;

        match rename_field_in_file(path, rename) {
            Ok(FileOutcome::Modified) => {
                info!("  File updated");
                stats.modified += 1;
            }
            Ok(FileOutcome::NoLegacyKey) => {
                info!("  Skipping, no '{}' field found", rename.legacy_key);
                stats.skipped += 1;
            }
            Ok(FileOutcome::NotAMapping) => {
                warn!("  Skipping, front matter is not a mapping");
                stats.skipped += 1;
            }
            Err(err) => {
                error!("  {err:#}");
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_files;
    use pretty_assertions::assert_eq;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn keys(mapping: &Mapping) -> Vec<&str> {
        mapping.keys().filter_map(Value::as_str).collect()
    }

    #[test]
    fn test_split_front_matter_none() {
        assert_eq!(split_front_matter("# Title\n\nBody"), None);
    }

    #[test]
    fn test_split_front_matter_unterminated() {
        assert_eq!(split_front_matter("---\ntitle: Foo\n# Title\n"), None);
    }

    #[test]
    fn test_split_front_matter_basic() {
        assert_eq!(
            split_front_matter("---\ntitle: Foo\n---\n\n# Title\nBody\n"),
            Some(("title: Foo\n", "# Title\nBody\n"))
        );
    }

    #[test]
    fn test_split_front_matter_leading_blank_lines_and_bom() {
        assert_eq!(
            split_front_matter("\u{feff}\n---  \ntitle: Foo\n---\nBody"),
            Some(("title: Foo\n", "Body"))
        );
    }

    #[test]
    fn test_split_front_matter_crlf() {
        assert_eq!(
            split_front_matter("---\r\ntitle: Foo\r\n---\r\n\r\nBody\r\n"),
            Some(("title: Foo\r\n", "Body\r\n"))
        );
    }

    #[test]
    fn test_parse_empty_header() {
        let document = Document::parse("---\n---\nBody").unwrap();
        assert_eq!(document.front_matter, Some(Mapping::new()));
        assert_eq!(document.body, "Body");
    }

    #[test]
    fn test_parse_not_a_mapping() {
        assert!(matches!(
            Document::parse("---\n- a\n- b\n---\nBody"),
            Err(FrontMatterError::NotAMapping)
        ));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(
            Document::parse("---\ntitle: [unclosed\n---\nBody"),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_render() {
        let document = Document::parse("---\ntitle: Foo\n---\nBody\n").unwrap();
        assert_eq!(document.render().unwrap(), "---\ntitle: Foo\n---\n\nBody\n");
    }

    #[test]
    fn test_rename_key_keeps_position() {
        let mut front_matter = mapping("title: Foo\nsummary: Bar\nweight: 3\n");
        assert_eq!(
            rename_key(&mut front_matter, "summary", "description"),
            KeyRename::Renamed
        );
        assert_eq!(keys(&front_matter), vec!["title", "description", "weight"]);
        assert_eq!(front_matter.get("description"), Some(&Value::from("Bar")));
    }

    #[test]
    fn test_rename_key_conflict_keeps_replacement() {
        let mut front_matter = mapping("summary: Old\ndescription: New\n");
        assert_eq!(
            rename_key(&mut front_matter, "summary", "description"),
            KeyRename::Dropped
        );
        assert_eq!(keys(&front_matter), vec!["description"]);
        assert_eq!(front_matter.get("description"), Some(&Value::from("New")));
    }

    #[test]
    fn test_rename_key_absent() {
        let mut front_matter = mapping("title: Foo\n");
        assert_eq!(
            rename_key(&mut front_matter, "summary", "description"),
            KeyRename::Absent
        );
        assert_eq!(front_matter, mapping("title: Foo\n"));
    }

    #[test]
    fn test_rename_field_in_tree() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let root = tmpdir.path();
        create_files(
            root,
            &[
                ("a.mdx", "---\ntitle: A\nsummary: About A\n---\n\n# A\n"),
                ("nested/b.MDX", "---\nsummary: Old\ndescription: New\n---\nB"),
                ("c.mdx", "---\ntitle:   C\n---\n\n# C\n"),
                ("d.mdx", "---\ntitle: [broken\n---\nD"),
                ("e.mdx", "No header at all\n"),
                ("f.md", "---\nsummary: ignored\n---\n"),
            ],
        )?;

        let stats = rename_field_in_tree(root, &FieldRename::default())?;
        assert_eq!(
            stats,
            BatchStats {
                processed: 5,
                modified: 2,
                skipped: 2,
                errors: 1,
            }
        );

        assert_eq!(
            fs::read_to_string(root.join("a.mdx"))?,
            "---\ntitle: A\ndescription: About A\n---\n\n# A\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("nested/b.MDX"))?,
            "---\ndescription: New\n---\n\nB"
        );
        // Untouched files stay byte-for-byte identical.
        assert_eq!(
            fs::read_to_string(root.join("c.mdx"))?,
            "---\ntitle:   C\n---\n\n# C\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("d.mdx"))?,
            "---\ntitle: [broken\n---\nD"
        );
        assert_eq!(
            fs::read_to_string(root.join("f.md"))?,
            "---\nsummary: ignored\n---\n"
        );
        Ok(())
    }

    #[test]
    fn test_rename_field_in_tree_is_idempotent() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let root = tmpdir.path();
        create_files(
            root,
            &[("a.mdx", "---\nsummary: About A\ntags:\n- x\n---\n\nBody\n")],
        )?;

        rename_field_in_tree(root, &FieldRename::default())?;
        let first = fs::read_to_string(root.join("a.mdx"))?;
        let stats = rename_field_in_tree(root, &FieldRename::default())?;
        assert_eq!(stats.modified, 0);
        assert_eq!(stats.skipped, 1);
        assert_eq!(fs::read_to_string(root.join("a.mdx"))?, first);
        Ok(())
    }

    #[test]
    fn test_rename_field_in_tree_missing_directory() {
        let tmpdir = tempfile::tempdir().unwrap();
        let missing = tmpdir.path().join("missing");
        assert!(rename_field_in_tree(&missing, &FieldRename::default()).is_err());
    }
}
