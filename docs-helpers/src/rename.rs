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

//! Renaming files from one extension to another.

use std::fs;
use std::path::Path;

use log::{error, info, warn};

use crate::{files_in_dir, BatchStats};

/// Rename every file directly inside `directory` whose name ends with
/// `from` so that it ends with `to` instead.
///
/// Files are renamed one at a time and there is no rollback. A file
/// whose new name is already taken is left alone.
pub fn rename_extensions(directory: &Path, from: &str, to: &str) -> anyhow::Result<BatchStats> {
    let files = files_in_dir(directory, |name| name.ends_with(from))?;

    let mut stats = BatchStats::default();
    for old_path in files {
        stats.processed += 1;
        let Some(name) = old_path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let new_name = format!("{}{to}", &name[..name.len() - from.len()]);
        let new_path = old_path.with_file_name(new_name);

        if new_path.exists() {
            warn!(
                "Not renaming '{}', '{}' already exists",
                old_path.display(),
                new_path.display()
            );
            stats.skipped += 1;
            continue;
        }

        match fs::rename(&old_path, &new_path) {
            Ok(()) => {
                info!(
                    "Renamed '{}' to '{}'",
                    old_path.display(),
                    new_path.display()
                );
                stats.modified += 1;
            }
            Err(err) => {
                error!("Could not rename '{}': {err}", old_path.display());
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

    #[test]
    fn test_rename_extensions() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let root = tmpdir.path();
        create_files(
            root,
            &[
                ("0111-intro.zh.md", "intro"),
                ("0211-start.zh.md", "start"),
                ("0211-start.zh.mdx", "already there"),
                ("0311-done.zh.mdx", "done"),
                ("sub/0411-deep.zh.md", "deep"),
            ],
        )?;

        let stats = rename_extensions(root, ".md", ".mdx")?;
        assert_eq!(
            stats,
            BatchStats {
                processed: 2,
                modified: 1,
                skipped: 1,
                errors: 0,
            }
        );

        assert!(!root.join("0111-intro.zh.md").exists());
        assert_eq!(fs::read_to_string(root.join("0111-intro.zh.mdx"))?, "intro");
        assert_eq!(
            fs::read_to_string(root.join("0211-start.zh.mdx"))?,
            "already there"
        );
        assert!(root.join("0211-start.zh.md").exists());
        assert!(root.join("sub/0411-deep.zh.md").exists());
        Ok(())
    }

    #[test]
    fn test_rename_extensions_missing_directory() {
        let tmpdir = tempfile::tempdir().unwrap();
        assert!(rename_extensions(&tmpdir.path().join("missing"), ".md", ".mdx").is_err());
    }
}
