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

//! Helpers for maintaining a localized documentation site.
//!
//! The site keeps one directory of `.mdx` pages per language (for
//! example `plugin_dev_en/` and `plugin_dev_zh/`) and a single
//! `docs.json` file describing the navigation for every language.
//! The functions here implement the small batch jobs needed to keep
//! the pages and the navigation consistent:
//!
//! - [`frontmatter`]: rename a key in the YAML front matter of pages,
//! - [`links`]: make links into a language directory point at the
//!   localized page,
//! - [`rename`]: rename files from one extension to another,
//! - [`navigation`]: synchronize `docs.json` with the pages on disk.
//!
//! Each job has a matching binary in `src/bin/`.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod error;
pub mod frontmatter;
pub mod links;
pub mod navigation;
pub mod rename;

/// Set up logging for the binaries.
///
/// Messages at `info` and above are shown by default. Use `RUST_LOG`
/// to change the filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Counts of files handled by a batch job.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BatchStats {
    pub processed: u32,
    pub modified: u32,
    pub skipped: u32,
    pub errors: u32,
}

impl Display for BatchStats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Checked: {} files", self.processed)?;
        writeln!(f, "Modified: {} files", self.modified)?;
        writeln!(f, "Skipped: {} files", self.skipped)?;
        write!(f, "Errors encountered: {} files", self.errors)
    }
}

/// Returns the regular files directly inside `directory` whose file
/// name satisfies `predicate`, sorted by path.
pub fn files_in_dir(
    directory: &Path,
    predicate: impl Fn(&str) -> bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(directory)
        .with_context(|| format!("Could not read directory {}", directory.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if predicate(name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_files_in_dir_filters_and_sorts() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        testing::create_files(
            tmpdir.path(),
            &[
                ("b.mdx", ""),
                ("a.mdx", ""),
                ("c.md", ""),
                ("nested/d.mdx", ""),
            ],
        )?;

        let files = files_in_dir(tmpdir.path(), |name| name.ends_with(".mdx"))?;
        assert_eq!(
            files,
            vec![tmpdir.path().join("a.mdx"), tmpdir.path().join("b.mdx")]
        );
        Ok(())
    }

    #[test]
    fn test_files_in_dir_missing_directory() {
        let tmpdir = tempfile::tempdir().unwrap();
        assert!(files_in_dir(&tmpdir.path().join("missing"), |_| true).is_err());
    }

    #[test]
    fn test_batch_stats_display() {
        let stats = BatchStats {
            processed: 4,
            modified: 1,
            skipped: 2,
            errors: 1,
        };
        assert_eq!(
            stats.to_string(),
            "Checked: 4 files\nModified: 1 files\nSkipped: 2 files\nErrors encountered: 1 files"
        );
    }
}
