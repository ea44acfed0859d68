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

//! Pointing links into a language directory at the localized pages.
//!
//! Pages in `plugin_dev_zh/` are named `<title>.zh.mdx`, but links
//! copied from the English pages look like
//! `[text](/plugin_dev_zh/foo/bar.mdx)`. The rewriter turns them into
//! `[text](/plugin_dev_zh/foo/bar.zh.mdx)`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{error, info};
use regex::{Captures, Regex};

use crate::{files_in_dir, BatchStats};

/// Rewrites Markdown links below `/<locale_dir>/` to carry the
/// `.<locale>` marker.
#[derive(Clone, Debug)]
pub struct LocaleLinks {
    marker: String,
    page_suffix: String,
    pattern: Regex,
}

/// The result of rewriting one document.
#[derive(Debug, PartialEq)]
pub struct Rewrite {
    pub content: String,
    /// `(old, new)` link targets, in the order they appear.
    pub changes: Vec<(String, String)>,
}

impl LocaleLinks {
    pub fn new(locale_dir: &str, locale: &str, page_suffix: &str) -> Self {
        let pattern = format!(
            r"\[([^\]]+)\]\((/{}/[^)\s]+)\)",
            regex::escape(locale_dir)
        );
        Self {
            marker: format!(".{locale}"),
            page_suffix: page_suffix.to_string(),
            pattern: Regex::new(&pattern).expect("well-formed regex"),
        }
    }

    /// Build the rewriter for a directory named `<name>_<locale>`, such
    /// as `plugin_dev_zh`.
    ///
    /// Returns `None` if the name has no locale suffix.
    pub fn for_directory(locale_dir: &str, page_suffix: &str) -> Option<Self> {
        let (_, locale) = locale_dir.rsplit_once('_')?;
        if locale.is_empty() {
            return None;
        }
        Some(Self::new(locale_dir, locale, page_suffix))
    }

    /// Compute the new target for a link, or `None` if it already
    /// carries the locale marker.
    pub fn rewrite_target(&self, target: &str) -> Option<String> {
        if target.ends_with(&self.marker)
            || target.ends_with(&format!("{}{}", self.marker, self.page_suffix))
        {
            return None;
        }
        match target.strip_suffix(self.page_suffix.as_str()) {
            Some(stem) if !self.page_suffix.is_empty() => {
                Some(format!("{stem}{}{}", self.marker, self.page_suffix))
            }
            _ => Some(format!("{target}{}", self.marker)),
        }
    }

    /// Rewrite all matching links in `content` in a single pass.
    pub fn rewrite(&self, content: &str) -> Rewrite {
        let mut changes = Vec::new();
        let new_content = self.pattern.replace_all(content, |captures: &Captures| {
            let text = &captures[1];
            let target = &captures[2];
            match self.rewrite_target(target) {
                Some(new_target) => {
                    let replacement = format!("[{text}]({new_target})");
                    changes.push((target.to_string(), new_target));
                    replacement
                }
                None => captures[0].to_string(),
            }
        });
        Rewrite {
            content: new_content.into_owned(),
            changes,
        }
    }

    /// Rewrite one file in place, returning the number of changed links.
    pub fn rewrite_file(&self, path: &Path) -> anyhow::Result<usize> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
        let rewrite = self.rewrite(&content);
        for (old, new) in &rewrite.changes {
            info!("  Updating link: {old} -> {new}");
        }
        if !rewrite.changes.is_empty() {
            fs::write(path, &rewrite.content)
                .with_context(|| format!("Could not write {}", path.display()))?;
        }
        Ok(rewrite.changes.len())
    }

    /// Rewrite every page directly inside `directory`.
    pub fn rewrite_links_in_dir(&self, directory: &Path) -> anyhow::Result<BatchStats> {
        info!("Processing files in folder: {}", directory.display());
        let files = files_in_dir(directory, |name| name.ends_with(&self.page_suffix))?;

        let mut stats = BatchStats::default();
        for path in &files {
            info!("Processing file: {}", path.display());
            stats.processed += 1;
            match self.rewrite_file(path) {
                Ok(0) => {
                    info!("  No changes needed");
                    stats.skipped += 1;
                }
                Ok(_) => {
                    info!("  File updated");
                    stats.modified += 1;
                }
                Err(err) => {
                    error!("  {err:#}");
                    stats.errors += 1;
                }
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_files;
    use pretty_assertions::assert_eq;

    fn zh_links() -> LocaleLinks {
        LocaleLinks::new("plugin_dev_zh", "zh", ".mdx")
    }

    #[test]
    fn test_rewrite_target_with_suffix() {
        assert_eq!(
            zh_links().rewrite_target("/plugin_dev_zh/foo/bar.mdx"),
            Some(String::from("/plugin_dev_zh/foo/bar.zh.mdx"))
        );
    }

    #[test]
    fn test_rewrite_target_without_suffix() {
        assert_eq!(
            zh_links().rewrite_target("/plugin_dev_zh/foo/bar"),
            Some(String::from("/plugin_dev_zh/foo/bar.zh"))
        );
    }

    #[test]
    fn test_rewrite_target_already_localized() {
        assert_eq!(zh_links().rewrite_target("/plugin_dev_zh/foo/bar.zh"), None);
        assert_eq!(
            zh_links().rewrite_target("/plugin_dev_zh/foo/bar.zh.mdx"),
            None
        );
    }

    #[test]
    fn test_rewrite_only_touches_locale_links() {
        let content = "See [Bar](/plugin_dev_zh/foo/bar.mdx), \
                       [Baz](/plugin_dev_zh/baz.zh) and \
                       [English](/plugin_dev_en/foo/bar.mdx).\n\
                       Also [Qux](/plugin_dev_zh/0111-qux).";
        let rewrite = zh_links().rewrite(content);
        assert_eq!(
            rewrite.content,
            "See [Bar](/plugin_dev_zh/foo/bar.zh.mdx), \
             [Baz](/plugin_dev_zh/baz.zh) and \
             [English](/plugin_dev_en/foo/bar.mdx).\n\
             Also [Qux](/plugin_dev_zh/0111-qux.zh)."
        );
        assert_eq!(
            rewrite.changes,
            vec![
                (
                    String::from("/plugin_dev_zh/foo/bar.mdx"),
                    String::from("/plugin_dev_zh/foo/bar.zh.mdx")
                ),
                (
                    String::from("/plugin_dev_zh/0111-qux"),
                    String::from("/plugin_dev_zh/0111-qux.zh")
                ),
            ]
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let links = zh_links();
        let once = links.rewrite("[a](/plugin_dev_zh/a.mdx) [b](/plugin_dev_zh/b)");
        let twice = links.rewrite(&once.content);
        assert_eq!(twice.content, once.content);
        assert!(twice.changes.is_empty());
    }

    #[test]
    fn test_rewrite_ignores_links_with_spaces() {
        let rewrite = zh_links().rewrite("[a](/plugin_dev_zh/a b.mdx)");
        assert!(rewrite.changes.is_empty());
    }

    #[test]
    fn test_for_directory() {
        let links = LocaleLinks::for_directory("plugin_dev_ja", ".mdx").unwrap();
        assert_eq!(
            links.rewrite_target("/plugin_dev_ja/a.mdx"),
            Some(String::from("/plugin_dev_ja/a.ja.mdx"))
        );
        assert!(LocaleLinks::for_directory("docs", ".mdx").is_none());
        assert!(LocaleLinks::for_directory("docs_", ".mdx").is_none());
    }

    #[test]
    fn test_rewrite_links_in_dir() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let root = tmpdir.path();
        create_files(
            root,
            &[
                ("a.zh.mdx", "[b](/plugin_dev_zh/b.mdx)\n"),
                ("b.zh.mdx", "[a](/plugin_dev_zh/a.zh.mdx)\n"),
                ("notes.txt", "[b](/plugin_dev_zh/b.mdx)\n"),
                ("sub/c.zh.mdx", "[b](/plugin_dev_zh/b.mdx)\n"),
            ],
        )?;

        let stats = zh_links().rewrite_links_in_dir(root)?;
        assert_eq!(
            stats,
            BatchStats {
                processed: 2,
                modified: 1,
                skipped: 1,
                errors: 0,
            }
        );
        assert_eq!(
            fs::read_to_string(root.join("a.zh.mdx"))?,
            "[b](/plugin_dev_zh/b.zh.mdx)\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("notes.txt"))?,
            "[b](/plugin_dev_zh/b.mdx)\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("sub/c.zh.mdx"))?,
            "[b](/plugin_dev_zh/b.mdx)\n"
        );
        Ok(())
    }
}
