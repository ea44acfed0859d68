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

//! Routing pages to their place in the navigation.
//!
//! Page file names start with a four digit prefix `PWXY`, as in
//! `0221-Cheatsheet.en.mdx`. The first three digits select where a new
//! page goes in the navigation; the last digit only orders pages.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use regex::Regex;

/// The `(P, W, X)` digits of a page prefix.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClassificationKey {
    pub p: char,
    pub w: char,
    pub x: char,
}

impl ClassificationKey {
    /// Take the key from a numeric prefix such as `"0221"` or `"022"`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let mut digits = prefix.chars();
        let mut next_digit = || digits.next().filter(char::is_ascii_digit);
        Some(Self {
            p: next_digit()?,
            w: next_digit()?,
            x: next_digit()?,
        })
    }
}

impl Display for ClassificationKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "('{}', '{}', '{}')", self.p, self.w, self.x)
    }
}

/// Where a page belongs: a tab, a group in the tab and optionally a
/// nested group inside that group.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Placement {
    pub tab: String,
    pub group: String,
    pub nested_group: Option<String>,
}

impl Placement {
    pub fn new(tab: &str, group: &str, nested_group: Option<&str>) -> Self {
        Self {
            tab: tab.to_string(),
            group: group.to_string(),
            nested_group: nested_group.map(String::from),
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Tab='{}', Group='{}', Nested='{}'",
            self.tab,
            self.group,
            self.nested_group.as_deref().unwrap_or("[none]")
        )
    }
}

/// Everything the reconciler needs to know about one language.
#[derive(Clone, Debug)]
pub struct NavLayout {
    /// Language code of the `navigation.languages` entry.
    pub locale: String,
    /// Directory with the pages, relative to the project root. This is
    /// also the prefix of every page path.
    pub docs_dir: String,
    /// Extension stripped from file names to get page paths.
    pub page_suffix: String,
    pub table: BTreeMap<ClassificationKey, Placement>,
    filename_pattern: Regex,
}

impl NavLayout {
    pub fn new(
        locale: &str,
        docs_dir: &str,
        page_suffix: &str,
        table: BTreeMap<ClassificationKey, Placement>,
    ) -> Self {
        let pattern = format!(
            r"^([0-9]{{4}})-(.*?){}{}$",
            regex::escape(&format!(".{locale}")),
            regex::escape(page_suffix)
        );
        Self {
            locale: locale.to_string(),
            docs_dir: docs_dir.to_string(),
            page_suffix: page_suffix.to_string(),
            table,
            filename_pattern: Regex::new(&pattern).expect("well-formed regex"),
        }
    }

    /// Layout of the English pages in `plugin_dev_en/`.
    pub fn english() -> Self {
        Self::new(
            "en",
            "plugin_dev_en",
            ".mdx",
            table(&[
                ("011", "Plugin Development", "Concepts & Getting Started", Some("Overview")),
                ("021", "Plugin Development", "Development Practices", Some("Quick Start")),
                (
                    "022",
                    "Plugin Development",
                    "Development Practices",
                    Some("Developing Dify Plugins"),
                ),
                (
                    "031",
                    "Plugin Development",
                    "Contribution & Publishing",
                    Some("Code of Conduct & Standards"),
                ),
                (
                    "032",
                    "Plugin Development",
                    "Contribution & Publishing",
                    Some("Publishing & Listing"),
                ),
                ("033", "Plugin Development", "Contribution & Publishing", Some("FAQ")),
                ("043", "Plugin Development", "Examples & Use Cases", Some("Development Examples")),
                ("922", "Plugin Development", "Advanced Development", Some("Extension & Agent")),
                ("923", "Plugin Development", "Advanced Development", Some("Extension & Agent")),
                ("943", "Plugin Development", "Advanced Development", Some("Extension & Agent")),
                ("924", "Plugin Development", "Advanced Development", Some("Reverse Calling")),
                ("013", "Reference & Specifications", "Core Concepts & Reference", None),
                ("041", "Reference & Specifications", "Core Specifications & Features", None),
            ]),
        )
    }

    /// Layout of the Chinese pages in `plugin_dev_zh/`.
    pub fn chinese() -> Self {
        Self::new(
            "zh",
            "plugin_dev_zh",
            ".mdx",
            table(&[
                ("011", "插件开发", "概念与入门", Some("概览")),
                ("021", "插件开发", "开发实践", Some("快速开始")),
                ("022", "插件开发", "开发实践", Some("开发 Dify 插件")),
                ("031", "插件开发", "贡献与发布", Some("行为准则与规范")),
                ("032", "插件开发", "贡献与发布", Some("发布与上架")),
                ("033", "插件开发", "贡献与发布", Some("常见问题解答")),
                ("043", "插件开发", "实践案例与示例", Some("开发示例")),
                ("922", "插件开发", "高级开发", Some("Extension 与 Agent")),
                ("923", "插件开发", "高级开发", Some("Extension 与 Agent")),
                ("943", "插件开发", "高级开发", Some("Extension 与 Agent")),
                ("924", "插件开发", "高级开发", Some("反向调用")),
                ("013", "速查与规范", "核心概念与速查", None),
                ("041", "速查与规范", "核心规范与功能", None),
            ]),
        )
    }

    /// Returns the classification key if `filename` is a page of this
    /// layout, such as `0221-Cheatsheet.en.mdx`.
    pub fn classify(&self, filename: &str) -> Option<ClassificationKey> {
        let captures = self.filename_pattern.captures(filename)?;
        ClassificationKey::from_prefix(&captures[1])
    }

    /// The page path used in the navigation for `filename`.
    pub fn page_path(&self, filename: &str) -> String {
        let stem = filename
            .strip_suffix(self.page_suffix.as_str())
            .unwrap_or(filename);
        format!("{}/{stem}", self.docs_dir)
    }

    pub fn placement(&self, key: &ClassificationKey) -> Option<&Placement> {
        self.table.get(key)
    }
}

fn table(
    entries: &[(&str, &str, &str, Option<&str>)],
) -> BTreeMap<ClassificationKey, Placement> {
    entries
        .iter()
        .filter_map(|(prefix, tab, group, nested_group)| {
            let key = ClassificationKey::from_prefix(prefix)?;
            Some((key, Placement::new(tab, group, *nested_group)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_from_prefix() {
        assert_eq!(
            ClassificationKey::from_prefix("0221"),
            Some(ClassificationKey {
                p: '0',
                w: '2',
                x: '2'
            })
        );
        assert_eq!(ClassificationKey::from_prefix("02"), None);
        assert_eq!(ClassificationKey::from_prefix("0a21"), None);
    }

    #[test]
    fn test_key_display() {
        let key = ClassificationKey::from_prefix("943").unwrap();
        assert_eq!(key.to_string(), "('9', '4', '3')");
    }

    #[test]
    fn test_classify() {
        let layout = NavLayout::english();
        assert_eq!(
            layout.classify("0221-Cheatsheet.en.mdx"),
            ClassificationKey::from_prefix("022")
        );
        assert_eq!(layout.classify("0221-Cheatsheet.zh.mdx"), None);
        assert_eq!(layout.classify("0221-Cheatsheet.en.md"), None);
        assert_eq!(layout.classify("221-Cheatsheet.en.mdx"), None);
        assert_eq!(layout.classify("README.en.mdx"), None);
        assert_eq!(layout.classify("0221-Cheatsheet.enxmdx"), None);
    }

    #[test]
    fn test_page_path() {
        let layout = NavLayout::chinese();
        assert_eq!(
            layout.page_path("0111-概览.zh.mdx"),
            "plugin_dev_zh/0111-概览.zh"
        );
    }

    #[test]
    fn test_builtin_tables() {
        let english = NavLayout::english();
        let chinese = NavLayout::chinese();
        assert_eq!(english.table.len(), 13);
        assert_eq!(
            english.table.keys().collect::<Vec<_>>(),
            chinese.table.keys().collect::<Vec<_>>()
        );
        let key = ClassificationKey::from_prefix("013").unwrap();
        assert_eq!(
            chinese.placement(&key),
            Some(&Placement::new("速查与规范", "核心概念与速查", None))
        );
        assert_eq!(english.placement(&ClassificationKey::from_prefix("099").unwrap()), None);
    }

    #[test]
    fn test_placement_display() {
        assert_eq!(
            Placement::new("Tab", "Group", None).to_string(),
            "Tab='Tab', Group='Group', Nested='[none]'"
        );
    }
}
