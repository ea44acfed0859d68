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

//! Synchronizing the navigation in `docs.json` with the pages on disk.
//!
//! This file contains main logic used by the binaries `docs-sync-nav-en`
//! and `docs-sync-nav-zh`. A run looks like this:
//!
//! 1. find the `navigation.languages` entry for the language,
//! 2. collect the page paths it already lists,
//! 3. list the page files in the language directory,
//! 4. remove the pages which no longer exist,
//! 5. add the new pages where their [`ClassificationKey`] says,
//! 6. write `docs.json` back.
//!
//! Pages which exist both on disk and in the navigation are never
//! moved, so manual edits to the navigation survive.

pub mod classify;
pub mod reconcile;

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub use classify::{ClassificationKey, NavLayout, Placement};
use reconcile::{existing_pages, insert_pages, remove_pages};

use crate::error::NavigationError;
use crate::files_in_dir;

/// Name of the site configuration file in the project root.
pub const DOCS_CONFIG_FILE: &str = "docs.json";

/// The keys of a navigation object, in file order.
type Fields = Map<String, Value>;

/// One `navigation.languages` entry.
///
/// The navigation objects keep every key they were read with, in
/// order. Writing them back only replaces the name and the child list,
/// in place, so keys which are not modelled here keep their position.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "Fields")]
pub struct LanguageNav {
    pub language: String,
    /// `None` if the entry has no `tabs` list.
    pub tabs: Option<Vec<TabEntry>>,
    fields: Fields,
}

impl TryFrom<Fields> for LanguageNav {
    type Error = NavigationError;

    fn try_from(mut fields: Fields) -> Result<Self, Self::Error> {
        let language = fields
            .get("language")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or(NavigationError::LanguageCodeMissing)?;
        let tabs = take_list(&mut fields, "tabs")?;
        Ok(Self {
            language,
            tabs,
            fields,
        })
    }
}

impl Serialize for LanguageNav {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_object(
            serializer,
            &self.fields,
            ("language", Some(&self.language)),
            ("tabs", self.tabs.as_deref()),
        )
    }
}

/// An entry in the `tabs` list of a language.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TabEntry {
    Tab(Tab),
    /// Anything but an object, kept as is.
    Unknown(Value),
}

impl TabEntry {
    pub fn as_tab(&self) -> Option<&Tab> {
        match self {
            TabEntry::Tab(tab) => Some(tab),
            TabEntry::Unknown(_) => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "Fields")]
pub struct Tab {
    /// `None` if the tab has no name.
    pub tab: Option<String>,
    /// `None` if the tab has no `groups` list.
    pub groups: Option<Vec<Node>>,
    fields: Fields,
}

impl Tab {
    pub fn new(name: &str) -> Self {
        Self {
            tab: Some(name.to_string()),
            groups: Some(Vec::new()),
            fields: Fields::new(),
        }
    }
}

impl TryFrom<Fields> for Tab {
    type Error = NavigationError;

    fn try_from(mut fields: Fields) -> Result<Self, Self::Error> {
        let tab = fields.get("tab").and_then(Value::as_str).map(String::from);
        let groups = take_list(&mut fields, "groups")?;
        Ok(Self { tab, groups, fields })
    }
}

impl Serialize for Tab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_object(
            serializer,
            &self.fields,
            ("tab", self.tab.as_ref()),
            ("groups", self.groups.as_deref()),
        )
    }
}

/// A group of pages: an object with a `group` key or a `pages` list.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "Fields")]
pub struct Group {
    /// `None` if the group has no name.
    pub group: Option<String>,
    pub pages: Vec<Node>,
    fields: Fields,
}

impl Group {
    pub fn new(name: &str) -> Self {
        let mut fields = Fields::new();
        fields.insert(String::from("group"), Value::Null);
        fields.insert(String::from("pages"), Value::Array(Vec::new()));
        Self {
            group: Some(name.to_string()),
            pages: Vec::new(),
            fields,
        }
    }

    /// The name used in log messages and reports.
    pub fn label(&self) -> &str {
        self.group.as_deref().unwrap_or("[unnamed]")
    }
}

impl TryFrom<Fields> for Group {
    type Error = NavigationError;

    fn try_from(mut fields: Fields) -> Result<Self, Self::Error> {
        let pages = take_list(&mut fields, "pages")?;
        if pages.is_none() && !fields.contains_key("group") {
            return Err(NavigationError::NotAGroup);
        }
        Ok(Self {
            group: fields.get("group").and_then(Value::as_str).map(String::from),
            pages: pages.unwrap_or_default(),
            fields,
        })
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A `pages` value which is not a list is only replaced once
        // pages were added.
        let had_list = self.fields.get("pages").is_some_and(Value::is_array);
        let pages = (had_list || !self.pages.is_empty()).then_some(self.pages.as_slice());
        serialize_object(
            serializer,
            &self.fields,
            ("group", self.group.as_ref()),
            ("pages", pages),
        )
    }
}

/// An entry in the `pages` list of a group.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A page path such as `plugin_dev_en/0111-Overview.en`.
    Page(String),
    Group(Group),
    /// Anything else, kept as is.
    Unknown(Value),
}

/// Decode the list at `key`, leaving an empty list behind to mark its
/// position. Returns `None` if `key` does not hold a list.
fn take_list<T: DeserializeOwned>(
    fields: &mut Fields,
    key: &str,
) -> Result<Option<Vec<T>>, serde_json::Error> {
    match fields.get_mut(key) {
        Some(Value::Array(items)) => {
            let items = std::mem::take(items);
            serde_json::from_value(Value::Array(items)).map(Some)
        }
        _ => Ok(None),
    }
}

/// Write `fields` in order, with the name and the list substituted at
/// their keys. A name or list the object did not have goes at the end.
fn serialize_object<S, T>(
    serializer: S,
    fields: &Fields,
    (name_key, name): (&str, Option<&String>),
    (list_key, list): (&str, Option<&[T]>),
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(None)?;
    for (key, value) in fields {
        match (name, list) {
            (Some(name), _) if key.as_str() == name_key => map.serialize_entry(key, name)?,
            (_, Some(list)) if key.as_str() == list_key => map.serialize_entry(key, list)?,
            _ => map.serialize_entry(key, value)?,
        }
    }
    if let Some(name) = name.filter(|_| !fields.contains_key(name_key)) {
        map.serialize_entry(name_key, name)?;
    }
    if let Some(list) = list.filter(|_| !fields.contains_key(list_key)) {
        map.serialize_entry(list_key, list)?;
    }
    map.end()
}

/// The whole `docs.json` document.
///
/// Only the language being synchronized is decoded into the typed
/// tree; the rest of the document is kept as JSON so that key order
/// and unknown settings survive a rewrite.
#[derive(Clone, Debug, PartialEq)]
pub struct DocsConfig {
    document: Map<String, Value>,
}

impl DocsConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let document = serde_json::from_str(text).context("Invalid JSON in site configuration")?;
        Ok(Self { document })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Could not parse {}", path.display()))
    }

    /// Serialize with four space indentation and a final newline.
    pub fn to_json(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.document.serialize(&mut serializer)?;
        let mut text = String::from_utf8(buffer)?;
        text.push('\n');
        Ok(text)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = self.to_json()?;
        fs::write(path, text).with_context(|| format!("Could not write {}", path.display()))
    }

    fn languages(&self) -> Result<&Vec<Value>, NavigationError> {
        self.document
            .get("navigation")
            .and_then(|navigation| navigation.get("languages"))
            .and_then(Value::as_array)
            .ok_or(NavigationError::LanguagesMissing)
    }

    fn languages_mut(&mut self) -> Result<&mut Vec<Value>, NavigationError> {
        self.document
            .get_mut("navigation")
            .and_then(|navigation| navigation.get_mut("languages"))
            .and_then(Value::as_array_mut)
            .ok_or(NavigationError::LanguagesMissing)
    }

    fn language_index(&self, code: &str) -> Result<usize, NavigationError> {
        self.languages()?
            .iter()
            .position(|entry| entry.get("language").and_then(Value::as_str) == Some(code))
            .ok_or_else(|| NavigationError::LocaleNotFound(code.to_string()))
    }

    /// Decode the navigation of the language `code`.
    pub fn language(&self, code: &str) -> anyhow::Result<LanguageNav> {
        let index = self.language_index(code)?;
        let entry = self.languages()?[index].clone();
        serde_json::from_value(entry)
            .with_context(|| format!("Malformed navigation for language '{code}'"))
    }

    /// Replace the existing entry for `language.language`.
    pub fn set_language(&mut self, language: &LanguageNav) -> anyhow::Result<()> {
        let index = self.language_index(&language.language)?;
        let value = serde_json::to_value(language)?;
        self.languages_mut()?[index] = value;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SyncOptions {
    /// Drop groups which lose their last page instead of keeping them
    /// with an empty page list.
    pub prune_empty_groups: bool,
}

/// What a synchronization run did.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncReport {
    pub locale: String,
    /// Number of pages listed in the navigation before the run.
    pub existing_count: usize,
    /// Number of page files found on disk.
    pub on_disk_count: usize,
    /// Pages added, by where they were added.
    pub added: Vec<(Placement, Vec<String>)>,
    pub removed: Vec<String>,
    /// Files without an entry in the classification table.
    pub unmapped: Vec<String>,
    pub retained_empty_groups: Vec<String>,
    pub pruned_groups: Vec<String>,
}

impl SyncReport {
    pub fn added_count(&self) -> usize {
        self.added.iter().map(|(_, pages)| pages.len()).sum()
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Language: {}", self.locale)?;
        writeln!(f, "Pages in navigation before sync: {}", self.existing_count)?;
        writeln!(f, "Page files on disk: {}", self.on_disk_count)?;
        writeln!(f, "Added: {}", self.added_count())?;
        for (placement, pages) in &self.added {
            writeln!(f, "  {placement}: {} pages", pages.len())?;
            for page in pages {
                writeln!(f, "    + {page}")?;
            }
        }
        writeln!(f, "Removed: {}", self.removed.len())?;
        for page in &self.removed {
            writeln!(f, "    - {page}")?;
        }
        writeln!(f, "Skipped (unmapped prefix): {}", self.unmapped.len())?;
        for filename in &self.unmapped {
            writeln!(f, "    ? {filename}")?;
        }
        if !self.retained_empty_groups.is_empty() {
            writeln!(
                f,
                "Empty groups kept: {}",
                self.retained_empty_groups.join(", ")
            )?;
        }
        if !self.pruned_groups.is_empty() {
            writeln!(f, "Empty groups removed: {}", self.pruned_groups.join(", "))?;
        }
        Ok(())
    }
}

/// List the page files of `layout` in `directory`.
///
/// Returns the file names, sorted.
pub fn scan_docs_dir(directory: &Path, layout: &NavLayout) -> anyhow::Result<Vec<String>> {
    anyhow::ensure!(
        directory.is_dir(),
        "Directory '{}' does not exist",
        directory.display()
    );
    let files = files_in_dir(directory, |name| layout.classify(name).is_some())?;
    Ok(files
        .iter()
        .filter_map(|path| path.file_name()?.to_str().map(String::from))
        .collect())
}

/// Synchronize one language subtree with the page files `filenames`.
pub fn reconcile_language(
    language: LanguageNav,
    layout: &NavLayout,
    filenames: &[String],
    options: &SyncOptions,
) -> (LanguageNav, SyncReport) {
    let existing = existing_pages(&language);
    let on_disk = filenames
        .iter()
        .map(|filename| layout.page_path(filename))
        .collect::<BTreeSet<_>>();

    let mut report = SyncReport {
        locale: layout.locale.clone(),
        existing_count: existing.len(),
        on_disk_count: on_disk.len(),
        ..SyncReport::default()
    };
    info!(
        "Found {} existing '{}' pages and {} page files",
        existing.len(),
        layout.locale,
        on_disk.len()
    );

    let removed = existing.difference(&on_disk).cloned().collect::<BTreeSet<_>>();
    let (mut language, emptied) = remove_pages(language, &removed, options.prune_empty_groups);
    for name in &emptied.retained {
        info!("Group '{name}' is empty after cleanup, keeping it");
    }
    report.removed = removed.into_iter().collect();
    report.retained_empty_groups = emptied.retained;
    report.pruned_groups = emptied.pruned;

    let mut new_files = filenames
        .iter()
        .filter(|filename| !existing.contains(&layout.page_path(filename)))
        .collect::<Vec<_>>();
    new_files.sort();
    new_files.dedup();

    let mut additions: Vec<(Placement, Vec<String>)> = Vec::new();
    for filename in new_files {
        let Some(key) = layout.classify(filename) else {
            continue;
        };
        let Some(placement) = layout.placement(&key) else {
            warn!("No placement for prefix {key} of '{filename}', not adding it");
            report.unmapped.push(filename.clone());
            continue;
        };
        let page = layout.page_path(filename);
        match additions.iter_mut().find(|(known, _)| known == placement) {
            Some((_, pages)) => pages.push(page),
            None => additions.push((placement.clone(), vec![page])),
        }
    }

    for (placement, pages) in additions {
        info!("Adding {} pages to {placement}", pages.len());
        let (updated, appended) = insert_pages(language, &placement, &pages);
        language = updated;
        if !appended.is_empty() {
            report.added.push((placement, appended));
        }
    }

    (language, report)
}

/// Synchronize the language of `layout` in a whole configuration.
pub fn reconcile(
    mut config: DocsConfig,
    layout: &NavLayout,
    filenames: &[String],
    options: &SyncOptions,
) -> anyhow::Result<(DocsConfig, SyncReport)> {
    let language = config.language(&layout.locale)?;
    let (language, report) = reconcile_language(language, layout, filenames, options);
    config.set_language(&language)?;
    Ok((config, report))
}

/// Synchronize `docs.json` in the project directory `root`.
///
/// Nothing is written if the configuration cannot be parsed, if it
/// has no entry for the language, or if the page directory is missing.
pub fn sync_navigation(
    root: &Path,
    layout: &NavLayout,
    options: &SyncOptions,
) -> anyhow::Result<SyncReport> {
    let config_path = root.join(DOCS_CONFIG_FILE);
    let mut config = DocsConfig::load(&config_path)?;
    let language = config.language(&layout.locale)?;

    let filenames = scan_docs_dir(&root.join(&layout.docs_dir), layout)?;
    let (language, report) = reconcile_language(language, layout, &filenames, options);

    config.set_language(&language)?;
    config.save(&config_path)?;
    info!("Updated {}", config_path.display());
    Ok(report)
}
