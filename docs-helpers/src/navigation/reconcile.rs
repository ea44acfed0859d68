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

//! Tree transformations used when synchronizing a language.
//!
//! All functions take the language subtree by value and return the
//! updated subtree.

use std::collections::BTreeSet;

use super::classify::Placement;
use super::{Group, LanguageNav, Node, Tab, TabEntry};

/// Collect every page path below the groups of `language`, including
/// pages in nested groups.
pub fn existing_pages(language: &LanguageNav) -> BTreeSet<String> {
    let mut pages = BTreeSet::new();
    let tabs = language.tabs.iter().flatten().filter_map(TabEntry::as_tab);
    for tab in tabs {
        for node in tab.groups.iter().flatten() {
            if let Node::Group(group) = node {
                collect_pages(&group.pages, &mut pages);
            }
        }
    }
    pages
}

fn collect_pages(nodes: &[Node], pages: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Page(path) => {
                pages.insert(path.clone());
            }
            Node::Group(group) => collect_pages(&group.pages, pages),
            Node::Unknown(_) => {}
        }
    }
}

/// Groups which lost their last page during [`remove_pages`].
#[derive(Debug, Default, Eq, PartialEq)]
pub struct EmptiedGroups {
    /// Kept in the tree with an empty page list.
    pub retained: Vec<String>,
    /// Dropped from the tree.
    pub pruned: Vec<String>,
}

/// Remove every page in `removed` from `language`, wherever it is.
///
/// Groups left without pages are kept unless `prune_empty_groups` is
/// set. Groups which were already empty are never pruned.
pub fn remove_pages(
    mut language: LanguageNav,
    removed: &BTreeSet<String>,
    prune_empty_groups: bool,
) -> (LanguageNav, EmptiedGroups) {
    let mut emptied = EmptiedGroups::default();
    for entry in language.tabs.iter_mut().flatten() {
        let TabEntry::Tab(tab) = entry else {
            continue;
        };
        if let Some(groups) = tab.groups.take() {
            tab.groups = Some(
                groups
                    .into_iter()
                    .filter_map(|node| match node {
                        Node::Group(group) => {
                            remove_from_group(group, removed, prune_empty_groups, &mut emptied)
                                .map(Node::Group)
                        }
                        node => Some(node),
                    })
                    .collect(),
            );
        }
    }
    (language, emptied)
}

fn remove_from_group(
    mut group: Group,
    removed: &BTreeSet<String>,
    prune_empty_groups: bool,
    emptied: &mut EmptiedGroups,
) -> Option<Group> {
    let was_empty = group.pages.is_empty();
    group.pages = group
        .pages
        .into_iter()
        .filter_map(|node| match node {
            Node::Page(path) if removed.contains(&path) => None,
            Node::Group(nested) => {
                remove_from_group(nested, removed, prune_empty_groups, emptied).map(Node::Group)
            }
            node => Some(node),
        })
        .collect();

    if was_empty || !group.pages.is_empty() {
        return Some(group);
    }
    if prune_empty_groups {
        emptied.pruned.push(group.label().to_string());
        None
    } else {
        emptied.retained.push(group.label().to_string());
        Some(group)
    }
}

/// Append `pages` to the list at `placement`, creating the tab, group
/// and nested group as needed.
///
/// Pages already in that list are skipped. Returns the pages which
/// were appended.
pub fn insert_pages(
    mut language: LanguageNav,
    placement: &Placement,
    pages: &[String],
) -> (LanguageNav, Vec<String>) {
    let target = pages_at(&mut language, placement);
    let mut appended = Vec::new();
    for page in pages {
        let node = Node::Page(page.clone());
        if !target.contains(&node) {
            target.push(node);
            appended.push(page.clone());
        }
    }
    (language, appended)
}

fn pages_at<'a>(language: &'a mut LanguageNav, placement: &Placement) -> &'a mut Vec<Node> {
    let tab_name = Some(placement.tab.as_str());
    let tabs = language.tabs.get_or_insert_with(Vec::new);
    let tab = find_or_push(
        tabs,
        |entry| matches!(entry, TabEntry::Tab(tab) if tab.tab.as_deref() == tab_name),
        || TabEntry::Tab(Tab::new(&placement.tab)),
    );
    let TabEntry::Tab(tab) = tab else {
        unreachable!("entry matched as a tab");
    };

    let groups = tab.groups.get_or_insert_with(Vec::new);
    let group = group_named(groups, &placement.group);
    match &placement.nested_group {
        Some(name) => &mut group_named(&mut group.pages, name).pages,
        None => &mut group.pages,
    }
}

/// The first group called `name` in `nodes`, appended if missing.
fn group_named<'a>(nodes: &'a mut Vec<Node>, name: &str) -> &'a mut Group {
    let node = find_or_push(
        nodes,
        |node| matches!(node, Node::Group(group) if group.group.as_deref() == Some(name)),
        || Node::Group(Group::new(name)),
    );
    match node {
        Node::Group(group) => group,
        _ => unreachable!("node matched as a group"),
    }
}

fn find_or_push<T>(
    items: &mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    create: impl FnOnce() -> T,
) -> &mut T {
    let index = match items.iter().position(matches) {
        Some(index) => index,
        None => {
            items.push(create());
            items.len() - 1
        }
    };
    &mut items[index]
}
