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

//! Make links into a language directory point at the localized pages.
//!
//! For the default directory `plugin_dev_zh`, a link like
//! `[text](/plugin_dev_zh/foo/bar.mdx)` becomes
//! `[text](/plugin_dev_zh/foo/bar.zh.mdx)`. The language is taken from
//! the part of the directory name after the last `_`.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use docs_helpers::links::LocaleLinks;

const PAGE_SUFFIX: &str = ".mdx";

#[derive(Parser)]
#[command(about = "Add the language marker to links into a language directory")]
struct Args {
    /// Language directory, named `<name>_<language>`.
    #[arg(default_value = "plugin_dev_zh")]
    folder: PathBuf,
}

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    docs_helpers::init_logging();
    let args = Args::parse();

    let locale_dir = args
        .folder
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid folder name: {}", args.folder.display()))?;
    let links = LocaleLinks::for_directory(locale_dir, PAGE_SUFFIX).ok_or_else(|| {
        anyhow!("Folder name '{locale_dir}' does not end with a language, like 'plugin_dev_zh'")
    })?;

    let stats = links.rewrite_links_in_dir(&args.folder)?;
    println!("Finished processing all {PAGE_SUFFIX} files.");
    println!("{stats}");
    Ok(())
}
