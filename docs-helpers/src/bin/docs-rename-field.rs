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

//! Rename `summary` to `description` in the front matter of pages.
//!
//! All `.mdx` files below the target directory are processed. Files
//! without a `summary` key are left untouched. If a page has both
//! keys, the `description` is kept and the `summary` is dropped.

use std::path::PathBuf;

use clap::Parser;
use docs_helpers::frontmatter::{rename_field_in_tree, FieldRename};

#[derive(Parser)]
#[command(about = "Rename `summary` to `description` in page front matter")]
struct Args {
    /// Directory with the pages to process.
    #[arg(default_value = "plugin_dev_en")]
    target_dir: PathBuf,
}

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    docs_helpers::init_logging();
    let args = Args::parse();

    let rename = FieldRename::default();
    let stats = rename_field_in_tree(&args.target_dir, &rename)?;

    println!();
    println!(
        "--- Processing Complete ('{}' -> '{}') ---",
        rename.legacy_key, rename.replacement_key
    );
    println!("{stats}");
    Ok(())
}
