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

//! Synchronize the English navigation in `docs.json` with the pages
//! in `plugin_dev_en/`.
//!
//! Pages which were deleted are removed from the navigation, new pages
//! are added to the group selected by their numeric prefix.
//!
//! After a large restructuring, empty the `tabs` list of the
//! `"en"` entry in `docs.json` and run this again to rebuild the
//! navigation from scratch.

use std::path::PathBuf;

use clap::Parser;
use docs_helpers::navigation::{sync_navigation, NavLayout, SyncOptions};

#[derive(Parser)]
#[command(about = "Synchronize the English navigation in docs.json with the pages on disk")]
struct Args {
    /// Project directory containing `docs.json` and `plugin_dev_en/`.
    #[arg(default_value = ".")]
    root: PathBuf,
    /// Remove groups which lose their last page instead of keeping them.
    #[arg(long)]
    prune_empty_groups: bool,
}

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    docs_helpers::init_logging();
    let args = Args::parse();

    let options = SyncOptions {
        prune_empty_groups: args.prune_empty_groups,
    };
    let report = sync_navigation(&args.root, &NavLayout::english(), &options)?;
    print!("{report}");
    Ok(())
}
