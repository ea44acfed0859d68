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

//! Rename `.md` pages to `.mdx`.

use std::path::PathBuf;

use clap::Parser;
use docs_helpers::rename::rename_extensions;

#[derive(Parser)]
#[command(about = "Rename `.md` files to `.mdx`")]
struct Args {
    /// Directory with the files to rename.
    #[arg(default_value = "plugin_dev_zh")]
    folder: PathBuf,
}

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    docs_helpers::init_logging();
    let args = Args::parse();

    let stats = rename_extensions(&args.folder, ".md", ".mdx")?;
    println!("{stats}");
    Ok(())
}
