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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter is not a mapping")]
    NotAMapping,
}

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("'navigation.languages' not found")]
    LanguagesMissing,
    #[error("language '{0}' not found in navigation")]
    LocaleNotFound(String),
    #[error("navigation entry without a 'language' code")]
    LanguageCodeMissing,
    #[error("object is neither a named group nor has a 'pages' list")]
    NotAGroup,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
