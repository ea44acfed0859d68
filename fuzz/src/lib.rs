use arbitrary::Arbitrary;
use docs_helpers::navigation::DocsConfig;

/// A page file with an arbitrary prefix and title.
#[derive(Arbitrary, Debug)]
pub struct PageFile {
    pub prefix: u16,
    pub title: String,
}

impl PageFile {
    pub fn filename(&self, locale: &str) -> String {
        format!("{:04}-{}.{locale}.mdx", self.prefix % 10000, self.title)
    }
}

/// Generate file names for the given language.
pub fn create_filenames(files: &[PageFile], locale: &str) -> Vec<String> {
    files.iter().map(|file| file.filename(locale)).collect()
}

/// A configuration with an empty navigation for `locale`.
pub fn create_config(locale: &str) -> DocsConfig {
    let text = serde_json::json!({
        "navigation": {"languages": [{"language": locale, "tabs": []}]}
    })
    .to_string();
    DocsConfig::from_json(&text).expect("valid configuration")
}
