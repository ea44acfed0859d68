#![no_main]

use docs_helpers::frontmatter::{rename_key, Document, KeyRename};
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|text: String| {
    let Ok(mut document) = Document::parse(&text) else {
        return; // Invalid YAML is reported, not fixed.
    };
    let Some(front_matter) = document.front_matter.as_mut() else {
        return;
    };
    rename_key(front_matter, "summary", "description");
    let rendered = document.render().expect("Failed to render front matter");

    // A second pass must not find anything to rename.
    let mut reparsed = Document::parse(&rendered).expect("Failed to parse rendered page");
    let front_matter = reparsed
        .front_matter
        .as_mut()
        .expect("Rendered page has front matter");
    assert_eq!(
        rename_key(front_matter, "summary", "description"),
        KeyRename::Absent
    );
});
