#![no_main]

use docs_helpers::links::LocaleLinks;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|text: String| {
    let links = LocaleLinks::new("plugin_dev_zh", "zh", ".mdx");
    let once = links.rewrite(&text);
    let twice = links.rewrite(&once.content);
    assert_eq!(twice.content, once.content);
    assert!(twice.changes.is_empty());
});
