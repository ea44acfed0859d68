#![no_main]

use docs_helpers::navigation::{reconcile, NavLayout, SyncOptions};
use docs_helpers_fuzz::{create_config, create_filenames, PageFile};
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|inputs: (Vec<PageFile>, Vec<PageFile>, bool)| {
    let (first_files, second_files, prune_empty_groups) = inputs;
    let layout = NavLayout::english();
    let options = SyncOptions { prune_empty_groups };

    let first = create_filenames(&first_files, &layout.locale);
    let second = create_filenames(&second_files, &layout.locale);

    let (config, _) = reconcile(create_config(&layout.locale), &layout, &first, &options)
        .expect("Reconciling an empty navigation should succeed");
    let (config, _) =
        reconcile(config, &layout, &second, &options).expect("Second reconciliation failed");

    // Running again without changes on disk must not change anything.
    let (again, report) =
        reconcile(config.clone(), &layout, &second, &options).expect("Third reconciliation failed");
    assert_eq!(
        again.to_json().expect("Failed to serialize"),
        config.to_json().expect("Failed to serialize")
    );
    assert!(report.added.is_empty());
    assert!(report.removed.is_empty());
});
