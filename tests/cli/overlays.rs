//! Tests for `hubops overlays`.

use crate::support::*;

#[test]
fn test_hub_overlays_in_precedence_order() {
    let t = Test::repo();

    assert_eq!(
        t.overlays_json("hub"),
        vec![
            "./hubs/_common/common.values.yaml",
            "./hubs/demo/hub.values.yaml",
            "./hubs/demo/nested/extra.yaml",
        ]
    );
    assert!(t.calls().is_empty());
}

#[test]
fn test_overlays_never_include_encrypted_files() {
    let t = Test::repo();
    t.write("hubs/demo/deep/x.enc.yaml", "x: 1\n");

    for target in ["support", "hub"] {
        assert!(t.overlays_json(target).iter().all(|p| !p.contains(".enc.")));
    }
}

#[test]
fn test_decrypted_files_are_collected_and_flagged() {
    let t = Test::repo();
    assert_success(&t.decrypt());

    assert_eq!(
        t.overlays_json("support"),
        vec![
            "./clusters/demo/kubeconfig.dec.yaml",
            "./clusters/demo/support.values.yaml",
        ]
    );

    let output = t.hubops(&["overlays", "support"]);
    assert_success(&output);
    assert_stdout_contains(&output, "support overlays (2 files)");
    assert_stderr_contains(
        &output,
        "decrypted secret passed as values: ./clusters/demo/kubeconfig.dec.yaml",
    );
}

#[test]
fn test_overlays_for_missing_hub_are_empty() {
    let t = Test::new();

    let output = t.hubops(&["overlays", "hub"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no overlays");
}
