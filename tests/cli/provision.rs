//! Tests for `hubops tf` and `hubops tf-run`.

use crate::support::*;

#[test]
fn test_tf_applies() {
    let t = Test::repo();

    assert_success(&t.tf(&[]));
    assert_eq!(t.calls(), vec!["tofu apply KUBECONFIG="]);
}

#[test]
fn test_tf_passes_extra_args() {
    let t = Test::repo();

    assert_success(&t.tf(&["-auto-approve", "-var", "nodes=3"]));
    assert_eq!(
        t.calls(),
        vec!["tofu apply -auto-approve -var nodes=3 KUBECONFIG="]
    );
}

#[test]
fn test_tf_run_passes_through() {
    let t = Test::repo();

    assert_success(&t.tf_run(&["plan", "-out", "plan.bin"]));
    assert_eq!(t.calls(), vec!["tofu plan -out plan.bin KUBECONFIG="]);
}

#[test]
fn test_tf_run_requires_a_command() {
    let t = Test::repo();

    let output = t.tf_run(&[]);
    assert_failure(&output);
    assert!(t.calls().is_empty());
}

#[test]
fn test_tf_without_workspace_fails() {
    let t = Test::new();

    let output = t.tf(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "tf/clusters/demo");
    assert!(t.calls().is_empty());
}

#[test]
fn test_tf_selects_cluster_from_env() {
    let t = Test::repo();
    t.write("tf/clusters/prod/main.tf", "terraform {}\n");

    let output = t
        .cmd()
        .env("CLUSTER_NAME", "prod")
        .args(["tf-run", "init"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.calls(), vec!["tofu init KUBECONFIG="]);
}

#[test]
fn test_tofu_failure_passes_exit_code() {
    let t = Test::repo();
    t.fail_tool("tofu", 3);

    let output = t.tf(&[]);
    assert_eq!(output.status.code(), Some(3));
    assert_stderr_contains(&output, "tofu exited with status 3");
}
