//! Tests for `hubops deploy-support`, `deploy-support-crds` and `deploy-hub`.

use std::path::PathBuf;

use crate::support::*;

fn kubeconfig_suffix() -> String {
    format!("KUBECONFIG={}", KUBECONFIG)
}

#[test]
fn test_deploy_support_sequence() {
    let t = Test::repo();

    let output = t.deploy_support();
    assert_success(&output);
    assert_stdout_contains(&output, "deployed support release support");

    let calls = t.calls();
    assert_eq!(calls.len(), 3, "{:#?}", calls);
    assert!(calls[0].starts_with("sops --decrypt"));
    assert_eq!(
        calls[1],
        format!(
            "helm dependency update ./charts/support {}",
            kubeconfig_suffix()
        )
    );
    assert_eq!(
        calls[2],
        format!(
            "helm upgrade --install support ./charts/support --namespace support --create-namespace \
             --values ./clusters/demo/kubeconfig.dec.yaml \
             --values ./clusters/demo/support.values.yaml {}",
            kubeconfig_suffix()
        )
    );
}

#[test]
fn test_deploy_hub_layers_common_then_hub() {
    let t = Test::repo();
    assert_success(&t.decrypt());

    let output = t.deploy_hub();
    assert_success(&output);
    assert_stdout_contains(&output, "deployed hub release demo");

    let upgrade = t.calls_to("helm").pop().unwrap();
    assert_eq!(
        upgrade,
        format!(
            "helm upgrade --install demo ./charts/hub --namespace demo --create-namespace \
             --values ./hubs/_common/auth.dec.yaml \
             --values ./hubs/_common/common.values.yaml \
             --values ./hubs/demo/hub.values.yaml \
             --values ./hubs/demo/nested/extra.yaml {}",
            kubeconfig_suffix()
        )
    );
    assert!(!upgrade.contains(".enc."));
}

#[test]
fn test_deploy_hub_selected_by_env() {
    let t = Test::repo();
    t.write("hubs/acme/values.yaml", "team: acme\n");
    assert_success(&t.decrypt());

    let output = t
        .cmd()
        .env("HUB_NAME", "acme")
        .arg("deploy-hub")
        .output()
        .unwrap();
    assert_success(&output);

    let upgrade = t.calls_to("helm").pop().unwrap();
    assert!(upgrade.contains("upgrade --install acme ./charts/hub --namespace acme"));
    assert!(upgrade.contains("./hubs/acme/values.yaml"));
    assert!(!upgrade.contains("./hubs/demo/"));
}

#[test]
fn test_deploy_hub_without_common_fails_before_any_tool() {
    let t = Test::repo();
    t.remove_dir("hubs/_common");

    let output = t.deploy_hub();
    assert_failure(&output);
    assert_stderr_contains(&output, "required directory not found");
    assert_stderr_contains(&output, "_common");
    assert!(t.calls().is_empty());
}

#[test]
fn test_deploy_hub_without_credentials_fails_before_helm() {
    let t = Test::repo();
    t.remove_dir("clusters/demo");

    let output = t.deploy_hub();
    assert_failure(&output);
    assert_stderr_contains(&output, "cluster credentials not found");
    assert_stderr_contains(&output, "run: hubops decrypt");
    assert_not_called(&t.calls(), "helm");
}

#[test]
fn test_deploy_support_without_cluster_dir_fails_before_any_tool() {
    let t = Test::repo();

    let output = t.hubops(&["--cluster", "missing", "deploy-support"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "clusters/missing");
    assert!(t.calls().is_empty());
}

#[test]
fn test_deploy_support_with_crds() {
    let t = Test::repo();

    let output = t.deploy_support_with_crds();
    assert_success(&output);

    let calls = t.calls();
    let tools: Vec<&str> = calls
        .iter()
        .map(|c| c.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(tools, vec!["sops", "helm", "helm", "kubectl", "helm"]);
    assert!(calls[2].starts_with("helm show crds ./charts/support"));
    assert!(calls[3].starts_with("kubectl apply --server-side --force-conflicts -f "));
    assert!(calls[3].ends_with(&kubeconfig_suffix()));
    assert!(calls[4].starts_with("helm upgrade --install support"));
}

#[test]
fn test_deploy_support_crds_removes_staging_file() {
    let t = Test::repo();

    let output = t.deploy_support_crds();
    assert_success(&output);
    assert_stdout_contains(&output, "applied support CRDs");

    let apply = t.calls_to("kubectl").pop().unwrap();
    let staged = apply
        .split_whitespace()
        .skip_while(|a| *a != "-f")
        .nth(1)
        .map(PathBuf::from)
        .unwrap();
    assert!(staged.is_absolute());
    assert!(!staged.exists());
    assert_not_called(&t.calls(), "helm upgrade");
}

#[test]
fn test_deploy_support_crds_failure_removes_staging_file() {
    let t = Test::repo();
    t.fail_tool("kubectl", 1);

    let output = t.deploy_support_crds();
    assert_failure(&output);
    assert_stderr_contains(&output, "kubectl exited with status 1");

    let apply = t.calls_to("kubectl").pop().unwrap();
    let staged = apply
        .split_whitespace()
        .skip_while(|a| *a != "-f")
        .nth(1)
        .map(PathBuf::from)
        .unwrap();
    assert!(!staged.exists());
}

#[test]
fn test_helm_failure_halts_and_passes_exit_code() {
    let t = Test::repo();
    t.fail_tool("helm", 5);

    let output = t.deploy_support_with_crds();
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(t.calls_to("helm").len(), 1);
    assert_not_called(&t.calls(), "kubectl");
}

#[test]
fn test_dry_run_prints_without_running() {
    let t = Test::repo();
    t.write("clusters/demo/kubeconfig.dec.yaml", "apiVersion: v1\n");

    let output = t.hubops(&["--dry-run", "deploy-hub"]);
    assert_success(&output);
    assert_stdout_contains(&output, "sops --decrypt --output ./hubs/_common/auth.dec.yaml");
    assert_stdout_contains(&output, "helm upgrade --install demo ./charts/hub");
    assert!(t.calls().is_empty());
}

#[test]
fn test_invalid_hub_name_rejected() {
    let t = Test::repo();

    let output = t.hubops(&["--hub", "../escape", "deploy-hub"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid hub name");
    assert!(t.calls().is_empty());
}
