//! Argument vectors for the external tools.
//!
//! Only the command-line contract lives here; running is left to a
//! [`Runner`](crate::core::runner::Runner).

use std::path::Path;

use serde::Deserialize;

use crate::core::constants;
use crate::core::runner::Invocation;
use crate::core::types::Credentials;

/// Binary names (or paths) for each external tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub sops: String,
    pub helm: String,
    pub kubectl: String,
    pub tofu: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            sops: "sops".to_string(),
            helm: "helm".to_string(),
            kubectl: "kubectl".to_string(),
            tofu: "tofu".to_string(),
        }
    }
}

impl Tools {
    /// `sops --decrypt --output <dest> <source>`
    pub fn decrypt(&self, source: &Path, dest: &Path) -> Invocation {
        Invocation::new(&self.sops)
            .args(["--decrypt", "--output"])
            .arg(dest)
            .arg(source)
    }

    /// `helm dependency update <chart>`
    pub fn dependency_update(&self, chart: &Path, creds: &Credentials) -> Invocation {
        self.helm(creds).args(["dependency", "update"]).arg(chart)
    }

    /// `helm upgrade --install <release> <chart> --namespace <release> --create-namespace --values ...`
    ///
    /// Namespace and release always share a name.
    pub fn upgrade_install(
        &self,
        release: &str,
        chart: &Path,
        overlays: &[impl AsRef<Path>],
        creds: &Credentials,
    ) -> Invocation {
        let mut inv = self
            .helm(creds)
            .args(["upgrade", "--install", release])
            .arg(chart)
            .args(["--namespace", release, "--create-namespace"]);
        for overlay in overlays {
            inv = inv.arg("--values").arg(overlay.as_ref());
        }
        inv
    }

    /// `helm show crds <chart>`
    pub fn show_crds(&self, chart: &Path, creds: &Credentials) -> Invocation {
        self.helm(creds).args(["show", "crds"]).arg(chart)
    }

    /// `kubectl apply --server-side --force-conflicts -f <manifest>`
    pub fn apply_server_side(&self, manifest: &Path, creds: &Credentials) -> Invocation {
        Invocation::new(&self.kubectl)
            .env(constants::KUBECONFIG_ENV, creds.kubeconfig())
            .args(["apply", "--server-side", "--force-conflicts", "-f"])
            .arg(manifest)
    }

    /// `tofu <args...>` inside a provisioning workspace.
    pub fn provision<S: AsRef<std::ffi::OsStr>>(&self, workspace: &Path, args: &[S]) -> Invocation {
        Invocation::new(&self.tofu)
            .args(args)
            .current_dir(workspace)
    }

    fn helm(&self, creds: &Credentials) -> Invocation {
        Invocation::new(&self.helm).env(constants::KUBECONFIG_ENV, creds.kubeconfig())
    }
}
