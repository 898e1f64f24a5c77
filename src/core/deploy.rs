//! Deployment orchestration.
//!
//! A deployment walks a fixed sequence per target and stops at the first
//! failure. Nothing is rolled back; re-running redoes every step.
//!
//! ```text
//! decrypt → bind credentials → helm dependency update → [CRDs] → collect overlays → helm upgrade --install
//! ```

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::layout::{self, Layout};
use crate::core::overlays;
use crate::core::runner::Runner;
use crate::core::secrets;
use crate::core::tools::Tools;
use crate::core::types::{ClusterIdentity, Credentials, DirectorySet, Target};
use crate::error::Result;

/// What a completed deployment did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub target: Target,
    pub release: String,
    pub decrypted: usize,
    pub overlays: Vec<PathBuf>,
    pub crds_applied: bool,
}

/// Sequences the external tools for one cluster and hub.
pub struct Deployer<'a> {
    layout: &'a Layout,
    identity: &'a ClusterIdentity,
    tools: &'a Tools,
    runner: &'a dyn Runner,
}

impl<'a> Deployer<'a> {
    pub fn new(
        layout: &'a Layout,
        identity: &'a ClusterIdentity,
        tools: &'a Tools,
        runner: &'a dyn Runner,
    ) -> Self {
        Self {
            layout,
            identity,
            tools,
            runner,
        }
    }

    /// Directories decrypted and scanned for overlays, lowest precedence
    /// first.
    pub fn directories(&self, target: Target) -> DirectorySet {
        match target {
            Target::Support => vec![self.layout.cluster_dir(self.identity.cluster())],
            Target::Hub => vec![
                self.layout.common_hub_dir(),
                self.layout.hub_dir(self.identity.hub()),
            ],
        }
    }

    /// Chart deployed for a target.
    pub fn chart(&self, target: Target) -> PathBuf {
        match target {
            Target::Support => self.layout.support_chart(),
            Target::Hub => self.layout.hub_chart(),
        }
    }

    /// Overlays a deployment of `target` would pass, without running
    /// anything.
    pub fn overlays(&self, target: Target) -> Vec<PathBuf> {
        overlays::collect_overlays(&self.directories(target))
    }

    /// Decrypt secrets for the cluster and for every hub.
    ///
    /// Neither directory is required to exist.
    pub fn decrypt_all(&self) -> Result<usize> {
        let dirs = vec![
            self.layout.cluster_dir(self.identity.cluster()),
            self.layout.hubs_dir(),
        ];
        secrets::decrypt_all(&dirs, self.runner, self.tools)
    }

    /// Deploy a target.
    ///
    /// `with_crds` applies the support chart's CRDs before the upgrade and
    /// is ignored for hub targets.
    ///
    /// # Errors
    ///
    /// Fails before any external process runs if a directory of the target
    /// is missing, and before helm runs if credentials are missing. Any
    /// tool failure ends the sequence.
    pub fn deploy(&self, target: Target, with_crds: bool) -> Result<DeployReport> {
        let dirs = self.directories(target);
        let chart = self.chart(target);
        let release = target.release(self.identity).to_string();
        info!(%target, %release, chart = %chart.display(), "deploying");

        let (decrypted, creds) = self.prepare(&dirs)?;
        self.runner
            .run(&self.tools.dependency_update(&chart, &creds))?;

        let crds_applied = if with_crds && target == Target::Support {
            self.apply_crds(&creds)?
        } else {
            false
        };

        let overlays = overlays::collect_overlays(&dirs);
        debug!(count = overlays.len(), "applying with overlays");
        self.runner.run(
            &self
                .tools
                .upgrade_install(&release, &chart, &overlays, &creds),
        )?;

        Ok(DeployReport {
            target,
            release,
            decrypted,
            overlays,
            crds_applied,
        })
    }

    /// Apply the support chart's CRDs on their own.
    ///
    /// Returns whether the chart declared any CRDs.
    pub fn deploy_crds(&self) -> Result<bool> {
        let dirs = self.directories(Target::Support);
        let chart = self.chart(Target::Support);

        let (_, creds) = self.prepare(&dirs)?;
        self.runner
            .run(&self.tools.dependency_update(&chart, &creds))?;
        self.apply_crds(&creds)
    }

    /// Decrypt a target's directories and bind the cluster credentials.
    fn prepare(&self, dirs: &[PathBuf]) -> Result<(usize, Credentials)> {
        layout::require_dirs(dirs)?;
        let decrypted = secrets::decrypt_all(dirs, self.runner, self.tools)?;
        let creds = self.layout.bind_credentials(self.identity)?;
        Ok((decrypted, creds))
    }

    /// Render CRDs to a scoped temp file and server-side apply them.
    ///
    /// The temp file is removed when this returns, on success or failure.
    fn apply_crds(&self, creds: &Credentials) -> Result<bool> {
        let chart = self.chart(Target::Support);
        let rendered = self.runner.capture(&self.tools.show_crds(&chart, creds))?;

        let mut staged = tempfile::Builder::new()
            .prefix("hubops-crds-")
            .suffix(".yaml")
            .tempfile()?;
        staged.write_all(&rendered)?;
        staged.flush()?;
        debug!(path = %staged.path().display(), bytes = rendered.len(), "crds staged");

        if rendered.iter().all(u8::is_ascii_whitespace) {
            info!(chart = %chart.display(), "chart declares no CRDs");
            return Ok(false);
        }

        self.runner
            .run(&self.tools.apply_server_side(staged.path(), creds))?;
        Ok(true)
    }
}
