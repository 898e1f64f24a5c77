//! Repository layout resolution.
//!
//! Maps cluster and hub names onto the on-disk tree. Everything here is a
//! pure path computation; existence is checked by the callers that need it.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::core::constants;
use crate::core::types::{ClusterIdentity, Credentials};
use crate::error::{LayoutError, Result};

/// Paths under one repository root.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `tf/clusters/<cluster>/`
    pub fn provisioning_dir(&self, cluster: &str) -> PathBuf {
        self.root
            .join(constants::PROVISIONING_DIR)
            .join(constants::CLUSTERS_DIR)
            .join(cluster)
    }

    /// `clusters/<cluster>/`
    pub fn cluster_dir(&self, cluster: &str) -> PathBuf {
        self.root.join(constants::CLUSTERS_DIR).join(cluster)
    }

    /// `hubs/`
    pub fn hubs_dir(&self) -> PathBuf {
        self.root.join(constants::HUBS_DIR)
    }

    /// `hubs/<hub>/`
    pub fn hub_dir(&self, hub: &str) -> PathBuf {
        self.hubs_dir().join(hub)
    }

    /// `hubs/_common/`
    pub fn common_hub_dir(&self) -> PathBuf {
        self.hubs_dir().join(constants::COMMON_HUB_DIR)
    }

    /// `charts/support/`
    pub fn support_chart(&self) -> PathBuf {
        self.root
            .join(constants::CHARTS_DIR)
            .join(constants::SUPPORT_CHART)
    }

    /// `charts/hub/`
    pub fn hub_chart(&self) -> PathBuf {
        self.root
            .join(constants::CHARTS_DIR)
            .join(constants::HUB_CHART)
    }

    /// `clusters/<cluster>/kubeconfig.dec.yaml`
    pub fn credential_file(&self, cluster: &str) -> PathBuf {
        self.cluster_dir(cluster).join(constants::CREDENTIAL_FILE)
    }

    /// Verify the cluster's credential file exists and bind it.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::MissingCredentials` if the decrypted kubeconfig
    /// is absent.
    pub fn bind_credentials(&self, identity: &ClusterIdentity) -> Result<Credentials> {
        let path = self.credential_file(identity.cluster());
        if !path.is_file() {
            return Err(LayoutError::MissingCredentials(path).into());
        }
        trace!(path = %path.display(), "credentials bound");
        Ok(Credentials::new(path))
    }
}

/// Fail unless every directory in `dirs` exists.
///
/// # Errors
///
/// Returns `LayoutError::MissingDirectory` naming the first absent entry.
pub fn require_dirs(dirs: &[PathBuf]) -> Result<()> {
    match dirs.iter().find(|dir| !dir.is_dir()) {
        Some(missing) => Err(LayoutError::MissingDirectory(missing.clone()).into()),
        None => Ok(()),
    }
}
