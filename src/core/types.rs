//! Domain value types shared across the pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::constants;
use crate::core::validation;
use crate::error::Result;

/// A cluster name (e.g., `demo`, `prod-eu`).
pub type ClusterName = String;

/// A hub name; doubles as the hub layer's namespace and release name.
pub type HubName = String;

/// An ordered collection of directories scanned by one operation.
pub type DirectorySet = Vec<PathBuf>;

/// Which cluster and hub this run operates on.
///
/// Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterIdentity {
    cluster: ClusterName,
    hub: HubName,
}

impl ClusterIdentity {
    /// Build an identity, validating both names.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidIdentity` if either name could escape
    /// its directory or collides with the shared hub directory.
    pub fn new(cluster: impl Into<String>, hub: impl Into<String>) -> Result<Self> {
        let cluster = cluster.into();
        let hub = hub.into();
        validation::validate_identity("cluster", &cluster)?;
        validation::validate_identity("hub", &hub)?;
        Ok(Self { cluster, hub })
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn hub(&self) -> &str {
        &self.hub
    }
}

impl Default for ClusterIdentity {
    fn default() -> Self {
        Self {
            cluster: constants::DEFAULT_IDENTITY.to_string(),
            hub: constants::DEFAULT_IDENTITY.to_string(),
        }
    }
}

/// A deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Cluster-wide shared services, always released as `support`.
    Support,
    /// Per-tenant layer named after the hub identity.
    Hub,
}

impl Target {
    /// Namespace and release name for this target.
    pub fn release<'a>(&self, identity: &'a ClusterIdentity) -> &'a str {
        match self {
            Target::Support => constants::SUPPORT_RELEASE,
            Target::Hub => identity.hub(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Support => write!(f, "support"),
            Target::Hub => write!(f, "hub"),
        }
    }
}

/// Credentials bound for cluster access.
///
/// Passed explicitly to every invocation that talks to the cluster instead
/// of being exported into the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    kubeconfig: PathBuf,
}

impl Credentials {
    pub(crate) fn new(kubeconfig: PathBuf) -> Self {
        Self { kubeconfig }
    }

    /// Path to the decrypted kubeconfig.
    pub fn kubeconfig(&self) -> &Path {
        &self.kubeconfig
    }
}
