//! Constants used throughout hubops.
//!
//! Centralizes the directory layout, naming markers, and defaults that other
//! repositories and tools rely on. Changing any of these breaks interop.

/// Infix marking an encrypted file (e.g. `secrets.enc.yaml`).
pub const ENCRYPTED_MARKER: &str = ".enc.";

/// Infix that replaces [`ENCRYPTED_MARKER`] in the decrypted sibling.
pub const DECRYPTED_MARKER: &str = ".dec.";

/// Extension of files collected as values overlays.
pub const OVERLAY_EXTENSION: &str = "yaml";

/// Cluster configuration root (`clusters/<cluster>/`).
pub const CLUSTERS_DIR: &str = "clusters";

/// Hub configuration root (`hubs/<hub>/`).
pub const HUBS_DIR: &str = "hubs";

/// Shared hub configuration directory under [`HUBS_DIR`].
pub const COMMON_HUB_DIR: &str = "_common";

/// Provisioning workspace root (`tf/clusters/<cluster>/`).
pub const PROVISIONING_DIR: &str = "tf";

/// Chart directory root.
pub const CHARTS_DIR: &str = "charts";

/// Support layer chart directory under [`CHARTS_DIR`].
pub const SUPPORT_CHART: &str = "support";

/// Hub layer chart directory under [`CHARTS_DIR`].
pub const HUB_CHART: &str = "hub";

/// Decrypted credential file inside a cluster directory.
pub const CREDENTIAL_FILE: &str = "kubeconfig.dec.yaml";

/// Namespace and release name of the support layer.
pub const SUPPORT_RELEASE: &str = "support";

/// Default cluster and hub identity.
pub const DEFAULT_IDENTITY: &str = "demo";

/// Environment variable selecting the cluster.
pub const CLUSTER_ENV: &str = "CLUSTER_NAME";

/// Environment variable selecting the hub.
pub const HUB_ENV: &str = "HUB_NAME";

/// Environment variable read by helm and kubectl to locate credentials.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Optional tool configuration file at the repository root.
pub const CONFIG_FILE: &str = ".hubops.toml";

/// Log filter environment variable.
pub const LOG_ENV: &str = "HUBOPS_LOG";
