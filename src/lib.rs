//! hubops - decrypt cluster secrets and deploy support and hub layers.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── provision     # tf, tf-run
//! │   ├── secrets       # decrypt
//! │   ├── deploy        # deploy-support, deploy-support-crds, deploy-hub
//! │   ├── overlays      # Overlay order listing
//! │   └── status        # Layout overview
//! └── core/             # Core library components
//!     ├── layout        # clusters/, hubs/, charts/, tf/ path resolution
//!     ├── secrets       # *.enc.* discovery and decryption
//!     ├── overlays      # Values file collection
//!     ├── deploy        # Per-target orchestration
//!     ├── provision     # Infrastructure-as-code runs
//!     ├── runner        # External process seam
//!     ├── tools         # sops/helm/kubectl/tofu argument vectors
//!     └── config        # .hubops.toml
//! ```
//!
//! # Repository layout
//!
//! ```text
//! clusters/<cluster>/kubeconfig.enc.yaml   # decrypted to kubeconfig.dec.yaml
//! hubs/_common/                            # shared hub values
//! hubs/<hub>/                              # hub-specific values, override _common
//! charts/support/  charts/hub/
//! tf/clusters/<cluster>/
//! ```

pub mod cli;
pub mod core;
pub mod error;
