//! Infrastructure provisioning.
//!
//! Runs the infrastructure-as-code tool inside `tf/clusters/<cluster>/`.

use tracing::debug;

use crate::core::layout::{self, Layout};
use crate::core::runner::Runner;
use crate::core::tools::Tools;
use crate::core::types::ClusterIdentity;
use crate::error::{Result, ToolError};

/// Run `tofu apply` in the cluster's provisioning workspace.
///
/// `extra` is appended after `apply` (e.g. `-auto-approve`).
pub fn apply(
    layout: &Layout,
    identity: &ClusterIdentity,
    tools: &Tools,
    runner: &dyn Runner,
    extra: &[String],
) -> Result<()> {
    let mut args = vec!["apply".to_string()];
    args.extend_from_slice(extra);
    run(layout, identity, tools, runner, &args)
}

/// Run an arbitrary tofu command in the cluster's provisioning workspace.
///
/// # Errors
///
/// Returns an error if `args` is empty, if the workspace does not exist, or
/// if tofu exits non-zero.
pub fn run(
    layout: &Layout,
    identity: &ClusterIdentity,
    tools: &Tools,
    runner: &dyn Runner,
    args: &[String],
) -> Result<()> {
    if args.is_empty() {
        return Err(ToolError::NoArguments {
            tool: tools.tofu.clone(),
        }
        .into());
    }

    let workspace = layout.provisioning_dir(identity.cluster());
    layout::require_dirs(std::slice::from_ref(&workspace))?;
    debug!(workspace = %workspace.display(), ?args, "provisioning");

    runner.run(&tools.provision(&workspace, args))
}
