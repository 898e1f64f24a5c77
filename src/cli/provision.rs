//! Provisioning commands.
//!
//! `tf` applies the cluster's workspace; `tf-run` passes anything through.

use crate::cli::Context;
use crate::core::provision;
use crate::error::Result;

/// Run `tofu apply` for the selected cluster.
pub fn apply(ctx: &Context, extra: &[String]) -> Result<()> {
    provision::apply(&ctx.layout, &ctx.identity, &ctx.tools, ctx.runner(), extra)
}

/// Run an arbitrary tofu command for the selected cluster.
pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    provision::run(&ctx.layout, &ctx.identity, &ctx.tools, ctx.runner(), args)
}
