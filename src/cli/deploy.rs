//! Deployment commands.

use crate::cli::{output, Context};
use crate::core::deploy::{DeployReport, Deployer};
use crate::core::types::Target;
use crate::error::Result;

/// Deploy the support layer, optionally applying CRDs first.
pub fn support(ctx: &Context, crds: bool) -> Result<()> {
    let report = deployer(ctx).deploy(Target::Support, crds)?;
    summarize(&report);
    Ok(())
}

/// Apply the support chart's CRDs.
pub fn support_crds(ctx: &Context) -> Result<()> {
    if deployer(ctx).deploy_crds()? {
        output::success("applied support CRDs");
    } else {
        output::dimmed("support chart declares no CRDs");
    }
    Ok(())
}

/// Deploy the selected hub.
pub fn hub(ctx: &Context) -> Result<()> {
    let report = deployer(ctx).deploy(Target::Hub, false)?;
    summarize(&report);
    Ok(())
}

fn deployer(ctx: &Context) -> Deployer<'_> {
    Deployer::new(&ctx.layout, &ctx.identity, &ctx.tools, ctx.runner())
}

fn summarize(report: &DeployReport) {
    output::success(&format!(
        "deployed {} release {}",
        report.target, report.release
    ));
    output::kv("decrypted", report.decrypted);
    output::kv("overlays", report.overlays.len());
    if report.crds_applied {
        output::kv("crds", "applied");
    }
}
