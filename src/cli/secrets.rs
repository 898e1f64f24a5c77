//! Decrypt command.

use crate::cli::{output, Context};
use crate::core::deploy::Deployer;
use crate::error::Result;

/// Decrypt every encrypted file for the cluster and all hubs.
pub fn decrypt(ctx: &Context) -> Result<()> {
    let count =
        Deployer::new(&ctx.layout, &ctx.identity, &ctx.tools, ctx.runner()).decrypt_all()?;

    match count {
        0 => output::dimmed("no encrypted files found"),
        1 => output::success("decrypted 1 file"),
        n => output::success(&format!("decrypted {} files", n)),
    }
    Ok(())
}
