//! Overlays command.
//!
//! Lists the values files a deployment would pass, lowest precedence first.

use crate::cli::{output, Context};
use crate::core::deploy::Deployer;
use crate::core::overlays;
use crate::core::types::Target;
use crate::error::Result;

/// Print the overlay order for a target.
pub fn execute(ctx: &Context, target: Target, json: bool) -> Result<()> {
    let files =
        Deployer::new(&ctx.layout, &ctx.identity, &ctx.tools, ctx.runner()).overlays(target);

    if json {
        let paths: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    if files.is_empty() {
        output::dimmed("no overlays");
        return Ok(());
    }

    output::header(&format!("{} overlays ({} files)", target, files.len()));
    for file in &files {
        output::list_item(&output::path(&file.display().to_string()));
    }

    for file in files.iter().filter(|f| overlays::is_decrypted(f)) {
        output::warn(&format!(
            "decrypted secret passed as values: {}",
            file.display()
        ));
    }
    Ok(())
}
