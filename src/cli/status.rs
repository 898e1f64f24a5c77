//! Quick status overview command.

use std::path::Path;

use console::style;

use crate::cli::{output, Context};
use crate::core::secrets;
use crate::error::Result;

/// Show the resolved layout for the selected cluster and hub.
pub fn execute(ctx: &Context) -> Result<()> {
    let layout = &ctx.layout;
    let cluster = ctx.identity.cluster();
    let hub = ctx.identity.hub();

    output::section("hubops status");
    output::kv("root", layout.root().display());
    output::kv("cluster", cluster);
    output::kv("hub", hub);

    output::section("Layout");
    entry("cluster", &layout.cluster_dir(cluster));
    entry("hub", &layout.hub_dir(hub));
    entry("common", &layout.common_hub_dir());
    entry("tf", &layout.provisioning_dir(cluster));
    entry("support chart", &layout.support_chart());
    entry("hub chart", &layout.hub_chart());
    entry("kubeconfig", &layout.credential_file(cluster));

    let dirs = vec![
        layout.cluster_dir(cluster),
        layout.common_hub_dir(),
        layout.hub_dir(hub),
    ];
    let encrypted = secrets::find_encrypted(&dirs)?;
    let pending = encrypted
        .iter()
        .filter_map(|p| secrets::decrypted_path(p).ok())
        .filter(|p| !p.exists())
        .count();

    output::section("Secrets");
    output::kv("encrypted", encrypted.len());
    if pending == 0 {
        output::kv("pending", style("none").dim());
    } else {
        output::kv("pending", style(pending).yellow());
        output::hint("run: hubops decrypt");
    }

    Ok(())
}

fn entry(label: &str, path: &Path) {
    let mark = if path.exists() {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!(
        "  {} {:<14} {}",
        mark,
        label,
        output::path(&path.display().to_string())
    );
}
