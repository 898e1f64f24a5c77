//! Test support utilities for hubops integration tests.
//!
//! Each test gets a throwaway repository plus fake `sops`, `helm`,
//! `kubectl` and `tofu` scripts that append their argv to a log file.

#![allow(dead_code)]


#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with an isolated repository and fake tools.
///
/// No process-global state is mutated. Child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Repository root
    pub dir: TempDir,
    /// Fake tool binaries and the call log
    pub bin: TempDir,
}

impl Test {
    /// Create an empty repository with fake tools configured.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bin = TempDir::new().expect("failed to create temp bin");
        let t = Self { dir, bin };

        for tool in TOOLS {
            t.install_tool(tool, 0);
        }
        t.write(
            ".hubops.toml",
            &format!(
                "[tools]\nsops = \"{}\"\nhelm = \"{}\"\nkubectl = \"{}\"\ntofu = \"{}\"\n",
                t.tool_path("sops").display(),
                t.tool_path("helm").display(),
                t.tool_path("kubectl").display(),
                t.tool_path("tofu").display(),
            ),
        );
        t
    }

    /// Create a repository with the standard demo cluster and hub.
    pub fn repo() -> Self {
        let t = Self::new();
        for (path, contents) in DEMO_REPO {
            t.write(path, contents);
        }
        t
    }

    /// Write a file relative to the repository root, creating parents.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("failed to create parent dir");
        fs::write(&path, contents).expect("failed to write file");
    }

    /// Absolute path of a repository-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Remove a repository-relative directory.
    pub fn remove_dir(&self, rel: &str) {
        fs::remove_dir_all(self.path(rel)).expect("failed to remove dir");
    }

    /// Make a fake tool exit with `code` after logging.
    pub fn fail_tool(&self, tool: &str, code: i32) {
        self.install_tool(tool, code);
    }

    /// Logged tool calls, one `<tool> <args...> KUBECONFIG=<value>` per line.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Logged calls made by one tool.
    pub fn calls_to(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{} ", tool);
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }

    fn tool_path(&self, tool: &str) -> PathBuf {
        self.bin.path().join(tool)
    }

    fn log_path(&self) -> PathBuf {
        self.bin.path().join("calls.log")
    }

    fn install_tool(&self, tool: &str, code: i32) {
        let path = self.tool_path(tool);
        let script = fake_tool_script(tool, &self.log_path(), code);
        fs::write(&path, script).expect("failed to write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake tool");
    }
}

fn fake_tool_script(tool: &str, log: &Path, code: i32) -> String {
    let behavior = match tool {
        // --decrypt --output <dest> <source>
        "sops" => "cp \"$4\" \"$3\"\n",
        "helm" => "if [ \"$1\" = show ]; then printf '%s\\n' \"$CRD_MANIFEST\"; fi\n",
        _ => "",
    };
    format!(
        "#!/bin/sh\nCRD_MANIFEST='{crd}'\necho \"{tool} $* KUBECONFIG=${{KUBECONFIG:-}}\" >> '{log}'\n{behavior}exit {code}\n",
        crd = CRD_MANIFEST,
        tool = tool,
        log = log.display(),
        behavior = behavior,
        code = code,
    )
}
