//! Shared fixtures for the integration tests.
//!
//! Each test gets an isolated [`TestEnvironment`]: a temp working directory
//! the CLI runs in, a temp templates root wired up via the
//! `CREATE_CONNECTKIT_TEMPLATES` override, and a stub `bin` directory that
//! can shadow package managers on `PATH` so no real installer ever runs.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnvironment {
    /// Working directory the command runs in (projects land here)
    root: TempDir,
    /// Templates root handed to the CLI via the env override
    templates: TempDir,
    /// Directory prepended to PATH for stub executables
    bin: TempDir,
}

impl TestEnvironment {
    /// Build an environment with both template trees populated, including
    /// files that exercise the exclusion list and the `_dot_` rename.
    pub fn new() -> Self {
        let env = Self {
            root: TempDir::new().unwrap(),
            templates: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
        };

        for id in ["next-connectkit-app", "react-connectkit-app"] {
            let dir = env.templates.path().join(id);
            write_file(
                &dir.join("package.json"),
                &format!(
                    r#"{{
  "name": "{id}",
  "version": "9.9.9",
  "scripts": {{ "dev": "next dev", "start": "react-scripts start" }},
  "dependencies": {{
    "@particle-network/connectkit": "^2.0.0",
    "viem": "^2.9.0",
    "react": "^18"
  }}
}}
"#
                ),
            );
            write_file(&dir.join("_dot_env"), "PROJECT_ID=\n");
            write_file(&dir.join("_dot_env.local"), "LOCAL=1\n");
            write_file(&dir.join("src/index.tsx"), "export {};\n");
            write_file(&dir.join("README.md"), "# starter\n");
            // All of these must never be copied out.
            write_file(&dir.join("node_modules/left-pad/index.js"), "cache\n");
            write_file(&dir.join("yarn.lock"), "# lock\n");
            write_file(&dir.join("CHANGELOG.md"), "history\n");
        }

        env
    }

    /// Install a stub executable that exits with the given code.
    #[cfg(unix)]
    pub fn stub_binary(&self, name: &str, exit_code: i32) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join(name);
        fs::write(&path, format!("#!/bin/sh\nexit {exit_code}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// A command for the compiled binary, wired into this environment.
    pub fn command(&self) -> Command {
        let path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = Command::cargo_bin("create-connectkit").unwrap();
        cmd.current_dir(self.root.path())
            .env("CREATE_CONNECTKIT_TEMPLATES", self.templates.path())
            .env("PATH", format!("{}:{path}", self.bin.path().display()))
            .env_remove("npm_config_user_agent");
        cmd
    }

    pub fn cwd(&self) -> &Path {
        self.root.path()
    }

    pub fn project_path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }
}

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
