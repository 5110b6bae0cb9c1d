#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// A fake `virtualenv` that lays down a `bin/pip` shell script. The pip
/// script accepts `install -r FILE` (failing when `FAKE_PIP_FAIL_INSTALL` is
/// set or FILE is missing) and prints `FAKE_PIP_FREEZE` for `freeze`. Each
/// environment root is appended to `FAKE_VENV_LOG` when that is set.
const FAKE_VIRTUALENV: &str = r#"#!/bin/sh
set -e
if [ -n "$FAKE_VENV_LOG" ]; then
    echo "$1" >> "$FAKE_VENV_LOG"
fi
mkdir -p "$1/bin"
cat > "$1/bin/pip" <<'PIP'
#!/bin/sh
case "$1" in
    install)
        [ "$2" = "-r" ] || exit 2
        [ -f "$3" ] || exit 1
        if [ -n "$FAKE_PIP_FAIL_INSTALL" ]; then
            echo "ERROR: No matching distribution found" >&2
            exit 1
        fi
        ;;
    freeze)
        cat "$FAKE_PIP_FREEZE"
        ;;
    *)
        exit 2
        ;;
esac
PIP
chmod +x "$1/bin/pip"
"#;

pub struct Workspace {
    pub temp: TempDir,
    pub requirements: PathBuf,
    pub virtualenv: PathBuf,
    pub freeze: PathBuf,
    pub venv_log: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = tempfile::Builder::new()
            .prefix("reqpin-cli")
            .tempdir()
            .expect("tempdir");
        let requirements = temp.path().join("misc").join("requirements");
        fs::create_dir_all(&requirements).expect("requirements dir");
        let virtualenv = temp.path().join("fake-virtualenv");
        write_executable(&virtualenv, FAKE_VIRTUALENV);
        let freeze = temp.path().join("freeze.txt");
        fs::write(&freeze, "").expect("freeze");
        let venv_log = temp.path().join("venvs.log");
        Self {
            temp,
            requirements,
            virtualenv,
            freeze,
            venv_log,
        }
    }

    pub fn raw(&self, name: &str, contents: &str) {
        fs::write(
            self.requirements.join(format!("requirements-{name}-raw.txt")),
            contents,
        )
        .expect("raw manifest");
    }

    pub fn freeze_output(&self, contents: &str) {
        fs::write(&self.freeze, contents).expect("freeze output");
    }

    pub fn generated(&self, name: &str) -> PathBuf {
        self.requirements.join(format!("requirements-{name}.txt"))
    }

    pub fn venv_roots(&self) -> Vec<PathBuf> {
        fs::read_to_string(&self.venv_log)
            .unwrap_or_default()
            .lines()
            .map(PathBuf::from)
            .collect()
    }

    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("reqpin");
        cmd.current_dir(self.temp.path())
            .env("REQPIN_VIRTUALENV", &self.virtualenv)
            .env("FAKE_PIP_FREEZE", &self.freeze)
            .env("FAKE_VENV_LOG", &self.venv_log)
            .env("NO_COLOR", "1")
            .env_remove("REQPIN_REQUIREMENTS_DIR")
            .env_remove("FAKE_PIP_FAIL_INSTALL");
        cmd
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, contents).expect("write script");
    let mut perms = fs::metadata(path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod");
}

#[cfg(not(unix))]
fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write script");
}
