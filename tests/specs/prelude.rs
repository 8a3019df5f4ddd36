//! Shared helpers for behavioral specs

#![allow(dead_code)]

use assert_cmd::assert::OutputAssertExt;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::sync::{mpsc, Once};
use std::time::{Duration, Instant};

/// A manifest that validates and stages nothing
pub const MINIMAL_MANIFEST: &str = "\
name: ecephys_123456
processor_full_name: Jane Doe
subject_id: 123456
acquisition_datetime: 2024-04-09 08:30:00
platform: ecephys
project_name: Ephys Platform
destination: /stage
";

/// Temp directory laid out like a watch deployment
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Empty project with `flags/` created
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("flags")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn flags(&self) -> PathBuf {
        self.path().join("flags")
    }

    pub fn complete(&self) -> PathBuf {
        self.path().join("complete")
    }

    pub fn logs(&self) -> PathBuf {
        self.path().join("logs")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Watch config pointing at this project's directories
    pub fn watch_config(&self) -> PathBuf {
        self.file(
            "watch.yml",
            &format!(
                "flag_dir: {}\nmanifest_complete: {}\nlog_dir: {}\ndebounce_s: 0\n",
                self.flags().display(),
                self.complete().display(),
                self.logs().display()
            ),
        )
    }

    pub fn wd(&self) -> CliBuilder {
        CliBuilder::new("wd", self.path())
    }

    pub fn wdd(&self) -> CliBuilder {
        CliBuilder::new("wdd", self.path())
    }

    pub fn log(&self) -> String {
        std::fs::read_to_string(self.logs().join("wdd.log")).unwrap_or_default()
    }
}

/// Path to a workspace binary.
///
/// Binaries from other packages land in the profile directory above the test
/// executable when the workspace is tested together. Otherwise they are built
/// once into a separate target directory.
fn binary(name: &str) -> PathBuf {
    let file = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
    let profile_dir = profile_dir();
    let beside = profile_dir.join(&file);
    if beside.exists() {
        return beside;
    }

    let target = profile_dir.join("spec-bins");
    static BUILD: Once = Once::new();
    BUILD.call_once(|| build_binaries(&target, &profile_dir));
    let profile = profile_dir.file_name().unwrap();
    let built = target.join(profile).join(&file);
    assert!(built.exists(), "{} was not built", built.display());
    built
}

/// `target/<profile>`, two levels above `target/<profile>/deps/specs-*`
fn profile_dir() -> PathBuf {
    let exe = std::env::current_exe().unwrap();
    exe.parent().and_then(Path::parent).unwrap().to_path_buf()
}

fn build_binaries(target: &Path, profile_dir: &Path) {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut cmd = Command::new(cargo);
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["build", "--workspace", "--bins", "--target-dir"])
        .arg(target);
    if profile_dir.file_name() == Some(std::ffi::OsStr::new("release")) {
        cmd.arg("--release");
    }
    let status = cmd.status().unwrap();
    assert!(status.success(), "building workspace binaries failed");
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    fn new(bin: &str, dir: &Path) -> Self {
        let mut cmd = Command::new(binary(bin));
        cmd.current_dir(dir).env_remove("WATCH_CONFIG").env_remove("RUST_LOG");
        Self { cmd }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.assert().success().get_output().clone();
        RunAssert { output }
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.assert().failure().get_output().clone();
        RunAssert { output }
    }

    /// Start a long-running process with stdout piped
    pub fn spawn(mut self) -> Child {
        self.cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap()
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {:?}:\n{}", expected, stdout);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {:?}:\n{}", expected, stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }
}

/// Wait for a line on the child's stdout
pub fn wait_for_line(child: &mut Child, expected: &str, timeout: Duration) -> bool {
    let Some(stdout) = child.stdout.take() else {
        return false;
    };
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                return;
            }
        }
    });
    let deadline = Instant::now() + timeout;
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok(line) if line.trim() == expected => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
    false
}

/// Poll until `check` holds or the timeout passes
pub fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    check()
}

/// Send SIGTERM and wait for the process to exit
#[cfg(unix)]
pub fn terminate(child: &mut Child) -> std::process::ExitStatus {
    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
    child.wait().unwrap()
}
