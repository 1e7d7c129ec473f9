#![allow(dead_code)]

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fastcap::{
    ADBConfigBuilder, ArtifactFetcher, CommandOutput, CommandRunner, FastcapError, FastcapResult,
    ADB, CAPTURE_PATH, MINICAP_PATH, MINICAP_SO_PATH,
};
use tempfile::TempPath;

pub const SERIAL: &str = "D1";
pub const REPO: &str = "http://mirror.test/prebuilt";

#[derive(Debug)]
struct DeviceState {
    model: String,
    abi: String,
    sdk: String,
    wm_size: String,
    files: BTreeSet<String>,
    calls: Vec<Vec<String>>,
    push_sources_existed: Vec<bool>,
    fail_push_to: Option<String>,
    fail_chmod: bool,
    capture_works: bool,
}

/// 模拟单台设备的 ADB：维护设备上的文件集合并记录每次调用
#[derive(Debug)]
pub struct FakeDevice {
    state: Mutex<DeviceState>,
}

fn ok(stdout: &str) -> FastcapResult<CommandOutput> {
    Ok(CommandOutput {
        success: true,
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    })
}

fn fail(stderr: &str) -> FastcapResult<CommandOutput> {
    Ok(CommandOutput {
        success: false,
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    })
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DeviceState {
                model: "Pixel 3".to_string(),
                abi: "arm64-v8a".to_string(),
                sdk: "28".to_string(),
                wm_size: "Physical size: 1080x1920".to_string(),
                files: BTreeSet::new(),
                calls: Vec::new(),
                push_sources_existed: Vec::new(),
                fail_push_to: None,
                fail_chmod: false,
                capture_works: true,
            }),
        }
    }

    pub fn with_file(self, path: &str) -> Self {
        self.state.lock().unwrap().files.insert(path.to_string());
        self
    }

    pub fn with_minicap_installed(self) -> Self {
        self.with_file(MINICAP_PATH).with_file(MINICAP_SO_PATH)
    }

    pub fn with_abi(self, abi: &str) -> Self {
        self.state.lock().unwrap().abi = abi.to_string();
        self
    }

    pub fn with_wm_size(self, output: &str) -> Self {
        self.state.lock().unwrap().wm_size = output.to_string();
        self
    }

    pub fn with_broken_capture(self) -> Self {
        self.state.lock().unwrap().capture_works = false;
        self
    }

    pub fn fail_push_to(&self, remote: Option<&str>) {
        self.state.lock().unwrap().fail_push_to = remote.map(str::to_string);
    }

    pub fn fail_chmod(&self, fail: bool) {
        self.state.lock().unwrap().fail_chmod = fail;
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.state.lock().unwrap().files.contains(path)
    }

    pub fn remove_file(&self, path: &str) {
        self.state.lock().unwrap().files.remove(path);
    }

    /// 某个 ADB 子命令（`push` / `pull` / `shell`）的调用次数
    pub fn count(&self, subcommand: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|args| args.get(2).map(String::as_str) == Some(subcommand))
            .count()
    }

    /// 以 `prefix` 开头的 shell 命令次数
    pub fn count_shell(&self, prefix: &str) -> usize {
        self.shell_commands()
            .iter()
            .filter(|command| command.starts_with(prefix))
            .count()
    }

    pub fn shell_commands(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|args| args.get(2).map(String::as_str) == Some("shell"))
            .filter_map(|args| args.get(3).cloned())
            .collect()
    }

    pub fn push_sources_existed(&self) -> Vec<bool> {
        self.state.lock().unwrap().push_sources_existed.clone()
    }

    fn shell(state: &mut DeviceState, command: &str) -> FastcapResult<CommandOutput> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        match parts.as_slice() {
            ["getprop", "ro.product.model"] => ok(&format!("{}\r\n", state.model)),
            ["getprop", "ro.product.cpu.abi"] => ok(&format!("{}\r\n", state.abi)),
            ["getprop", "ro.build.version.sdk"] => ok(&format!("{}\r\n", state.sdk)),
            ["wm", "size"] => ok(&format!("{}\r\n", state.wm_size)),
            ["find", root, "-name", name] => {
                let found: Vec<&str> = state
                    .files
                    .iter()
                    .filter(|path| path.starts_with(root))
                    .filter(|path| path.rsplit('/').next() == Some(*name))
                    .map(String::as_str)
                    .collect();
                let mut out = found.join("\n");
                if !out.is_empty() {
                    out.push('\n');
                }
                ok(&out)
            }
            ["chmod", _mode, path] => {
                if state.fail_chmod {
                    fail(&format!("chmod: {}: Operation not permitted", path))
                } else if state.files.contains(*path) {
                    ok("")
                } else {
                    fail(&format!("chmod: {}: No such file or directory", path))
                }
            }
            [env, exe, ..] if env.starts_with("LD_LIBRARY_PATH=") && *exe == MINICAP_PATH => {
                let installed =
                    state.files.contains(MINICAP_PATH) && state.files.contains(MINICAP_SO_PATH);
                if state.capture_works && installed {
                    state.files.insert(CAPTURE_PATH.to_string());
                    ok("")
                } else {
                    fail("CANNOT LINK EXECUTABLE")
                }
            }
            _ => fail(&format!("/system/bin/sh: {}: not found", command)),
        }
    }
}

impl CommandRunner for FakeDevice {
    fn run(&self, _program: &Path, args: &[&str]) -> FastcapResult<CommandOutput> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.iter().map(|a| a.to_string()).collect());

        match args {
            ["-s", serial, rest @ ..] if *serial == SERIAL => match rest {
                ["shell", command] => Self::shell(&mut state, command),
                ["push", local, remote] => {
                    state.push_sources_existed.push(Path::new(local).exists());
                    if state.fail_push_to.as_deref() == Some(*remote) {
                        return fail("adb: error: failed to copy");
                    }
                    state.files.insert(remote.to_string());
                    ok("1 file pushed, 0 skipped.\n")
                }
                ["pull", remote, local] => {
                    if !state.files.contains(*remote) {
                        return fail(&format!(
                            "adb: error: failed to stat remote object '{}': No such file or directory",
                            remote
                        ));
                    }
                    std::fs::write(local, b"\x89PNG fake capture").unwrap();
                    ok("1 file pulled, 0 skipped.\n")
                }
                _ => fail("adb: usage"),
            },
            ["-s", serial, ..] => fail(&format!("adb: device '{}' not found", serial)),
            _ => fail("adb: no devices/emulators found"),
        }
    }
}

/// 记录下载请求的下载器，返回写有假内容的临时文件
#[derive(Debug, Default)]
pub struct FakeFetcher {
    urls: Mutex<Vec<String>>,
    scratch_paths: Mutex<Vec<PathBuf>>,
    fail_containing: Mutex<Option<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_urls_containing(&self, needle: Option<&str>) {
        *self.fail_containing.lock().unwrap() = needle.map(str::to_string);
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn scratch_paths(&self) -> Vec<PathBuf> {
        self.scratch_paths.lock().unwrap().clone()
    }
}

impl ArtifactFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> FastcapResult<TempPath> {
        self.urls.lock().unwrap().push(url.to_string());

        if let Some(needle) = self.fail_containing.lock().unwrap().as_deref() {
            if url.contains(needle) {
                return Err(FastcapError::FetchError {
                    url: url.to_string(),
                    message: "HTTP 404".to_string(),
                });
            }
        }

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(url.as_bytes())?;
        let path = file.into_temp_path();
        self.scratch_paths.lock().unwrap().push(path.to_path_buf());
        Ok(path)
    }
}

pub fn adb_for(device: &Arc<FakeDevice>) -> ADB {
    let config = ADBConfigBuilder::default()
        .path("adb")
        .repository_url(REPO)
        .build();
    ADB::with_runner(config, device.clone())
}
