use std::fmt;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use crate::config::ADBConfig;
use crate::error::{FastcapError, FastcapResult};

/// 一次 ADB 调用的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}

/// 执行 ADB 可执行文件的抽象
///
/// 生产实现直接启动进程；测试可以替换为模拟设备的实现。
pub trait CommandRunner: fmt::Debug + Send + Sync {
    /// 以给定参数运行 `program`，捕获 stdout 与 stderr
    fn run(&self, program: &Path, args: &[&str]) -> FastcapResult<CommandOutput>;
}

/// 通过 `std::process::Command` 启动 ADB
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[&str]) -> FastcapResult<CommandOutput> {
        // 输出全部捕获，ADB 自身的进度信息不会打到终端
        let output = Command::new(program).args(args).output().map_err(|e| {
            FastcapError::TransportError(format!("无法执行 {}: {}", program.display(), e))
        })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// ADB 主结构体
#[derive(Clone, Debug)]
pub struct ADB {
    pub config: ADBConfig,
    pub(crate) runner: Arc<dyn CommandRunner>,
}

impl ADB {
    /// 创建新的 ADB 实例
    pub fn new(config: Option<ADBConfig>) -> Self {
        Self::with_runner(config.unwrap_or_default(), Arc::new(ProcessRunner))
    }

    /// 使用自定义的命令执行器创建 ADB 实例
    pub fn with_runner(config: ADBConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// 获取 ADB 路径
    pub fn adb_path(&self) -> &std::path::PathBuf {
        &self.config.path
    }
}

impl Default for ADB {
    fn default() -> Self {
        Self::new(None)
    }
}
