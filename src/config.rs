use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Command;

use crate::error::{FastcapError, FastcapResult};

/// minicap 预编译产物仓库
pub const DEFAULT_REPOSITORY_URL: &str =
    "https://github.com/williamfzc/stf-binaries/raw/master/node_modules/minicap-prebuilt/prebuilt";

/// 设备上的安装目录，所有固定路径都位于其中
pub const DEVICE_TMP_DIR: &str = "/data/local/tmp";
pub const MINICAP_NAME: &str = "minicap";
pub const MINICAP_SO_NAME: &str = "minicap.so";
pub const MINICAP_PATH: &str = "/data/local/tmp/minicap";
pub const MINICAP_SO_PATH: &str = "/data/local/tmp/minicap.so";
/// 截图在设备上的输出路径，每次截图都会覆盖
pub const CAPTURE_PATH: &str = "/data/local/tmp/fastcap_temp.png";

/// 主机平台，决定 ADB 可执行文件的名称与查找方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// 当前编译目标对应的平台
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn adb_executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "adb.exe",
            Platform::Unix => "adb",
        }
    }

    fn lookup_tool(&self) -> &'static str {
        match self {
            Platform::Windows => "where",
            Platform::Unix => "which",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::current()
    }
}

/// ADB 配置结构体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ADBConfig {
    /// ADB 可执行文件路径
    pub path: PathBuf,
    /// 主机平台
    #[serde(default)]
    pub platform: Platform,
    /// 预编译产物仓库地址（不含结尾的 `/`）
    pub repository_url: String,
}

impl Default for ADBConfig {
    fn default() -> Self {
        let platform = Platform::current();
        ADBConfig {
            path: PathBuf::from(platform.adb_executable_name()),
            platform,
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
        }
    }
}

impl ADBConfig {
    /// 在当前平台上查找 ADB 可执行文件并生成配置
    pub fn discover() -> FastcapResult<Self> {
        Self::discover_for(Platform::current())
    }

    /// 使用指定平台的查找工具（`where` / `which`）定位 ADB
    pub fn discover_for(platform: Platform) -> FastcapResult<Self> {
        let tool = platform.lookup_tool();
        let output = Command::new(tool)
            .arg(platform.adb_executable_name())
            .output()
            .map_err(|e| FastcapError::ConfigError(format!("无法执行 {}: {}", tool, e)))?;

        if !output.status.success() {
            return Err(FastcapError::ConfigError(format!(
                "未找到 {}",
                platform.adb_executable_name()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| FastcapError::ConfigError("ADB 路径为空".to_string()))?;

        Ok(ADBConfigBuilder::default()
            .platform(platform)
            .path(path)
            .build())
    }
}

/// ADB 配置构建器
#[derive(Default)]
pub struct ADBConfigBuilder {
    path: Option<PathBuf>,
    platform: Option<Platform>,
    repository_url: Option<String>,
}

impl ADBConfigBuilder {
    /// 设置 ADB 可执行文件路径
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 设置主机平台
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// 设置预编译产物仓库地址
    pub fn repository_url(mut self, url: &str) -> Self {
        self.repository_url = Some(url.to_string());
        self
    }

    /// 构建 ADB 配置
    pub fn build(self) -> ADBConfig {
        let platform = self.platform.unwrap_or_default();
        let path = self
            .path
            .unwrap_or_else(|| PathBuf::from(platform.adb_executable_name()));
        let repository_url = self
            .repository_url
            .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        ADBConfig {
            path,
            platform,
            repository_url,
        }
    }
}
