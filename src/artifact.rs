use crate::config::{MINICAP_NAME, MINICAP_PATH, MINICAP_SO_NAME, MINICAP_SO_PATH};
use crate::error::{FastcapError, FastcapResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use tempfile::TempPath;

/// minicap 的两个组成部分，二者必须配套安装
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Executable,
    Library,
}

impl ArtifactKind {
    /// 安装顺序：先可执行文件，后共享库
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Executable, ArtifactKind::Library];

    /// 在设备上查找时使用的文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Executable => MINICAP_NAME,
            ArtifactKind::Library => MINICAP_SO_NAME,
        }
    }

    /// 设备上的安装路径
    pub fn device_path(&self) -> &'static str {
        match self {
            ArtifactKind::Executable => MINICAP_PATH,
            ArtifactKind::Library => MINICAP_SO_PATH,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// 与设备 ABI/SDK 匹配的一对下载地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPair {
    pub executable_url: String,
    pub library_url: String,
}

impl ArtifactPair {
    pub fn url(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Executable => &self.executable_url,
            ArtifactKind::Library => &self.library_url,
        }
    }
}

/// 根据仓库地址、ABI 与 SDK 计算下载地址，纯字符串拼接
pub fn resolve_urls(repo_base: &str, abi: &str, sdk: &str) -> ArtifactPair {
    let repo_base = repo_base.trim_end_matches('/');
    ArtifactPair {
        executable_url: format!("{}/{}/bin/{}", repo_base, abi, MINICAP_NAME),
        library_url: format!(
            "{}/{}/lib/android-{}/{}",
            repo_base, abi, sdk, MINICAP_SO_NAME
        ),
    }
}

/// 把远程产物下载到本地临时文件
///
/// 返回的 [`TempPath`] 归调用方所有，drop 或 `close()` 时删除文件。
pub trait ArtifactFetcher {
    fn fetch(&self, url: &str) -> FastcapResult<TempPath>;
}

/// 基于 ureq 的阻塞 HTTP 下载器
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_agent(ureq::AgentBuilder::new().build())
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FastcapResult<TempPath> {
        info!("开始下载: {}", url);

        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(FastcapError::fetch(url, format!("HTTP {}", code)))
            }
            Err(e) => return Err(FastcapError::fetch(url, e.to_string())),
        };

        let mut scratch = tempfile::Builder::new()
            .prefix("fastcap_")
            .tempfile()
            .map_err(|e| FastcapError::FileError(format!("无法创建临时文件: {}", e)))?;

        // 读取响应体失败同样视为下载失败；scratch 在返回前被 drop，文件随之删除
        let written = io::copy(&mut response.into_reader(), scratch.as_file_mut())
            .map_err(|e| FastcapError::fetch(url, e.to_string()))?;

        let path = scratch.into_temp_path();
        debug!("已下载 {} 字节到 {:?}", written, path);
        Ok(path)
    }
}
