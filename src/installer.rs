use crate::artifact::{resolve_urls, ArtifactFetcher, ArtifactKind, ArtifactPair};
use crate::capability::CapabilityProfile;
use crate::config::DEVICE_TMP_DIR;
use crate::device::ADB;
use crate::error::{FastcapError, FastcapResult};
use log::{debug, info, warn};
use std::fmt;

/// 安装器的状态
///
/// `Unchecked -> Detected -> {AlreadyInstalled | NeedsInstall} -> Installed`，
/// 每次 [`Installer::run`] 都从 `Unchecked` 重新开始。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerState {
    Unchecked,
    Detected,
    AlreadyInstalled,
    NeedsInstall,
    Installed,
}

/// 设备上实际观察到的安装情况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallState {
    pub executable_present: bool,
    pub library_present: bool,
}

impl InstallState {
    /// 只有两者都存在才算已安装，部分安装需要全部重装
    pub fn is_complete(&self) -> bool {
        self.executable_present && self.library_present
    }
}

/// 安装结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Installed,
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallOutcome::AlreadyInstalled => write!(f, "already installed"),
            InstallOutcome::Installed => write!(f, "installed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub device_id: String,
    pub profile: CapabilityProfile,
    pub outcome: InstallOutcome,
}

/// minicap 安装器
///
/// 安装状态完全以设备为准，本地不记录任何信息。同一设备的并发安装需要调用方自行串行化。
pub struct Installer<'a> {
    adb: &'a ADB,
    fetcher: &'a dyn ArtifactFetcher,
    device_id: String,
    state: InstallerState,
}

impl<'a> Installer<'a> {
    pub fn new(adb: &'a ADB, fetcher: &'a dyn ArtifactFetcher, device_id: &str) -> Self {
        Self {
            adb,
            fetcher,
            device_id: device_id.to_string(),
            state: InstallerState::Unchecked,
        }
    }

    pub fn state(&self) -> InstallerState {
        self.state
    }

    /// 执行完整的安装流程
    pub fn run(&mut self) -> FastcapResult<InstallReport> {
        self.state = InstallerState::Unchecked;

        if !self.adb.is_reachable(&self.device_id) {
            let shown = if self.device_id.is_empty() {
                "<默认设备>".to_string()
            } else {
                self.device_id.clone()
            };
            return Err(FastcapError::DeviceUnreachable(shown));
        }

        let profile = self.adb.detect_profile(&self.device_id)?;
        self.state = InstallerState::Detected;

        if self.install_state()?.is_complete() {
            self.state = InstallerState::AlreadyInstalled;
            info!("minicap 已存在于设备 {}", self.device_id);
            return Ok(self.report(profile, InstallOutcome::AlreadyInstalled));
        }

        self.state = InstallerState::NeedsInstall;
        let pair = resolve_urls(&self.adb.config.repository_url, profile.abi(), profile.sdk());

        // 两个产物依次独立安装；中途失败不回滚，下次构造时会重新检测并完整重装
        for kind in ArtifactKind::ALL {
            self.install_artifact(&pair, kind)?;
        }

        self.state = InstallerState::Installed;
        Ok(self.report(profile, InstallOutcome::Installed))
    }

    /// 在设备安装目录中按文件名分别查找可执行文件和共享库
    pub fn install_state(&self) -> FastcapResult<InstallState> {
        let present = |kind: ArtifactKind| -> FastcapResult<bool> {
            let found = self
                .adb
                .find_by_name(&self.device_id, DEVICE_TMP_DIR, kind.file_name())?;
            debug!("设备 {} 上查找 {}: {:?}", self.device_id, kind, found);
            Ok(!found.is_empty())
        };

        Ok(InstallState {
            executable_present: present(ArtifactKind::Executable)?,
            library_present: present(ArtifactKind::Library)?,
        })
    }

    fn install_artifact(&self, pair: &ArtifactPair, kind: ArtifactKind) -> FastcapResult<()> {
        let url = pair.url(kind);
        let destination = kind.device_path();
        info!("目标 {} 地址: {}", kind, url);

        let scratch = self.fetcher.fetch(url)?;

        // 推送失败时 scratch 随 `?` 返回被 drop，临时文件同样会被删除
        self.adb.push(&self.device_id, &scratch, destination)?;

        let local = scratch.to_path_buf();
        if let Err(e) = scratch.close() {
            warn!("无法删除临时文件 {:?}: {}", local, e);
        }

        self.adb.chmod(&self.device_id, destination, "777")?;
        info!("{} 已安装到 {}", kind, destination);
        Ok(())
    }

    fn report(&self, profile: CapabilityProfile, outcome: InstallOutcome) -> InstallReport {
        InstallReport {
            device_id: self.device_id.clone(),
            profile,
            outcome,
        }
    }
}

impl ADB {
    /// 确保设备上已安装与其 ABI/SDK 匹配的 minicap
    pub fn ensure_minicap(
        &self,
        device_id: &str,
        fetcher: &dyn ArtifactFetcher,
    ) -> FastcapResult<InstallReport> {
        Installer::new(self, fetcher, device_id).run()
    }
}
