use crate::artifact::{ArtifactFetcher, HttpFetcher};
use crate::config::{CAPTURE_PATH, DEVICE_TMP_DIR, MINICAP_PATH};
use crate::device::ADB;
use crate::error::FastcapResult;
use crate::installer::InstallReport;
use crate::utils::parse_trailing_resolution;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 屏幕分辨率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// 解析 `wm size` 的输出，例如 `Physical size: 1080x1920`
    pub fn parse(output: &str) -> FastcapResult<Self> {
        let (width, height) = parse_trailing_resolution(output)?;
        Ok(Self { width, height })
    }

    /// minicap `-P` 参数：采集分辨率等于屏幕分辨率，不缩放不旋转
    pub fn descriptor(&self) -> String {
        format!("{0}x{1}@{0}x{1}/0", self.width, self.height)
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 已安装 minicap 的设备句柄
///
/// 构造时总是先运行安装流程，然后读取一次屏幕尺寸；之后尺寸不再变化，
/// 需要重新检测时请创建新的句柄。
#[derive(Debug, Clone)]
pub struct MinicapDevice {
    adb: ADB,
    device_id: String,
    screen: ScreenSize,
    install_report: InstallReport,
}

impl MinicapDevice {
    /// 使用 HTTP 下载器安装 minicap 并创建句柄
    pub fn new(adb: &ADB, device_id: &str) -> FastcapResult<Self> {
        Self::with_fetcher(adb, device_id, &HttpFetcher::new())
    }

    pub fn with_fetcher(
        adb: &ADB,
        device_id: &str,
        fetcher: &dyn ArtifactFetcher,
    ) -> FastcapResult<Self> {
        let install_report = adb.ensure_minicap(device_id, fetcher)?;
        let screen = adb.screen_size(device_id)?;
        info!("设备 {} 屏幕尺寸为 {}", device_id, screen);

        Ok(Self {
            adb: adb.clone(),
            device_id: device_id.to_string(),
            screen,
            install_report,
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn install_report(&self) -> &InstallReport {
        &self.install_report
    }

    /// 用 minicap 截图，结果保存在设备的固定路径上并覆盖上一次的截图
    pub fn capture(&self) -> FastcapResult<()> {
        let command = format!(
            "LD_LIBRARY_PATH={} {} -s -P {} > {}",
            DEVICE_TMP_DIR,
            MINICAP_PATH,
            self.screen.descriptor(),
            CAPTURE_PATH
        );
        self.adb.shell(&self.device_id, &command)?;

        info!("截图已保存到设备 {}", CAPTURE_PATH);
        Ok(())
    }

    /// 把最近一次截图拉取到本地
    pub fn export(&self, target_path: impl AsRef<Path>) -> FastcapResult<()> {
        let target_path = target_path.as_ref();
        self.adb.pull(&self.device_id, CAPTURE_PATH, target_path)?;

        info!("截图已导出到 {}", target_path.display());
        Ok(())
    }

    /// 截图并直接导出到本地
    pub fn capture_to(&self, target_path: impl AsRef<Path>) -> FastcapResult<()> {
        self.capture()?;
        self.export(target_path)
    }
}

impl ADB {
    /// 获取设备屏幕尺寸
    pub fn screen_size(&self, device_id: &str) -> FastcapResult<ScreenSize> {
        let output = self.shell(device_id, "wm size")?;
        ScreenSize::parse(&output)
    }
}
