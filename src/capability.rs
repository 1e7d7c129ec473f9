use crate::device::ADB;
use crate::error::{FastcapError, FastcapResult};
use log::info;
use serde::{Deserialize, Serialize};

const ABI_PROP: &str = "ro.product.cpu.abi";
const SDK_PROP: &str = "ro.build.version.sdk";

/// 选择 minicap 产物所需的设备能力信息
///
/// 每次安装都会重新检测，不会缓存。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    abi: String,
    sdk: String,
}

impl CapabilityProfile {
    /// 校验并创建能力信息
    ///
    /// ABI 不能为空，不能含空白或 `/`；SDK 必须是纯数字。
    pub fn new(abi: &str, sdk: &str) -> FastcapResult<Self> {
        let abi = abi.trim();
        let sdk = sdk.trim();

        if abi.is_empty() {
            return Err(FastcapError::DetectionError("ABI 为空".to_string()));
        }
        if abi.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(FastcapError::DetectionError(format!("ABI 格式错误: {:?}", abi)));
        }
        if sdk.is_empty() {
            return Err(FastcapError::DetectionError("SDK 版本为空".to_string()));
        }
        if !sdk.chars().all(|c| c.is_ascii_digit()) {
            return Err(FastcapError::DetectionError(format!("SDK 版本格式错误: {:?}", sdk)));
        }

        Ok(Self {
            abi: abi.to_string(),
            sdk: sdk.to_string(),
        })
    }

    pub fn abi(&self) -> &str {
        &self.abi
    }

    pub fn sdk(&self) -> &str {
        &self.sdk
    }
}

impl ADB {
    /// 获取设备 ABI，例如 `arm64-v8a`
    pub fn detect_abi(&self, device_id: &str) -> FastcapResult<String> {
        let abi = self.get_prop(device_id, ABI_PROP)?;
        info!("设备 {} 的 abi 为 {}", device_id, abi);
        Ok(abi)
    }

    /// 获取设备 SDK 版本，例如 `28`
    pub fn detect_sdk(&self, device_id: &str) -> FastcapResult<String> {
        let sdk = self.get_prop(device_id, SDK_PROP)?;
        info!("设备 {} 的 sdk 为 {}", device_id, sdk);
        Ok(sdk)
    }

    /// 检测 ABI 与 SDK 并校验
    pub fn detect_profile(&self, device_id: &str) -> FastcapResult<CapabilityProfile> {
        let abi = self.detect_abi(device_id)?;
        let sdk = self.detect_sdk(device_id)?;
        CapabilityProfile::new(&abi, &sdk)
    }
}
