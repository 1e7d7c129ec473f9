mod error;
mod config;
mod device;
mod cmd;
mod utils;

// 功能模块
pub mod transfer;
pub mod capability;
pub mod artifact;
pub mod installer;
pub mod media;

// 导出主要类型
pub use config::{
    ADBConfig, ADBConfigBuilder, Platform, CAPTURE_PATH, DEFAULT_REPOSITORY_URL, DEVICE_TMP_DIR,
    MINICAP_NAME, MINICAP_PATH, MINICAP_SO_NAME, MINICAP_SO_PATH,
};
pub use device::{CommandOutput, CommandRunner, ProcessRunner, ADB};
pub use error::{FastcapError, FastcapResult};
pub use capability::CapabilityProfile;
pub use artifact::{resolve_urls, ArtifactFetcher, ArtifactKind, ArtifactPair, HttpFetcher};
pub use installer::{InstallOutcome, InstallReport, InstallState, Installer, InstallerState};
pub use media::{MinicapDevice, ScreenSize};

// 便利的预导出模块
pub mod prelude {
    pub use super::{ADB, ADBConfig, ADBConfigBuilder, FastcapError, FastcapResult};
    pub use super::{ArtifactFetcher, HttpFetcher, MinicapDevice, ScreenSize};
}
