use crate::device::ADB;
use crate::error::{FastcapError, FastcapResult};
use log::{debug, info};
use std::path::Path;

fn local_str(path: &Path) -> FastcapResult<&str> {
    path.to_str()
        .ok_or_else(|| FastcapError::FileError(format!("路径不是有效的 UTF-8: {:?}", path)))
}

impl ADB {
    /// 文件拉取
    pub fn pull(
        &self,
        device_id: &str,
        device_path: &str,
        local_path: impl AsRef<Path>,
    ) -> FastcapResult<()> {
        let local_path = local_str(local_path.as_ref())?;

        info!("开始从设备拉取文件: {} -> {}", device_path, local_path);
        self.run_on_device(device_id, &["pull", device_path, local_path])?;

        debug!("成功拉取文件 {} 到 {}", device_path, local_path);
        Ok(())
    }

    /// 文件推送
    pub fn push(
        &self,
        device_id: &str,
        local_path: impl AsRef<Path>,
        device_path: &str,
    ) -> FastcapResult<()> {
        let local_path = local_str(local_path.as_ref())?;

        info!("开始向设备推送文件: {} -> {}", local_path, device_path);
        self.run_on_device(device_id, &["push", local_path, device_path])?;

        debug!("成功推送文件 {} 到 {}", local_path, device_path);
        Ok(())
    }

    /// 修改设备上文件的权限，`mode` 为八进制字符串，例如 `"777"`
    pub fn chmod(&self, device_id: &str, device_path: &str, mode: &str) -> FastcapResult<()> {
        self.shell(device_id, &format!("chmod {} {}", mode, device_path))?;
        debug!("已设置 {} 的权限为 {}", device_path, mode);
        Ok(())
    }
}
