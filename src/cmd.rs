use crate::device::ADB;
use crate::error::{FastcapError, FastcapResult};
use crate::utils::{non_empty_lines, strip_line_endings};
use log::{debug, info, trace, warn};

impl ADB {
    /// 执行任意 ADB 命令，返回 stdout
    pub fn run_command(&self, args: &[&str]) -> FastcapResult<String> {
        let output = self.runner.run(&self.config.path, args)?;

        let stdout = output.stdout_text();
        let stderr = output.stderr_text();

        if !output.success {
            let error_msg = if !stderr.trim().is_empty() {
                stderr
            } else {
                stdout
            };

            return Err(FastcapError::TransportError(format!(
                "ADB 命令 {:?} 失败: {}",
                args,
                error_msg.trim()
            )));
        }

        if !stderr.trim().is_empty() {
            warn!("ADB 命令 {:?} 产生了 stderr 输出: {}", args, stderr.trim());
        }

        debug!("ADB 命令执行成功: {:?}", args);
        Ok(stdout)
    }

    /// 针对指定设备执行 ADB 子命令；设备 ID 为空时交给 ADB 选择唯一连接的设备
    pub(crate) fn run_on_device(&self, device_id: &str, args: &[&str]) -> FastcapResult<String> {
        let mut full_args = Vec::with_capacity(args.len() + 2);
        if !device_id.is_empty() {
            full_args.push("-s");
            full_args.push(device_id);
        }
        full_args.extend_from_slice(args);

        self.run_command(&full_args)
    }

    /// 在设备上执行 shell 命令，去掉输出结尾的换行
    pub fn shell(&self, device_id: &str, command: &str) -> FastcapResult<String> {
        let stdout = self.run_on_device(device_id, &["shell", command])?;

        trace!("Shell 命令 '{}' 输出: {}", command, stdout);
        Ok(strip_line_endings(&stdout).to_string())
    }

    /// 获取设备属性
    pub fn get_prop(&self, device_id: &str, prop_name: &str) -> FastcapResult<String> {
        let output = self.shell(device_id, &format!("getprop {}", prop_name))?;
        Ok(output.trim().to_string())
    }

    /// 检查设备是否可达
    ///
    /// 通过查询 `ro.product.model` 判断；任何失败都返回 `false`，不会向外抛出错误。
    pub fn is_reachable(&self, device_id: &str) -> bool {
        match self.get_prop(device_id, "ro.product.model") {
            Ok(model) if !model.is_empty() => {
                info!("设备 {} 在线 ({})", device_id, model);
                true
            }
            Ok(_) => {
                debug!("设备 {} 没有返回型号", device_id);
                false
            }
            Err(e) => {
                debug!("设备 {} 不可达: {}", device_id, e);
                false
            }
        }
    }

    /// 在设备的 `root` 目录下按文件名递归查找，返回找到的路径
    pub fn find_by_name(
        &self,
        device_id: &str,
        root: &str,
        name: &str,
    ) -> FastcapResult<Vec<String>> {
        let output = self.shell(device_id, &format!("find {} -name {}", root, name))?;
        Ok(non_empty_lines(&output))
    }
}
