use thiserror::Error;

/// fastcap 操作相关的错误类型
#[derive(Debug, Error)]
pub enum FastcapError {
    /// 设备不可达（构造设备句柄的前置条件，不重试）
    #[error("设备不可达: {0}")]
    DeviceUnreachable(String),

    /// 设备属性检测失败（为空或格式错误）
    #[error("设备属性检测失败: {0}")]
    DetectionError(String),

    /// 下载产物失败
    #[error("下载失败 ({url}): {message}")]
    FetchError { url: String, message: String },

    /// ADB 命令返回非零状态
    #[error("ADB 传输错误: {0}")]
    TransportError(String),

    /// 本地文件操作错误
    #[error("文件操作错误: {0}")]
    FileError(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),
}

impl FastcapError {
    pub(crate) fn fetch(url: &str, message: impl Into<String>) -> Self {
        FastcapError::FetchError {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for FastcapError {
    fn from(error: std::io::Error) -> Self {
        FastcapError::FileError(error.to_string())
    }
}

impl From<std::num::ParseIntError> for FastcapError {
    fn from(error: std::num::ParseIntError) -> Self {
        FastcapError::ParseError(format!("数字解析错误: {}", error))
    }
}

pub type FastcapResult<T> = Result<T, FastcapError>;
