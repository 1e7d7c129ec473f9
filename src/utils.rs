use regex::Regex;

use crate::error::{FastcapError, FastcapResult};

/// 去掉结尾的 `\n` / `\r\n` / `\r`
pub fn strip_line_endings(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

/// 从 `wm size` 之类的输出中解析最后一个 `宽x高` 记号
///
/// `Physical size: 1080x1920` 返回 `(1080, 1920)`。存在 `Override size` 行时取最后一行，
/// 也就是当前实际生效的分辨率。
pub fn parse_trailing_resolution(output: &str) -> FastcapResult<(u32, u32)> {
    let re = Regex::new(r"(\d+)x(\d+)\s*$")
        .map_err(|e| FastcapError::ParseError(format!("正则表达式错误: {}", e)))?;

    let caps = re
        .captures(output.trim_end())
        .ok_or_else(|| FastcapError::ParseError(format!("无法解析屏幕尺寸: {:?}", output)))?;

    let width = caps[1].parse::<u32>()?;
    let height = caps[2].parse::<u32>()?;
    if width == 0 || height == 0 {
        return Err(FastcapError::ParseError(format!("屏幕尺寸为零: {}x{}", width, height)));
    }
    Ok((width, height))
}

/// 把 `find` 的输出拆成非空行
pub fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
