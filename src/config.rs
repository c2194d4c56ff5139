use clap::ValueEnum;
use serde::Deserialize;

/// 对未注册进程名的 log/end/toggle 调用的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnknownProcessPolicy {
    /// 静默忽略
    #[default]
    Ignore,
    /// 通过 log 输出警告，调用方不受影响
    Warn,
}

/// 未指定颜色时的选取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColorSelection {
    #[default]
    Random,
    /// 按调色板顺序轮转
    RoundRobin,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub unknown_process: UnknownProcessPolicy,
    pub color_selection: ColorSelection,
    /// 是否在 log 时记录调用位置
    pub capture_call_sites: bool,
    /// 日志关闭时是否仍然保存 log_lines
    pub retain_suppressed_lines: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            unknown_process: UnknownProcessPolicy::Ignore,
            color_selection: ColorSelection::Random,
            capture_call_sites: true,
            retain_suppressed_lines: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"unknown_process":"warn","color_selection":"round_robin"}"#).unwrap();

        assert_eq!(config.unknown_process, UnknownProcessPolicy::Warn);
        assert_eq!(config.color_selection, ColorSelection::RoundRobin);
        assert!(config.capture_call_sites);
        assert!(!config.retain_suppressed_lines);
    }
}
