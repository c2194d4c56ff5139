use clap::{Parser, ValueEnum};
use process_log::{ColorSelection, RegistryConfig, UnknownProcessPolicy};

/// 进程输出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresenterKind {
    /// 彩色终端输出
    Console,
    /// 通过 env_logger 输出
    Log,
    Silent,
}

/// Process Log - 进程生命周期日志服务
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// 监听端口
    #[arg(short, long, env = "PORT", default_value_t = 9999)]
    pub port: u16,

    /// 监听地址
    #[arg(short = 'a', long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// 进程事件的输出方式
    #[arg(long, env = "PROCESS_LOG_PRESENTER", value_enum, default_value_t = PresenterKind::Log)]
    pub presenter: PresenterKind,

    /// 对未知进程名的处理
    #[arg(long, env = "PROCESS_LOG_UNKNOWN", value_enum, default_value_t = UnknownProcessPolicy::Warn)]
    pub unknown_process: UnknownProcessPolicy,

    /// 未指定颜色时的选取方式
    #[arg(long, env = "PROCESS_LOG_COLORS", value_enum, default_value_t = ColorSelection::Random)]
    pub color_selection: ColorSelection,

    /// 日志关闭时仍保存 log_lines
    #[arg(long, env = "PROCESS_LOG_RETAIN_SUPPRESSED")]
    pub retain_suppressed_lines: bool,
}

impl CommandArgs {
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            unknown_process: self.unknown_process,
            color_selection: self.color_selection,
            retain_suppressed_lines: self.retain_suppressed_lines,
            ..RegistryConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CommandArgs::parse_from(["process-log"]);
        assert_eq!(args.port, 9999);
        assert_eq!(args.presenter, PresenterKind::Log);

        let config = args.registry_config();
        assert_eq!(config.unknown_process, UnknownProcessPolicy::Warn);
        assert!(!config.retain_suppressed_lines);
    }

    #[test]
    fn test_flags() {
        let args = CommandArgs::parse_from([
            "process-log",
            "--presenter",
            "console",
            "--color-selection",
            "round-robin",
            "--retain-suppressed-lines",
        ]);
        assert_eq!(args.presenter, PresenterKind::Console);
        assert_eq!(args.color_selection, ColorSelection::RoundRobin);
        assert!(args.registry_config().retain_suppressed_lines);
    }
}
