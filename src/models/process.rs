use serde::Serialize;
use std::time::{Duration, Instant};

use crate::models::{ColorToken, Message};

/// 启动进程时的选项
#[derive(Debug, Clone)]
pub struct StartOptions {
    /// 是否输出该进程的日志（默认 true）
    pub log: bool,
    /// 启动时显示一次的描述
    pub description: Option<String>,
    /// 指定颜色；为空时从调色板中选取
    pub color: Option<ColorToken>,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            log: true,
            description: None,
            color: None,
        }
    }
}

impl StartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 关闭日志输出的选项
    pub fn silent() -> Self {
        Self::default().log(false)
    }

    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: ColorToken) -> Self {
        self.color = Some(color);
        self
    }
}

/// 一个正在运行的进程记录
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    /// 进程名称（在活跃进程中唯一）
    pub name: String,
    /// 为 false 时 log/end 不输出
    pub active: bool,
    /// 启动时间
    pub started_at: Instant,
    /// 结束时间，只有被 end 移除的记录才有
    pub ended_at: Option<Instant>,
    pub description: Option<String>,
    pub color: ColorToken,
    /// 已记录的日志
    pub log_lines: Vec<Message>,
}

impl ProcessRecord {
    pub fn new(name: String, options: StartOptions, color: ColorToken, started_at: Instant) -> Self {
        Self {
            name,
            active: options.log,
            started_at,
            ended_at: None,
            description: options.description,
            color,
            log_lines: Vec::new(),
        }
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// 从启动到结束的耗时；仍在运行时为 None
    pub fn duration(&self) -> Option<Duration> {
        self.ended_at.map(|end| self.elapsed_at(end))
    }

    pub fn snapshot(&self, now: Instant) -> ProcessSnapshot {
        ProcessSnapshot {
            name: self.name.clone(),
            active: self.active,
            description: self.description.clone(),
            color: self.color,
            elapsed_secs: self.elapsed_at(now).as_secs_f64(),
            log_lines: self.log_lines.clone(),
        }
    }
}

/// 进程记录的只读快照
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSnapshot {
    pub name: String,
    pub active: bool,
    pub description: Option<String>,
    pub color: ColorToken,
    pub elapsed_secs: f64,
    pub log_lines: Vec<Message>,
}
