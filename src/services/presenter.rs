use console::{style, Style};
use std::sync::Mutex;

use crate::models::{ColorToken, Message};
use crate::services::call_site::CallSite;

const LINES: &str = "----------";

/// 负责把进程事件输出到某处（终端、log、内存……）
///
/// 由注册表同步调用，实现不得 panic 或返回错误。
pub trait Presenter: Send + Sync {
    fn render_start(&self, name: &str, color: ColorToken, description: Option<&str>);

    fn render_log(&self, name: &str, color: ColorToken, message: &Message, call_site: Option<&CallSite>);

    fn render_end(&self, name: &str, color: ColorToken, duration_secs: f64);
}

/// 彩色终端输出
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    fn paint(color: ColorToken) -> Style {
        Style::new().color256(color.ansi256())
    }

    pub fn format_start(name: &str, color: ColorToken) -> String {
        format!(
            "{} {} {} {}",
            style(format!("{} START -", LINES)).green().bold(),
            Self::paint(color).apply_to(name),
            style(LINES).green().bold(),
            style("- Process logger.").dim()
        )
    }

    pub fn format_description(description: &str) -> String {
        style(format!("Description: {}", description)).dim().to_string()
    }

    pub fn format_log(name: &str, color: ColorToken, message: &Message, call_site: Option<&CallSite>) -> String {
        let mut line = format!("{} {}", Self::paint(color).apply_to(format!("• {} -", name)), message);
        if let Some(site) = call_site {
            line.push(' ');
            line.push_str(&style(site).dim().to_string());
        }
        line
    }

    pub fn format_end(name: &str, color: ColorToken, duration_secs: f64) -> String {
        format!(
            "{} {} {} {}",
            style(format!("{} END -", LINES)).green().bold(),
            Self::paint(color).apply_to(name),
            style(LINES).green().bold(),
            style(format!("- Completed in {} seconds.", duration_secs)).dim()
        )
    }
}

impl Presenter for ConsolePresenter {
    fn render_start(&self, name: &str, color: ColorToken, description: Option<&str>) {
        println!("{}", Self::format_start(name, color));
        if let Some(description) = description {
            println!("{}", Self::format_description(description));
        }
    }

    fn render_log(&self, name: &str, color: ColorToken, message: &Message, call_site: Option<&CallSite>) {
        println!("{}", Self::format_log(name, color, message, call_site));
    }

    fn render_end(&self, name: &str, color: ColorToken, duration_secs: f64) {
        println!("{}", Self::format_end(name, color, duration_secs));
    }
}

/// 通过 `log` 门面输出，交给 env_logger 等后端处理
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn render_start(&self, name: &str, color: ColorToken, description: Option<&str>) {
        match description {
            Some(d) => log::info!(target: "process_log", "▶ START {} [{}] - {}", name, color, d),
            None => log::info!(target: "process_log", "▶ START {} [{}]", name, color),
        }
    }

    fn render_log(&self, name: &str, color: ColorToken, message: &Message, call_site: Option<&CallSite>) {
        match call_site {
            Some(site) => log::info!(target: "process_log", "• {} [{}] - {} {}", name, color, message, site),
            None => log::info!(target: "process_log", "• {} [{}] - {}", name, color, message),
        }
    }

    fn render_end(&self, name: &str, color: ColorToken, duration_secs: f64) {
        log::info!(target: "process_log", "■ END {} [{}] - Completed in {} seconds", name, color, duration_secs);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn render_start(&self, _name: &str, _color: ColorToken, _description: Option<&str>) {}

    fn render_log(&self, _name: &str, _color: ColorToken, _message: &Message, _call_site: Option<&CallSite>) {}

    fn render_end(&self, _name: &str, _color: ColorToken, _duration_secs: f64) {}
}

/// 一次输出
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Start {
        name: String,
        color: ColorToken,
        description: Option<String>,
    },
    Log {
        name: String,
        color: ColorToken,
        message: Message,
        call_site: Option<CallSite>,
    },
    End {
        name: String,
        color: ColorToken,
        duration_secs: f64,
    },
}

impl RenderEvent {
    pub fn name(&self) -> &str {
        match self {
            RenderEvent::Start { name, .. } | RenderEvent::Log { name, .. } | RenderEvent::End { name, .. } => name,
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            RenderEvent::Start { color, .. } | RenderEvent::Log { color, .. } | RenderEvent::End { color, .. } => *color,
        }
    }
}

/// 把所有输出保存在内存中
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn events_for(&self, name: &str) -> Vec<RenderEvent> {
        self.events().into_iter().filter(|e| e.name() == name).collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn push(&self, event: RenderEvent) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn render_start(&self, name: &str, color: ColorToken, description: Option<&str>) {
        self.push(RenderEvent::Start {
            name: name.to_string(),
            color,
            description: description.map(str::to_string),
        });
    }

    fn render_log(&self, name: &str, color: ColorToken, message: &Message, call_site: Option<&CallSite>) {
        self.push(RenderEvent::Log {
            name: name.to_string(),
            color,
            message: message.clone(),
            call_site: call_site.cloned(),
        });
    }

    fn render_end(&self, name: &str, color: ColorToken, duration_secs: f64) {
        self.push(RenderEvent::End {
            name: name.to_string(),
            color,
            duration_secs,
        });
    }
}
