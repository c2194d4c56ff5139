use rand::Rng;
use std::collections::HashMap;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::config::{ColorSelection, RegistryConfig, UnknownProcessPolicy};
use crate::error::RegistryError;
use crate::models::{ColorToken, Message, ProcessRecord, ProcessSnapshot, StartOptions, PALETTE};
use crate::services::call_site::{CallSite, CallSiteCapture, TrackCallerCapture};
use crate::services::clock::{Clock, SystemClock};
use crate::services::presenter::{ConsolePresenter, Presenter};

/// 进程名 -> 活跃进程记录
///
/// 所有操作都是同步的；内部用一把互斥锁保护映射表，
/// 输出（render）在释放锁之后进行。
pub struct ProcessRegistry {
    processes: Mutex<HashMap<String, ProcessRecord>>,
    presenter: RwLock<Arc<dyn Presenter>>,
    call_sites: Arc<dyn CallSiteCapture>,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
    next_color: AtomicUsize,
}

/// 绑定到某个进程名的句柄，`log` 可以链式调用
#[derive(Clone)]
pub struct ProcessHandle<'r> {
    registry: &'r ProcessRegistry,
    name: String,
    /// 创建句柄时该进程记录的颜色
    color: Option<ColorToken>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            processes: Mutex::new(HashMap::new()),
            presenter: RwLock::new(Arc::new(ConsolePresenter)),
            call_sites: Arc::new(TrackCallerCapture),
            clock: Arc::new(SystemClock),
            config,
            next_color: AtomicUsize::new(0),
        }
    }

    pub fn with_presenter(self, presenter: Arc<dyn Presenter>) -> Self {
        self.set_presenter(presenter);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_call_site_capture(mut self, capture: Arc<dyn CallSiteCapture>) -> Self {
        self.call_sites = capture;
        self
    }

    /// 替换输出方式（全局实例也可以使用）
    pub fn set_presenter(&self, presenter: Arc<dyn Presenter>) {
        let mut guard = self.presenter.write().unwrap_or_else(|e| e.into_inner());
        *guard = presenter;
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ProcessRecord>> {
        // 锁中毒时继续使用：日志不能因为别处的 panic 而停止
        self.processes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn presenter(&self) -> Arc<dyn Presenter> {
        self.presenter.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn pick_color(&self) -> ColorToken {
        let index = match self.config.color_selection {
            ColorSelection::Random => rand::rng().random_range(0..PALETTE.len()),
            ColorSelection::RoundRobin => self.next_color.fetch_add(1, Ordering::Relaxed) % PALETTE.len(),
        };
        PALETTE[index]
    }

    fn unknown(&self, operation: &str, name: &str) -> RegistryError {
        if self.config.unknown_process == UnknownProcessPolicy::Warn {
            log::warn!("⚠ {}: process '{}' is not running, ignoring", operation, name);
        }
        RegistryError::UnknownProcess(name.to_string())
    }

    /// 启动一个进程；同名的活跃进程会被替换
    pub fn start(&self, name: impl Into<String>, options: StartOptions) -> Result<ProcessHandle<'_>, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let color = options.color.unwrap_or_else(|| self.pick_color());
        let record = ProcessRecord::new(name.clone(), options, color, self.clock.now());
        let active = record.active;
        let description = record.description.clone();

        if self.lock().insert(name.clone(), record).is_some() {
            log::debug!("Process '{}' restarted, previous record dropped", name);
        }

        if active {
            self.presenter().render_start(&name, color, description.as_deref());
        }

        Ok(ProcessHandle {
            registry: self,
            name,
            color: Some(color),
        })
    }

    /// 为进程追加一条日志；进程不存在时不做任何事
    #[track_caller]
    pub fn log(&self, name: &str, message: impl Into<Message>) {
        let location = Location::caller();
        let _ = self.log_at(name, message.into(), Some(location), None);
    }

    #[track_caller]
    pub fn try_log(&self, name: &str, message: impl Into<Message>) -> Result<(), RegistryError> {
        let location = Location::caller();
        self.log_at(name, message.into(), Some(location), None).map(|_| ())
    }

    /// 由调用方直接提供调用位置（例如 HTTP 请求）
    ///
    /// 返回 `Ok(false)` 表示进程存在但日志已关闭，没有输出。
    pub fn log_with_call_site(
        &self,
        name: &str,
        message: impl Into<Message>,
        call_site: Option<CallSite>,
    ) -> Result<bool, RegistryError> {
        self.log_at(name, message.into(), None, Some(call_site.unwrap_or_else(CallSite::unknown)))
    }

    fn log_at(
        &self,
        name: &str,
        message: Message,
        location: Option<&'static Location<'static>>,
        explicit_site: Option<CallSite>,
    ) -> Result<bool, RegistryError> {
        let color = {
            let mut processes = self.lock();
            match processes.get_mut(name) {
                Some(record) if record.active => {
                    record.log_lines.push(message.clone());
                    Some(record.color)
                }
                Some(record) => {
                    if self.config.retain_suppressed_lines {
                        record.log_lines.push(message);
                    }
                    return Ok(false);
                }
                None => None,
            }
        };
        // 警告在释放锁之后输出，log 后端可以再访问注册表
        let color = match color {
            Some(color) => color,
            None => return Err(self.unknown("log", name)),
        };

        let call_site = match explicit_site {
            Some(site) => Some(site),
            None if self.config.capture_call_sites => {
                Some(location.and_then(|l| self.call_sites.capture(l)).unwrap_or_else(CallSite::unknown))
            }
            None => None,
        };

        self.presenter().render_log(name, color, &message, call_site.as_ref());
        Ok(true)
    }

    /// 结束进程并返回被移除的记录
    pub fn end(&self, name: &str) -> Option<ProcessRecord> {
        self.try_end(name).ok()
    }

    pub fn try_end(&self, name: &str) -> Result<ProcessRecord, RegistryError> {
        let removed = self.lock().remove(name);
        let mut record = match removed {
            Some(record) => record,
            None => return Err(self.unknown("end", name)),
        };

        let now = self.clock.now();
        record.ended_at = Some(now);
        if record.active {
            let duration = record.elapsed_at(now);
            self.presenter().render_end(name, record.color, duration.as_secs_f64());
        }

        Ok(record)
    }

    /// 开启或关闭某个活跃进程的输出
    pub fn toggle_logging(&self, name: &str, active: bool) {
        let _ = self.try_toggle_logging(name, active);
    }

    pub fn try_toggle_logging(&self, name: &str, active: bool) -> Result<(), RegistryError> {
        let found = match self.lock().get_mut(name) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        };

        if found {
            Ok(())
        } else {
            Err(self.unknown("toggle_logging", name))
        }
    }

    /// 获取已启动进程的句柄
    pub fn handle(&self, name: impl Into<String>) -> ProcessHandle<'_> {
        let name = name.into();
        let color = self.lock().get(&name).map(|r| r.color);
        ProcessHandle {
            registry: self,
            name,
            color,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// 进程是否存在且处于输出状态
    pub fn is_active(&self, name: &str) -> bool {
        self.lock().get(name).map(|r| r.active).unwrap_or(false)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self, name: &str) -> Option<ProcessSnapshot> {
        let now = self.clock.now();
        self.lock().get(name).map(|r| r.snapshot(now))
    }

    pub fn snapshots(&self) -> Vec<ProcessSnapshot> {
        let now = self.clock.now();
        let mut list: Vec<ProcessSnapshot> = self.lock().values().map(|r| r.snapshot(now)).collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> ProcessHandle<'r> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `start` 选定的颜色；按名称获取时进程不存在则为 None
    pub fn color(&self) -> Option<ColorToken> {
        self.color
    }

    /// 进程是否仍在注册表中
    pub fn is_live(&self) -> bool {
        self.registry.contains(&self.name)
    }

    #[track_caller]
    pub fn log(&self, message: impl Into<Message>) -> &Self {
        self.registry.log(&self.name, message);
        self
    }

    pub fn toggle_logging(&self, active: bool) -> &Self {
        self.registry.toggle_logging(&self.name, active);
        self
    }

    pub fn end(&self) -> Option<ProcessRecord> {
        self.registry.end(&self.name)
    }
}
