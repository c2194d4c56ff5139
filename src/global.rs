//! 进程级默认注册表，适合“启动后不管”的用法，无需到处传递句柄。
//!
//! ```no_run
//! use process_log::StartOptions;
//!
//! process_log::start("datasource", StartOptions::new().description("Fetches templates")).ok();
//! process_log::log("datasource", "SUCCESS - Fetched data source template");
//! process_log::end("datasource");
//! ```

use lazy_static::lazy_static;

use crate::error::RegistryError;
use crate::models::{Message, ProcessRecord, StartOptions};
use crate::registry::{ProcessHandle, ProcessRegistry};

lazy_static! {
    /// 首次访问时以空表初始化，随程序存活，不做销毁
    pub static ref PROCESS_LOG: ProcessRegistry = ProcessRegistry::new();
}

pub fn global() -> &'static ProcessRegistry {
    &PROCESS_LOG
}

pub fn start(name: impl Into<String>, options: StartOptions) -> Result<ProcessHandle<'static>, RegistryError> {
    global().start(name, options)
}

#[track_caller]
pub fn log(name: &str, message: impl Into<Message>) {
    global().log(name, message)
}

pub fn end(name: &str) -> Option<ProcessRecord> {
    global().end(name)
}

pub fn toggle_logging(name: &str, active: bool) {
    global().toggle_logging(name, active)
}
