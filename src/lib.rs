//! # process-log
//!
//! 按名称记录“进程”（一段有起止的逻辑工作，例如一次上传或一个批处理任务）
//! 的开始、过程日志和结束耗时。每个进程的输出可单独开关，并以不同颜色区分。
//!
//! ```no_run
//! use process_log::{ProcessRegistry, StartOptions};
//!
//! let registry = ProcessRegistry::new();
//! registry
//!     .start("upload", StartOptions::new().description("Uploading files"))?
//!     .log("file 1")
//!     .log("file 2")
//!     .end();
//! # Ok::<(), process_log::RegistryError>(())
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod models;
pub mod registry;
pub mod services;

pub use config::{ColorSelection, RegistryConfig, UnknownProcessPolicy};
pub use error::RegistryError;
pub use global::{end, global, log, start, toggle_logging, PROCESS_LOG};
pub use models::{ColorToken, Message, ProcessRecord, ProcessSnapshot, StartOptions, PALETTE};
pub use registry::{ProcessHandle, ProcessRegistry};
pub use services::{
    CallSite, CallSiteCapture, Clock, ConsolePresenter, LogPresenter, ManualClock, NoCallSites, Presenter,
    RecordingPresenter, RenderEvent, SilentPresenter, SystemClock, TrackCallerCapture,
};
