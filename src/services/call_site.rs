use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// 调用 log 的源码位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub file: String,
    pub line: String,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: line.into(),
        }
    }

    /// 无法获取位置时使用的占位值
    pub fn unknown() -> Self {
        Self::new("unknown file", "unknown line")
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}:{}", self.file, self.line)
    }
}

/// 获取调用位置的能力，可在测试中替换
pub trait CallSiteCapture: Send + Sync {
    fn capture(&self, location: &'static Location<'static>) -> Option<CallSite>;
}

/// 基于 `#[track_caller]` 的实现，只保留文件名
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackCallerCapture;

impl CallSiteCapture for TrackCallerCapture {
    fn capture(&self, location: &'static Location<'static>) -> Option<CallSite> {
        let file = location
            .file()
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())?;

        Some(CallSite::new(file, location.line().to_string()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallSites;

impl CallSiteCapture for NoCallSites {
    fn capture(&self, _location: &'static Location<'static>) -> Option<CallSite> {
        None
    }
}
