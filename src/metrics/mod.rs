use prometheus::{
    Encoder, CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    register_counter_vec_with_registry, register_gauge_with_registry, register_histogram_vec_with_registry,
};
use lazy_static::lazy_static;
use std::sync::Arc;
use sysinfo::System;

pub struct MetricsRegistry {
    registry: Registry,
    hostname: String,

    // Gauge metrics
    pub active_processes: Gauge,

    // Counter metrics
    pub started_total: CounterVec,
    pub lines_total: CounterVec,
    pub ended_total: CounterVec,

    // Histogram metrics
    pub duration_seconds: HistogramVec,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let registry = Registry::new();

        // 进程名是任意的客户端输入，不作为标签，避免序列无限增长
        let common_labels = &["hostname"];

        let active_processes = register_gauge_with_registry!(
            Opts::new("process_log_active_processes", "Number of processes currently running"),
            registry
        ).unwrap();

        let started_total = register_counter_vec_with_registry!(
            Opts::new("process_log_started_total", "Processes started"),
            common_labels,
            registry
        ).unwrap();

        let lines_total = register_counter_vec_with_registry!(
            Opts::new("process_log_lines_total", "Log lines accepted for a process"),
            common_labels,
            registry
        ).unwrap();

        let ended_total = register_counter_vec_with_registry!(
            Opts::new("process_log_ended_total", "Processes ended"),
            common_labels,
            registry
        ).unwrap();

        let duration_seconds = register_histogram_vec_with_registry!(
            HistogramOpts::new("process_log_duration_seconds", "Process duration from start to end"),
            common_labels,
            registry
        ).unwrap();

        Self {
            registry,
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            active_processes,
            started_total,
            lines_total,
            ended_total,
            duration_seconds,
        }
    }

    pub fn record_start(&self) {
        self.started_total.with_label_values(&[self.hostname.as_str()]).inc();
    }

    pub fn record_line(&self) {
        self.lines_total.with_label_values(&[self.hostname.as_str()]).inc();
    }

    pub fn record_end(&self, duration_secs: f64) {
        self.ended_total.with_label_values(&[self.hostname.as_str()]).inc();
        self.duration_seconds
            .with_label_values(&[self.hostname.as_str()])
            .observe(duration_secs);
    }

    pub fn render(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

lazy_static! {
    pub static ref METRICS: Arc<MetricsRegistry> = Arc::new(MetricsRegistry::new());
}
