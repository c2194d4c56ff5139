pub mod process;
pub mod metrics;

pub use process::{start_process, log_process, toggle_process, end_process, list_processes, get_process};
pub use metrics::get_metrics;

use actix_web::{web, HttpResponse, Responder};

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

/// 注册所有路由（/list 必须在 /{name} 之前）
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/process/start", web::post().to(start_process))
        .route("/api/process/list", web::get().to(list_processes))
        .route("/api/process/{name}", web::get().to(get_process))
        .route("/api/process/{name}", web::delete().to(end_process))
        .route("/api/process/{name}/log", web::post().to(log_process))
        .route("/api/process/{name}/logging", web::put().to(toggle_process))
        .route("/metrics", web::get().to(get_metrics))
        .route("/health", web::get().to(health));
}
