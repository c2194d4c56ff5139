use actix_web::{web, HttpResponse, Responder};
use process_log::{CallSite, ColorToken, RegistryError, StartOptions};
use serde::Deserialize;

use crate::metrics::METRICS;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StartRequest {
    pub name: String,
    #[serde(default = "default_log")]
    pub log: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// 调色板名称、十六进制色值或 0-255
    #[serde(default)]
    pub color: Option<String>,
}

fn default_log() -> bool {
    true
}

#[derive(Deserialize)]
pub struct LogRequest {
    pub message: serde_json::Value,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub active: bool,
}

fn error_response(err: RegistryError) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "message": err.to_string()
    });

    match err {
        RegistryError::UnknownProcess(_) => HttpResponse::NotFound().json(body),
        RegistryError::EmptyName | RegistryError::InvalidColor(_) => HttpResponse::BadRequest().json(body),
    }
}

pub async fn start_process(
    data: web::Data<AppState>,
    req: web::Json<StartRequest>,
) -> impl Responder {
    let req = req.into_inner();

    let mut options = StartOptions::new().log(req.log);
    if let Some(description) = req.description {
        options = options.description(description);
    }
    if let Some(color) = req.color {
        match color.parse::<ColorToken>() {
            Ok(token) => options = options.color(token),
            Err(e) => return error_response(e),
        }
    }

    let color = match data.start(req.name.clone(), options) {
        Ok(handle) => handle.color().map(|c| c.to_string()),
        Err(e) => return error_response(e),
    };

    METRICS.record_start();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": format!("Process '{}' started", req.name),
        "color": color
    }))
}

pub async fn log_process(
    data: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<LogRequest>,
) -> impl Responder {
    let name = path.into_inner();
    let req = req.into_inner();

    let call_site = req.file.map(|file| {
        let line = req
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| CallSite::unknown().line);
        CallSite::new(file, line)
    });

    match data.log_with_call_site(&name, req.message, call_site) {
        Ok(true) => {
            METRICS.record_line();
            HttpResponse::Ok().json(serde_json::json!({
                "status": "success",
                "message": format!("Logged to '{}'", name)
            }))
        }
        Ok(false) => HttpResponse::Ok().json(serde_json::json!({
            "status": "suppressed",
            "message": format!("Logging for '{}' is disabled", name)
        })),
        Err(e) => error_response(e),
    }
}

pub async fn toggle_process(
    data: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ToggleRequest>,
) -> impl Responder {
    let name = path.into_inner();

    match data.try_toggle_logging(&name, req.active) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "message": format!("Logging for '{}' set to {}", name, req.active)
        })),
        Err(e) => error_response(e),
    }
}

pub async fn end_process(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let name = path.into_inner();

    match data.try_end(&name) {
        Ok(record) => {
            let duration_secs = record.duration().map(|d| d.as_secs_f64()).unwrap_or_default();
            METRICS.record_end(duration_secs);

            HttpResponse::Ok().json(serde_json::json!({
                "status": "success",
                "message": format!("Process '{}' ended", name),
                "duration_secs": duration_secs,
                "log_lines": record.log_lines
            }))
        }
        Err(e) => error_response(e),
    }
}

pub async fn list_processes(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.snapshots())
}

pub async fn get_process(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let name = path.into_inner();

    match data.snapshot(&name) {
        Some(snapshot) => HttpResponse::Ok().json(snapshot),
        None => error_response(RegistryError::UnknownProcess(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use process_log::{ProcessRegistry, RecordingPresenter, RenderEvent};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state() -> (AppState, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::new());
        let registry = ProcessRegistry::new().with_presenter(presenter.clone());
        (Arc::new(registry), presenter)
    }

    #[actix_web::test]
    async fn test_process_lifecycle_over_http() {
        let (state, presenter) = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/process/start")
            .set_json(json!({"name": "upload", "description": "Uploading files", "color": "teal"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["color"], "teal");

        let req = test::TestRequest::post()
            .uri("/api/process/upload/log")
            .set_json(json!({"message": "file 1", "file": "upload.sh", "line": 12}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/process/upload/log")
            .set_json(json!({"message": {"file": 2}}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/api/process/list").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list[0]["name"], "upload");
        assert_eq!(list[0]["log_lines"], json!(["file 1", {"file": 2}]));

        let req = test::TestRequest::delete().uri("/api/process/upload").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["duration_secs"].as_f64().unwrap() >= 0.0);
        assert!(state.is_empty());

        let events = presenter.events();
        assert_eq!(events.len(), 4);
        match &events[1] {
            RenderEvent::Log { call_site: Some(site), .. } => assert_eq!(site.to_string(), "/upload.sh:12"),
            other => panic!("unexpected event {:?}", other),
        }
        match &events[2] {
            RenderEvent::Log { call_site: Some(site), .. } => assert_eq!(site, &CallSite::unknown()),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_errors_map_to_status_codes() {
        let (state, _) = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/process/start")
            .set_json(json!({"name": ""}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/process/start")
            .set_json(json!({"name": "x", "color": "plaid"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/process/ghost/log")
            .set_json(json!({"message": "boo"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::put()
            .uri("/api/process/ghost/logging")
            .set_json(json!({"active": false}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::delete().uri("/api/process/ghost").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::get().uri("/api/process/ghost").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn test_toggle_silences_process() {
        let (state, presenter) = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::api::configure),
        )
        .await;

        state.start("batch", StartOptions::new()).unwrap();

        let req = test::TestRequest::put()
            .uri("/api/process/batch/logging")
            .set_json(json!({"active": false}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
        assert!(!state.is_active("batch"));

        let req = test::TestRequest::post()
            .uri("/api/process/batch/log")
            .set_json(json!({"message": "dropped"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "suppressed");
        assert!(state.snapshot("batch").unwrap().log_lines.is_empty());

        let req = test::TestRequest::delete().uri("/api/process/batch").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        // 只剩下 start 的输出
        assert_eq!(presenter.events().len(), 1);
    }
}
