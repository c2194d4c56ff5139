use process_log::{Message, RecordingPresenter, StartOptions};
use std::sync::Arc;

// 全局注册表在整个测试二进制中共享，所有断言放在一个测试里
#[test]
fn global_registry_round_trip() {
    let presenter = Arc::new(RecordingPresenter::new());
    process_log::global().set_presenter(presenter.clone());

    process_log::start("datasource", StartOptions::new().description("Fetches templates")).unwrap();
    process_log::log("datasource", "Creating data source");
    process_log::toggle_logging("datasource", false);
    process_log::log("datasource", "hidden");
    process_log::toggle_logging("datasource", true);
    let record = process_log::end("datasource").unwrap();

    assert_eq!(record.log_lines, vec![Message::from("Creating data source")]);
    assert!(record.duration().is_some());
    assert!(!process_log::PROCESS_LOG.contains("datasource"));
    assert_eq!(presenter.events_for("datasource").len(), 3);

    // 已结束的进程
    process_log::log("datasource", "ignored");
    assert!(process_log::end("datasource").is_none());
    assert_eq!(presenter.events().len(), 3);
}
