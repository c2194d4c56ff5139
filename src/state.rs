use process_log::{ConsolePresenter, LogPresenter, Presenter, ProcessRegistry, RegistryConfig, SilentPresenter};
use std::sync::Arc;

use crate::cli::PresenterKind;

pub type AppState = Arc<ProcessRegistry>;

pub fn new_state(config: RegistryConfig, presenter: PresenterKind) -> AppState {
    let presenter: Arc<dyn Presenter> = match presenter {
        PresenterKind::Console => Arc::new(ConsolePresenter),
        PresenterKind::Log => Arc::new(LogPresenter),
        PresenterKind::Silent => Arc::new(SilentPresenter),
    };

    Arc::new(ProcessRegistry::with_config(config).with_presenter(presenter))
}
