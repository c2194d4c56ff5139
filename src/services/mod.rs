pub mod call_site;
pub mod clock;
pub mod presenter;

pub use call_site::{CallSite, CallSiteCapture, NoCallSites, TrackCallerCapture};
pub use clock::{Clock, ManualClock, SystemClock};
pub use presenter::{ConsolePresenter, LogPresenter, Presenter, RecordingPresenter, RenderEvent, SilentPresenter};
