pub mod color;
pub mod message;
pub mod process;

pub use color::{ColorToken, PALETTE};
pub use message::Message;
pub use process::{ProcessRecord, ProcessSnapshot, StartOptions};
