use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("process name must not be empty")]
    EmptyName,

    #[error("process '{0}' is not running")]
    UnknownProcess(String),

    #[error("invalid color '{0}', expected a palette name, hex code or 0-255")]
    InvalidColor(String),
}
