//! Error taxonomy shared by parsing, building and playback.

use alloc::string::{String, ToString};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or unknown field or controller kind in an animation document.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pattern failed while writing a frame.
    #[error("generator error: {0}")]
    Generator(String),

    /// Shutdown was requested; never suppressed by a safe guard.
    #[error("interrupted")]
    Interrupted,
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn generator(msg: impl Into<String>) -> Self {
        Self::Generator(msg.into())
    }

    pub const fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}
