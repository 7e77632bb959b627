use thiserror::Error;

pub type PaneResult<T> = Result<T, PaneError>;

#[derive(Debug, Error)]
pub enum PaneError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("drawing surface failure during {operation}: {message}")]
    Surface {
        operation: &'static str,
        message: String,
    },
}

impl PaneError {
    #[must_use]
    pub fn surface(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Surface {
            operation,
            message: message.into(),
        }
    }
}
