use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("invalid recognized word at index {index}: {message}")]
    InvalidWord { index: usize, message: String },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no timing source available for chunk {chunk_index}")]
    NoTimingSource { chunk_index: usize },
}

impl CaptionError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_word(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidWord {
            index,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }
}
