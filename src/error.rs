use thiserror::Error;

/// Why a single sample produced no words. Never fatal for the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid UTF-8: {0}")]
    Decode(String),

    #[error("no <{tag} id=\"{id}\"> element in response")]
    ElementNotFound { tag: String, id: String },

    #[error("invalid selector '{0}'")]
    Selector(String),

    #[error("sample panicked: {0}")]
    Panicked(String),
}

impl From<reqwest::Error> for SampleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SampleError::Timeout(err.to_string());
        }
        SampleError::Network(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for SampleError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SampleError::Decode(err.to_string())
    }
}

impl SampleError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SampleError::Network(_) => "network",
            SampleError::Timeout(_) => "timeout",
            SampleError::Status { .. } => "status",
            SampleError::Decode(_) => "decode",
            SampleError::ElementNotFound { .. } => "element_not_found",
            SampleError::Selector(_) => "selector",
            SampleError::Panicked(_) => "panic",
        }
    }
}
