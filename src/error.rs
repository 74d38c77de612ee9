use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppreciateError {
    #[error("unhandled UI message: {0}")]
    Bridge(#[source] serde_json::Error),
    #[error("malformed setting {key}: {source}")]
    Setting {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed wearable submission: {0}")]
    Wearable(#[source] serde_json::Error),
    #[error("could not encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AppreciateError>;
