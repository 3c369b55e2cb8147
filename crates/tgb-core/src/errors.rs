/// Core error type.
///
/// The HTTP adapter maps its failures into this type so callers can tell
/// local parsing problems apart from remote API refusals.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("malformed update payload: {0}")]
    MalformedPayload(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response body from the Bot API, passed through verbatim.
    /// No status classification is done here; the caller inspects the body.
    #[error("telegram api error: {0}")]
    Api(serde_json::Value),
}

pub type Result<T> = std::result::Result<T, Error>;
