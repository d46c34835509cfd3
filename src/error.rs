use serde::de::DeserializeOwned;
use std::time::Duration;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors surfaced by the client.
///
/// Every failure in the request pipeline maps to exactly one variant and is
/// returned to the caller as-is; nothing is retried or swallowed here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The rate limiter could not admit the request within the caller's
    /// timeout. Carries the wait the caller would have had to sit out.
    #[error("rate limit exceeded, retry in {:.2}s", .wait.as_secs_f64())]
    RateLimitExceeded { wait: Duration },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The response body does not match the declared response shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Connection-level failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error payload the API attaches to non-success responses,
/// typically `{"error": true, "reason": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    reason: Option<String>,
}

/// Classifies a non-success response into [`Error::Http`].
///
/// The `reason` field of a JSON error body becomes the message. Bodies that
/// are not JSON objects fall back to their raw text, empty bodies to a
/// fixed placeholder. The numeric status always rides along.
pub(crate) fn http_error(status: u16, body: &[u8]) -> Error {
    let reason = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.reason.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            if text.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                text.into_owned()
            }
        }
    };
    Error::Http { status, reason }
}

/// Decodes a success body into the declared response shape, or fails with
/// [`Error::Decode`]. Never substitutes defaults for malformed fields.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(Error::Decode)
}
