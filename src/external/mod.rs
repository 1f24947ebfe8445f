pub mod generative;
pub mod nutrition;

use thiserror::Error;

/// Failure of an outbound third-party API call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("unexpected {service} payload: {detail}")]
    Payload {
        service: &'static str,
        detail: String,
    },
}
