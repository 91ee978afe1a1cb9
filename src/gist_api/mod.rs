mod client;

pub use client::GistClient;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("remote store request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("remote store response malformed: {0}")]
    Format(String),

    #[error("ledger is {len} bytes, limit is {max}")]
    TooLarge { len: usize, max: usize },
}

/// The remote ledger blob: read it whole, replace it whole. Implemented
/// by [`GistClient`] for the gist API and by in-memory fakes in tests.
///
/// Both calls run to completion or fail; there are no retries and no
/// mid-flight cancellation. Callers that want a timeout wrap the call.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn fetch(&self) -> Result<String, TransportError>;
    async fn replace(&self, content: &str) -> Result<(), TransportError>;
}
