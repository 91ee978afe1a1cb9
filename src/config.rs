use anyhow::{Context as _, Result};

/// Upper bound on the serialized ledger, before JSON escaping. Matches
/// the historical 8 KiB limit of the stored blob.
pub const DEFAULT_MAX_CONTENT_LEN: usize = 8192;

/// Everything the remote store client needs to reach the ledger.
/// Supplied by the caller, never compiled in.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Full URL of the gist resource, e.g. `https://api.github.com/gists/<id>`.
    pub api_url: String,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Name of the file inside the gist that holds the ledger.
    pub file_name: String,
    /// Reject uploads whose ledger text exceeds this many bytes.
    pub max_content_len: usize,
}

impl StoreConfig {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
            file_name: file_name.into(),
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
        }
    }

    pub fn with_max_content_len(mut self, max_content_len: usize) -> Self {
        self.max_content_len = max_content_len;
        self
    }

    /// Reads the configuration from `GISTBANK_API_URL`, `GISTBANK_TOKEN`
    /// and `GISTBANK_FILE`.
    pub fn from_env() -> Result<Self> {
        let api_url = require_env("GISTBANK_API_URL")?;
        let token = require_env("GISTBANK_TOKEN")?;
        let file_name = require_env("GISTBANK_FILE")?;
        Ok(Self::new(api_url, token, file_name))
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("Missing environment variable {name}"))
}
