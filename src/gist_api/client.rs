use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;

use super::{RemoteStore, TransportError};

const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// JSON envelope the gist API wraps file content in, for both the GET
/// response and the PATCH request body. Unknown response fields are
/// ignored.
#[derive(Serialize, Deserialize)]
struct FilesEnvelope {
    files: HashMap<String, FileEntry>,
}

#[derive(Serialize, Deserialize)]
struct FileEntry {
    content: String,
}

pub struct GistClient {
    config: StoreConfig,
    http: reqwest::Client,
}

impl GistClient {
    pub fn new(config: StoreConfig) -> GistClient {
        GistClient {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.config.token)
    }
}

fn extract_content(envelope: FilesEnvelope, file_name: &str) -> Result<String, TransportError> {
    envelope
        .files
        .into_iter()
        .find(|(name, _)| name == file_name)
        .map(|(_, entry)| entry.content)
        .ok_or_else(|| TransportError::Format(format!("file {file_name:?} not present in gist")))
}

impl RemoteStore for GistClient {
    async fn fetch(&self) -> Result<String, TransportError> {
        log::info!("Fetching ledger...");

        let response = self
            .http
            .get(&self.config.api_url)
            .header(AUTHORIZATION, self.auth_header())
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await?
            .error_for_status()?;
        let envelope: FilesEnvelope = response
            .json()
            .await
            .map_err(|err| TransportError::Format(format!("undecodable gist envelope: {err}")))?;
        let content = extract_content(envelope, &self.config.file_name)?;

        log::info!("Fetching ledger...done");
        Ok(content)
    }

    async fn replace(&self, content: &str) -> Result<(), TransportError> {
        // Checked before anything goes on the wire so an oversized
        // ledger is never truncated into the store.
        if content.len() > self.config.max_content_len {
            return Err(TransportError::TooLarge {
                len: content.len(),
                max: self.config.max_content_len,
            });
        }

        log::info!("Uploading ledger...");

        // serde_json escapes backslashes, quotes and newlines in the
        // content so it embeds in the envelope's quoted-string syntax.
        let body = FilesEnvelope {
            files: HashMap::from([(
                self.config.file_name.clone(),
                FileEntry {
                    content: content.to_string(),
                },
            )]),
        };
        let response = self
            .http
            .patch(&self.config.api_url)
            .header(AUTHORIZATION, self.auth_header())
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(&body)
            .send()
            .await?;
        if let Err(err) = response.error_for_status_ref() {
            log::warn!("Remote store rejected the upload: {err}");
            return Err(TransportError::Network(err));
        }

        log::info!("Uploading ledger...done");
        Ok(())
    }
}
