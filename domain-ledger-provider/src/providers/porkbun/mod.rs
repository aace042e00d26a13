//! Porkbun JSON API v3 client

mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::ClientOptions;

pub(crate) use types::{
    Authenticated, CreateRecordBody, CreateRecordResponse, Envelope, ListAllBody,
    ListAllResponse, PingResponse,
};

pub(crate) const REGISTRAR_NAME: &str = "porkbun";

/// Porkbun registrar client
pub struct PorkbunClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) secret_api_key: String,
    pub(crate) base_url: String,
    pub(crate) list_max_retries: u32,
}

impl PorkbunClient {
    /// Builds a client with its own pooled HTTP connection set.
    pub fn new(api_key: String, secret_api_key: String, options: ClientOptions) -> Result<Self> {
        Ok(Self {
            client: create_http_client(REGISTRAR_NAME, &options)?,
            api_key,
            secret_api_key,
            base_url: options.base_url,
            list_max_retries: options.list_max_retries,
        })
    }
}

impl std::fmt::Debug for PorkbunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunClient")
            .field("base_url", &self.base_url)
            .field("list_max_retries", &self.list_max_retries)
            .finish_non_exhaustive()
    }
}
