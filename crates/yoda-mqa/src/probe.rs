//! Remote resource probes used by the network-backed metric rules

use crate::{MqaError, MqaResult};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::Client;

const RDF_XML: &str = "application/rdf+xml";

/// Access to the resources a metadata document links to
#[async_trait]
pub trait LinkChecker: Send + Sync {
    /// Status code of an HTTP HEAD request to `url`. Redirects are not followed.
    async fn head(&self, url: &str) -> MqaResult<u16>;

    /// Body of `url`, requested as RDF/XML
    async fn fetch_rdf(&self, url: &str) -> MqaResult<String>;
}

/// `LinkChecker` backed by `reqwest` with the client's default timeouts
#[derive(Debug, Clone)]
pub struct HttpLinkChecker {
    probe_client: Client,
    fetch_client: Client,
}

impl HttpLinkChecker {
    pub fn new() -> MqaResult<Self> {
        let probe_client = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self {
            probe_client,
            fetch_client: Client::new(),
        })
    }
}

#[async_trait]
impl LinkChecker for HttpLinkChecker {
    async fn head(&self, url: &str) -> MqaResult<u16> {
        let response = self.probe_client.head(url).send().await?;
        Ok(response.status().as_u16())
    }

    async fn fetch_rdf(&self, url: &str) -> MqaResult<String> {
        let response = self
            .fetch_client
            .get(url)
            .header(ACCEPT, RDF_XML)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MqaError::RemoteStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
