//! EDP SHACL validator client

use crate::report::MetricReport;
use crate::{MqaError, MqaResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Public EDP metadata quality SHACL endpoint
pub const DEFAULT_VALIDATOR_URL: &str = "https://data.europa.eu/api/mqa/shacl/validation/report";

/// Weight awarded when the document conforms
pub const EDP_WEIGHT: u32 = 30;

const CONFORMS_KEYS: [&str; 2] = ["conforms", "sh:conforms"];

/// Validates a whole metadata document and scores the verdict
#[async_trait]
pub trait DocumentValidator: Send + Sync {
    async fn validate(&self, document: &str) -> MqaResult<MetricReport>;
}

/// Client of the remote EDP SHACL validation service
#[derive(Debug, Clone)]
pub struct EdpValidator {
    client: Client,
    endpoint: String,
}

impl EdpValidator {
    pub fn new<S: Into<String>>(endpoint: S) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client<S: Into<String>>(client: Client, endpoint: S) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for EdpValidator {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDATOR_URL)
    }
}

#[async_trait]
impl DocumentValidator for EdpValidator {
    async fn validate(&self, document: &str) -> MqaResult<MetricReport> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/rdf+xml")
            .body(document.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MqaError::Validator { status, message });
        }

        let detail: Value = serde_json::from_str(&response.text().await?)?;
        let conforms = find_conforms(&detail);
        debug!(?conforms, "EDP validator verdict");
        if conforms.is_none() {
            info!("EDP validator response carries no conforms flag, treating as failed");
        }

        Ok(verdict_report(conforms.unwrap_or(false)))
    }
}

/// Locate the `conforms` flag of a validation report.
///
/// Looks at the top level first, then at every element of every list-valued
/// field. The first flag found decides; `None` if there is none.
pub fn find_conforms(detail: &Value) -> Option<bool> {
    if let Some(flag) = conforms_flag(detail) {
        return Some(flag);
    }

    detail
        .as_object()?
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .find_map(conforms_flag)
}

fn conforms_flag(value: &Value) -> Option<bool> {
    CONFORMS_KEYS
        .iter()
        .find_map(|key| value.get(*key))
        .map(|flag| flag.as_bool().unwrap_or(false))
}

pub fn verdict_report(conforms: bool) -> MetricReport {
    if conforms {
        MetricReport::new(
            format!(
                "The metadata has successfully passed the EDP validator. Weight assigned {}",
                EDP_WEIGHT
            ),
            EDP_WEIGHT,
        )
    } else {
        MetricReport::new("DCAT-AP errors found in metadata. No weight assigned", 0)
    }
}
