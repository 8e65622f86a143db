//! # YODA Metadata Quality Assessment
//!
//! Scores DCAT-AP metadata documents:
//! - `validator`: remote EDP SHACL validation
//! - `rules` / `registry`: per-property metric rules and their lookup table
//! - `probe`: HTTP probes of linked resources
//! - `aggregate`: score and rating
//! - `engine`: end-to-end evaluation of one document

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod probe;
pub mod registry;
pub mod report;
pub mod rules;
pub mod validator;

pub use aggregate::{summarize, MAX_SCORE};
pub use config::MqaConfig;
pub use engine::MqaEngine;
pub use probe::{HttpLinkChecker, LinkChecker};
pub use registry::RuleRegistry;
pub use report::{EvaluationResults, Metric, MetricReport, MqaResponse, OthersBucket, Rate, ScoreSummary};
pub use rules::{MetricRule, RuleContext};
pub use validator::{DocumentValidator, EdpValidator};

use thiserror::Error;
use yoda_core::CoreError;

#[derive(Error, Debug)]
pub enum MqaError {
    #[error("EDP validator responded with status {status}: {message}")]
    Validator { status: u16, message: String },

    #[error("Remote resource {url} responded with status {status}")]
    RemoteStatus { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid validator response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MqaError {
    /// HTTP status to report to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            MqaError::Validator { status, .. } => *status,
            _ => 500,
        }
    }
}

pub type MqaResult<T> = Result<T, MqaError>;
