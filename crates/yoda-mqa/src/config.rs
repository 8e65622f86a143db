//! # MQA Configuration
//!
//! Location of the EDP validator and of the reference vocabularies

use crate::validator::DEFAULT_VALIDATOR_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use yoda_core::vocabulary::{MACHINE_READABLE_FILE, NON_PROPRIETARY_FILE};
use yoda_core::{CoreResult, FormatVocabularies};

/// Environment variable overriding the validator endpoint
pub const VALIDATOR_URL_ENV: &str = "YODA_VALIDATOR_URL";
/// Environment variable overriding the vocabulary directory
pub const VOCABULARY_DIR_ENV: &str = "YODA_VOCABULARY_DIR";

const DEFAULT_VOCABULARY_DIR: &str = "vocabularies";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqaConfig {
    /// EDP SHACL validation endpoint
    pub validator_url: String,

    /// Machine-readable format vocabulary (RDF/XML)
    pub machine_readable_vocabulary: PathBuf,

    /// Non-proprietary format vocabulary (RDF/XML)
    pub non_proprietary_vocabulary: PathBuf,
}

impl Default for MqaConfig {
    fn default() -> Self {
        Self {
            validator_url: DEFAULT_VALIDATOR_URL.to_string(),
            machine_readable_vocabulary: Path::new(DEFAULT_VOCABULARY_DIR).join(MACHINE_READABLE_FILE),
            non_proprietary_vocabulary: Path::new(DEFAULT_VOCABULARY_DIR).join(NON_PROPRIETARY_FILE),
        }
    }
}

impl MqaConfig {
    /// Defaults overridden by `YODA_VALIDATOR_URL` and `YODA_VOCABULARY_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(VALIDATOR_URL_ENV) {
            config = config.with_validator_url(url);
        }
        if let Ok(dir) = std::env::var(VOCABULARY_DIR_ENV) {
            config = config.with_vocabulary_dir(dir);
        }
        config
    }

    pub fn with_validator_url<S: Into<String>>(mut self, url: S) -> Self {
        self.validator_url = url.into();
        self
    }

    /// Point both vocabularies at their standard file names inside `dir`
    pub fn with_vocabulary_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.machine_readable_vocabulary = dir.as_ref().join(MACHINE_READABLE_FILE);
        self.non_proprietary_vocabulary = dir.as_ref().join(NON_PROPRIETARY_FILE);
        self
    }

    pub fn load_vocabularies(&self) -> CoreResult<FormatVocabularies> {
        FormatVocabularies::load(&self.machine_readable_vocabulary, &self.non_proprietary_vocabulary)
    }
}
