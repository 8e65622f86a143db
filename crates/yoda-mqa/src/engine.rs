//! Metadata quality evaluation engine

use crate::aggregate::summarize;
use crate::config::MqaConfig;
use crate::probe::{HttpLinkChecker, LinkChecker};
use crate::registry::RuleRegistry;
use crate::report::{EvaluationResults, Metric, MqaResponse, OthersBucket};
use crate::rules::{format_mediatype, RuleContext};
use crate::validator::{DocumentValidator, EdpValidator};
use crate::MqaResult;
use std::sync::Arc;
use tracing::{debug, info};
use yoda_core::{FormatVocabularies, MetadataGraph, Term};

/// Scores RDF/XML DCAT-AP documents.
///
/// Holds only read-only collaborators, so one engine can serve concurrent
/// requests; each `evaluate` call builds its own result set.
pub struct MqaEngine {
    validator: Arc<dyn DocumentValidator>,
    checker: Arc<dyn LinkChecker>,
    vocabularies: Arc<FormatVocabularies>,
    registry: RuleRegistry,
}

impl MqaEngine {
    pub fn new(
        validator: Arc<dyn DocumentValidator>,
        checker: Arc<dyn LinkChecker>,
        vocabularies: Arc<FormatVocabularies>,
    ) -> Self {
        Self {
            validator,
            checker,
            vocabularies,
            registry: RuleRegistry::dcat_ap(),
        }
    }

    /// Engine talking to the configured validator, with vocabularies loaded
    /// from disk. Fails if either vocabulary cannot be loaded.
    pub fn from_config(config: &MqaConfig) -> MqaResult<Self> {
        let vocabularies = config.load_vocabularies()?;
        let validator = EdpValidator::new(config.validator_url.clone());
        let checker = HttpLinkChecker::new()?;

        info!(
            validator = %config.validator_url,
            machine_readable = vocabularies.machine_readable.len(),
            non_proprietary = vocabularies.non_proprietary.len(),
            "MQA engine ready"
        );

        Ok(Self::new(
            Arc::new(validator),
            Arc::new(checker),
            Arc::new(vocabularies),
        ))
    }

    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn vocabularies(&self) -> &FormatVocabularies {
        &self.vocabularies
    }

    /// Validate, index and score one metadata document.
    ///
    /// Rules run one after another; a validator failure aborts the evaluation.
    pub async fn evaluate(&self, document: &str) -> MqaResult<MqaResponse> {
        info!(bytes = document.len(), "evaluating metadata document");

        let mut results = EvaluationResults::new();
        results.insert(Metric::Edp, self.validator.validate(document).await?);

        let graph = MetadataGraph::parse_rdfxml(document)?;
        let ctx = RuleContext {
            checker: self.checker.as_ref(),
            vocabularies: self.vocabularies.as_ref(),
        };

        let mut others = OthersBucket::new();
        for (predicate, objects) in graph.group_by_predicate() {
            match self.registry.lookup(&predicate) {
                Some(rule) => {
                    let report = rule.evaluate(&objects, &ctx).await;
                    debug!(metric = %rule.metric(), weight = report.weight, "metric evaluated");
                    results.insert(rule.metric(), report);
                }
                None => others.push(render_other(&graph, &predicate, &objects)),
            }
        }
        results.set_others(others);

        let flags = (
            results.get(Metric::Format).map(|r| r.result.unwrap_or(false)),
            results.get(Metric::MediaType).map(|r| r.result.unwrap_or(false)),
        );
        if let (Some(format_found), Some(mediatype_resolvable)) = flags {
            results.insert(
                Metric::FormatMediaType,
                format_mediatype(format_found, mediatype_resolvable),
            );
        }

        let summary = summarize(&results);
        info!(score = summary.score, rate = ?summary.rate, "metadata document scored");

        Ok(MqaResponse {
            values: results,
            summary,
        })
    }
}

/// Value recorded for a predicate without a rule: the short form of its last
/// object if that renders, else the short form of the predicate itself.
pub fn render_other(graph: &MetadataGraph, predicate: &str, objects: &[Term]) -> String {
    objects
        .last()
        .and_then(|object| graph.render_term(object))
        .or_else(|| graph.render_iri(predicate))
        .unwrap_or_else(|| predicate.to_string())
}
