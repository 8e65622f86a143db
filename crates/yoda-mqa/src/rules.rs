//! Per-property metric rules
//!
//! One rule per recognised DCAT-AP predicate. Presence rules award a fixed
//! weight without looking at the values; the remaining rules probe the
//! linked resources or consult the EDP format vocabularies. Every "all values"
//! check is a conjunction that holds vacuously for an empty value list.

use crate::probe::LinkChecker;
use crate::report::{Metric, MetricReport};
use async_trait::async_trait;
use std::ops::Range;
use tracing::{debug, warn};
use yoda_core::{FormatVocabularies, MetadataGraph, Term};

/// HEAD statuses counted as reachable
const REACHABLE: Range<u16> = 200..399;
const NOT_FOUND: u16 = 404;

const HEAD_OK: &str = "Validation of HTTP HEAD request is OK";
const HEAD_FAILED: &str =
    "Responded status code of HTTP HEAD request is not in the 200 or 300 range";

/// Collaborators available to a rule while it evaluates
pub struct RuleContext<'a> {
    pub checker: &'a dyn LinkChecker,
    pub vocabularies: &'a FormatVocabularies,
}

/// Scores the values of one DCAT-AP property
#[async_trait]
pub trait MetricRule: Send + Sync {
    fn metric(&self) -> Metric;

    /// Evaluate the objects of every triple using this rule's predicate
    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport;
}

fn property_set(weight: u32) -> String {
    format!("The property is set. Weight assigned {}", weight)
}

/// Awards a fixed weight whenever the property is present
#[derive(Debug, Clone, Copy)]
pub struct PresenceRule {
    metric: Metric,
    weight: u32,
}

impl PresenceRule {
    pub fn new(metric: Metric, weight: u32) -> Self {
        Self { metric, weight }
    }
}

#[async_trait]
impl MetricRule for PresenceRule {
    fn metric(&self) -> Metric {
        self.metric
    }

    async fn evaluate(&self, _objects: &[Term], _ctx: &RuleContext<'_>) -> MetricReport {
        MetricReport::new(property_set(self.weight), self.weight)
    }
}

/// dcat:accessURL: 50 when every URL answers HEAD with 2xx/3xx
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessUrlRule;

#[async_trait]
impl MetricRule for AccessUrlRule {
    fn metric(&self) -> Metric {
        Metric::AccessUrl
    }

    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport {
        if all_reachable(ctx.checker, objects).await {
            MetricReport::new(format!("{}. Weight assigned 50", HEAD_OK), 50)
        } else {
            MetricReport::new(format!("{}. No weight assigned", HEAD_FAILED), 0)
        }
    }
}

/// dcat:downloadURL: 20 for presence, +30 when every URL is reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadUrlRule;

#[async_trait]
impl MetricRule for DownloadUrlRule {
    fn metric(&self) -> Metric {
        Metric::DownloadUrl
    }

    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport {
        let base = property_set(20);
        if all_reachable(ctx.checker, objects).await {
            MetricReport::new(
                format!("{}. {}. Additional weight assigned 30", base, HEAD_OK),
                50,
            )
        } else {
            MetricReport::new(
                format!("{}. {}. No additional weight assigned", base, HEAD_FAILED),
                20,
            )
        }
    }
}

/// dct:format: 20 for presence, +20 machine-readable, +20 non-proprietary.
///
/// `result` is true when every format IRI dereferences to RDF describing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRule;

#[async_trait]
impl MetricRule for FormatRule {
    fn metric(&self) -> Metric {
        Metric::Format
    }

    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport {
        let machine_readable = objects
            .iter()
            .all(|o| ctx.vocabularies.machine_readable.contains(o.as_str()));
        let non_proprietary = objects
            .iter()
            .all(|o| ctx.vocabularies.non_proprietary.contains(o.as_str()));
        let found = first_undescribed(ctx.checker, objects).await.is_none();

        let mut weight = 20;
        let mut report = property_set(20);

        if machine_readable {
            weight += 20;
            report.push_str(". The property is machine-readable. Additional weight assigned 20");
        } else {
            report.push_str(". The property is not machine-readable. No additional weight assigned");
        }

        if non_proprietary {
            weight += 20;
            report.push_str(". The property is non-proprietary. Additional weight assigned 20");
        } else {
            report.push_str(". The property is not non-proprietary. No additional weight assigned");
        }

        MetricReport::new(report, weight).with_result(found)
    }
}

/// dct:license: 20 for presence, +10 when every license dereferences to RDF
#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseRule;

#[async_trait]
impl MetricRule for LicenseRule {
    fn metric(&self) -> Metric {
        Metric::License
    }

    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport {
        let base = property_set(20);
        match first_undescribed(ctx.checker, objects).await {
            None => MetricReport::new(
                format!(
                    "{}. The property provides the correct license information. Additional weight assigned 10",
                    base
                ),
                30,
            ),
            Some(url) => MetricReport::new(
                format!(
                    "{}. The license is incorrect: {}. No additional weight assigned",
                    base, url
                ),
                20,
            ),
        }
    }
}

/// dcat:mediaType: 10 for presence; `result` is false if any URL answers 404
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaTypeRule;

#[async_trait]
impl MetricRule for MediaTypeRule {
    fn metric(&self) -> Metric {
        Metric::MediaType
    }

    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport {
        let mut resolvable = true;
        for object in objects {
            match ctx.checker.head(object.as_str()).await {
                Ok(status) if status != NOT_FOUND => {}
                Ok(status) => {
                    debug!(url = %object, status, "media type not found");
                    resolvable = false;
                    break;
                }
                Err(e) => {
                    warn!(url = %object, error = %e, "media type probe failed");
                    resolvable = false;
                    break;
                }
            }
        }

        MetricReport::new(property_set(10), 10).with_result(resolvable)
    }
}

/// dct:accessRights: 10 for presence, +5 when every value dereferences to RDF
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRightsRule;

#[async_trait]
impl MetricRule for AccessRightsRule {
    fn metric(&self) -> Metric {
        Metric::AccessRights
    }

    async fn evaluate(&self, objects: &[Term], ctx: &RuleContext<'_>) -> MetricReport {
        let base = property_set(10);
        match first_undescribed(ctx.checker, objects).await {
            None => MetricReport::new(
                format!(
                    "{}. The property uses a controlled vocabulary. Additional weight assigned 5",
                    base
                ),
                15,
            ),
            Some(url) => MetricReport::new(
                format!(
                    "{}. The access rights are not in a controlled vocabulary: {}. No additional weight assigned",
                    base, url
                ),
                10,
            ),
        }
    }
}

/// Derived rule: 10 when both the format and the media type checks passed
pub fn format_mediatype(format_found: bool, mediatype_resolvable: bool) -> MetricReport {
    if format_found && mediatype_resolvable {
        MetricReport::new(
            "The properties belong to a controlled vocabulary. Weight assigned 10",
            10,
        )
    } else {
        MetricReport::new("The properties do not belong to a controlled vocabulary", 0)
    }
}

/// Whether every value answers HEAD with a 2xx/3xx status. Probe errors fail the check.
async fn all_reachable(checker: &dyn LinkChecker, objects: &[Term]) -> bool {
    for object in objects {
        match checker.head(object.as_str()).await {
            Ok(status) if REACHABLE.contains(&status) => {}
            Ok(status) => {
                debug!(url = %object, status, "HEAD status outside 2xx/3xx");
                return false;
            }
            Err(e) => {
                warn!(url = %object, error = %e, "HEAD request failed");
                return false;
            }
        }
    }
    true
}

/// First value that does not dereference to an RDF/XML document describing it
async fn first_undescribed<'t>(checker: &dyn LinkChecker, objects: &'t [Term]) -> Option<&'t Term> {
    for object in objects {
        if !describes_itself(checker, object).await {
            return Some(object);
        }
    }
    None
}

async fn describes_itself(checker: &dyn LinkChecker, term: &Term) -> bool {
    let url = match term {
        Term::Iri(url) => url,
        // literals and blank nodes can never be the subject of a fetched triple
        _ => return false,
    };

    let document = match checker.fetch_rdf(url).await {
        Ok(document) => document,
        Err(e) => {
            warn!(url = %url, error = %e, "could not fetch RDF resource");
            return false;
        }
    };

    match MetadataGraph::parse_rdfxml_with_base(&document, url) {
        Ok(graph) => graph.contains_subject(url),
        Err(e) => {
            warn!(url = %url, error = %e, "fetched resource is not RDF/XML");
            false
        }
    }
}
