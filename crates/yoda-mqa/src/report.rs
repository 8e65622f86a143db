//! Metric reports and the per-request evaluation result set

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use tracing::warn;
use yoda_core::namespace::{DCAT, DCT};

/// Every metric that can appear in an evaluation result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Edp,
    AccessUrl,
    DownloadUrl,
    Keyword,
    Theme,
    Spatial,
    Temporal,
    Format,
    License,
    ContactPoint,
    MediaType,
    Publisher,
    AccessRights,
    Issued,
    Modified,
    Rights,
    ByteSize,
    #[serde(rename = "format_mediatype")]
    FormatMediaType,
}

impl Metric {
    /// The DCAT-AP properties that have a rule of their own
    pub const PROPERTIES: [Metric; 16] = [
        Metric::AccessUrl,
        Metric::DownloadUrl,
        Metric::Keyword,
        Metric::Theme,
        Metric::Spatial,
        Metric::Temporal,
        Metric::Format,
        Metric::License,
        Metric::ContactPoint,
        Metric::MediaType,
        Metric::Publisher,
        Metric::AccessRights,
        Metric::Issued,
        Metric::Modified,
        Metric::Rights,
        Metric::ByteSize,
    ];

    /// Key used in the serialized result set
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Edp => "edp",
            Metric::AccessUrl => "accessurl",
            Metric::DownloadUrl => "downloadurl",
            Metric::Keyword => "keyword",
            Metric::Theme => "theme",
            Metric::Spatial => "spatial",
            Metric::Temporal => "temporal",
            Metric::Format => "format",
            Metric::License => "license",
            Metric::ContactPoint => "contactpoint",
            Metric::MediaType => "mediatype",
            Metric::Publisher => "publisher",
            Metric::AccessRights => "accessrights",
            Metric::Issued => "issued",
            Metric::Modified => "modified",
            Metric::Rights => "rights",
            Metric::ByteSize => "bytesize",
            Metric::FormatMediaType => "format_mediatype",
        }
    }

    /// `prefix:localname` of the predicate this metric is evaluated on
    pub fn short_name(&self) -> Option<&'static str> {
        let name = match self {
            Metric::AccessUrl => "dcat:accessURL",
            Metric::DownloadUrl => "dcat:downloadURL",
            Metric::Keyword => "dcat:keyword",
            Metric::Theme => "dcat:theme",
            Metric::Spatial => "dct:spatial",
            Metric::Temporal => "dct:temporal",
            Metric::Format => "dct:format",
            Metric::License => "dct:license",
            Metric::ContactPoint => "dcat:contactPoint",
            Metric::MediaType => "dcat:mediaType",
            Metric::Publisher => "dct:publisher",
            Metric::AccessRights => "dct:accessRights",
            Metric::Issued => "dct:issued",
            Metric::Modified => "dct:modified",
            Metric::Rights => "dct:rights",
            Metric::ByteSize => "dcat:byteSize",
            Metric::Edp | Metric::FormatMediaType => return None,
        };
        Some(name)
    }

    /// Full predicate IRI of this metric
    pub fn predicate_iri(&self) -> Option<String> {
        self.short_name().and_then(expand_short_name)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical `dcat:`/`dct:` short name of a predicate IRI, regardless of the
/// prefixes the document itself declares
pub fn canonical_short_name(predicate: &str) -> Option<String> {
    if let Some(local) = predicate.strip_prefix(DCAT) {
        Some(format!("dcat:{}", local))
    } else {
        predicate
            .strip_prefix(DCT)
            .map(|local| format!("dct:{}", local))
    }
}

fn expand_short_name(short_name: &str) -> Option<String> {
    let (prefix, local) = short_name.split_once(':')?;
    match prefix {
        "dcat" => Some(format!("{}{}", DCAT, local)),
        "dct" => Some(format!("{}{}", DCT, local)),
        _ => None,
    }
}

/// Outcome of one metric evaluation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct MetricReport {
    pub report: String,
    pub weight: u32,
    /// Boolean outcome consumed by the format/media type cross-check
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<bool>,
}

impl MetricReport {
    pub fn new<S: Into<String>>(report: S, weight: u32) -> Self {
        Self {
            report: report.into(),
            weight,
            result: None,
        }
    }

    pub fn with_result(mut self, result: bool) -> Self {
        self.result = Some(result);
        self
    }
}

/// Fixed report text of the others bucket
pub const OTHERS_REPORT: &str = "Not included in MQA";

/// Rendered values of every predicate without a metric rule. Always weight 0.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct OthersBucket {
    pub report: String,
    pub values: Vec<String>,
    pub weight: u32,
}

impl Default for OthersBucket {
    fn default() -> Self {
        Self {
            report: OTHERS_REPORT.to_string(),
            values: Vec::new(),
            weight: 0,
        }
    }
}

impl OthersBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, value: S) {
        self.values.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Metric reports of one evaluation plus the others bucket.
///
/// Each metric is written at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResults {
    reports: IndexMap<Metric, MetricReport>,
    others: OthersBucket,
}

impl EvaluationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the report of `metric`. Returns `false` and keeps the first
    /// report if the metric was already recorded.
    pub fn insert(&mut self, metric: Metric, report: MetricReport) -> bool {
        if self.reports.contains_key(&metric) {
            warn!(metric = %metric, "metric already evaluated, keeping first report");
            return false;
        }
        self.reports.insert(metric, report);
        true
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricReport> {
        self.reports.get(&metric)
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.reports.contains_key(&metric)
    }

    pub fn reports(&self) -> impl Iterator<Item = (Metric, &MetricReport)> {
        self.reports.iter().map(|(metric, report)| (*metric, report))
    }

    pub fn others(&self) -> &OthersBucket {
        &self.others
    }

    pub fn set_others(&mut self, others: OthersBucket) {
        self.others = others;
    }

    /// Every weight in the result set, the others bucket included
    pub fn weights(&self) -> impl Iterator<Item = u32> + '_ {
        self.reports
            .values()
            .map(|report| report.weight)
            .chain(std::iter::once(self.others.weight))
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Serialize for EvaluationResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.reports.len() + 1))?;
        for (metric, report) in &self.reports {
            map.serialize_entry(metric.as_str(), report)?;
        }
        map.serialize_entry("others", &self.others)?;
        map.end()
    }
}

/// Qualitative rating of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
pub enum Rate {
    Bad,
    Sufficient,
    Good,
    Excellent,
    Error,
}

/// Total score and its rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u32,
    pub rate: Rate,
}

/// Full response of one evaluation
#[derive(Debug, Clone, serde::Serialize)]
pub struct MqaResponse {
    pub values: EvaluationResults,
    pub summary: ScoreSummary,
}
