//! Predicate -> rule lookup table

use crate::report::{canonical_short_name, Metric};
use crate::rules::*;
use std::collections::HashMap;

/// Registry of metric rules keyed by predicate short name (`dcat:accessURL`, ...)
pub struct RuleRegistry {
    rules: HashMap<&'static str, Box<dyn MetricRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The DCAT-AP rule table
    pub fn dcat_ap() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(AccessUrlRule));
        registry.register(Box::new(DownloadUrlRule));
        registry.register(Box::new(PresenceRule::new(Metric::Keyword, 30)));
        registry.register(Box::new(PresenceRule::new(Metric::Theme, 30)));
        registry.register(Box::new(PresenceRule::new(Metric::Spatial, 20)));
        registry.register(Box::new(PresenceRule::new(Metric::Temporal, 20)));
        registry.register(Box::new(FormatRule));
        registry.register(Box::new(LicenseRule));
        registry.register(Box::new(PresenceRule::new(Metric::ContactPoint, 20)));
        registry.register(Box::new(MediaTypeRule));
        registry.register(Box::new(PresenceRule::new(Metric::Publisher, 10)));
        registry.register(Box::new(AccessRightsRule));
        registry.register(Box::new(PresenceRule::new(Metric::Issued, 5)));
        registry.register(Box::new(PresenceRule::new(Metric::Modified, 5)));
        registry.register(Box::new(PresenceRule::new(Metric::Rights, 5)));
        registry.register(Box::new(PresenceRule::new(Metric::ByteSize, 5)));

        registry
    }

    /// Register a rule under its metric's predicate short name, replacing any
    /// previous rule for that predicate. Rules for metrics without a
    /// predicate are ignored.
    pub fn register(&mut self, rule: Box<dyn MetricRule>) -> bool {
        match rule.metric().short_name() {
            Some(short_name) => {
                self.rules.insert(short_name, rule);
                true
            }
            None => false,
        }
    }

    /// Rule for a full predicate IRI
    pub fn lookup(&self, predicate: &str) -> Option<&dyn MetricRule> {
        let short_name = canonical_short_name(predicate)?;
        self.get(&short_name)
    }

    /// Rule for a predicate short name
    pub fn get(&self, short_name: &str) -> Option<&dyn MetricRule> {
        self.rules.get(short_name).map(|rule| rule.as_ref())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::dcat_ap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{vocabularies, StubLinkChecker};
    use crate::validator::EDP_WEIGHT;

    #[test]
    fn test_every_property_has_one_rule() {
        let registry = RuleRegistry::dcat_ap();
        assert_eq!(registry.rule_count(), Metric::PROPERTIES.len());

        for metric in Metric::PROPERTIES {
            let rule = registry.lookup(&metric.predicate_iri().unwrap()).unwrap();
            assert_eq!(rule.metric(), metric);
        }
    }

    #[test]
    fn test_lookup_unknown_predicates() {
        let registry = RuleRegistry::dcat_ap();
        assert!(registry.lookup("http://purl.org/dc/terms/title").is_none());
        assert!(registry.lookup("http://xmlns.com/foaf/0.1/name").is_none());
        // local names are case sensitive
        assert!(registry.lookup("http://www.w3.org/ns/dcat#accessurl").is_none());
        assert!(registry.get("dcat:keyword").is_some());
    }

    #[test]
    fn test_register_ignores_derived_metrics() {
        let mut registry = RuleRegistry::new();
        assert!(!registry.register(Box::new(PresenceRule::new(Metric::Edp, 30))));
        assert_eq!(registry.rule_count(), 0);
    }

    #[tokio::test]
    async fn test_maximum_attainable_score() {
        let registry = RuleRegistry::dcat_ap();
        let csv = crate::rules::testing::CSV;
        let checker = StubLinkChecker::default()
            .with_document(csv, crate::rules::testing::describing(csv));
        let vocabularies = vocabularies();
        let ctx = RuleContext {
            checker: &checker,
            vocabularies: &vocabularies,
        };

        let mut total = EDP_WEIGHT;
        let mut format_found = false;
        let mut mediatype_ok = false;
        for metric in Metric::PROPERTIES {
            let rule = registry.lookup(&metric.predicate_iri().unwrap()).unwrap();
            let objects = if metric == Metric::Format {
                vec![yoda_core::Term::iri(csv)]
            } else {
                Vec::new()
            };
            let report = rule.evaluate(&objects, &ctx).await;
            match metric {
                Metric::Format => format_found = report.result == Some(true),
                Metric::MediaType => mediatype_ok = report.result == Some(true),
                _ => {}
            }
            total += report.weight;
        }
        total += format_mediatype(format_found, mediatype_ok).weight;

        assert_eq!(total, crate::aggregate::MAX_SCORE);
    }
}
