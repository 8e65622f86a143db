//! Namespace prefix bindings and short-name rendering

use quick_xml::events::Event;
use quick_xml::name::PrefixDeclaration;
use quick_xml::Reader;
use tracing::debug;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
pub const DCT: &str = "http://purl.org/dc/terms/";

/// Bindings every parsed graph carries, appended after the document's own
const BUILTIN_BINDINGS: [(&str, &str); 5] = [
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("xml", XML),
    ("owl", OWL),
];

/// Ordered prefix -> namespace table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: Vec<(String, String)>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the `xmlns:prefix` attributes of every start tag of an RDF/XML
    /// document in document order, followed by the built-in bindings.
    ///
    /// Comments, CDATA and text content are never read as declarations.
    /// Scanning stops at the first XML syntax error.
    pub fn from_rdfxml(document: &str) -> Self {
        let mut table = Self::new();
        let mut reader = Reader::from_str(document);

        loop {
            match reader.read_event() {
                Ok(Event::Start(tag)) | Ok(Event::Empty(tag)) => {
                    for attr in tag.attributes().flatten() {
                        if let Some(PrefixDeclaration::Named(prefix)) = attr.key.as_namespace_binding() {
                            let (Ok(prefix), Ok(namespace)) =
                                (std::str::from_utf8(prefix), attr.unescape_value())
                            else {
                                continue;
                            };
                            table.bind(prefix, &namespace);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "stopped namespace scan at malformed XML");
                    break;
                }
            }
        }

        table.with_builtins()
    }

    /// Add the built-in bindings that are not already bound
    pub fn with_builtins(mut self) -> Self {
        for (prefix, namespace) in BUILTIN_BINDINGS {
            self.bind(prefix, namespace);
        }
        self
    }

    /// Bind `prefix` to `namespace`. The first binding of a prefix or of a
    /// namespace wins; empty namespaces are ignored.
    pub fn bind(&mut self, prefix: &str, namespace: &str) -> bool {
        if namespace.is_empty()
            || self
                .bindings
                .iter()
                .any(|(p, ns)| p == prefix || ns == namespace)
        {
            return false;
        }
        self.bindings.push((prefix.to_string(), namespace.to_string()));
        true
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Replace the first bound namespace occurring in `value` with `prefix:`.
    ///
    /// Returns `None` when no binding occurs in the value.
    pub fn shorten(&self, value: &str) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, ns)| value.contains(ns.as_str()))
            .map(|(prefix, ns)| value.replace(ns.as_str(), &format!("{}:", prefix)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOC: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dcat='http://www.w3.org/ns/dcat#'
         xmlns:dct="http://purl.org/dc/terms/"
         xmlns="http://example.org/default#">
</rdf:RDF>"#;

    #[test]
    fn test_declarations_in_document_order() {
        let table = NamespaceTable::from_rdfxml(DOC);
        let prefixes: Vec<&str> = table.iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["rdf", "dcat", "dct", "rdfs", "xsd", "xml", "owl"]);
        assert_eq!(table.namespace("dcat"), Some(DCAT));
    }

    #[test]
    fn test_commented_declarations_are_ignored() {
        let doc = r#"<?xml version="1.0"?>
<!-- old: xmlns:zz="http://purl.org/" -->
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dct="http://purl.org/dc/terms/">
  <rdf:Description rdf:about="http://example.org/d">
    <dct:description>declare with xmlns:yy="http://purl.org/dc/"</dct:description>
    <dct:abstract><![CDATA[xmlns:xx="http://purl.org/dc/terms/"]]></dct:abstract>
  </rdf:Description>
</rdf:RDF>"#;
        let table = NamespaceTable::from_rdfxml(doc);

        assert_eq!(table.namespace("zz"), None);
        assert_eq!(table.namespace("yy"), None);
        assert_eq!(table.namespace("xx"), None);
        assert_eq!(
            table.shorten("http://purl.org/dc/terms/title"),
            Some("dct:title".to_string())
        );
    }

    #[test]
    fn test_nested_declarations() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description xmlns:foaf="http://xmlns.com/foaf/0.1/" rdf:about="http://example.org/p">
    <foaf:name>Ada</foaf:name>
  </rdf:Description>
</rdf:RDF>"#;
        let table = NamespaceTable::from_rdfxml(doc);
        assert_eq!(table.namespace("foaf"), Some("http://xmlns.com/foaf/0.1/"));
    }

    #[test]
    fn test_default_namespace_is_not_bound() {
        let table = NamespaceTable::from_rdfxml(DOC);
        assert!(table.iter().all(|(_, ns)| ns != "http://example.org/default#"));
    }

    #[test]
    fn test_shorten() {
        let table = NamespaceTable::from_rdfxml(DOC);
        assert_eq!(
            table.shorten("http://www.w3.org/ns/dcat#accessURL"),
            Some("dcat:accessURL".to_string())
        );
        assert_eq!(table.shorten("http://example.org/other"), None);
    }

    #[test]
    fn test_first_binding_wins() {
        let mut table = NamespaceTable::new();
        assert!(table.bind("dct", DCT));
        assert!(!table.bind("dcterms", DCT));
        assert!(!table.bind("dct", "http://example.org/"));
        assert!(!table.bind("empty", ""));
        assert_eq!(table.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_shorten_bound_namespace(local in "[A-Za-z][A-Za-z0-9_]{0,16}") {
            let table = NamespaceTable::new().with_builtins();
            let shortened = table.shorten(&format!("{}{}", OWL, local));
            prop_assert_eq!(shortened, Some(format!("owl:{}", local)));
        }
    }
}
