//! Parsed metadata graph indexed by predicate

use crate::model::{Literal, Term, Triple};
use crate::namespace::NamespaceTable;
use crate::{CoreError, CoreResult};
use indexmap::IndexMap;
use sophia::api::parser::TripleParser;
use sophia::api::source::TripleSource;
use sophia::api::term::{Term as SophiaTerm, TermKind};
use sophia::api::triple::Triple as SophiaTriple;
use sophia::iri::Iri;
use sophia::xml::parser::RdfXmlParser;
use tracing::debug;

/// Triple graph parsed from one RDF/XML document, with its namespace table.
///
/// Built once per evaluation and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct MetadataGraph {
    triples: Vec<Triple>,
    namespaces: NamespaceTable,
}

impl MetadataGraph {
    pub fn new(triples: Vec<Triple>, namespaces: NamespaceTable) -> Self {
        Self { triples, namespaces }
    }

    /// Parse an RDF/XML document without a base IRI
    pub fn parse_rdfxml(document: &str) -> CoreResult<Self> {
        Self::parse(document, RdfXmlParser { base: None })
    }

    /// Parse an RDF/XML document resolving relative references against `base`
    pub fn parse_rdfxml_with_base(document: &str, base: &str) -> CoreResult<Self> {
        let base = Iri::new(base.to_string()).map_err(|e| CoreError::InvalidIri(e.to_string()))?;
        Self::parse(document, RdfXmlParser { base: Some(base) })
    }

    fn parse(document: &str, parser: RdfXmlParser) -> CoreResult<Self> {
        let mut triples = Vec::new();
        let mut source = parser.parse_str(document);

        source
            .for_each_triple(|t| {
                triples.push(Triple {
                    subject: convert_term(t.s()),
                    predicate: convert_term(t.p()).as_str().to_string(),
                    object: convert_term(t.o()),
                });
            })
            .map_err(|e| CoreError::Parse(e.to_string()))?;

        let namespaces = NamespaceTable::from_rdfxml(document);
        debug!(
            triples = triples.len(),
            namespaces = namespaces.len(),
            "parsed RDF/XML document"
        );

        Ok(Self { triples, namespaces })
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Objects of every predicate, keyed by predicate IRI.
    ///
    /// Predicates keep the order in which they were first seen; objects keep
    /// the graph's enumeration order.
    pub fn group_by_predicate(&self) -> IndexMap<String, Vec<Term>> {
        let mut groups: IndexMap<String, Vec<Term>> = IndexMap::new();

        for triple in &self.triples {
            groups.entry(triple.predicate.clone()).or_default();
        }
        for triple in &self.triples {
            if let Some(objects) = groups.get_mut(&triple.predicate) {
                objects.push(triple.object.clone());
            }
        }

        groups
    }

    /// Render a term as `prefix:localname` using the graph's bindings
    pub fn render_term(&self, term: &Term) -> Option<String> {
        self.namespaces.shorten(term.as_str())
    }

    /// Render a predicate IRI as `prefix:localname`
    pub fn render_iri(&self, iri: &str) -> Option<String> {
        self.namespaces.shorten(iri)
    }

    /// Whether at least one triple has `iri` as its subject
    pub fn contains_subject(&self, iri: &str) -> bool {
        self.triples
            .iter()
            .any(|t| matches!(&t.subject, Term::Iri(s) if s == iri))
    }

    /// String forms of every subject, in enumeration order
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.triples.iter().map(|t| t.subject.as_str())
    }
}

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

fn convert_term<T: SophiaTerm>(term: T) -> Term {
    match term.kind() {
        TermKind::Iri => Term::Iri(
            term.iri()
                .map(|iri| iri.as_str().to_string())
                .unwrap_or_default(),
        ),
        TermKind::BlankNode => Term::BlankNode(
            term.bnode_id()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
        ),
        TermKind::Literal => Term::Literal(Literal {
            lexical: term
                .lexical_form()
                .map(|lex| lex.to_string())
                .unwrap_or_default(),
            // xsd:string is the implicit datatype of simple literals
            datatype: term
                .datatype()
                .map(|dt| dt.as_str().to_string())
                .filter(|dt| dt != XSD_STRING),
            language: term.language_tag().map(|tag| tag.as_str().to_string()),
        }),
        // RDF/XML never yields triple terms or variables
        _ => Term::BlankNode(String::new()),
    }
}
