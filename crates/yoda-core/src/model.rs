//! RDF term and triple models

use serde::{Deserialize, Serialize};
use std::fmt;

/// RDF term as seen by the metric evaluators
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
}

/// RDF literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Term {
    pub fn iri<S: Into<String>>(iri: S) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank<S: Into<String>>(id: S) -> Self {
        Term::BlankNode(id.into())
    }

    /// Plain literal without datatype or language tag
    pub fn literal<S: Into<String>>(lexical: S) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        })
    }

    /// String form of the term: the IRI, the lexical form, or the blank node id.
    pub fn as_str(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(id) => id,
            Term::Literal(literal) => &literal.lexical,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Term {
    fn from(iri: &str) -> Self {
        Term::iri(iri)
    }
}

/// RDF triple. Predicates are always IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new<P: Into<String>>(subject: Term, predicate: P, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}
