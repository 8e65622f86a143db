//! # YODA Core
//!
//! RDF/XML building blocks for metadata quality assessment:
//! - `model`: RDF terms and triples
//! - `namespace`: prefix bindings and `prefix:localname` rendering
//! - `graph`: parsed metadata graph grouped by predicate
//! - `vocabulary`: EDP reference format vocabularies

pub mod model;
pub mod namespace;
pub mod graph;
pub mod vocabulary;

pub use model::*;
pub use namespace::NamespaceTable;
pub use graph::MetadataGraph;
pub use vocabulary::{FormatVocabularies, Vocabulary};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("RDF/XML parse error: {0}")]
    Parse(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Vocabulary error ({path}): {message}")]
    Vocabulary { path: String, message: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
