//! EDP reference vocabularies (machine-readable and non-proprietary formats)

use crate::graph::MetadataGraph;
use crate::{CoreError, CoreResult};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// File name of the machine-readable format vocabulary
pub const MACHINE_READABLE_FILE: &str = "edp-machine-readable-format.rdf";
/// File name of the non-proprietary format vocabulary
pub const NON_PROPRIETARY_FILE: &str = "edp-non-proprietary-format.rdf";

/// Set of format identifiers recognised by a reference vocabulary
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    name: String,
    identifiers: HashSet<String>,
}

impl Vocabulary {
    /// Load a vocabulary from an RDF/XML file. Every subject becomes an identifier.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let vocabulary_error = |message: String| CoreError::Vocabulary {
            path: path.display().to_string(),
            message,
        };

        let document = std::fs::read_to_string(path).map_err(|e| vocabulary_error(e.to_string()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let vocabulary =
            Self::from_rdfxml(name, &document).map_err(|e| vocabulary_error(e.to_string()))?;
        info!(
            vocabulary = %vocabulary.name,
            identifiers = vocabulary.len(),
            "loaded EDP vocabulary"
        );
        Ok(vocabulary)
    }

    pub fn from_rdfxml<S: Into<String>>(name: S, document: &str) -> CoreResult<Self> {
        let graph = MetadataGraph::parse_rdfxml(document)?;
        Ok(Self {
            name: name.into(),
            identifiers: graph.subjects().map(str::to_string).collect(),
        })
    }

    pub fn from_identifiers<S, I>(name: S, identifiers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Both format vocabularies consulted by the `format` metric
#[derive(Debug, Clone, Default)]
pub struct FormatVocabularies {
    pub machine_readable: Vocabulary,
    pub non_proprietary: Vocabulary,
}

impl FormatVocabularies {
    pub fn new(machine_readable: Vocabulary, non_proprietary: Vocabulary) -> Self {
        Self {
            machine_readable,
            non_proprietary,
        }
    }

    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        machine_readable: P,
        non_proprietary: Q,
    ) -> CoreResult<Self> {
        Ok(Self {
            machine_readable: Vocabulary::load(machine_readable)?,
            non_proprietary: Vocabulary::load(non_proprietary)?,
        })
    }

    /// Load both vocabularies from their standard file names inside `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> CoreResult<Self> {
        let dir = dir.as_ref();
        Self::load(dir.join(MACHINE_READABLE_FILE), dir.join(NON_PROPRIETARY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VOCABULARY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#">
  <rdf:Description rdf:about="http://publications.europa.eu/resource/authority/file-type/CSV">
    <skos:prefLabel>CSV</skos:prefLabel>
  </rdf:Description>
  <rdf:Description rdf:about="http://publications.europa.eu/resource/authority/file-type/JSON">
    <skos:prefLabel>JSON</skos:prefLabel>
  </rdf:Description>
</rdf:RDF>"#;

    #[test]
    fn test_from_rdfxml_collects_subjects() {
        let vocabulary = Vocabulary::from_rdfxml("test", VOCABULARY).unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains("http://publications.europa.eu/resource/authority/file-type/CSV"));
        assert!(!vocabulary.contains("http://publications.europa.eu/resource/authority/file-type/DOCX"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VOCABULARY.as_bytes()).unwrap();

        let vocabulary = Vocabulary::load(file.path()).unwrap();
        assert_eq!(vocabulary.len(), 2);
    }

    #[test]
    fn test_missing_file_is_a_vocabulary_error() {
        let result = Vocabulary::load("/nonexistent/edp-machine-readable-format.rdf");
        match result {
            Err(CoreError::Vocabulary { path, .. }) => {
                assert!(path.ends_with("edp-machine-readable-format.rdf"))
            }
            other => panic!("expected vocabulary error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_file_is_a_vocabulary_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<rdf:RDF><broken").unwrap();

        assert!(matches!(
            Vocabulary::load(file.path()),
            Err(CoreError::Vocabulary { .. })
        ));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MACHINE_READABLE_FILE), VOCABULARY).unwrap();
        std::fs::write(dir.path().join(NON_PROPRIETARY_FILE), VOCABULARY).unwrap();

        let vocabularies = FormatVocabularies::load_dir(dir.path()).unwrap();
        assert_eq!(vocabularies.machine_readable.len(), 2);
        assert_eq!(vocabularies.non_proprietary.name(), "edp-non-proprietary-format");
    }

    #[test]
    fn test_shipped_vocabularies_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../vocabularies");
        let vocabularies = FormatVocabularies::load_dir(dir).unwrap();
        assert!(vocabularies
            .machine_readable
            .contains("http://publications.europa.eu/resource/authority/file-type/CSV"));
        assert!(!vocabularies
            .non_proprietary
            .contains("http://publications.europa.eu/resource/authority/file-type/XLS"));
    }
}
