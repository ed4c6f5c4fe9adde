//! Document serialization.
//!
//! Three exchange formats are supported, all backed by the sophia stack:
//! - **RDF/XML** ([`Format::RdfXml`]): the usual OWL exchange format (`.owl`, `.rdf`, `.xml`)
//! - **Turtle** ([`Format::Turtle`]): pretty-printed, nested blank nodes (`.ttl`)
//! - **N-Triples** ([`Format::NTriples`]): one triple per line (`.nt`)
//!
//! Anonymous nodes are written with fresh `n<index>` labels; serializers are
//! free to rename or inline them.

pub(crate) mod terms;

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use sophia_api::serializer::TripleSerializer;
use sophia_turtle::serializer::nt::NtSerializer;
use sophia_turtle::serializer::turtle::{TurtleConfig, TurtleSerializer};
use sophia_xml::serializer::RdfXmlSerializer;

use crate::error::{OntologyError, Result};
use crate::graph::Document;

/// A document exchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// RDF/XML.
    RdfXml,
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
}

impl Format {
    /// Infers the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_name(&ext)
    }

    /// Parses a format name or extension (`owl`, `rdf`, `xml`, `rdfxml`, `ttl`,
    /// `turtle`, `nt`, `ntriples`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "owl" | "rdf" | "xml" | "rdfxml" | "rdf/xml" => Some(Format::RdfXml),
            "ttl" | "turtle" => Some(Format::Turtle),
            "nt" | "ntriples" | "n-triples" => Some(Format::NTriples),
            _ => None,
        }
    }

    /// Like [`from_path`](Self::from_path), but fails with
    /// [`OntologyError::UnknownFormat`].
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or unrecognized.
    pub fn detect(path: &Path) -> Result<Self> {
        Self::from_path(path).ok_or_else(|| OntologyError::UnknownFormat(path.to_path_buf()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::RdfXml => "RDF/XML",
            Format::Turtle => "Turtle",
            Format::NTriples => "N-Triples",
        })
    }
}

/// Serializes `doc` into `out`.
///
/// # Errors
///
/// Returns [`OntologyError::Serialize`] if the serializer or the writer fails.
pub fn write_to<W: Write>(doc: &Document, format: Format, out: W) -> Result<()> {
    let triples = terms::export(doc);
    let fail = |message: String| OntologyError::Serialize { format, message };

    match format {
        Format::RdfXml => {
            let mut serializer = RdfXmlSerializer::new(out);
            serializer
                .serialize_graph(&triples)
                .map_err(|e| fail(e.to_string()))?;
        }
        Format::Turtle => {
            let config = TurtleConfig::new().with_pretty(true);
            let mut serializer = TurtleSerializer::new_with_config(out, config);
            serializer
                .serialize_graph(&triples)
                .map_err(|e| fail(e.to_string()))?;
        }
        Format::NTriples => {
            let mut serializer = NtSerializer::new(out);
            serializer
                .serialize_graph(&triples)
                .map_err(|e| fail(e.to_string()))?;
        }
    }
    Ok(())
}

/// Serializes `doc` to a string.
///
/// # Errors
///
/// Returns [`OntologyError::Serialize`] if serialization fails.
pub fn to_string(doc: &Document, format: Format) -> Result<String> {
    let mut buf = Vec::new();
    write_to(doc, format, &mut buf)?;
    String::from_utf8(buf).map_err(|e| OntologyError::Serialize {
        format,
        message: e.to_string(),
    })
}

/// Serializes `doc` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
/// The file may be left partially written in that case.
pub fn write_file(doc: &Document, format: Format, path: &Path) -> Result<()> {
    let file = fs::File::create(path).map_err(|source| OntologyError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write_to(doc, format, &mut out)?;
    out.flush().map_err(|source| OntologyError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), %format, triples = doc.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extensions() {
        assert_eq!(Format::from_path(Path::new("data/recipes.owl")), Some(Format::RdfXml));
        assert_eq!(Format::from_path(Path::new("data/recipes.TTL")), Some(Format::Turtle));
        assert_eq!(Format::from_path(Path::new("recipes.nt")), Some(Format::NTriples));
        assert_eq!(Format::from_path(Path::new("recipes")), None);
        assert!(matches!(
            Format::detect(Path::new("recipes.json")),
            Err(OntologyError::UnknownFormat(_))
        ));
    }

    #[test]
    fn format_names() {
        assert_eq!(Format::from_name("turtle"), Some(Format::Turtle));
        assert_eq!(Format::from_name("RDFXML"), Some(Format::RdfXml));
        assert_eq!(Format::RdfXml.to_string(), "RDF/XML");
    }
}
