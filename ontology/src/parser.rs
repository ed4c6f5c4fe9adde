//! Document loading from RDF/XML, Turtle and N-Triples.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sophia_api::source::TripleSource;
use sophia_api::term::Term;
use sophia_api::triple::Triple;
use tracing::{debug, info};

use crate::error::{OntologyError, Result};
use crate::graph::Document;
use crate::serializer::terms::Importer;
use crate::serializer::Format;

/// Parses a document held in memory.
///
/// # Errors
///
/// Returns [`OntologyError::Parse`] if `input` is not valid in `format`.
pub fn parse_str(input: &str, format: Format) -> Result<Document> {
    parse_reader(input.as_bytes(), format)
}

/// Parses a document from a buffered reader.
///
/// Blank-node labels are scoped to this one read: two labels that are equal
/// in the input denote the same node, and no parsed blank node ever aliases a
/// node minted later by [`Document::fresh_blank`]. Quoted triples and
/// variables are skipped.
///
/// # Errors
///
/// Returns [`OntologyError::Parse`] if the input is malformed.
pub fn parse_reader<R: BufRead>(reader: R, format: Format) -> Result<Document> {
    let outcome = match format {
        Format::RdfXml => import(sophia_xml::parser::parse_bufread(reader)),
        Format::Turtle => import(sophia_turtle::parser::turtle::parse_bufread(reader)),
        Format::NTriples => import(sophia_turtle::parser::nt::parse_bufread(reader)),
    };
    outcome.map_err(|message| OntologyError::Parse { format, message })
}

fn import<S: TripleSource>(mut source: S) -> std::result::Result<Document, String> {
    let mut doc = Document::new();
    let mut importer = Importer::default();
    let mut skipped = 0usize;

    source
        .for_each_triple(|t| {
            if !import_triple(&t, &mut importer, &mut doc) {
                skipped += 1;
            }
        })
        .map_err(|e| e.to_string())?;

    if skipped > 0 {
        debug!(skipped, "ignored triples with unsupported terms");
    }
    Ok(doc)
}

fn import_triple<T: Triple>(t: &T, importer: &mut Importer, doc: &mut Document) -> bool {
    let p = t.p();
    let Some(predicate) = p.iri() else {
        return false;
    };
    let predicate = predicate.as_str().to_owned();
    let subject = importer.node(doc, t.s());
    let object = importer.node(doc, t.o());
    match (subject, object) {
        (Some(subject), Some(object)) => {
            doc.insert(subject, &predicate, object);
            true
        }
        _ => false,
    }
}

/// Loads a document from disk.
///
/// The format is taken from `format` when given, otherwise inferred from the
/// file extension.
///
/// # Errors
///
/// Returns an error if the format cannot be inferred, the file cannot be
/// read, or its content does not parse.
pub fn load(path: &Path, format: Option<Format>) -> Result<Document> {
    let format = match format {
        Some(format) => format,
        None => Format::detect(path)?,
    };
    let file = fs::File::open(path).map_err(|source| OntologyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_reader(BufReader::new(file), format)?;
    info!(path = %path.display(), %format, triples = doc.len(), "loaded document");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{iris, Literal, Node};

    const SAMPLE: &str = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ro: <http://purl.org/ProductKG/RecipeOn#> .

ro:R1 a owl:Class ;
    ro:id "42" ;
    rdfs:label "Pancakes"@en ;
    rdfs:subClassOf [ a owl:Restriction ; owl:onProperty ro:p ; owl:someValuesFrom ro:T ] .
"#;

    #[test]
    fn turtle_terms_are_imported() {
        let doc = parse_str(SAMPLE, Format::Turtle).unwrap();
        assert_eq!(doc.len(), 7);

        let r1 = Node::named("http://purl.org/ProductKG/RecipeOn#R1");
        assert!(doc.has_type(&r1, iris::OWL_CLASS));
        assert!(doc.contains(&r1, iris::RECIPE_ID, &Node::Literal(Literal::string("42"))));
        assert!(doc.contains(
            &r1,
            "http://www.w3.org/2000/01/rdf-schema#label",
            &Node::Literal(Literal::lang("Pancakes", "en"))
        ));

        let restriction = doc.object(&r1, iris::RDFS_SUBCLASS_OF).unwrap();
        assert!(restriction.is_blank());
        assert!(doc.has_type(&restriction, iris::OWL_RESTRICTION));
    }

    #[test]
    fn ntriples_blank_labels_are_shared() {
        let input = "_:a <http://example.org/p> _:b .\n_:b <http://example.org/p> _:a .\n";
        let doc = parse_str(input, Format::NTriples).unwrap();
        let triples: Vec<_> = doc.triples().cloned().collect();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject, triples[1].object);
        assert_eq!(triples[0].object, triples[1].subject);
    }

    #[test]
    fn fresh_blanks_never_alias_parsed_ones() {
        let input = "_:n0 <http://example.org/p> <http://example.org/o> .\n";
        let mut doc = parse_str(input, Format::NTriples).unwrap();
        let parsed = doc.triples().next().unwrap().subject.clone();
        assert_ne!(doc.fresh_blank(), parsed);
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let err = parse_str("<http://example.org/s> <http://example.org/p> .", Format::NTriples)
            .unwrap_err();
        assert!(matches!(err, OntologyError::Parse { format: Format::NTriples, .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load(Path::new("/nonexistent/recipes.ttl"), None).unwrap_err();
        assert!(matches!(err, OntologyError::Read { .. }));
    }

    #[test]
    fn rdfxml_predicates_are_imported() {
        let xml = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://purl.org/ProductKG/RecipeOn#R1">
    <rdfs:subClassOf rdf:resource="http://purl.org/ProductKG/RecipeOn#Recipe"/>
  </owl:Class>
</rdf:RDF>
"#;
        let doc = parse_str(xml, Format::RdfXml).unwrap();
        let r1 = Node::named("http://purl.org/ProductKG/RecipeOn#R1");
        assert_eq!(doc.len(), 2);
        assert!(doc.has_type(&r1, iris::OWL_CLASS));
        assert!(doc.contains(&r1, iris::RDFS_SUBCLASS_OF, &Node::named(iris::RECIPE)));
    }
}
