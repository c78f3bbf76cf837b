//! SPARQL 1.1 Query Results JSON decoding.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::trace;

use termgraph_core::{Error, RdfTerm, Result, Row, TermType};

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    results: Option<ResultsBody>,
    #[serde(default)]
    boolean: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ResultsBody {
    #[serde(default)]
    bindings: Vec<BTreeMap<String, JsonTerm>>,
}

#[derive(Debug, Deserialize)]
struct JsonTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default, rename = "xml:lang", alias = "lang")]
    language: Option<String>,
    #[serde(default)]
    datatype: Option<String>,
}

impl JsonTerm {
    fn into_rdf_term(self) -> Option<RdfTerm> {
        let term_type = match self.kind.as_str() {
            "uri" => TermType::NamedNode,
            "bnode" => TermType::BlankNode,
            "literal" | "typed-literal" => TermType::Literal,
            _ => return None,
        };
        Some(RdfTerm {
            term_type,
            value: self.value,
            language: self.language,
            datatype: self.datatype,
        })
    }
}

/// Decode a SELECT response body into rows, preserving solution order.
///
/// Bindings of an unknown term type are dropped from their row.
pub fn parse_select(body: &str) -> Result<Vec<Row>> {
    let document: ResultsDocument = serde_json::from_str(body)
        .map_err(|e| Error::Query(format!("Invalid SPARQL results document: {}", e)))?;

    if document.boolean.is_some() {
        return Err(Error::Query(
            "Expected SELECT results, got an ASK result".to_string(),
        ));
    }

    let body = document
        .results
        .ok_or_else(|| Error::Query("Missing 'results' in SPARQL response".to_string()))?;

    let rows = body
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .filter_map(|(variable, term)| {
                    let kind = term.kind.clone();
                    match term.into_rdf_term() {
                        Some(term) => Some((variable, term)),
                        None => {
                            trace!(variable = %variable, kind = %kind, "Dropping binding of unknown type");
                            None
                        }
                    }
                })
                .collect::<Row>()
        })
        .collect();

    Ok(rows)
}
